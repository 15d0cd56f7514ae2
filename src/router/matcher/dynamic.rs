use regex::Regex;

use super::Params;

/// A template with one or more `:name` tokens.
///
/// Group `i` of the pattern always belongs to `param_names[i]`.
#[derive(Debug, Clone)]
pub struct Dynamic {
    pattern: Regex,
    param_names: Vec<String>,
}

impl Dynamic {
    pub(super) fn new(pattern: Regex, param_names: Vec<String>) -> Self {
        debug_assert_eq!(pattern.captures_len(), param_names.len() + 1);
        Self {
            pattern,
            param_names,
        }
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn captures(&self, request_path: &str) -> Option<Params> {
        let captures = self.pattern.captures(request_path)?;
        let params = self
            .param_names
            .iter()
            .zip(captures.iter().skip(1))
            .filter_map(|(name, value)| Some((name.clone(), value?.as_str().to_owned())))
            .collect();
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{compile, CompiledPath};

    use super::Dynamic;

    fn dynamic(path: &str) -> Dynamic {
        match compile(path) {
            CompiledPath::Dynamic(dynamic) => dynamic,
            CompiledPath::Exact(_) => panic!("{path} compiled to an exact match"),
        }
    }

    #[test]
    fn test_dynamic_match() {
        let users = dynamic("/users/:id");
        let params = users.captures("/users/42").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["id"], "42");

        let pair = dynamic("/a/:x/:y");
        let params = pair.captures("/a/1/2").unwrap();
        assert_eq!(params["x"], "1");
        assert_eq!(params["y"], "2");
    }

    #[test]
    fn test_dynamic_no_match() {
        let users = dynamic("/users/:id");
        assert!(users.captures("/users").is_none());
        assert!(users.captures("/users/").is_none());
        assert!(users.captures("/users/42/x").is_none());
        assert!(users.captures("/users/42/").is_none());
        assert!(users.captures("/api/users/42").is_none());
        assert!(users.captures("/usersx/42").is_none());
    }

    #[test]
    fn test_dynamic_keeps_raw_values() {
        let users = dynamic("/users/:id");
        let params = users.captures("/users/a%20b").unwrap();
        assert_eq!(params["id"], "a%20b");
    }

    #[test]
    fn test_dynamic_repeated_name_last_wins() {
        let twice = dynamic("/:id/:id");
        assert_eq!(twice.param_names(), ["id", "id"]);

        let params = twice.captures("/first/second").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["id"], "second");
    }

    #[test]
    fn test_dynamic_param_only() {
        let only = dynamic(":name");
        assert_eq!(only.captures("anything").unwrap()["name"], "anything");
        assert!(only.captures("/anything").is_none());
    }
}
