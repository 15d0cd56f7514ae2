pub use dynamic::Dynamic;
pub use exact::Exact;

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

mod dynamic;
mod exact;

/// Path parameters captured by a match, keyed by name.
pub type Params = HashMap<String, String>;

const PARAM_VALUE_PATTERN: &str = "([^/]+)";

lazy_static! {
    static ref PARAM_NAME_PATTERN: Regex = Regex::new(":[A-Za-z0-9_]+").unwrap();
}

/// A route template after compilation.
///
/// Templates without any `:name` token stay `Exact` and are matched by string
/// equality. Everything else becomes an anchored pattern.
#[derive(Debug, Clone)]
pub enum CompiledPath {
    Exact(Exact),
    Dynamic(Dynamic),
}

impl CompiledPath {
    pub fn matches(&self, request_path: &str) -> Option<Params> {
        match self {
            Self::Exact(exact) => exact.is_match(request_path).then(Params::new),
            Self::Dynamic(dynamic) => dynamic.captures(request_path),
        }
    }

    pub fn param_names(&self) -> &[String] {
        match self {
            Self::Exact(_) => &[],
            Self::Dynamic(dynamic) => dynamic.param_names(),
        }
    }
}

/// Compiles a route template. Any string is accepted.
///
/// Text around the `:name` tokens is escaped, so it only ever matches
/// itself: `/files/:name.json` matches `/files/7.json` but not `/files/7xjson`.
pub fn compile(path: &str) -> CompiledPath {
    let mut param_names = vec![];
    let mut pattern = String::from("^");
    let mut last = 0;

    for token in PARAM_NAME_PATTERN.find_iter(path) {
        pattern.push_str(&regex::escape(&path[last..token.start()]));
        pattern.push_str(PARAM_VALUE_PATTERN);
        param_names.push(token.as_str()[1..].to_owned());
        last = token.end();
    }

    if param_names.is_empty() {
        return CompiledPath::Exact(Exact::new(path));
    }

    pattern.push_str(&regex::escape(&path[last..]));
    pattern.push('$');

    match Regex::new(&pattern) {
        Ok(regex) => CompiledPath::Dynamic(Dynamic::new(regex, param_names)),
        Err(err) => {
            warn!(?err, path, "falling back to exact match");
            CompiledPath::Exact(Exact::new(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compile, CompiledPath};

    #[test]
    fn test_compile_exact() {
        let paths = [
            "/",
            "/items",
            "/items/",
            "",
            "/a:/b",
            "/k/:\u{212A}",
            "/s/:\u{017F}",
        ];
        for path in paths {
            let compiled = compile(path);
            assert!(
                matches!(compiled, CompiledPath::Exact(_)),
                "{path:?} should compile to an exact match"
            );
            assert!(compiled.param_names().is_empty());
        }
    }

    #[test]
    fn test_compile_dynamic() {
        let tests: [(&str, &[&str]); 6] = [
            ("/users/:id", &["id"]),
            ("/users/:id/orders/:orderId", &["id", "orderId"]),
            (":only", &["only"]),
            ("/:a/:b", &["a", "b"]),
            ("/files/:file_name", &["file_name"]),
            ("/v:version/items", &["version"]),
        ];

        for (path, want) in tests {
            let compiled = compile(path);
            assert!(matches!(compiled, CompiledPath::Dynamic(_)));
            assert_eq!(compiled.param_names(), want);
        }
    }

    #[test]
    fn test_compile_stops_name_at_non_word_char() {
        let compiled = compile("/items/:id.json");
        assert_eq!(compiled.param_names(), ["id"]);

        let params = compiled.matches("/items/7.json").unwrap();
        assert_eq!(params["id"], "7");
        assert!(compiled.matches("/items/7xjson").is_none());
    }

    #[test]
    fn test_non_ascii_name_chars_end_the_token() {
        let compiled = compile("/k/:id\u{212A}");
        assert_eq!(compiled.param_names(), ["id"]);
        assert!(compiled.matches("/k/7\u{212A}").is_some());
        assert!(compiled.matches("/k/7K").is_none());

        assert!(compile("/k/:\u{212A}").matches("/k/anything").is_none());
    }

    #[test]
    fn test_literal_text_is_not_a_pattern() {
        let compiled = compile("/a.b/:id");
        assert!(compiled.matches("/a.b/1").is_some());
        assert!(compiled.matches("/axb/1").is_none());

        let compiled = compile("/(/:id");
        assert!(compiled.matches("/(/1").is_some());
    }

    #[test]
    fn test_matches_exact_has_no_params() {
        let params = compile("/a/b").matches("/a/b").unwrap();
        assert!(params.is_empty());
    }
}
