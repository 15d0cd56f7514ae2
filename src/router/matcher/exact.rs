/// A template with no parameter tokens, matched by plain string equality.
#[derive(Debug, Clone)]
pub struct Exact(String);

impl Exact {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn is_match(&self, request_path: &str) -> bool {
        self.0 == request_path
    }
}

#[cfg(test)]
mod tests {
    use super::Exact;

    #[test]
    fn test_exact() {
        let exact = Exact::new("/a/b");
        assert!(exact.is_match("/a/b"));

        let root = Exact::new("/");
        assert!(root.is_match("/"));
    }

    #[test]
    fn test_exact_no_match() {
        let exact = Exact::new("/a/b");
        assert!(!exact.is_match("/a/b/"));
        assert!(!exact.is_match("/a/c"));
        assert!(!exact.is_match("/A/B"));
        assert!(!exact.is_match("/a/%62"));

        let trailing = Exact::new("/items/");
        assert!(!trailing.is_match("/items"));
        assert!(trailing.is_match("/items/"));
    }
}
