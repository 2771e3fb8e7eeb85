use std::collections::HashMap;

/// A named group of key-value pairs, introduced by a `[name]` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: HashMap<String, String>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entries: HashMap::with_capacity(16),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw (trimmed) value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over all `(key, value)` pairs in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last assignment wins.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_overwrites() {
        let mut section = Section::new("foo".to_owned());
        section.insert("a".to_owned(), "1".to_owned());
        section.insert("a".to_owned(), "2".to_owned());

        assert_eq!(section.len(), 1);
        assert_eq!(section.get("a"), Some("2"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut section = Section::new("foo".to_owned());
        section.insert("Key".to_owned(), "value".to_owned());

        assert!(section.contains_key("Key"));
        assert!(!section.contains_key("key"));
        assert_eq!(section.get("KEY"), None);
    }

    #[test]
    fn empty_value_is_kept() {
        let mut section = Section::new("foo".to_owned());
        section.insert("blank".to_owned(), String::new());

        assert!(!section.is_empty());
        assert_eq!(section.get("blank"), Some(""));
    }
}
