use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::{GetError, ParseError};
use crate::open::{self, OpenFile};
use crate::parser;
use crate::section::Section;

/// A loaded configuration: section name to [`Section`].
///
/// Built once by one of the parse functions and never modified afterwards, so it can be shared
/// between readers freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: HashMap<String, Section>,
}

impl Config {
    pub(crate) fn new(sections: HashMap<String, Section>) -> Self {
        Self { sections }
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse_lines(text.lines().map(Ok::<_, io::Error>))
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        parser::parse_lines(lines)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        parser::parse_lines(reader.lines())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_owned(),
            source,
        })?;

        debug!(path = %path.display(), "loading configuration");
        Self::from_reader(BufReader::new(file))
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Iterates over all sections in arbitrary order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up `key` in `section`. Both names are matched exactly.
    pub fn get_str(&self, section: &str, key: &str) -> Result<&str, GetError> {
        self.section(section)
            .and_then(|s| s.get(key))
            .ok_or_else(|| GetError::NotFound {
                section: section.to_owned(),
                key: key.to_owned(),
            })
    }

    #[must_use]
    pub fn get_string_or(&self, section: &str, key: &str, default: &str) -> String {
        self.get_str(section, key).unwrap_or(default).to_owned()
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<i64, GetError> {
        let value = self.get_str(section, key)?;
        value.parse().map_err(|source| GetError::NotInt {
            value: value.to_owned(),
            source,
        })
    }

    /// Like [`Config::get_int`], but returns `default` if the key does not exist. A value that
    /// exists but is not an integer is still an error.
    pub fn get_int_or(&self, section: &str, key: &str, default: i64) -> Result<i64, GetError> {
        or_default(self.get_int(section, key), default)
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<f64, GetError> {
        let value = self.get_str(section, key)?;
        value.parse().map_err(|source| GetError::NotFloat {
            value: value.to_owned(),
            source,
        })
    }

    pub fn get_float_or(&self, section: &str, key: &str, default: f64) -> Result<f64, GetError> {
        or_default(self.get_float(section, key), default)
    }

    /// `true`, `on`, `yes`, `y` and `1` are true; `false`, `off`, `no`, `n` and `0` are false.
    /// Case is ignored. Anything else is [`GetError::NotBool`].
    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool, GetError> {
        let value = self.get_str(section, key)?;
        parse_bool(value).ok_or_else(|| GetError::NotBool {
            value: value.to_owned(),
        })
    }

    pub fn get_bool_or(&self, section: &str, key: &str, default: bool) -> Result<bool, GetError> {
        or_default(self.get_bool(section, key), default)
    }

    pub fn get_path(&self, section: &str, key: &str) -> Result<PathBuf, GetError> {
        self.get_str(section, key).map(PathBuf::from)
    }

    /// Opens the file named by the value using `opener`.
    pub fn get_file_with<O: OpenFile>(
        &self,
        opener: O,
        section: &str,
        key: &str,
    ) -> Result<O::Handle, GetError> {
        let path = self.get_path(section, key)?;

        debug!(section, key, path = %path.display(), "opening configured file");
        opener
            .open_file(&path)
            .map_err(|source| GetError::Open { path, source })
    }

    pub fn get_file(
        &self,
        section: &str,
        key: &str,
        options: &OpenOptions,
    ) -> Result<File, GetError> {
        self.get_file_with(options, section, key)
    }

    pub fn get_file_readonly(&self, section: &str, key: &str) -> Result<File, GetError> {
        self.get_file_with(open::read_only(), section, key)
    }
}

impl FromStr for Config {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn or_default<T>(result: Result<T, GetError>, default: T) -> Result<T, GetError> {
    match result {
        Err(GetError::NotFound { .. }) => Ok(default),
        other => other,
    }
}

/// Interprets `value` the way [`Config::get_bool`] does.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "y" | "1" => Some(true),
        "false" | "off" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    const FIXTURE: &str = "; I am just a comment.
    # Me too!
[foo]
 a = Hello, World!
b=1337
c= on
[bar]
trololo\t\t\t= 1.5
file =     /dev/zero";

    fn fixture() -> Config {
        Config::parse(FIXTURE).expect("failed to parse hardcoded config")
    }

    /// Records requested paths instead of touching the filesystem.
    #[derive(Default)]
    struct FakeOpener {
        opened: RefCell<Vec<PathBuf>>,
        fail: Option<io::ErrorKind>,
    }

    impl OpenFile for FakeOpener {
        type Handle = PathBuf;

        fn open_file(&self, path: &Path) -> io::Result<PathBuf> {
            if let Some(kind) = self.fail {
                return Err(io::Error::from(kind));
            }
            self.opened.borrow_mut().push(path.to_owned());
            Ok(path.to_owned())
        }
    }

    #[test]
    fn typed_getters() {
        let config = fixture();

        assert_eq!(config.get_str("foo", "a").ok(), Some("Hello, World!"));
        assert_eq!(config.get_int("foo", "b").ok(), Some(1337));
        assert_eq!(config.get_bool("foo", "c").ok(), Some(true));
        assert_eq!(config.get_float("bar", "trololo").ok(), Some(1.5));
        assert_eq!(config.get_path("bar", "file").ok(), Some(PathBuf::from("/dev/zero")));
        assert_eq!(config.get_string_or("baz", "bla", "?"), "?");
    }

    #[test]
    fn missing_section_and_missing_key_are_not_found() {
        let config = fixture();

        assert!(matches!(
            config.get_str("baz", "a"),
            Err(GetError::NotFound { .. })
        ));
        assert!(matches!(
            config.get_int("foo", "missing"),
            Err(GetError::NotFound { .. })
        ));
        assert!(matches!(
            config.get_bool("FOO", "c"),
            Err(GetError::NotFound { .. })
        ));
    }

    #[test]
    fn defaults_only_replace_missing_values() {
        let config = fixture();

        assert_eq!(config.get_int_or("foo", "missing", 7).ok(), Some(7));
        assert_eq!(config.get_float_or("baz", "x", 2.5).ok(), Some(2.5));
        assert_eq!(config.get_bool_or("baz", "x", true).ok(), Some(true));
        assert_eq!(config.get_string_or("foo", "a", "?"), "Hello, World!");
        assert_eq!(config.get_int_or("foo", "b", 7).ok(), Some(1337));
    }

    #[test]
    fn conversion_errors_are_never_defaulted() {
        let config = Config::parse("[s]\nword = abc\nnum = 12.5\n")
            .expect("failed to parse hardcoded config");

        assert!(matches!(
            config.get_int_or("s", "word", 0),
            Err(GetError::NotInt { ref value, .. }) if value == "abc"
        ));
        assert!(matches!(
            config.get_int("s", "num"),
            Err(GetError::NotInt { .. })
        ));
        assert!(matches!(
            config.get_float_or("s", "word", 0.0),
            Err(GetError::NotFloat { .. })
        ));
        assert!(matches!(
            config.get_bool_or("s", "num", false),
            Err(GetError::NotBool { ref value }) if value == "12.5"
        ));
    }

    #[test]
    fn numbers_follow_standard_parsing() {
        let config = Config::parse("[n]\nneg = -42\nplus = +8\nexp = -1.5e3\nspace = 1 2\n")
            .expect("failed to parse hardcoded config");

        assert_eq!(config.get_int("n", "neg").ok(), Some(-42));
        assert_eq!(config.get_int("n", "plus").ok(), Some(8));
        assert_eq!(config.get_float("n", "exp").ok(), Some(-1500.0));
        assert!(config.get_int("n", "space").is_err());
    }

    #[test]
    fn boolean_literals() {
        for value in ["true", "on", "yes", "y", "1", "TRUE", "On", "Y"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["false", "off", "no", "n", "0", "False", "OFF", "N"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        for value in ["", "2", "enabled", "t", "yes!", " yes"] {
            assert_eq!(parse_bool(value), None, "{value}");
        }
    }

    #[test]
    fn file_getter_uses_opener() {
        let config = fixture();
        let opener = FakeOpener::default();

        let handle = config
            .get_file_with(&opener, "bar", "file")
            .expect("fake opener should succeed");

        assert_eq!(handle, PathBuf::from("/dev/zero"));
        assert_eq!(*opener.opened.borrow(), vec![PathBuf::from("/dev/zero")]);
    }

    #[test]
    fn file_getter_propagates_lookup_failure() {
        let config = fixture();
        let opener = FakeOpener::default();

        assert!(matches!(
            config.get_file_with(&opener, "bar", "missing"),
            Err(GetError::NotFound { .. })
        ));
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn file_getter_propagates_open_failure() {
        let config = fixture();
        let opener = FakeOpener {
            fail: Some(io::ErrorKind::PermissionDenied),
            ..FakeOpener::default()
        };

        match config.get_file_with(&opener, "bar", "file") {
            Err(GetError::Open { path, source }) => {
                assert_eq!(path, PathBuf::from("/dev/zero"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected an open failure, got {other:?}"),
        }
    }

    #[test]
    fn from_str_and_from_reader_agree() {
        let parsed: Config = FIXTURE.parse().expect("failed to parse hardcoded config");
        let read = Config::from_reader(FIXTURE.as_bytes()).expect("failed to read hardcoded config");

        assert_eq!(parsed, read);
        assert_eq!(parsed.len(), 2);
        assert!(parsed.contains_section("foo"));
    }

    #[test]
    fn missing_config_file() {
        let err = Config::from_path("/nonexistent/simpleconf.conf")
            .expect_err("nonexistent path should fail");

        assert!(matches!(err, ParseError::Open { .. }));
    }
}
