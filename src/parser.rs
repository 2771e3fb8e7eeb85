use std::collections::HashMap;
use std::io;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{ParseError, SyntaxError};
use crate::section::Section;

/// Represents an on-going parse.
///
/// Lines are fed in order with [`Parser::feed_line`]; the finished [`Config`] is only produced by
/// [`Parser::finish`], so a failure on any line leaves nothing behind.
#[derive(Debug, Default)]
pub struct Parser {
    sections: HashMap<String, Section>,
    active: Option<Section>,
    line: usize,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn feed_line(&mut self, raw: &str) -> Result<(), ParseError> {
        self.line += 1;

        self.parse_line(raw).map_err(|kind| ParseError::Syntax {
            line: self.line,
            kind,
        })
    }

    /// Commits the active section, if a header was ever seen, and hands back the result.
    #[must_use]
    pub fn finish(mut self) -> Config {
        self.commit();
        debug!(
            sections = self.sections.len(),
            lines = self.line,
            "parsed configuration"
        );
        Config::new(self.sections)
    }

    fn parse_line(&mut self, raw: &str) -> Result<(), SyntaxError> {
        let line = raw.trim();

        match line.chars().next() {
            None | Some(';' | '#') => Ok(()),
            Some('[') => {
                let name = parse_section_header(line)?;
                self.commit();
                self.active = Some(Section::new(name.to_owned()));
                Ok(())
            }
            Some(_) => {
                let (key, value) = parse_key_value(line)?;
                let section = self.active.as_mut().ok_or(SyntaxError::NoActiveSection)?;
                section.insert(key.to_owned(), value.to_owned());
                Ok(())
            }
        }
    }

    /// A repeated section name replaces the earlier section entirely.
    fn commit(&mut self) {
        if let Some(section) = self.active.take() {
            trace!(
                section = section.name(),
                entries = section.len(),
                "committing section"
            );
            self.sections.insert(section.name().to_owned(), section);
        }
    }
}

/// Feeds every line to a fresh [`Parser`]. The line producer may fail, in which case the
/// failing line number is reported alongside the I/O error.
pub fn parse_lines<I, S>(lines: I) -> Result<Config, ParseError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut parser = Parser::new();

    for line in lines {
        match line {
            Ok(line) => parser.feed_line(line.as_ref())?,
            Err(source) => {
                return Err(ParseError::ReadFailure {
                    line: parser.line() + 1,
                    source,
                });
            }
        }
    }

    Ok(parser.finish())
}

/// `line` is already trimmed and starts with '['.
fn parse_section_header(line: &str) -> Result<&str, SyntaxError> {
    let inner = line.strip_prefix('[').unwrap_or(line);
    let (name, rest) = inner
        .split_once(']')
        .ok_or(SyntaxError::MalformedSectionHeader)?;

    if !rest.is_empty() {
        return Err(SyntaxError::TrailingDataAfterSectionHeader);
    }
    if name.is_empty() {
        return Err(SyntaxError::EmptySectionName);
    }

    Ok(name)
}

/// Splits on the first '='. Everything after it is the value, including ';' and '#'.
fn parse_key_value(line: &str) -> Result<(&str, &str), SyntaxError> {
    let (key, value) = line.split_once('=').ok_or(SyntaxError::NotAKeyValuePair)?;
    let key = key.trim();

    if key.is_empty() {
        return Err(SyntaxError::EmptyKey);
    }

    Ok((key, value.trim()))
}
