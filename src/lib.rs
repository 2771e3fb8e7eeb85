//! A parser for a very small INI-like configuration format, plus typed accessors over the result.
//!
//! A file consists of lines, each of which is one of:
//!
//! - **Comment**: the first non-whitespace character is `;` or `#`. Comments only exist on their
//!   own line.
//! - **Section header**: `[name]`, naming the section that following pairs belong to. The name
//!   must not be empty and nothing may follow the closing `]`.
//! - **Key-value pair**: `key = value`, split at the first `=`. Keys must not be empty, and every
//!   pair must belong to a section. Everything after the `=` is the value, so `;` or `#` there
//!   are kept verbatim.
//!
//! Leading and trailing whitespace is removed from every line, key and value.
//!
//! ```
//! use simpleconf::Config;
//!
//! let config = Config::parse(
//!     "[foo]
//! test = Hello, World!
//! answer = 42
//!
//! ; I am a comment.
//! ## I am also a comment
//! [bar]
//! trololo = bla.. ; I am NOT a comment
//! ",
//! )?;
//!
//! assert_eq!(config.get_str("foo", "test")?, "Hello, World!");
//! assert_eq!(config.get_int("foo", "answer")?, 42);
//! assert_eq!(config.get_str("bar", "trololo")?, "bla.. ; I am NOT a comment");
//! assert!(!config.get_bool_or("bar", "verbose", false)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod config;
mod error;
mod open;
mod parser;
mod section;

pub use config::{Config, parse_bool};
pub use error::{GetError, ParseError, SyntaxError};
pub use open::{OpenFile, read_only};
pub use parser::{Parser, parse_lines};
pub use section::Section;
