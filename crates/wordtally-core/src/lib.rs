//! Core library for wordtally.
//!
//! Word and letter frequency statistics over text pulled from web pages,
//! files or stdin. Used by the `wordtally` CLI and MCP server.
//!
//! # Modules
//!
//! - [`dictionary`] - The [`Dictionary`] trait and its trie and ordered-map implementations
//! - [`tokenize`] - Splitting text into words
//! - [`source`] - Loading text from URLs, files and stdin
//! - [`report`] - Serializable summaries of a dictionary
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use wordtally_core::{Backend, DictionaryReport, ReportOptions, SourceLoader, TextSource};
//! use wordtally_core::dictionary::insert_all;
//!
//! let text = SourceLoader::new()
//!     .load(&TextSource::parse("https://example.com"))
//!     .expect("failed to load page");
//!
//! let mut dict = Backend::Trie.build();
//! insert_all(&mut *dict, wordtally_core::tokenize::words(&text));
//!
//! let report = DictionaryReport::build(&*dict, &ReportOptions::default());
//! println!("{} words, longest: {:?}", report.total_words, report.longest_words);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod report;
pub mod source;
pub mod tokenize;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use dictionary::{
    Backend, Dictionary, LetterCount, NOT_FOUND, OrderedDictionary, TrieDictionary, WordFrequency,
};
pub use error::{ConfigError, ConfigResult, SourceError, SourceResult};
pub use report::{DictionaryReport, FrequencyOrder, LookupEntry, LookupReport, ReportOptions};
pub use source::{SourceLoader, TextFormat, TextSource};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;
