//! Loading plain text from web pages, files and stdin.
//!
//! A [`TextSource`] names where text comes from; a [`SourceLoader`] fetches
//! or reads it, enforces the size limit and converts HTML or Markdown to
//! plain text ready for [`tokenize`](crate::tokenize).
//!
//! Loading either succeeds with the complete text or fails without side
//! effects, so a failed source never leaves words half-inserted into a
//! dictionary.

pub mod html;
pub mod markdown;

use std::io::Read;
use std::sync::OnceLock;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use encoding_rs::{Encoding, UTF_8};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{SourceError, SourceResult};

pub use html::html_to_text;
pub use markdown::markdown_to_text;

/// Default timeout for fetching a page (connect + response).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` header sent with requests.
pub const DEFAULT_USER_AGENT: &str = concat!("wordtally/", env!("CARGO_PKG_VERSION"));

/// Where to read text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// An `http://` or `https://` address.
    Url(String),
    /// A local file.
    File(Utf8PathBuf),
    /// Standard input.
    Stdin,
}

impl TextSource {
    /// Interpret a command-line argument.
    ///
    /// `http://` and `https://` prefixes mean a URL, `-` means stdin, and
    /// anything else is a file path.
    pub fn parse(arg: &str) -> Self {
        let lower = arg.get(..8).unwrap_or(arg).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(arg.to_string())
        } else if arg == "-" {
            Self::Stdin
        } else {
            Self::File(Utf8PathBuf::from(arg))
        }
    }
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => f.write_str(path.as_str()),
            Self::Stdin => f.write_str("-"),
        }
    }
}

/// How raw input is turned into plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Used as is.
    Plain,
    /// Visible text of an HTML document.
    Html,
    /// Prose of a Markdown document.
    Markdown,
}

impl TextFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext?.to_ascii_lowercase().as_str() {
            "html" | "htm" | "xhtml" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Markdown),
            "txt" | "text" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Guess the format from an HTTP `Content-Type` value.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "text/html" | "application/xhtml+xml" => Some(Self::Html),
            "text/markdown" | "text/x-markdown" => Some(Self::Markdown),
            "text/plain" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Guess the format from the content itself: HTML if it opens like an
    /// HTML document, plain otherwise.
    pub fn sniff(raw: &str) -> Self {
        let head: String = raw.trim_start().chars().take(15).collect();
        let head = head.to_ascii_lowercase();
        if head.starts_with("<!doctype html") || head.starts_with("<html") {
            Self::Html
        } else {
            Self::Plain
        }
    }

    /// Convert `raw` input in this format to plain text.
    pub fn to_plain_text(self, raw: &str) -> String {
        match self {
            Self::Plain => raw.to_string(),
            Self::Html => html_to_text(raw),
            Self::Markdown => markdown_to_text(raw),
        }
    }
}

/// Fetches and reads text sources.
///
/// The HTTP client is created on the first URL load and reused afterwards.
#[derive(Debug)]
pub struct SourceLoader {
    timeout: Duration,
    max_bytes: Option<u64>,
    user_agent: String,
    client: OnceLock<Client>,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceLoader {
    /// Create a loader with the default timeout and no size limit.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_bytes: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client: OnceLock::new(),
        }
    }

    /// Set the request timeout for URL sources.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject inputs larger than `max_bytes`. `None` disables the check.
    pub const fn with_max_bytes(mut self, max_bytes: Option<u64>) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set the `User-Agent` header for URL sources.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The configured request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load `source` and return its plain text.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub fn load(&self, source: &TextSource) -> SourceResult<String> {
        let text = match source {
            TextSource::Url(url) => self.load_url(url)?,
            TextSource::File(path) => self.load_file(path)?,
            TextSource::Stdin => self.load_reader("-", std::io::stdin().lock(), None)?,
        };
        tracing::debug!(text_len = text.len(), "source loaded");
        Ok(text)
    }

    /// Read everything from `reader`, enforcing the size limit, and convert
    /// it using `format` (sniffed from the content when `None`).
    pub fn load_reader(
        &self,
        origin: &str,
        reader: impl Read,
        format: Option<TextFormat>,
    ) -> SourceResult<String> {
        let raw = self.read_limited(origin, reader)?;
        Ok(convert(&decode(&raw, None, format), format))
    }

    fn load_file(&self, path: &Utf8Path) -> SourceResult<String> {
        let io_err = |source| SourceError::Io {
            origin: path.to_string(),
            source,
        };

        // Preflight: check the size before reading into memory.
        let metadata = std::fs::metadata(path.as_std_path()).map_err(io_err)?;
        self.check_size(path.as_str(), metadata.len())?;

        let raw = std::fs::read(path.as_std_path()).map_err(io_err)?;
        let format = TextFormat::from_extension(path.extension());
        Ok(convert(&decode(&raw, None, format), format))
    }

    fn load_url(&self, url: &str) -> SourceResult<String> {
        let parsed = reqwest::Url::parse(url).map_err(|e| SourceError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        tracing::debug!(url, timeout_ms = self.timeout.as_millis() as u64, "fetching page");
        let response = self
            .client()?
            .get(parsed)
            .send()
            .map_err(|source| SourceError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        if let Some(len) = response.content_length() {
            self.check_size(url, len)?;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let format = content_type.as_deref().and_then(TextFormat::from_content_type);
        let charset = content_type.as_deref().and_then(charset_from_content_type);
        let raw = self.read_limited(url, response)?;
        Ok(convert(&decode(&raw, charset, format), format))
    }

    fn client(&self) -> SourceResult<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(SourceError::Client)?;
        Ok(self.client.get_or_init(|| client))
    }

    fn check_size(&self, origin: &str, size: u64) -> SourceResult<()> {
        match self.max_bytes {
            Some(limit) if size > limit => Err(SourceError::TooLarge {
                origin: origin.to_string(),
                size,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Read at most one byte past the limit so oversized streams are detected
    /// without buffering them whole.
    fn read_limited(&self, origin: &str, reader: impl Read) -> SourceResult<Vec<u8>> {
        let mut buf = Vec::new();
        let read = match self.max_bytes {
            Some(limit) => reader.take(limit.saturating_add(1)).read_to_end(&mut buf),
            None => {
                let mut reader = reader;
                reader.read_to_end(&mut buf)
            }
        };
        read.map_err(|source| SourceError::Io {
            origin: origin.to_string(),
            source,
        })?;
        self.check_size(origin, buf.len() as u64)?;
        Ok(buf)
    }
}

/// The encoding named by the `charset` parameter of a `Content-Type` value.
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches(['"', '\'']).as_bytes())
    })
}

/// The encoding declared by a `<meta>` tag near the start of an HTML page.
fn meta_charset(raw: &[u8]) -> Option<&'static Encoding> {
    let head = raw[..raw.len().min(1024)].to_ascii_lowercase();
    let meta = find(&head, b"<meta")?;
    let at = meta + find(&head[meta..], b"charset=")? + b"charset=".len();
    let label: Vec<u8> = head[at..]
        .iter()
        .skip_while(|b| matches!(b, b'"' | b'\''))
        .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'))
        .copied()
        .collect();
    // A page cannot declare UTF-16 from inside an ASCII-compatible byte stream.
    Encoding::for_label(&label).map(Encoding::output_encoding)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Decode `raw` bytes to text.
///
/// A byte order mark wins, then the declared charset, then a `<meta>`
/// declaration for HTML (or unknown) input, then UTF-8. Malformed sequences
/// become U+FFFD.
fn decode(raw: &[u8], declared: Option<&'static Encoding>, format: Option<TextFormat>) -> String {
    let encoding = declared
        .or_else(|| match format {
            Some(TextFormat::Html) | None => meta_charset(raw),
            Some(_) => None,
        })
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(raw);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced malformed input");
    }
    text.into_owned()
}

fn convert(raw: &str, format: Option<TextFormat>) -> String {
    format
        .unwrap_or_else(|| TextFormat::sniff(raw))
        .to_plain_text(raw)
}
