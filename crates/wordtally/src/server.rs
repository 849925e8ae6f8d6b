//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes word statistics over the MCP protocol so AI assistants can count
//! words in text they already hold, via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library the
//! CLI commands use: each `#[tool]` method builds a fresh dictionary from the
//! text it is given and returns a serialized report. Nothing is shared between
//! calls.
//!
//! Tools take text, not URLs. Fetching pages is left to the CLI.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use wordtally_core::dictionary::insert_all;
use wordtally_core::{
    Backend, Dictionary, DictionaryReport, FrequencyOrder, LookupReport, ReportOptions,
    SourceLoader, TextFormat, tokenize,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// How the `text` parameter of a tool is written.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Plain text (default).
    #[default]
    Plain,
    /// An HTML document; only visible text is counted.
    Html,
    /// Markdown; code and markup are skipped.
    Markdown,
}

impl From<InputFormat> for TextFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Plain => Self::Plain,
            InputFormat::Html => Self::Html,
            InputFormat::Markdown => Self::Markdown,
        }
    }
}

/// Parameters for the `word_stats` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct WordStatsParams {
    /// The text to count words in.
    pub text: String,
    /// How the text is written: "plain", "html" or "markdown".
    #[serde(default)]
    pub format: InputFormat,
    /// Dictionary implementation: "trie" or "ordered". Defaults to the server's.
    pub backend: Option<Backend>,
    /// List only the first N words.
    pub top: Option<usize>,
    /// Order of the word list: "natural", "count" or "alpha".
    #[serde(default)]
    pub order: FrequencyOrder,
}

/// Parameters for the `word_frequency` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct WordFrequencyParams {
    /// The text to count words in.
    pub text: String,
    /// Words to look up (case-sensitive).
    pub words: Vec<String>,
    /// How the text is written: "plain", "html" or "markdown".
    #[serde(default)]
    pub format: InputFormat,
    /// Dictionary implementation: "trie" or "ordered". Defaults to the server's.
    pub backend: Option<Backend>,
}

/// MCP server exposing word statistics to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input_bytes: Option<u64>,
    backend: Backend,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with no input limit.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input_bytes: None,
            backend: Backend::default(),
        }
    }

    /// Reject tool input larger than `max_bytes`.
    pub const fn with_max_input(mut self, max_bytes: Option<u64>) -> Self {
        self.max_input_bytes = max_bytes;
        self
    }

    /// Dictionary implementation used when a call does not name one.
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Convert `text` to plain text and count its words.
    fn tally(
        &self,
        text: &str,
        format: InputFormat,
        backend: Option<Backend>,
    ) -> Result<Box<dyn Dictionary>, McpError> {
        let plain = SourceLoader::new()
            .with_max_bytes(self.max_input_bytes)
            .load_reader("text", text.as_bytes(), Some(format.into()))
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let mut dict = backend.unwrap_or(self.backend).build();
        let inserted = insert_all(&mut *dict, tokenize::words(&plain));
        tracing::debug!(inserted, backend = %dict.backend(), "text tallied");
        Ok(dict)
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Count every word in the text.
    #[tool(
        description = "Count words in text. Returns total and distinct word counts, the most frequent letter, the longest words, and per-word frequencies."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn word_stats(
        &self,
        Parameters(params): Parameters<WordStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "word_stats",
            format = ?params.format,
            top = ?params.top,
            "executing MCP tool"
        );
        let dict = self.tally(&params.text, params.format, params.backend)?;
        let options = ReportOptions {
            top: params.top,
            order: params.order,
        };
        let report = DictionaryReport::build(&*dict, &options);
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "word_stats",
            total_words = report.total_words,
            distinct_words = report.distinct_words,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Look up how often particular words occur in the text.
    #[tool(
        description = "Count how often each given word occurs in text. Missing words report frequency -1."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn word_frequency(
        &self,
        Parameters(params): Parameters<WordFrequencyParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "word_frequency",
            words = params.words.len(),
            "executing MCP tool"
        );
        if params.words.is_empty() {
            return Err(McpError::invalid_params(
                "at least one word is required",
                None,
            ));
        }
        let dict = self.tally(&params.text, params.format, params.backend)?;
        let report = LookupReport::build(&*dict, &params.words);
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "word_frequency",
            all_found = report.all_found(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use word_stats to count words in text and word_frequency to look up specific words.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn stats(server: &ProjectServer, params: WordStatsParams) -> serde_json::Value {
        let result = server
            .word_stats(Parameters(params))
            .expect("word_stats should succeed");
        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(&result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    fn stats_params(text: &str) -> WordStatsParams {
        WordStatsParams {
            text: text.to_string(),
            format: InputFormat::Plain,
            backend: None,
            top: None,
            order: FrequencyOrder::Natural,
        }
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = ProjectServer::new();
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value =
            serde_json::from_str(text).expect("output should be valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn word_stats_tool_works() {
        let server = ProjectServer::new();
        let json = stats(&server, stats_params("aWord longerWord longestWord aWord"));

        assert_eq!(json["backend"], "trie");
        assert_eq!(json["total_words"], 4);
        assert_eq!(json["distinct_words"], 3);
        assert_eq!(json["longest_words"][0], "longestWord");
        assert_eq!(json["longest_length"], 11);
    }

    #[test]
    fn word_stats_honours_backend_order_and_top() {
        let server = ProjectServer::new().with_backend(Backend::Ordered);
        let mut params = stats_params("b a b c b a");
        params.order = FrequencyOrder::Count;
        params.top = Some(1);
        let json = stats(&server, params);

        assert_eq!(json["backend"], "ordered");
        assert_eq!(json["frequencies"].as_array().unwrap().len(), 1);
        assert_eq!(json["frequencies"][0]["word"], "b");
        assert_eq!(json["frequencies"][0]["frequency"], 3);
        assert_eq!(json["truncated"], true);
    }

    #[test]
    fn word_stats_reads_html() {
        let server = ProjectServer::new();
        let mut params = stats_params("<p>visible</p><script>hidden()</script>");
        params.format = InputFormat::Html;
        let json = stats(&server, params);

        assert_eq!(json["total_words"], 1);
        assert_eq!(json["frequencies"][0]["word"], "visible");
    }

    #[test]
    fn word_stats_rejects_oversized_text() {
        let server = ProjectServer::new().with_max_input(Some(8));
        let result = server.word_stats(Parameters(stats_params("far more than eight bytes")));
        assert!(result.is_err());
    }

    #[test]
    fn word_frequency_tool_reports_sentinel() {
        let server = ProjectServer::new();
        let params = Parameters(WordFrequencyParams {
            text: "aWord aWord other".to_string(),
            words: vec!["aWord".to_string(), "missing".to_string()],
            format: InputFormat::Plain,
            backend: Some(Backend::Ordered),
        });

        let result = server
            .word_frequency(params)
            .expect("word_frequency should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        assert_eq!(json["backend"], "ordered");
        assert_eq!(json["entries"][0]["frequency"], 2);
        assert_eq!(json["entries"][0]["found"], true);
        assert_eq!(json["entries"][1]["frequency"], -1);
        assert_eq!(json["entries"][1]["found"], false);
    }

    #[test]
    fn word_frequency_requires_words() {
        let server = ProjectServer::new();
        let params = Parameters(WordFrequencyParams {
            text: "anything".to_string(),
            words: Vec::new(),
            format: InputFormat::Plain,
            backend: None,
        });
        assert!(server.word_frequency(params).is_err());
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: WordStatsParams =
            serde_json::from_str(r#"{"text": "hi", "backend": "ordered"}"#).unwrap();
        assert!(matches!(params.format, InputFormat::Plain));
        assert_eq!(params.backend, Some(Backend::Ordered));
        assert_eq!(params.order, FrequencyOrder::Natural);
    }
}
