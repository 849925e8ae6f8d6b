//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use wordtally_core::{Backend, Config};

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Default dictionary implementation for tool calls (overrides config).
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
}

/// Serve MCP over stdin/stdout until the client disconnects.
///
/// Logs go to stderr (and the log file, if configured) so they never mix
/// with protocol messages on stdout.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let backend = args.backend.unwrap_or(config.backend);
    let server = ProjectServer::new()
        .with_max_input(config.input_limit())
        .with_backend(backend);

    info!(%backend, max_input_bytes = ?config.input_limit(), "starting MCP server on stdio");
    let service = server
        .serve(rmcp::transport::io::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;
    info!("MCP server stopped");
    Ok(())
}
