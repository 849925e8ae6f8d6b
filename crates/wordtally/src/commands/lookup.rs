//! Lookup command: frequencies of particular words.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordtally_core::{Backend, Config, LookupReport};

use super::tally_sources;

/// Arguments for the `lookup` subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// URLs, files, or `-` for stdin.
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Word to look up (repeatable, case-sensitive).
    #[arg(short, long = "word", value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Dictionary implementation (overrides config).
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
}

/// Print how often each requested word occurs; `-1` when it never does.
#[instrument(name = "cmd_lookup", skip_all, fields(sources = args.sources.len(), words = args.words.len()))]
pub fn cmd_lookup(
    args: LookupArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let backend = args.backend.unwrap_or(config.backend);
    debug!(%backend, "executing lookup command");

    let loader = config.source_loader();
    let dict = tally_sources(&args.sources, backend, &loader, !quiet && !global_json)?;
    let report = LookupReport::build(&*dict, &args.words);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.entries {
            if entry.found {
                println!("{}: {}", entry.word, entry.frequency.green());
            } else {
                println!("{}: {}", entry.word, entry.frequency.red());
            }
        }
    }

    Ok(())
}
