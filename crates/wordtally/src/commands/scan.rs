//! Scan command: count every word in one or more sources.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordtally_core::{Backend, Config, DictionaryReport, FrequencyOrder, ReportOptions};

use super::tally_sources;

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// URLs, files, or `-` for stdin.
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Dictionary implementation (overrides config).
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// List only the first N words (overrides config).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Order of the word list.
    #[arg(long, value_enum, default_value_t)]
    pub order: FrequencyOrder,
}

/// Load the sources, count their words and print a summary.
#[instrument(name = "cmd_scan", skip_all, fields(sources = args.sources.len()))]
pub fn cmd_scan(
    args: ScanArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let backend = args.backend.unwrap_or(config.backend);
    let options = ReportOptions {
        top: args.top.or(config.top),
        order: args.order,
    };
    debug!(%backend, top = ?options.top, order = %options.order, "executing scan command");

    let loader = config.source_loader();
    let dict = tally_sources(&args.sources, backend, &loader, !quiet && !global_json)?;
    let report = DictionaryReport::build(&*dict, &options);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &DictionaryReport) {
    println!(
        "{}: {} ({} distinct) {}",
        "Words".bold(),
        report.total_words,
        report.distinct_words,
        format!("[{}]", report.backend).dimmed(),
    );

    match report.most_frequent_letter {
        Some(ref lc) => println!(
            "{}: {} ({})",
            "Most frequent letter".dimmed(),
            format!("'{}'", lc.letter).cyan(),
            lc.count
        ),
        None => println!("{}: {}", "Most frequent letter".dimmed(), "none".yellow()),
    }

    if report.longest_words.is_empty() {
        println!("{}: {}", "Longest words".dimmed(), "none".yellow());
    } else {
        println!(
            "{} ({}): {}",
            "Longest words".dimmed(),
            report.longest_length,
            report.longest_words.join(", ").cyan()
        );
    }

    if report.frequencies.is_empty() {
        return;
    }

    println!();
    println!("{}", "Frequencies".bold().underline());
    let width = report
        .frequencies
        .iter()
        .map(|wf| wf.word.chars().count())
        .max()
        .unwrap_or(0);
    for wf in &report.frequencies {
        let pad = width - wf.word.chars().count();
        println!("{}{}  {}", wf.word, " ".repeat(pad), wf.frequency.green());
    }
    if report.truncated {
        let hidden = report.distinct_words - report.frequencies.len();
        println!("{}", format!("... {hidden} more").dimmed());
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn args_for(path: &std::path::Path) -> ScanArgs {
        ScanArgs {
            sources: vec![path.to_string_lossy().into_owned()],
            backend: None,
            top: None,
            order: FrequencyOrder::Natural,
        }
    }

    #[test]
    fn scan_text_output_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("words.txt");
        fs::write(&path, "the cat saw the other cat").unwrap();

        assert!(cmd_scan(args_for(&path), false, true, &Config::default()).is_ok());
    }

    #[test]
    fn scan_json_output_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("words.txt");
        fs::write(&path, "one two two").unwrap();

        let mut args = args_for(&path);
        args.backend = Some(Backend::Ordered);
        args.top = Some(1);
        assert!(cmd_scan(args, true, true, &Config::default()).is_ok());
    }

    #[test]
    fn scan_empty_input_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(cmd_scan(args_for(&path), false, true, &Config::default()).is_ok());
    }

    #[test]
    fn scan_respects_input_limit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.txt");
        fs::write(&path, "word ".repeat(100)).unwrap();

        let config = Config {
            max_input_bytes: Some(10),
            ..Config::default()
        };
        let err = cmd_scan(args_for(&path), false, true, &config).unwrap_err();
        assert!(format!("{err:#}").contains("input too large"));
    }
}
