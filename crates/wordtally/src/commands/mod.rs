//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::debug;

use wordtally_core::dictionary::insert_all;
use wordtally_core::{Backend, Dictionary, SourceLoader, TextSource, tokenize};

pub mod info;
pub mod lookup;
pub mod scan;
#[cfg(feature = "mcp")]
pub mod serve;

/// Load every source and insert its words into one dictionary.
///
/// Sources are loaded in order; the first failure aborts with context naming
/// the source. A progress bar is drawn on stderr when `show_progress` is set
/// and more than one source is given.
pub fn tally_sources(
    sources: &[String],
    backend: Backend,
    loader: &SourceLoader,
    show_progress: bool,
) -> anyhow::Result<Box<dyn Dictionary>> {
    let progress = progress_bar(sources.len(), show_progress && sources.len() > 1);
    let mut dict = backend.build();

    for arg in sources {
        let source = TextSource::parse(arg);
        progress.set_message(source.to_string());

        let text = loader
            .load(&source)
            .with_context(|| format!("failed to load {source}"))?;
        let inserted = insert_all(&mut *dict, tokenize::words(&text));
        debug!(%source, inserted, "source tallied");

        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(dict)
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if !visible {
        bar.set_draw_target(ProgressDrawTarget::hidden());
        return bar;
    }
    if let Ok(style) =
        ProgressStyle::with_template("{prefix:9} {spinner:.dim} [{bar:25}] {pos}/{len}  {wide_msg}")
    {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar.set_prefix(format!("{}", "Reading".green().bold()));
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn tally_sources_merges_all_files() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("a.txt");
        let second = tmp.path().join("b.md");
        fs::write(&first, "one two").unwrap();
        fs::write(&second, "# two\n\n`code` three").unwrap();

        let sources = vec![
            first.to_string_lossy().into_owned(),
            second.to_string_lossy().into_owned(),
        ];
        let dict = tally_sources(&sources, Backend::Ordered, &SourceLoader::new(), false).unwrap();

        assert_eq!(dict.word_frequency("one"), 1);
        assert_eq!(dict.word_frequency("two"), 2);
        assert_eq!(dict.word_frequency("three"), 1);
        assert_eq!(dict.word_frequency("code"), -1);
    }

    #[test]
    fn tally_sources_names_failing_source() {
        let sources = vec!["/no/such/file.txt".to_string()];
        let err = tally_sources(&sources, Backend::Trie, &SourceLoader::new(), false)
            .err()
            .expect("missing file should fail");
        assert!(format!("{err:#}").contains("/no/such/file.txt"));
    }
}
