//! `slides watch` command implementation.
//!
//! Rebuilds the HTML deck whenever the markdown file changes. Bursts of
//! file system events are coalesced: a rebuild runs only once no event has
//! arrived for the configured debounce interval.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use clap::Args;
use notify::{EventKind, RecursiveMode, Watcher};
use slides_config::{CliSettings, Config};
use slides_core::Presentation;

use super::ThemeArg;
use crate::deck;
use crate::error::CliError;
use crate::output::Output;

type EventResult = notify::Result<notify::Event>;

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Path to the markdown file.
    input: PathBuf,

    /// HTML file to keep up to date.
    #[arg(short, long)]
    output: PathBuf,

    /// Quiet period before rebuilding, in milliseconds (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Presenter theme (overrides config).
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

impl WatchArgs {
    /// Execute the watch command. Runs until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the initial build fails,
    /// or the watcher cannot be started.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            theme: self.theme.map(Into::into),
            debounce_ms: self.debounce_ms,
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let mut presentation = Presentation::new(deck::compiler(&config))
            .with_settings(deck::presentation_settings(&config));
        rebuild(&mut presentation, &self.input, &self.output)?;
        output.success(&format!("Wrote {}", self.output.display()));

        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: EventResult| {
            let _ = tx.send(res);
        })?;

        // Watch the directory: editors often replace the file on save
        let watch_dir = match self.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

        output.info(&format!(
            "Watching {} (Ctrl+C to stop)",
            self.input.display()
        ));

        let debounce = Duration::from_millis(config.watch.debounce_ms);
        while wait_for_change(&rx, &self.input, debounce) {
            match rebuild(&mut presentation, &self.input, &self.output) {
                Ok(()) => output.success(&format!("Rebuilt {}", self.output.display())),
                Err(e) => output.warning(&format!("Rebuild failed: {e}")),
            }
        }
        Ok(())
    }
}

/// Recompile `input` into the presentation and rewrite the HTML deck.
fn rebuild(presentation: &mut Presentation, input: &Path, output: &Path) -> Result<(), CliError> {
    let markdown = fs::read_to_string(input)?;
    if markdown == presentation.markdown() && output.exists() {
        tracing::debug!(path = %input.display(), "Source unchanged, skipping rebuild");
        return Ok(());
    }

    presentation.set_markdown(markdown);
    tracing::info!(slides = presentation.slides().len(), "Recompiled deck");
    let html = deck::render_html(presentation.slides(), presentation.settings());
    fs::write(output, html)?;
    Ok(())
}

/// Block until `target` changes and the event stream has been quiet for
/// `debounce`.
///
/// Returns `false` once the watcher is gone and no change is pending.
fn wait_for_change(rx: &Receiver<EventResult>, target: &Path, debounce: Duration) -> bool {
    loop {
        match rx.recv() {
            Ok(res) if is_relevant(&res, target) => break,
            Ok(_) => {}
            Err(_) => return false,
        }
    }

    loop {
        match rx.recv_timeout(debounce) {
            Ok(res) => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "File watcher error");
                }
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return true,
        }
    }
}

fn is_relevant(res: &EventResult, target: &Path) -> bool {
    match res {
        Ok(event) => {
            matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) && event
                .paths
                .iter()
                .any(|path| path.file_name() == target.file_name())
        }
        Err(e) => {
            tracing::warn!(error = %e, "File watcher error");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::sync::mpsc;

    fn event(kind: EventKind, path: &str) -> EventResult {
        Ok(notify::Event::new(kind).add_path(PathBuf::from(path)))
    }

    #[test]
    fn test_burst_coalesced_into_one_change() {
        let (tx, rx) = mpsc::channel();
        let target = Path::new("talk/deck.md");

        tx.send(event(EventKind::Create(CreateKind::File), "/abs/talk/deck.md")).unwrap();
        tx.send(event(EventKind::Modify(ModifyKind::Any), "/abs/talk/deck.md")).unwrap();
        tx.send(event(EventKind::Modify(ModifyKind::Any), "/abs/talk/deck.md")).unwrap();
        drop(tx);

        assert!(wait_for_change(&rx, target, Duration::from_millis(10)));
        assert!(!wait_for_change(&rx, target, Duration::from_millis(10)));
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let (tx, rx) = mpsc::channel();
        let target = Path::new("deck.md");

        tx.send(event(EventKind::Modify(ModifyKind::Any), "/abs/other.md")).unwrap();
        tx.send(event(EventKind::Access(AccessKind::Any), "/abs/deck.md")).unwrap();
        tx.send(Err(notify::Error::generic("boom"))).unwrap();
        drop(tx);

        assert!(!wait_for_change(&rx, target, Duration::from_millis(10)));
    }

    #[test]
    fn test_change_reported_after_quiet_period() {
        let (tx, rx) = mpsc::channel();
        let target = Path::new("deck.md");

        tx.send(event(EventKind::Modify(ModifyKind::Any), "/abs/deck.md")).unwrap();
        assert!(wait_for_change(&rx, target, Duration::from_millis(10)));
        drop(tx);
    }

    fn presentation() -> Presentation {
        let config = Config::default();
        Presentation::new(deck::compiler(&config)).with_settings(deck::presentation_settings(&config))
    }

    #[test]
    fn test_rebuild_updates_presentation_and_html() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.md");
        let output = dir.path().join("deck.html");
        let mut presentation = presentation();

        fs::write(&input, "# First").unwrap();
        rebuild(&mut presentation, &input, &output).unwrap();
        assert_eq!(presentation.markdown(), "# First");
        assert_eq!(presentation.slides().len(), 1);
        assert!(fs::read_to_string(&output).unwrap().contains("<h1>First</h1>"));

        fs::write(&input, "# Second\n---\n# Third").unwrap();
        rebuild(&mut presentation, &input, &output).unwrap();
        assert_eq!(presentation.slides().len(), 2);
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<h1>Second</h1>"));
        assert!(html.contains("<h1>Third</h1>"));
    }

    #[test]
    fn test_rebuild_keeps_position_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.md");
        let output = dir.path().join("deck.html");
        let mut presentation = presentation();

        fs::write(&input, "a\n---\nb\n---\nc").unwrap();
        rebuild(&mut presentation, &input, &output).unwrap();
        assert!(presentation.go_to(2));

        fs::write(&input, "a\n---\nb").unwrap();
        rebuild(&mut presentation, &input, &output).unwrap();
        assert_eq!(presentation.current_index(), 0);
    }

    #[test]
    fn test_rebuild_skips_unchanged_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.md");
        let output = dir.path().join("deck.html");
        let mut presentation = presentation();

        fs::write(&input, "# Same").unwrap();
        rebuild(&mut presentation, &input, &output).unwrap();
        fs::write(&output, "stale").unwrap();

        rebuild(&mut presentation, &input, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "stale");

        fs::remove_file(&output).unwrap();
        rebuild(&mut presentation, &input, &output).unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("<h1>Same</h1>"));
    }

    #[test]
    fn test_rebuild_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = rebuild(&mut presentation(), &dir.path().join("nope.md"), &dir.path().join("out.html"));
        assert!(matches!(err, Err(CliError::Io(_))));
    }
}
