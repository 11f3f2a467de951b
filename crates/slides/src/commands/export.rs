//! `slides export` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use slides_config::{CliSettings, Config};
use slides_pdf::{PdfExporter, SlideExporter, pdf_filename};

use crate::deck;
use crate::error::CliError;
use crate::output::Output;

use super::ThemeArg;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to the markdown file.
    input: PathBuf,

    /// Output PDF (default: `<title>.pdf` next to the input).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title (default: first slide heading).
    #[arg(short, long)]
    title: Option<String>,

    /// Page theme (overrides config).
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, no slide has printable
    /// content, or the PDF cannot be written.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            theme: self.theme.map(Into::into),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let markdown = fs::read_to_string(&self.input)?;
        let slides = deck::compiler(&config).compile(&markdown);

        let title = self.title.as_deref().or_else(|| deck::deck_title(&slides));
        let mut exporter = PdfExporter::new()
            .with_page(deck::page_layout(&config))
            .with_theme(deck::presentation_settings(&config).theme);
        if let Some(title) = title {
            exporter = exporter.with_title(title);
        }

        output.info(&format!("Exporting {} slides...", slides.len()));
        let bytes = exporter.export(&slides)?;

        let path = self
            .output
            .unwrap_or_else(|| default_output(&self.input, title));
        fs::write(&path, bytes)?;

        output.success(&format!("Wrote {}", path.display()));
        Ok(())
    }
}

fn default_output(input: &Path, title: Option<&str>) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(pdf_filename(title))
}
