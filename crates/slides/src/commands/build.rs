//! `slides build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use slides_config::{CliSettings, Config};

use crate::deck;
use crate::error::CliError;
use crate::output::{Output, write_stdout};

use super::ThemeArg;

/// Output format of a built deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// The compiled slide list as JSON.
    #[default]
    Json,
    /// A standalone HTML page.
    Html,
}

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to the markdown file.
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    /// Presenter theme for HTML output (overrides config).
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or input cannot be read, or the output
    /// cannot be written.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            theme: self.theme.map(Into::into),
            gfm: self.no_gfm.then_some(false),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let markdown = fs::read_to_string(&self.input)?;
        let bytes = build(&config, &markdown, self.format)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &bytes)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => write_stdout(&bytes)?,
        }
        Ok(())
    }
}

/// Compile markdown and serialize it in the requested format.
pub(crate) fn build(config: &Config, markdown: &str, format: Format) -> Result<Vec<u8>, CliError> {
    let slides = deck::compiler(config).compile(markdown);
    tracing::info!(slides = slides.len(), ?format, "Compiled deck");

    match format {
        Format::Json => {
            let mut json = serde_json::to_vec_pretty(&slides)?;
            json.push(b'\n');
            Ok(json)
        }
        Format::Html => {
            let settings = deck::presentation_settings(config);
            Ok(deck::render_html(&slides, &settings).into_bytes())
        }
    }
}
