//! `slides doc` command implementation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use slides_config::{CliSettings, Config};
use slides_store::{Document, DocumentStore};

use crate::error::CliError;
use crate::output::{Output, write_stdout};

/// Arguments for the doc commands.
#[derive(Args)]
pub(crate) struct DocArgs {
    /// Document store directory (overrides config).
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: DocCommand,
}

#[derive(Subcommand)]
enum DocCommand {
    /// Save a markdown file under a title, replacing a document with the same title.
    Save {
        /// Document title.
        title: String,
        /// Path to the markdown file.
        file: PathBuf,
    },
    /// List saved documents, most recently updated first.
    List,
    /// Print the markdown of a saved document.
    Show {
        /// Document id.
        id: String,
    },
    /// Delete a saved document.
    Delete {
        /// Document id.
        id: String,
    },
    /// Rename a saved document.
    Rename {
        /// Document id.
        id: String,
        /// New title.
        title: String,
    },
}

impl DocArgs {
    /// Execute a doc command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the document does not exist,
    /// or the store cannot be written.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            store_dir: self.store_dir,
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let store = DocumentStore::open(&config.store_resolved.dir);
        tracing::info!(path = %store.path().display(), "Opened document store");

        run(&store, self.command, &Output::new())
    }
}

fn run(store: &DocumentStore, command: DocCommand, output: &Output) -> Result<(), CliError> {
    match command {
        DocCommand::Save { title, file } => {
            let content = fs::read_to_string(&file)?;
            let doc = store.save(&title, &content)?;
            output.success(&format!("Saved \"{}\" ({})", doc.title, doc.id));
        }
        DocCommand::List => {
            let documents = store.list();
            if documents.is_empty() {
                output.info("No saved documents");
            } else {
                write_stdout(format_list(&documents, output).as_bytes())?;
            }
        }
        DocCommand::Show { id } => {
            let doc = store
                .get(&id)
                .ok_or_else(|| CliError::Validation(format!("Document not found: {id}")))?;
            write_stdout(doc.content.as_bytes())?;
        }
        DocCommand::Delete { id } => {
            if store.delete(&id)? {
                output.success(&format!("Deleted {id}"));
            } else {
                output.warning(&format!("No document with id {id}"));
            }
        }
        DocCommand::Rename { id, title } => {
            let doc = store.rename(&id, &title)?;
            output.success(&format!("Renamed {} to \"{}\"", doc.id, doc.title));
        }
    }
    Ok(())
}

fn format_list(documents: &[Document], output: &Output) -> String {
    let mut out = String::new();
    for doc in documents {
        let updated = doc.updated_at.format("%Y-%m-%d %H:%M").to_string();
        writeln!(out, "{}  {}  {}", output.dim(&doc.id), output.dim(&updated), doc.title).unwrap();
    }
    out
}
