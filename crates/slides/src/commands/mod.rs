//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod doc;
pub(crate) mod export;
pub(crate) mod watch;

pub(crate) use build::BuildArgs;
pub(crate) use doc::DocArgs;
pub(crate) use export::ExportArgs;
pub(crate) use watch::WatchArgs;

use clap::ValueEnum;
use slides_config::Theme;

/// Presenter theme as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}
