/*!
 * Configuration handling for paper-export
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::dropbox::ExportFormat;
use crate::ensure;
use crate::error::Result;

/// Dropbox folder the Paper migration places documents in
pub const DEFAULT_SOURCE_FOLDER: &str = "/Migrated Paper Docs";

/// Local directory exported documents are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output_paper_markdown";

/// Suffix of Dropbox Paper documents
pub const PAPER_EXTENSION: &str = ".paper";

/// Command-line arguments for paper-export
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "paper-export",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export Dropbox Paper documents to Markdown",
    long_about = "Walks a Dropbox folder, exports every Paper document through the Dropbox export API and writes the results to a local directory tree mirroring the remote one. Reads the access token from DROPBOX_ACCESS_TOKEN."
)]
pub struct Args {
    /// Enable debug logging (request and response tracing)
    #[clap(long)]
    pub debug: bool,

    /// Dropbox folder to export from ("" for the whole Dropbox)
    #[clap(long, default_value = DEFAULT_SOURCE_FOLDER)]
    pub source_folder: String,

    /// Local directory to write exported documents to
    #[clap(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Format to export documents in
    #[clap(long, value_enum, default_value_t = ExportFormat::default())]
    pub format: ExportFormat,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Remote folder the walk starts from
    pub source_folder: String,

    /// Whether to list subfolders
    pub recursive: bool,

    /// Root of the local output tree
    pub output_dir: PathBuf,

    /// Only files with this suffix are exported
    pub source_extension: String,

    /// Requested export format
    pub format: ExportFormat,

    /// Verbose logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_folder: DEFAULT_SOURCE_FOLDER.to_string(),
            recursive: true,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            source_extension: PAPER_EXTENSION.to_string(),
            format: ExportFormat::default(),
            debug: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            source_folder: args.source_folder,
            output_dir: PathBuf::from(args.output_dir),
            format: args.format,
            debug: args.debug,
            ..Self::default()
        }
    }

    /// Extension written in place of the source extension
    pub fn output_extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Dropbox addresses the root as "" and everything else with a leading slash
        ensure!(
            self.source_folder.is_empty() || self.source_folder.starts_with('/'),
            Config,
            "source folder must be empty or start with '/': {:?}",
            self.source_folder
        );
        ensure!(
            self.source_folder.is_empty() || !self.source_folder.ends_with('/'),
            Config,
            "source folder must not end with '/': {:?}",
            self.source_folder
        );

        ensure!(
            self.source_extension.starts_with('.') && self.source_extension.len() > 1,
            Config,
            "source extension must start with '.': {:?}",
            self.source_extension
        );

        ensure!(
            !self.output_dir.as_os_str().is_empty(),
            Config,
            "output directory must not be empty"
        );

        Ok(())
    }
}
