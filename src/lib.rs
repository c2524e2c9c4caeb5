/*!
 * paper-export - Export Dropbox Paper documents to Markdown
 *
 * Walks a Dropbox folder through the paginated listing API, exports every
 * Paper document via the export endpoint and mirrors the folder tree on
 * local disk.
 */

pub mod config;
pub mod dropbox;
pub mod enumerator;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use dropbox::{AccessToken, ApiError, DropboxClient, ExportFormat, FileService};
pub use enumerator::TreeEnumerator;
pub use error::{Error, Result};
pub use pipeline::{run_migration, ExportPipeline, MigrationStats, RecordOutcome};
pub use report::{MigrationReport, ReportFormat, Reporter};
pub use types::{Entry, FileRecord, Page};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
