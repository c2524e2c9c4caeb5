/*!
 * Export-and-materialize pipeline
 *
 * Consumes listing pages in order, exports every matching document and
 * writes it below the output directory. Listing failures and a missing
 * output root abort the run; anything that goes wrong with a single
 * document is logged and the document is skipped.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::Config;
use crate::dropbox::FileService;
use crate::enumerator::TreeEnumerator;
use crate::error::{Error, Result};
use crate::types::{Entry, FileRecord, Page};
use crate::utils::output_path;

/// Why an entry was not exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Folder, deleted marker or unknown entry kind
    NotAFile(&'static str),
    /// File without a known path
    NoPath,
    /// File name does not end in the source extension
    WrongExtension,
}

/// Result of processing one listing entry
#[derive(Debug)]
pub enum RecordOutcome {
    /// Document exported and written
    Exported {
        source: String,
        destination: PathBuf,
        bytes: usize,
        /// Earlier document of this run written to the same file
        replaced: Option<String>,
    },
    /// Entry ignored
    Skipped { path: String, reason: SkipReason },
    /// Export or write failed; the run continues
    Failed { path: String, error: Error },
}

/// A document that could not be exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecord {
    /// Remote path of the document
    pub path: String,
    /// Error message
    pub error: String,
}

/// Totals for one migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStats {
    /// Listing pages processed
    pub pages: usize,
    /// Documents exported and written
    pub exported: usize,
    /// Files skipped
    pub skipped: usize,
    /// Folders, deleted markers and unknown entries
    pub ignored: usize,
    /// Exports that overwrote an earlier export of this run
    pub overwritten: usize,
    /// Documents that failed
    pub failed: Vec<FailedRecord>,
    /// Bytes written to disk
    pub bytes_written: u64,
}

impl MigrationStats {
    /// Add one outcome to the totals
    pub fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Exported {
                bytes, replaced, ..
            } => {
                self.exported += 1;
                self.bytes_written += *bytes as u64;
                if replaced.is_some() {
                    self.overwritten += 1;
                }
            }
            RecordOutcome::Skipped {
                reason: SkipReason::NotAFile(_),
                ..
            } => self.ignored += 1,
            RecordOutcome::Skipped { .. } => self.skipped += 1,
            RecordOutcome::Failed { path, error } => self.failed.push(FailedRecord {
                path: path.clone(),
                error: error.to_string(),
            }),
        }
    }
}

/// Sequential exporter from listing pages to local files
pub struct ExportPipeline<'a, S> {
    service: S,
    config: &'a Config,
    /// Case-folded output path -> remote path that last wrote it
    written: HashMap<String, String>,
}

impl<'a, S: FileService> ExportPipeline<'a, S> {
    /// Create a pipeline exporting through `service`
    pub fn new(service: S, config: &'a Config) -> Self {
        Self {
            service,
            config,
            written: HashMap::new(),
        }
    }

    /// Create the output root directory if it is missing
    pub fn prepare_output_root(&self) -> Result<()> {
        fs::create_dir_all(&self.config.output_dir).map_err(|source| Error::OutputRoot {
            path: self.config.output_dir.clone(),
            source,
        })
    }

    /// Process every page in order, stopping at the first listing error
    pub fn run<I>(&mut self, pages: I) -> Result<MigrationStats>
    where
        I: IntoIterator<Item = Result<Page>>,
    {
        self.prepare_output_root()?;

        let mut stats = MigrationStats::default();
        for page in pages {
            let page = page?;
            self.process_page(&page, &mut stats);
        }

        Ok(stats)
    }

    /// Process all entries of one page
    pub fn process_page(&mut self, page: &Page, stats: &mut MigrationStats) {
        stats.pages += 1;
        for entry in &page.entries {
            let outcome = self.process_entry(entry);
            stats.record(&outcome);
        }
    }

    /// Process one listing entry
    pub fn process_entry(&mut self, entry: &Entry) -> RecordOutcome {
        if !matches!(entry, Entry::File(_)) {
            debug!("Skipping {} entry: {}", entry.kind(), entry.display_path());
            return RecordOutcome::Skipped {
                path: entry.display_path().to_string(),
                reason: SkipReason::NotAFile(entry.kind()),
            };
        }

        match entry.file_record() {
            Some(record) => self.process_record(&record),
            None => {
                warn!("Skipping file without a path: {}", entry.display_path());
                RecordOutcome::Skipped {
                    path: entry.display_path().to_string(),
                    reason: SkipReason::NoPath,
                }
            }
        }
    }

    /// Export one file record, logging and absorbing per-document failures
    pub fn process_record(&mut self, record: &FileRecord) -> RecordOutcome {
        if !record.name.ends_with(&self.config.source_extension) {
            debug!("Skipping non-Paper file: {}", record.path);
            return RecordOutcome::Skipped {
                path: record.path.clone(),
                reason: SkipReason::WrongExtension,
            };
        }

        println!("Exporting Dropbox Paper doc: {}", record.path);

        match self.export_record(record) {
            Ok((destination, bytes, replaced)) => {
                println!(
                    "Exported and saved Paper doc as: {}",
                    destination.display()
                );
                RecordOutcome::Exported {
                    source: record.path.clone(),
                    destination,
                    bytes,
                    replaced,
                }
            }
            Err(error) => {
                log::error!("{}", error);
                RecordOutcome::Failed {
                    path: record.path.clone(),
                    error,
                }
            }
        }
    }

    /// Destination of a record below the output root
    pub fn destination(&self, record: &FileRecord) -> PathBuf {
        output_path(
            &record.path,
            &self.config.source_folder,
            &self.config.output_dir,
            &self.config.source_extension,
            self.config.output_extension(),
        )
    }

    fn export_record(
        &mut self,
        record: &FileRecord,
    ) -> Result<(PathBuf, usize, Option<String>)> {
        let content = self
            .service
            .export(&record.id, self.config.format)
            .map_err(|source| Error::Export {
                path: record.path.clone(),
                source,
            })?;

        let destination = self.destination(record);
        debug!("Writing exported content to {}", destination.display());

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: destination.clone(),
                source,
            })?;
        }

        fs::write(&destination, &content).map_err(|source| Error::Write {
            path: destination.clone(),
            source,
        })?;

        // Names differing only in case share a file on case-insensitive filesystems
        let replaced = self
            .written
            .insert(collision_key(&destination), record.path.clone());
        if let Some(previous) = &replaced {
            warn!(
                "{} overwrote the export of {} at {}",
                record.path,
                previous,
                destination.display()
            );
        }

        Ok((destination, content.len(), replaced))
    }
}

fn collision_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

/// Walk the configured folder and export every matching document
pub fn run_migration<S: FileService>(service: S, config: &Config) -> Result<MigrationStats> {
    let mut pages = TreeEnumerator::new(&service, config.source_folder.as_str(), config.recursive);
    let mut pipeline = ExportPipeline::new(&service, config);

    let stats = pipeline.run(pages.by_ref())?;
    debug!("Listing finished after {} pages", pages.pages_fetched());

    Ok(stats)
}
