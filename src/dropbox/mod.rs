//! Access to the Dropbox files API
//!
//! The pipeline only depends on the [`FileService`] trait; [`DropboxClient`]
//! is the HTTP implementation used by the binary.

mod client;
mod error;

pub use client::{header_safe_json, AccessToken, DropboxClient, ACCESS_TOKEN_ENV};
pub use error::{ApiError, ApiResult};

use clap::ValueEnum;
use strum::{Display, EnumString};

use crate::types::Page;

/// Output formats supported by the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum ExportFormat {
    /// Markdown text
    #[default]
    Markdown,
    /// HTML document
    Html,
    /// Plain text
    PlainText,
}

impl ExportFormat {
    /// File extension used for exported documents, including the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => ".md",
            ExportFormat::Html => ".html",
            ExportFormat::PlainText => ".txt",
        }
    }
}

/// Remote operations needed to walk a folder tree and export its documents
pub trait FileService {
    /// List a folder, starting a new cursor
    fn list_folder(&self, path: &str, recursive: bool) -> ApiResult<Page>;

    /// Fetch the page that follows `cursor`
    fn list_folder_continue(&self, cursor: &str) -> ApiResult<Page>;

    /// Export the file identified by `id` in the given format, returning the
    /// raw payload
    fn export(&self, id: &str, format: ExportFormat) -> ApiResult<Vec<u8>>;
}

impl<S: FileService + ?Sized> FileService for &S {
    fn list_folder(&self, path: &str, recursive: bool) -> ApiResult<Page> {
        (**self).list_folder(path, recursive)
    }

    fn list_folder_continue(&self, cursor: &str) -> ApiResult<Page> {
        (**self).list_folder_continue(cursor)
    }

    fn export(&self, id: &str, format: ExportFormat) -> ApiResult<Vec<u8>> {
        (**self).export(id, format)
    }
}
