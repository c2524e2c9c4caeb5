/*!
 * Lazy walk over a paginated remote folder listing
 */

use log::debug;

use crate::dropbox::FileService;
use crate::error::{Error, Result};
use crate::types::Page;

/// Where the walk is between pages
#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    /// Nothing fetched yet
    Start,
    /// Previous page had more entries behind this cursor
    Continue(String),
    /// Last page seen or a call failed
    Done,
}

/// Iterator over the pages of a folder listing.
///
/// The first page comes from listing `root`; each following page is fetched
/// with the cursor of the one before. Iteration stops after a page reporting
/// `has_more = false`, or right after yielding a listing error.
pub struct TreeEnumerator<S> {
    service: S,
    root: String,
    recursive: bool,
    position: Position,
    pages_fetched: usize,
}

impl<S: FileService> TreeEnumerator<S> {
    /// Create an enumerator; no remote call happens until the first `next()`
    pub fn new(service: S, root: impl Into<String>, recursive: bool) -> Self {
        Self {
            service,
            root: root.into(),
            recursive,
            position: Position::Start,
            pages_fetched: 0,
        }
    }

    /// Number of pages successfully fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch(&self) -> Option<Result<Page>> {
        match &self.position {
            Position::Start => {
                debug!("Listing files in Dropbox folder: {:?}", self.root);
                Some(
                    self.service
                        .list_folder(&self.root, self.recursive)
                        .map_err(|source| Error::Listing {
                            path: self.root.clone(),
                            source,
                        }),
                )
            }
            Position::Continue(cursor) => {
                debug!("Fetching next page of files...");
                Some(
                    self.service
                        .list_folder_continue(cursor)
                        .map_err(|source| Error::ListingContinue {
                            cursor: cursor.clone(),
                            source,
                        }),
                )
            }
            Position::Done => None,
        }
    }
}

impl<S: FileService> Iterator for TreeEnumerator<S> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.fetch()?;

        self.position = match &result {
            Ok(page) if page.has_more => Position::Continue(page.cursor.clone()),
            _ => Position::Done,
        };
        if let Ok(page) = &result {
            self.pages_fetched += 1;
            debug!(
                "Received page {} with {} entries (has_more: {})",
                self.pages_fetched,
                page.entries.len(),
                page.has_more
            );
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{file_entry, page, FakeService, ServiceCall};

    #[test]
    fn test_single_page_makes_one_call() {
        let service = FakeService::new(vec![page(vec![], "c1", false)]);
        let mut pages = TreeEnumerator::new(&service, "/Docs", true);

        assert!(pages.next().unwrap().is_ok());
        assert!(pages.next().is_none());
        assert!(pages.next().is_none());
        assert_eq!(
            service.calls(),
            [ServiceCall::List {
                path: "/Docs".to_string(),
                recursive: true
            }]
        );
        assert_eq!(pages.pages_fetched(), 1);
    }

    #[test]
    fn test_has_more_triggers_one_continuation_with_cursor() {
        let service = FakeService::new(vec![
            page(vec![file_entry("/Docs/a.paper", "id:a")], "abc", true),
            page(vec![file_entry("/Docs/b.paper", "id:b")], "def", false),
        ]);
        let pages: Vec<_> = TreeEnumerator::new(&service, "/Docs", true)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(
            service.calls(),
            [
                ServiceCall::List {
                    path: "/Docs".to_string(),
                    recursive: true
                },
                ServiceCall::Continue("abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_initial_listing_failure_is_fatal_and_terminal() {
        let service = FakeService::new(vec![]).fail_listing_at(0);
        let mut pages = TreeEnumerator::new(&service, "/Docs", false);

        let err = pages.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::Listing { ref path, .. } if path == "/Docs"));
        assert!(err.is_fatal());
        assert!(pages.next().is_none());
        assert_eq!(service.calls().len(), 1);
        assert_eq!(pages.pages_fetched(), 0);
    }

    #[test]
    fn test_continuation_failure_is_fatal_and_terminal() {
        let service = FakeService::new(vec![
            page(vec![], "abc", true),
            page(vec![], "never", false),
        ])
        .fail_listing_at(1);
        let mut pages = TreeEnumerator::new(&service, "/Docs", true);

        assert!(pages.next().unwrap().is_ok());
        let err = pages.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::ListingContinue { ref cursor, .. } if cursor == "abc"));
        assert!(pages.next().is_none());
        assert_eq!(service.calls().len(), 2);
    }
}
