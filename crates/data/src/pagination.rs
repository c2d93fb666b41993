//! Cursor-based pagination.
//!
//! A resource is read in pages ordered by id. Each page is requested with the
//! last id of the previous page as an exclusive lower bound, starting from the
//! empty string, and the first empty page ends the walk.
//!
//! The server must return ids in ascending order. Two guards turn a violation
//! into an error instead of an endless loop: an id seen twice fails the walk
//! with [`DataError::RepeatedRecord`], and more than
//! [`PagingConfig::max_pages`] non-empty pages fail it with
//! [`DataError::PageLimitExceeded`].

use crate::config::PagingConfig;
use crate::error::DataError;
use async_trait::async_trait;
use std::collections::HashSet;
use tickscope_domain::entities::{Pool, Tick};
use tracing::debug;

/// Records that carry the id used as pagination cursor.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Pool {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Tick {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A paginated resource.
#[async_trait]
pub trait PageSource: Sync {
    type Item: Identified + Send;

    /// Name used in logs and errors.
    fn resource(&self) -> String;

    /// Fetches at most `first` records whose id is greater than `after`.
    async fn fetch_page(&self, after: &str, first: u32) -> Result<Vec<Self::Item>, DataError>;
}

/// Walks a [`PageSource`] until it is exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    config: PagingConfig,
}

impl Paginator {
    #[must_use]
    pub fn new(config: PagingConfig) -> Self {
        Self { config }
    }

    /// Collects every record of the source, in arrival order.
    ///
    /// Nothing is returned if any page fails.
    pub async fn collect_all<S>(&self, source: &S) -> Result<Vec<S::Item>, DataError>
    where
        S: PageSource + ?Sized,
    {
        let page_size = self.config.page_size();
        let mut cursor = String::new();
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut pages = 0u32;

        loop {
            let batch = source.fetch_page(&cursor, page_size).await?;
            let Some(last) = batch.last() else {
                debug!(resource = %source.resource(), pages, records = items.len(), "pagination done");
                return Ok(items);
            };

            pages += 1;
            if pages > self.config.max_pages() {
                return Err(DataError::PageLimitExceeded {
                    resource: source.resource(),
                    max_pages: self.config.max_pages(),
                });
            }

            let next_cursor = last.id().to_string();
            for item in &batch {
                if !seen.insert(item.id().to_string()) {
                    return Err(DataError::RepeatedRecord {
                        resource: source.resource(),
                        id: item.id().to_string(),
                    });
                }
            }

            debug!(
                resource = %source.resource(),
                page = pages,
                records = batch.len(),
                cursor = %next_cursor,
                "fetched page"
            );
            items.extend(batch);
            cursor = next_cursor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{VecSource, ids};

    #[tokio::test]
    async fn test_any_page_size_yields_the_full_dataset() {
        let dataset = ids(23);
        for page_size in [1, 2, 3, 5, 7, 22, 23, 24, 1000] {
            let source = VecSource::new(dataset.clone());
            let paginator = Paginator::new(PagingConfig::new(page_size, 100));

            let items = paginator.collect_all(&source).await.unwrap();

            assert_eq!(items, dataset, "page size {page_size}");
            let expected_calls = dataset.len().div_ceil(page_size as usize) + 1;
            assert_eq!(source.calls(), expected_calls, "page size {page_size}");
        }
    }

    #[tokio::test]
    async fn test_empty_dataset_takes_one_request() {
        let source = VecSource::new(Vec::new());

        let items = Paginator::default().collect_all(&source).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(source.calls(), 1);
        assert_eq!(source.cursors(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_cursor_is_last_id_of_previous_page() {
        let source = VecSource::new(ids(5));

        Paginator::new(PagingConfig::new(2, 10)).collect_all(&source).await.unwrap();

        assert_eq!(source.cursors(), vec!["", "id-001", "id-003", "id-004"]);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let paginator = Paginator::new(PagingConfig::new(2, 2));

        let exact = VecSource::new(ids(4));
        assert_eq!(paginator.collect_all(&exact).await.unwrap().len(), 4);

        let over = VecSource::new(ids(5));
        let err = paginator.collect_all(&over).await.unwrap_err();
        assert!(matches!(err, DataError::PageLimitExceeded { max_pages: 2, .. }));
    }

    #[tokio::test]
    async fn test_server_ignoring_cursor_is_detected() {
        let source = VecSource::new(ids(3)).ignoring_cursor();

        let err = Paginator::new(PagingConfig::new(2, 100))
            .collect_all(&source)
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::RepeatedRecord { id, .. } if id == "id-000"));
        assert_eq!(source.calls(), 2);
    }
}
