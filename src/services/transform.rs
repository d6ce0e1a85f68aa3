use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MissingImagePolicy;
use crate::models::catalog::{CatalogEntry, ProjectedEntry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("entry {index} passed the filter but has no image")]
    MissingImage { index: usize },
}

/// Result of a single filter-then-map pass.
#[derive(Debug, Default)]
pub struct TransformOutcome {
    pub entries: Vec<ProjectedEntry>,
    pub received: usize,
    pub skipped: usize,
}

/// An entry survives only with `drm == true` and a positive episode count.
#[must_use]
pub fn keep(entry: &CatalogEntry) -> bool {
    entry.has_drm() && entry.has_episodes()
}

/// Returns `None` when the entry has no `image` to read `showImage` from.
/// A present `image` is copied through as is, whatever `showImage` holds.
#[must_use]
pub fn project(entry: CatalogEntry) -> Option<ProjectedEntry> {
    if !entry.has_image() {
        return None;
    }

    Some(ProjectedEntry {
        image: entry.show_image().cloned(),
        slug: entry.slug,
        title: entry.title,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformService {
    missing_image: MissingImagePolicy,
}

impl TransformService {
    #[must_use]
    pub const fn new(missing_image: MissingImagePolicy) -> Self {
        Self { missing_image }
    }

    /// Filters the payload and projects the survivors, keeping input order.
    ///
    /// Indices in errors and logs refer to positions in the original payload.
    pub fn filter_and_map(&self, payload: Vec<Value>) -> Result<TransformOutcome, TransformError> {
        let received = payload.len();
        let mut entries = Vec::new();
        let mut skipped = 0;

        for (index, entry) in payload
            .into_iter()
            .map(CatalogEntry::from_value)
            .enumerate()
            .filter(|(_, entry)| keep(entry))
        {
            match project(entry) {
                Some(projected) => entries.push(projected),
                None => match self.missing_image {
                    MissingImagePolicy::Skip => {
                        warn!(index, "Skipping catalog entry without image");
                        skipped += 1;
                    }
                    MissingImagePolicy::Reject => {
                        return Err(TransformError::MissingImage { index });
                    }
                },
            }
        }

        debug!(
            received,
            returned = entries.len(),
            skipped,
            "Catalog payload transformed"
        );

        Ok(TransformOutcome {
            entries,
            received,
            skipped,
        })
    }
}
