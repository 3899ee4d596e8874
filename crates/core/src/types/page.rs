//! Pagination envelope.
//!
//! List endpoints answer `?page=N` with `{count, next, previous, results}` and
//! `?all=true` (or `?top=true`) with a bare JSON array. Both shapes normalize
//! into [`Page`].

use serde::{Deserialize, Deserializer, Serialize};

/// One page of results, or the whole collection when fetched with `all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Total number of records across all pages.
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages given the server's page size.
    #[must_use]
    pub const fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(page_size)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for Page<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageWire<T> {
    Plain(Vec<T>),
    Paginated {
        count: u64,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageWire::deserialize(deserializer)? {
            PageWire::Plain(results) => Self::from(results),
            PageWire::Paginated {
                count,
                next,
                previous,
                results,
            } => Self {
                count,
                next,
                previous,
                results,
            },
        })
    }
}
