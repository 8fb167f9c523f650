//! Process-wide term statistics, per field.
//!
//! Building the statistics of a field requires a full pass over a token
//! stream, so they are computed lazily, once per field, and shared by all of
//! the highlight requests of the process.

use std::sync::{Arc, RwLock};

use log::{debug, warn};
use once_cell::sync::{Lazy, OnceCell};
use rustc_hash::FxHashMap;

use crate::tokenizer::TokenCursor;
use crate::Score;

/// Term frequencies observed in a field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldStatistics {
    term_freqs: FxHashMap<String, u64>,
    num_tokens: u64,
}

impl FieldStatistics {
    /// Computes the statistics of the tokens of `cursor`.
    ///
    /// The cursor is rewound before and after the pass.
    pub fn from_cursor(cursor: &mut dyn TokenCursor) -> crate::Result<FieldStatistics> {
        let mut statistics = FieldStatistics::default();
        cursor.reset();
        while cursor.advance()? {
            let token = cursor.token();
            *statistics.term_freqs.entry(token.text.clone()).or_insert(0) += 1;
            statistics.num_tokens += 1;
        }
        cursor.reset();
        Ok(statistics)
    }

    /// Number of occurrences of `term`.
    pub fn term_freq(&self, term: &str) -> u64 {
        self.term_freqs.get(term).copied().unwrap_or(0)
    }

    /// Total number of tokens.
    pub fn num_tokens(&self) -> u64 {
        self.num_tokens
    }

    /// Inverse frequency of `term`, computed as `log(1 + (N - n + 0.5) / (n + 0.5))`.
    pub fn idf(&self, term: &str) -> Score {
        let term_freq = self.term_freq(term);
        let num_tokens = self.num_tokens.max(term_freq);
        let x = ((num_tokens - term_freq) as Score + 0.5) / (term_freq as Score + 0.5);
        (1.0 + x).ln()
    }
}

static GLOBAL_CACHE: Lazy<FieldStatisticsCache> = Lazy::new(FieldStatisticsCache::default);

/// Lazily populated `FieldStatistics`, keyed by field name.
///
/// Concurrent requests for a field that is not populated yet wait for a
/// single build: the statistics of a field are computed at most once until
/// they are invalidated. A failed build leaves the entry empty, and the next
/// request retries.
#[derive(Default)]
pub struct FieldStatisticsCache {
    entries: RwLock<FxHashMap<String, Arc<OnceCell<Arc<FieldStatistics>>>>>,
}

impl FieldStatisticsCache {
    /// Returns the process-wide cache.
    pub fn global() -> &'static FieldStatisticsCache {
        &GLOBAL_CACHE
    }

    fn entry(&self, field: &str) -> crate::Result<Arc<OnceCell<Arc<FieldStatistics>>>> {
        if let Some(cell) = self.entries.read()?.get(field) {
            return Ok(cell.clone());
        }
        let mut entries = self.entries.write()?;
        Ok(entries.entry(field.to_string()).or_default().clone())
    }

    /// Returns the statistics of `field`, building them with `build` if
    /// they are not available yet.
    pub fn get_or_build<F>(&self, field: &str, build: F) -> crate::Result<Arc<FieldStatistics>>
    where F: FnOnce() -> crate::Result<FieldStatistics> {
        let cell = self.entry(field)?;
        // The lock on the map is released here: a long build only blocks
        // the requests for the same field.
        let statistics = cell.get_or_try_init(|| {
            debug!("building field statistics for field `{field}`");
            build().map(Arc::new)
        })?;
        Ok(statistics.clone())
    }

    /// Returns the statistics of `field` if they have been built.
    pub fn get(&self, field: &str) -> crate::Result<Option<Arc<FieldStatistics>>> {
        let entries = self.entries.read()?;
        Ok(entries.get(field).and_then(|cell| cell.get().cloned()))
    }

    /// Drops the statistics of `field`. Returns true if there was an entry.
    pub fn invalidate(&self, field: &str) -> crate::Result<bool> {
        Ok(self.entries.write()?.remove(field).is_some())
    }

    /// Drops every entry.
    pub fn clear(&self) -> crate::Result<()> {
        self.entries.write()?.clear();
        Ok(())
    }

    /// Number of fields with built statistics.
    ///
    /// A poisoned cache counts as empty.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.values().filter(|cell| cell.get().is_some()).count(),
            Err(_) => {
                warn!("field statistics cache is poisoned");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for FieldStatisticsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldStatisticsCache")
            .field("len", &self.len())
            .finish()
    }
}
