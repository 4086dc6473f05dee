//! Search configuration: a builder-style struct in the manner of the
//! teacher's `FmIndexConfig` (method chaining, `Self { .., ..self }`
//! spreads, assertions on construction-time invariants).

use crate::error::WordRectError;

/// Which finder a dimension search should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Rectangle,
    Lattice,
    Waffle,
}

/// A snapshot of search progress, passed to [`SearchConfig`]'s optional
/// `on_progress` hook while the caller holds the shared watermark's
/// critical section (spec §5; recovered from `WordRectSearchMgr.cpp`'s
/// periodic status printing).
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub best_area: usize,
    pub rects_found_total: usize,
    pub symmetric_squares_found: usize,
    pub sizes_completed: usize,
    pub sizes_total: usize,
}

/// All parameters of [`SearchManager::run`](crate::search_manager::SearchManager::run),
/// plus ambient knobs recovered from `wordRectMain.cpp`'s flag set (see
/// SPEC_FULL §11).
#[derive(Clone)]
pub struct SearchConfig {
    pub(crate) min_tall: usize,
    pub(crate) max_tall: usize,
    pub(crate) min_area: usize,
    pub(crate) max_area: usize,
    pub(crate) min_word_length: usize,
    pub(crate) max_word_length: usize,
    pub(crate) min_count: usize,
    pub(crate) per_size_quota: usize,
    pub(crate) total_quota: usize,
    pub(crate) ascending: bool,
    pub(crate) variant: Variant,
    pub(crate) odd_dimensions_only: bool,
    pub(crate) abort_if_trumped: bool,
    pub(crate) worker_count_override: Option<usize>,
    pub(crate) on_progress: Option<std::sync::Arc<dyn Fn(&Snapshot) + Send + Sync>>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// `H` ranges over `[min_tall, max_tall]`. Default `2..=48`, from the
    /// original program's defaults.
    pub fn tall_range(self, min_tall: usize, max_tall: usize) -> Self {
        assert!(min_tall > 0 && min_tall <= max_tall);
        Self {
            min_tall,
            max_tall,
            ..self
        }
    }

    /// `W * H` ranges over `[min_area, max_area]`. Default `4..=max_tall^2`.
    pub fn area_range(self, min_area: usize, max_area: usize) -> Self {
        assert!(min_area > 0 && min_area <= max_area);
        Self {
            min_area,
            max_area,
            ..self
        }
    }

    /// Word lengths loaded from the dictionary at all, `[min_word_length,
    /// max_word_length]`. Default `2..=36`.
    pub fn word_length_range(self, min_word_length: usize, max_word_length: usize) -> Self {
        assert!(min_word_length > 0 && min_word_length <= max_word_length);
        Self {
            min_word_length,
            max_word_length,
            ..self
        }
    }

    /// Minimum histogram occurrence count for a byte to receive its own
    /// `CharIndex` slot (`CharIndex::from_histogram`'s `min_count`).
    pub fn min_char_count(self, min_count: usize) -> Self {
        assert!(min_count > 0);
        Self { min_count, ..self }
    }

    /// Caps the number of rectangles emitted per `(W, H)` size and across
    /// the whole run. `0` means unbounded.
    pub fn quotas(self, per_size_quota: usize, total_quota: usize) -> Self {
        let per_size_quota = if per_size_quota == 0 { usize::MAX } else { per_size_quota };
        let total_quota = if total_quota == 0 { usize::MAX } else { total_quota };
        Self {
            per_size_quota,
            total_quota,
            ..self
        }
    }

    /// Enumerate `(W, H)` pairs smallest-area-first instead of the default
    /// largest-area-first.
    pub fn ascending(self, ascending: bool) -> Self {
        Self { ascending, ..self }
    }

    pub fn variant(self, variant: Variant) -> Self {
        Self { variant, ..self }
    }

    /// Recovered from the original's `-o` flag: restrict the search to
    /// dimensions where both `W` and `H` are odd, even for the plain
    /// rectangle variant (lattice and waffle already imply this).
    pub fn odd_dimensions_only(self, odd_dimensions_only: bool) -> Self {
        Self {
            odd_dimensions_only,
            ..self
        }
    }

    /// Recovered from the original's `-e` ("find all sizes") flag: when
    /// `false`, a worker never aborts merely because a larger rectangle was
    /// found elsewhere; per-size and total quotas are still honored.
    pub fn abort_if_trumped(self, abort_if_trumped: bool) -> Self {
        Self {
            abort_if_trumped,
            ..self
        }
    }

    /// Overrides the `min(16, floor(1.5 * num_cores))` worker-count
    /// default (spec §5).
    pub fn worker_count(self, worker_count: usize) -> Self {
        assert!(worker_count > 0);
        Self {
            worker_count_override: Some(worker_count),
            ..self
        }
    }

    /// Installs a progress-snapshot hook, invoked while the manager holds
    /// the shared watermark's critical section (spec §5).
    pub fn on_progress(self, hook: impl Fn(&Snapshot) + Send + Sync + 'static) -> Self {
        Self {
            on_progress: Some(std::sync::Arc::new(hook)),
            ..self
        }
    }

    pub(crate) fn resolved_worker_count(&self) -> usize {
        self.worker_count_override.unwrap_or_else(|| {
            let cores = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            (cores * 3 / 2).clamp(1, 16)
        })
    }

    /// Validates cross-field invariants that single-setter assertions can't
    /// catch (spec §7's "invalid dimension ranges").
    pub fn validate(&self) -> Result<(), WordRectError> {
        if self.min_tall > self.max_tall {
            return Err(WordRectError::InvalidTallRange {
                min_tall: self.min_tall,
                max_tall: self.max_tall,
            });
        }
        if self.min_area > self.max_area {
            return Err(WordRectError::InvalidAreaRange {
                min_area: self.min_area,
                max_area: self.max_area,
            });
        }
        if self.min_word_length > self.max_word_length {
            return Err(WordRectError::InvalidWordLengthRange {
                min: self.min_word_length,
                max: self.max_word_length,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        let max_tall = 48;
        Self {
            min_tall: 2,
            max_tall,
            min_area: 4,
            max_area: max_tall * max_tall,
            min_word_length: 2,
            max_word_length: 36,
            min_count: 1,
            per_size_quota: usize::MAX,
            total_quota: usize::MAX,
            ascending: false,
            variant: Variant::Rectangle,
            odd_dimensions_only: false,
            abort_if_trumped: true,
            worker_count_override: None,
            on_progress: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_program() {
        let config = SearchConfig::default();
        assert_eq!(config.min_tall, 2);
        assert_eq!(config.max_tall, 48);
        assert_eq!(config.min_area, 4);
        assert_eq!(config.max_area, 48 * 48);
        assert_eq!(config.max_word_length, 36);
    }

    #[test]
    fn builder_chains_and_validates() {
        let config = SearchConfig::new()
            .tall_range(3, 10)
            .area_range(9, 100)
            .word_length_range(3, 12)
            .quotas(1, 5)
            .ascending(true)
            .variant(Variant::Lattice)
            .odd_dimensions_only(true)
            .abort_if_trumped(false);

        assert!(config.validate().is_ok());
        assert_eq!(config.variant, Variant::Lattice);
        assert!(config.ascending);
        assert!(!config.abort_if_trumped);
    }

    #[test]
    #[should_panic]
    fn tall_range_rejects_inverted_bounds() {
        SearchConfig::new().tall_range(10, 3);
    }

    #[test]
    fn explicit_worker_count_override_bypasses_the_cap() {
        let config = SearchConfig::new().worker_count(1000);
        assert_eq!(config.resolved_worker_count(), 1000);
    }

    #[test]
    fn default_resolved_worker_count_is_capped_at_sixteen() {
        let config = SearchConfig::new();
        assert!(config.resolved_worker_count() <= 16);
        assert!(config.resolved_worker_count() >= 1);
    }
}
