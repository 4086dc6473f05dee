//! Fans dimension searches across a worker pool, maintains the shared
//! "best area found" watermark, and dispatches results to the printer
//! collaborator (spec §4.5, §5).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use crossbeam_channel::{bounded, unbounded, Sender};

use crate::config::{SearchConfig, Snapshot, Variant};
use crate::error::WordRectError;
use crate::lattice_finder::LatticeFinder;
use crate::printer::{FoundRectangle, Printer};
use crate::rect_finder::{Rectangle, RectFinder};
use crate::trie::Trie;
use crate::waffle_finder::WaffleFinder;

/// How a [`SearchManager::run`] call ended.
#[derive(Debug, Clone, Copy)]
pub enum SearchOutcome {
    /// Every `(W, H)` pair in range was either searched to exhaustion or
    /// skipped because it could no longer beat the watermark.
    Completed {
        rects_found: usize,
        best_area: usize,
        symmetric_squares_found: usize,
    },
    /// Stopped early because `total_quota` was reached.
    QuotaReached {
        rects_found: usize,
        best_area: usize,
        symmetric_squares_found: usize,
    },
}

/// Owns nothing that outlives a single `run` call beyond its borrows: the
/// tries, config and printer are all borrowed for the duration of the
/// search.
pub struct SearchManager<'a> {
    tries: &'a BTreeMap<usize, Trie>,
    config: SearchConfig,
    printer: &'a dyn Printer,
}

impl<'a> SearchManager<'a> {
    pub fn new(tries: &'a BTreeMap<usize, Trie>, config: SearchConfig, printer: &'a dyn Printer) -> Self {
        SearchManager {
            tries,
            config,
            printer,
        }
    }

    pub fn run(&self) -> Result<SearchOutcome, WordRectError> {
        self.config.validate()?;

        let pairs = self.enumerate_pairs();
        log::info!("search manager enumerated {} dimension pair(s)", pairs.len());

        let worker_count = self.config.resolved_worker_count().min(pairs.len().max(1));
        let best_area = AtomicUsize::new(0);
        let rects_found_total = AtomicUsize::new(0);
        let sizes_completed = AtomicUsize::new(0);
        let quota_reached = AtomicBool::new(false);
        let sizes_total = pairs.len();
        let start = Instant::now();

        // A rendezvous channel (capacity 0): `send` only returns once a
        // worker has picked the task up, which is what gives task creation
        // its required start-order guarantee without a separate semaphore.
        let (task_tx, task_rx) = bounded::<(usize, usize)>(0);
        let (result_tx, result_rx) = unbounded::<FoundRectangle>();

        // A dedicated pool, sized to `worker_count` rather than rayon's
        // global default, the same way `bwt.rs`'s correctness tests pin
        // their own thread count via `ThreadPoolBuilder`.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("wordrect-worker-{i}"))
            .build()
            .expect("failed to start the search worker pool");

        let symmetric_squares_found = pool.scope(|scope| {
            for worker_id in 0..worker_count {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let best_area = &best_area;
                let rects_found_total = &rects_found_total;
                let sizes_completed = &sizes_completed;
                let quota_reached = &quota_reached;
                scope.spawn(move |_| {
                    while let Ok((w, h)) = task_rx.recv() {
                        self.run_one(
                            worker_id,
                            w,
                            h,
                            start,
                            best_area,
                            rects_found_total,
                            quota_reached,
                            &result_tx,
                        );
                        sizes_completed.fetch_add(1, Ordering::Relaxed);
                        log::debug!("worker {worker_id} finished {w}x{h}");
                    }
                });
            }
            drop(task_rx);
            drop(result_tx);

            let best_area_for_producer = &best_area;
            let quota_reached_for_producer = &quota_reached;
            scope.spawn(move |_| {
                // `task_tx` is moved in and drops when this task ends,
                // which is what lets the workers' `recv` loops end.
                for (w, h) in pairs {
                    if quota_reached_for_producer.load(Ordering::Relaxed) {
                        break;
                    }
                    if !self.config.ascending {
                        let watermark = best_area_for_producer.load(Ordering::SeqCst);
                        if w * h <= watermark {
                            log::debug!("skipping {w}x{h}, already beaten by watermark {watermark}");
                            continue;
                        }
                    }
                    if task_tx.send((w, h)).is_err() {
                        break;
                    }
                }
            });

            let mut symmetric_squares_found = 0usize;
            while let Ok(found) = result_rx.recv() {
                if found.is_symmetric_square {
                    symmetric_squares_found += 1;
                }
                self.printer.print(&found);
                if let Some(hook) = &self.config.on_progress {
                    hook(&Snapshot {
                        best_area: best_area.load(Ordering::SeqCst),
                        rects_found_total: rects_found_total.load(Ordering::SeqCst),
                        symmetric_squares_found,
                        sizes_completed: sizes_completed.load(Ordering::Relaxed),
                        sizes_total,
                    });
                }
            }
            symmetric_squares_found
        });

        let rects_found = rects_found_total.load(Ordering::SeqCst);
        let best_area = best_area.load(Ordering::SeqCst);
        log::info!(
            "search finished: {rects_found} rectangle(s) ({symmetric_squares_found} symmetric square(s)), best area {best_area}"
        );

        Ok(if quota_reached.load(Ordering::Relaxed) {
            SearchOutcome::QuotaReached {
                rects_found,
                best_area,
                symmetric_squares_found,
            }
        } else {
            SearchOutcome::Completed {
                rects_found,
                best_area,
                symmetric_squares_found,
            }
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn run_one(
        &self,
        worker_id: usize,
        w: usize,
        h: usize,
        start: Instant,
        best_area: &AtomicUsize,
        rects_found_total: &AtomicUsize,
        quota_reached: &AtomicBool,
        result_tx: &Sender<FoundRectangle>,
    ) {
        let target_area = w * h;
        let abort_if_trumped = self.config.abort_if_trumped;

        let mut should_abort = || {
            if quota_reached.load(Ordering::Relaxed) {
                return true;
            }
            abort_if_trumped && target_area <= best_area.load(Ordering::SeqCst)
        };

        let total_quota = self.config.total_quota;
        let mut emit = |rect: Rectangle| {
            let found = FoundRectangle {
                width: rect.width,
                height: rect.height,
                rows: rect.rows,
                is_symmetric_square: rect.is_symmetric_square,
                worker_id,
                elapsed: start.elapsed(),
            };
            let _ = result_tx.send(found);
            let total = rects_found_total.fetch_add(1, Ordering::SeqCst) + 1;
            if total >= total_quota {
                quota_reached.store(true, Ordering::Relaxed);
            }
        };

        let area = match self.config.variant {
            Variant::Rectangle => {
                let Some(row_trie) = self.tries.get(&w) else { return };
                let Some(col_trie) = self.tries.get(&h) else { return };
                let mut finder = RectFinder::new(row_trie, col_trie);
                finder.run(self.config.per_size_quota, &mut should_abort, &mut emit)
            }
            Variant::Lattice => {
                let Some(row_trie) = self.tries.get(&w) else { return };
                let Some(col_trie) = self.tries.get(&h) else { return };
                let Some(mut finder) = LatticeFinder::new(row_trie, col_trie) else { return };
                finder.run(self.config.per_size_quota, &mut should_abort, &mut emit)
            }
            Variant::Waffle => {
                let odd_wide = w.div_ceil(2);
                let odd_tall = h.div_ceil(2);
                let (Some(row_full), Some(col_full), Some(row_half), Some(col_half)) = (
                    self.tries.get(&w),
                    self.tries.get(&h),
                    self.tries.get(&odd_wide),
                    self.tries.get(&odd_tall),
                ) else {
                    return;
                };
                let Some(mut finder) = WaffleFinder::new(row_full, col_full, row_half, col_half) else {
                    return;
                };
                finder.run(self.config.per_size_quota, &mut should_abort, &mut emit)
            }
        };

        if area > 0 {
            best_area.fetch_max(area as usize, Ordering::SeqCst);
        }
    }

    // Enumerates `(W, H)` pairs per spec §4.5: descending from
    // `(max_word_length, max_tall)` decrementing W down to H then H down to
    // `min_tall`, or the ascending mirror image from `(min_tall, min_tall)`.
    fn enumerate_pairs(&self) -> Vec<(usize, usize)> {
        let c = &self.config;
        let needs_odd = matches!(c.variant, Variant::Lattice | Variant::Waffle) || c.odd_dimensions_only;
        let mut pairs = Vec::new();

        let heights: Box<dyn Iterator<Item = usize>> = if c.ascending {
            Box::new(c.min_tall..=c.max_tall)
        } else {
            Box::new((c.min_tall..=c.max_tall).rev())
        };

        for h in heights {
            if needs_odd && h % 2 == 0 {
                continue;
            }
            let widths: Box<dyn Iterator<Item = usize>> = if c.ascending {
                Box::new(h..=c.max_word_length)
            } else {
                Box::new((h..=c.max_word_length).rev())
            };
            for w in widths {
                if needs_odd && w % 2 == 0 {
                    continue;
                }
                let area = w * h;
                if area < c.min_area || area > c.max_area {
                    continue;
                }
                pairs.push((w, h));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::TrieLoader;
    use std::sync::Mutex;

    fn tries_for(words: &[&str]) -> BTreeMap<usize, Trie> {
        let loader = TrieLoader::new(1, 10, 1);
        loader
            .load(words.iter().map(|w| w.as_bytes().to_vec()))
            .unwrap()
    }

    struct CollectingPrinter {
        found: Mutex<Vec<FoundRectangle>>,
    }

    impl Printer for CollectingPrinter {
        fn print(&self, found: &FoundRectangle) {
            self.found.lock().unwrap().push(found.clone());
        }
    }

    #[test]
    fn finds_the_only_rectangle_in_range() {
        let tries = tries_for(&[
            "AAHS", "AALS", "ABET", "ABUE", "ABUT", "HEBE", "LUBE", "PALS", "SETW", "STEW",
        ]);
        let config = SearchConfig::new()
            .tall_range(4, 4)
            .area_range(16, 16)
            .word_length_range(4, 4);
        let printer = CollectingPrinter {
            found: Mutex::new(Vec::new()),
        };
        let manager = SearchManager::new(&tries, config, &printer);
        let outcome = manager.run().unwrap();

        match outcome {
            SearchOutcome::Completed { rects_found, best_area, .. } => {
                assert_eq!(rects_found, 1);
                assert_eq!(best_area, 16);
            }
            SearchOutcome::QuotaReached { .. } => panic!("did not expect quota to be reached"),
        }
        assert_eq!(printer.found.lock().unwrap().len(), 1);
    }

    #[test]
    fn total_quota_stops_the_search_early() {
        let tries = tries_for(&["A", "B", "C", "D"]);
        let config = SearchConfig::new()
            .tall_range(1, 1)
            .area_range(1, 1)
            .word_length_range(1, 1)
            .quotas(10, 2);
        let printer = CollectingPrinter {
            found: Mutex::new(Vec::new()),
        };
        let manager = SearchManager::new(&tries, config, &printer);
        let outcome = manager.run().unwrap();

        match outcome {
            SearchOutcome::QuotaReached { rects_found, .. } => assert!(rects_found >= 2),
            SearchOutcome::Completed { .. } => panic!("expected the total quota to trigger"),
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_searching() {
        let tries = tries_for(&["AB"]);
        let mut config = SearchConfig::new();
        config.min_tall = 10;
        config.max_tall = 2;
        let printer = CollectingPrinter {
            found: Mutex::new(Vec::new()),
        };
        let manager = SearchManager::new(&tries, config, &printer);
        assert!(manager.run().is_err());
    }
}
