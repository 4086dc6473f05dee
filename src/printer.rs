//! The printer/result collaborator (spec §1's "external collaborator" for
//! progress-printing formatting, and spec §6's emitted rectangle format).

use std::time::Duration;

/// One rectangle as delivered to a [`Printer`]: spec §6's `(W, H, rows,
/// is_symmetric_square, worker_id, elapsed_seconds)` tuple.
#[derive(Debug, Clone)]
pub struct FoundRectangle {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<u8>>,
    pub is_symmetric_square: bool,
    pub worker_id: usize,
    pub elapsed: Duration,
}

/// Receives found rectangles from the [`SearchManager`](crate::search_manager::SearchManager).
/// Held behind the single critical section described in spec §5; `print`
/// should not block for long.
pub trait Printer: Send + Sync {
    fn print(&self, found: &FoundRectangle);
}

/// The default printer: one line per row, plus a trailing summary line.
/// Non-ASCII-safe bytes are replaced with `?` rather than panicking, since
/// dictionary words are arbitrary bytes, not guaranteed UTF-8.
pub struct TextPrinter;

impl Printer for TextPrinter {
    fn print(&self, found: &FoundRectangle) {
        for row in &found.rows {
            println!("{}", lossy(row));
        }
        println!(
            "{} x {} ({}{}), worker {}, {:.3}s",
            found.width,
            found.height,
            found.width * found.height,
            if found.is_symmetric_square { ", symmetric square" } else { "" },
            found.worker_id,
            found.elapsed.as_secs_f64(),
        );
    }
}

fn lossy(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' }).collect()
}
