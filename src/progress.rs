//! Progress reporting for imports.
//!
//! An [`Importer`](crate::import::Importer) calls its callback once after
//! every chunk the store accepts.
//!
//! # Example
//!
//! ```rust
//! use chatarchive::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     println!("Imported {:.1}%", progress.percentage());
//! });
//!
//! callback(Progress::new(1000, 2500, 1));
//! ```

use std::sync::Arc;

/// Snapshot of an import in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Records written so far.
    pub items_processed: usize,

    /// Records to write in total.
    pub total_items: usize,

    /// Chunks written so far.
    pub chunks_written: usize,
}

impl Progress {
    pub fn new(items_processed: usize, total_items: usize, chunks_written: usize) -> Self {
        Self {
            items_processed,
            total_items,
            chunks_written,
        }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatarchive::progress::Progress;
    ///
    /// assert_eq!(Progress::new(500, 1000, 1).percentage(), 50.0);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total_items == 0 {
            return 100.0;
        }
        (self.items_processed as f64 / self.total_items as f64) * 100.0
    }

    /// Returns whether every record has been written.
    pub fn is_complete(&self) -> bool {
        self.items_processed >= self.total_items
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints to stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        eprintln!(
            "   chunk {}: {}/{} records ({:.0}%)",
            progress.chunks_written,
            progress.items_processed,
            progress.total_items,
            progress.percentage()
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        assert_eq!(Progress::new(250, 1000, 1).percentage(), 25.0);
    }

    #[test]
    fn test_progress_percentage_zero_total() {
        assert_eq!(Progress::new(0, 0, 0).percentage(), 100.0);
    }

    #[test]
    fn test_progress_is_complete() {
        assert!(Progress::new(2500, 2500, 3).is_complete());
        assert!(!Progress::new(2000, 2500, 2).is_complete());
    }

    #[test]
    fn test_no_progress_callback() {
        let callback = no_progress();
        callback(Progress::default());
    }

    #[test]
    fn test_progress_callback_type() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let callback: ProgressCallback = Arc::new(move |progress| {
            counter_clone.store(progress.items_processed, Ordering::SeqCst);
        });

        callback(Progress::new(42, 100, 1));
        assert_eq!(counter.load(Ordering::SeqCst), 42);
    }
}
