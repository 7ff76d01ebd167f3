use hive_primitives::BlockNumber;
use std::time::Duration;


/// Tracks how far a run has advanced towards a fixed target height.
///
/// The target is read once at bootstrap and never moves; the tracker only
/// answers how much work remains and how fast it is being done.
pub struct ProgressTracker {
    genesis: BlockNumber,
    target: BlockNumber,
    last_processed: BlockNumber,
}


impl ProgressTracker {
    pub fn new(genesis: BlockNumber, target: BlockNumber, last_processed: BlockNumber) -> Self {
        Self {
            genesis,
            target,
            last_processed,
        }
    }

    pub fn last_processed(&self) -> BlockNumber {
        self.last_processed
    }

    pub fn target(&self) -> BlockNumber {
        self.target
    }

    /// Remaining distance to the target. The run is done once this
    /// drops to zero or below.
    pub fn variance(&self) -> i64 {
        self.target as i64 - self.last_processed as i64
    }

    pub fn advance(&mut self, height: BlockNumber) {
        debug_assert!(height >= self.last_processed);
        self.last_processed = height;
    }

    pub fn percent_complete(&self) -> f64 {
        if self.target == self.genesis {
            return 100.0;
        }
        (self.last_processed as f64 - self.genesis as f64)
            / (self.target as f64 - self.genesis as f64)
            * 100.0
    }

    /// One human-readable progress line covering the batch that just
    /// finished and the run so far.
    #[allow(clippy::too_many_arguments)]
    pub fn report_line(
        &self,
        batch_start: BlockNumber,
        batch_blocks: usize,
        batch_posts: u64,
        batch_elapsed: Duration,
        total_blocks: u64,
        total_posts: u64,
        total_elapsed: Duration,
    ) -> String {
        format!(
            "progress: {:.2}% | block: {} | batch: {} blocks, {} posts in {:.2}s ({}) | total: {} blocks, {} posts in {:.0}s",
            self.percent_complete(),
            batch_start,
            batch_blocks,
            batch_posts,
            batch_elapsed.as_secs_f64(),
            block_rate(batch_blocks as u64, batch_elapsed),
            total_blocks,
            total_posts,
            total_elapsed.as_secs_f64()
        )
    }
}


pub fn block_rate(count: u64, elapsed: Duration) -> String {
    if elapsed.is_zero() {
        return "unknown rate".to_string();
    }
    format!("{:.1} blocks/s", count as f64 / elapsed.as_secs_f64())
}


#[cfg(test)]
mod test {
    use crate::progress::{block_rate, ProgressTracker};
    use std::time::Duration;

    #[test]
    fn variance_counts_down_to_zero() {
        let mut progress = ProgressTracker::new(100, 103, 100);
        assert_eq!(progress.variance(), 3);

        progress.advance(103);
        assert_eq!(progress.variance(), 0);
    }

    #[test]
    fn percent_complete_is_monotone_and_tops_out_at_100() {
        let mut progress = ProgressTracker::new(100, 200, 100);
        assert_eq!(progress.percent_complete(), 0.0);

        let mut previous = 0.0;
        for height in [120, 150, 150, 180, 200] {
            progress.advance(height);
            let percent = progress.percent_complete();
            assert!(percent >= previous);
            previous = percent;
        }

        assert_eq!(progress.percent_complete(), 100.0);
    }

    #[test]
    fn zero_span_run_is_already_complete() {
        let progress = ProgressTracker::new(100, 100, 100);
        assert_eq!(progress.percent_complete(), 100.0);
        assert_eq!(progress.variance(), 0);
    }

    #[test]
    fn zero_duration_batches_report_an_unknown_rate() {
        assert_eq!(block_rate(50, Duration::ZERO), "unknown rate");
        assert_eq!(block_rate(50, Duration::from_secs(2)), "25.0 blocks/s");
    }

    #[test]
    fn report_line_mentions_batch_and_totals() {
        let progress = ProgressTracker::new(100, 200, 150);

        let line = progress.report_line(
            141,
            10,
            3,
            Duration::from_secs(2),
            50,
            7,
            Duration::from_secs(60),
        );

        assert_eq!(
            line,
            "progress: 50.00% | block: 141 | batch: 10 blocks, 3 posts in 2.00s (5.0 blocks/s) | total: 50 blocks, 7 posts in 60s"
        );
    }
}
