use crate::extract::extract_posts;
use crate::metrics;
use crate::progress::ProgressTracker;
use crate::retry::retry_with_backoff;
use anyhow::Context;
use hive_chain_client::{Block, ChainSourceRef};
use hive_post_store::PostStoreRef;
use hive_primitives::{block_number_from_id, BlockNumber};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};


pub struct IngestionConfig {
    pub genesis_block: BlockNumber,
    pub batch_size: u64,
    pub max_retries: u32,
    pub retry_delay: Duration,
}


/// Cumulative counters of a single run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub processed_blocks: u64,
    pub inserted_posts: u64,
    pub last_processed: BlockNumber,
}


/// Sequential catch-up over the gap between the stored state and the
/// chain head.
///
/// Blocks are pulled in bounded batches and processed one by one;
/// `last_processed` only ever advances past fully handled blocks, so an
/// interrupted run resumes from the store's max height. Retry budgets
/// bound every external call - once a budget is exhausted the run stops
/// with the error instead of spinning on the same range.
pub struct IngestionLoop {
    chain: ChainSourceRef,
    store: PostStoreRef,
    config: IngestionConfig,
    cancel: CancellationToken,
}


impl IngestionLoop {
    pub fn new(
        chain: ChainSourceRef,
        store: PostStoreRef,
        config: IngestionConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            chain,
            store,
            config,
            cancel,
        }
    }

    pub async fn run(&self) -> anyhow::Result<RunStats> {
        let target = retry_with_backoff(
            self.config.max_retries,
            self.config.retry_delay,
            "head height query",
            || async move { self.chain.head_height().await },
        )
        .await
        .context("could not obtain the chain head height")?;

        let resume = retry_with_backoff(
            self.config.max_retries,
            self.config.retry_delay,
            "resume height query",
            || async move { self.store.max_processed_height().await },
        )
        .await
        .context("could not obtain the resume height")?;

        let last_processed = resume.unwrap_or(self.config.genesis_block);
        let mut progress =
            ProgressTracker::new(self.config.genesis_block, target, last_processed);

        info!(
            "starting block processing - current: {}, last: {}, variance: {}",
            target,
            last_processed,
            progress.variance()
        );

        let run_start = Instant::now();
        let mut stats = RunStats::default();

        while progress.variance() > 0 {
            if self.cancel.is_cancelled() {
                info!("cancellation requested, stopping before the next batch");
                break;
            }

            let start_block = progress.last_processed() + 1;
            let count = self.config.batch_size.min(target - start_block + 1);

            let blocks = retry_with_backoff(
                self.config.max_retries,
                self.config.retry_delay,
                "block range fetch",
                || async move { self.chain.block_range(start_block, count).await },
            )
            .await
            .with_context(|| {
                format!(
                    "could not fetch blocks {}..={}",
                    start_block,
                    start_block + count - 1
                )
            })?;

            anyhow::ensure!(
                !blocks.is_empty(),
                "block range {}..={} came back empty",
                start_block,
                start_block + count - 1
            );

            let batch_start_time = Instant::now();
            let mut batch_inserts = 0;

            for block in &blocks {
                if self.cancel.is_cancelled() {
                    info!("cancellation requested, stopping after the current block");
                    break;
                }

                // synthetic genesis placeholder
                if block.block_id == "0" {
                    continue;
                }

                match self.process_block(block).await {
                    Ok((height, inserted)) => {
                        progress.advance(height);
                        batch_inserts += inserted;
                        stats.processed_blocks += 1;
                        metrics::LAST_BLOCK.set(height as i64);
                        metrics::PROCESSED_BLOCKS.inc();
                    }
                    Err(err) => {
                        warn!(
                            block_id = %block.block_id,
                            "block processing failed, skipping: {:#}",
                            err
                        );
                    }
                }
            }

            stats.inserted_posts += batch_inserts;
            metrics::INSERTED_POSTS.inc_by(batch_inserts);

            let batch_elapsed = batch_start_time.elapsed();
            if !batch_elapsed.is_zero() {
                metrics::PROGRESS.set(blocks.len() as f64 / batch_elapsed.as_secs_f64());
            }

            info!(
                "{}",
                progress.report_line(
                    start_block,
                    blocks.len(),
                    batch_inserts,
                    batch_elapsed,
                    stats.processed_blocks,
                    stats.inserted_posts,
                    run_start.elapsed()
                )
            );
        }

        stats.last_processed = progress.last_processed();

        info!(
            "processing complete - total blocks: {}, total posts: {}, time: {:.0}s",
            stats.processed_blocks,
            stats.inserted_posts,
            run_start.elapsed().as_secs_f64()
        );

        Ok(stats)
    }

    /// Extracts and persists one block's posts.
    ///
    /// Returns the block's height and the number of newly inserted rows.
    /// An insert failure drops the block's remaining records so the block
    /// is not reported as processed.
    async fn process_block(&self, block: &Block) -> anyhow::Result<(BlockNumber, u64)> {
        let height = block_number_from_id(&block.block_id)?;
        let records = extract_posts(block)?;

        let mut inserted = 0;
        for record in &records {
            let fresh = retry_with_backoff(
                self.config.max_retries,
                self.config.retry_delay,
                "post insert",
                || async move { self.store.insert_post_if_absent(record).await },
            )
            .await
            .with_context(|| format!("could not insert {}", record.url))?;

            if fresh {
                inserted += 1;
            }
        }

        Ok((height, inserted))
    }
}
