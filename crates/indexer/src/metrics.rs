use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::atomic::AtomicU64;


lazy_static::lazy_static! {
    pub static ref PROGRESS: Gauge<f64, AtomicU64> = Default::default();
    pub static ref LAST_BLOCK: Gauge = Default::default();
    pub static ref PROCESSED_BLOCKS: Counter = Default::default();
    pub static ref INSERTED_POSTS: Counter = Default::default();
}


pub fn register_metrics(registry: &mut Registry) {
    registry.register(
        "hive_progress_blocks_per_second",
        "Overall block processing speed",
        PROGRESS.clone()
    );
    registry.register(
        "hive_last_block",
        "Last processed block height",
        LAST_BLOCK.clone()
    );
    registry.register(
        "hive_processed_blocks",
        "Blocks processed during this run",
        PROCESSED_BLOCKS.clone()
    );
    registry.register(
        "hive_inserted_posts",
        "Post rows inserted during this run",
        INSERTED_POSTS.clone()
    );
}
