use async_trait::async_trait;
use hive_primitives::BlockNumber;
use std::sync::Arc;


pub mod client;
pub mod types;

pub use client::{default_http_client, ReqwestChainClient};
pub use types::{Block, CommentOperation, Operation, Transaction};


pub type ChainSourceRef = Arc<dyn ChainSource + Send + Sync>;


/// Read access to the chain's block history.
#[async_trait]
pub trait ChainSource {
    /// Height of the current chain head.
    async fn head_height(&self) -> anyhow::Result<BlockNumber>;

    /// Fetches `count` consecutive blocks starting at `start`.
    ///
    /// The whole range either arrives or the call fails - partial
    /// results are never returned.
    async fn block_range(&self, start: BlockNumber, count: u64) -> anyhow::Result<Vec<Block>>;
}
