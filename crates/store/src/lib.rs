use async_trait::async_trait;
use hive_primitives::BlockNumber;
use std::sync::Arc;


pub mod sqlite;

pub use sqlite::SqlitePostStore;


pub type PostStoreRef = Arc<dyn PostStore + Send + Sync>;


/// A post row ready for persistence.
///
/// `url` is the unique `@author/permlink` key, `tags` is a JSON array
/// rendered to text, `timestamp` is kept verbatim as the chain reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub url: String,
    pub author: String,
    pub permlink: String,
    pub title: String,
    pub tags: String,
    pub block_num: BlockNumber,
    pub timestamp: String,
}


/// Durable, key-deduplicated storage of extracted posts.
#[async_trait]
pub trait PostStore {
    /// Highest block height any stored row was extracted from,
    /// or `None` for an empty store.
    async fn max_processed_height(&self) -> anyhow::Result<Option<BlockNumber>>;

    /// Inserts a row unless its key is already present.
    ///
    /// Returns whether a new row was actually written. A key conflict
    /// is not an error.
    async fn insert_post_if_absent(&self, record: &PostRecord) -> anyhow::Result<bool>;
}
