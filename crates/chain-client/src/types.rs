use serde::Deserialize;


#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub block_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}


#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub operations: Vec<Operation>,
}


/// A single operation within a transaction.
///
/// Only comment operations matter to the indexer. Every other kind the
/// chain may emit (votes, transfers, custom ops, ...) collapses into
/// `Other` and never fails deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Operation {
    #[serde(rename = "comment_operation")]
    Comment(CommentOperation),
    #[serde(other)]
    Other,
}


#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentOperation {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub permlink: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub parent_author: String,
    #[serde(default)]
    pub json_metadata: String,
}
