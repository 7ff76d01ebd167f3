use thiserror::Error;


pub type BlockNumber = u64;


/// Block id whose height prefix could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed block id - {0:?}")]
pub struct MalformedBlockId(pub String);


/// Extracts the numeric height of a block from its id.
///
/// The first 8 characters of a block id are the big-endian hex encoding
/// of the block height.
pub fn block_number_from_id(block_id: &str) -> Result<BlockNumber, MalformedBlockId> {
    let prefix = block_id
        .get(..8)
        .ok_or_else(|| MalformedBlockId(block_id.to_string()))?;

    BlockNumber::from_str_radix(prefix, 16)
        .map_err(|_| MalformedBlockId(block_id.to_string()))
}


/// Canonical `@author/permlink` key of a post.
pub fn author_perm(author: &str, permlink: &str) -> String {
    format!("@{}/{}", author, permlink)
}
