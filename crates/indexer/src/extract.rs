use hive_chain_client::{Block, Operation};
use hive_post_store::PostRecord;
use hive_primitives::{author_perm, block_number_from_id, MalformedBlockId};
use serde::Deserialize;
use serde_json::Value;


#[derive(Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    tags: Value,
}


/// Renders a post's raw metadata into a JSON array of tags.
///
/// Authors put anything in the metadata field, so parsing is permissive:
/// empty input means no tags, input that is not a metadata object is kept
/// as a single literal tag, a lone string under "tags" becomes a
/// one-element array, and any unexpected shape degrades to an empty array.
fn normalize_tags(raw: &str) -> String {
    if raw.is_empty() {
        return "[]".to_string();
    }

    let tags = match serde_json::from_str::<RawMetadata>(raw) {
        Ok(metadata) => metadata.tags,
        Err(_) => Value::String(raw.to_string()),
    };

    match tags {
        Value::String(tag) => {
            serde_json::to_string(&[tag]).unwrap_or_else(|_| "[]".to_string())
        }
        Value::Array(tags) => {
            serde_json::to_string(&tags).unwrap_or_else(|_| "[]".to_string())
        }
        _ => "[]".to_string(),
    }
}


/// Pulls every top-level post out of a block, in encounter order.
///
/// Replies (comments with a parent author) and all non-comment operations
/// are skipped. Duplicate keys are not filtered here - the store's unique
/// index takes care of those.
pub fn extract_posts(block: &Block) -> Result<Vec<PostRecord>, MalformedBlockId> {
    let block_num = block_number_from_id(&block.block_id)?;

    let mut records = Vec::new();

    for tx in &block.transactions {
        for op in &tx.operations {
            let comment = match op {
                Operation::Comment(comment) => comment,
                Operation::Other => continue,
            };

            if !comment.parent_author.is_empty() {
                continue;
            }

            records.push(PostRecord {
                url: author_perm(&comment.author, &comment.permlink),
                author: comment.author.clone(),
                permlink: comment.permlink.clone(),
                title: comment.title.clone(),
                tags: normalize_tags(&comment.json_metadata),
                block_num,
                timestamp: block.timestamp.clone(),
            });
        }
    }

    Ok(records)
}
