use hive_post_store::{PostRecord, PostStore, SqlitePostStore};


fn post(author: &str, permlink: &str, block_num: u64) -> PostRecord {
    PostRecord {
        url: format!("@{}/{}", author, permlink),
        author: author.to_string(),
        permlink: permlink.to_string(),
        title: "a title".to_string(),
        tags: r#"["one","two"]"#.to_string(),
        block_num,
        timestamp: "2024-11-20T10:05:33".to_string(),
    }
}


#[tokio::test]
async fn empty_store_has_no_processed_height() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = SqlitePostStore::open(dir.path().join("posts.db")).await?;

    assert_eq!(store.max_processed_height().await?, None);
    Ok(())
}


#[tokio::test]
async fn insert_is_idempotent_per_key() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = SqlitePostStore::open(dir.path().join("posts.db")).await?;

    assert!(store.insert_post_if_absent(&post("alice", "intro", 101)).await?);
    assert!(!store.insert_post_if_absent(&post("alice", "intro", 101)).await?);

    // same key from a later block is still a no-op
    assert!(!store.insert_post_if_absent(&post("alice", "intro", 205)).await?);

    Ok(())
}


#[tokio::test]
async fn max_height_tracks_the_highest_inserted_row() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = SqlitePostStore::open(dir.path().join("posts.db")).await?;

    store.insert_post_if_absent(&post("alice", "one", 103)).await?;
    store.insert_post_if_absent(&post("bob", "two", 101)).await?;

    assert_eq!(store.max_processed_height().await?, Some(103));
    Ok(())
}


#[tokio::test]
async fn reopening_preserves_rows_and_height() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("posts.db");

    {
        let store = SqlitePostStore::open(&path).await?;
        store.insert_post_if_absent(&post("carol", "resume", 150)).await?;
    }

    let store = SqlitePostStore::open(&path).await?;
    assert_eq!(store.max_processed_height().await?, Some(150));
    assert!(!store.insert_post_if_absent(&post("carol", "resume", 150)).await?);

    Ok(())
}
