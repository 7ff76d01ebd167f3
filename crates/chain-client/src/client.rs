use crate::types::Block;
use crate::ChainSource;
use anyhow::anyhow;
use async_trait::async_trait;
use hive_primitives::BlockNumber;
use reqwest::{Client, IntoUrl, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use tracing::{debug, instrument};


pub fn default_http_client() -> Client {
    Client::builder()
        .read_timeout(Duration::from_secs(20))
        .connect_timeout(Duration::from_secs(20))
        .gzip(true)
        .build()
        .unwrap()
}


/// JSON-RPC 2.0 client for a Hive API endpoint.
#[derive(Clone)]
pub struct ReqwestChainClient {
    http: Client,
    url: Url,
}


impl Debug for ReqwestChainClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestChainClient")
            .field("url", &self.url.as_str())
            .finish()
    }
}


#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
}


#[derive(Deserialize)]
struct GlobalProperties {
    head_block_number: BlockNumber,
}


#[derive(Deserialize)]
struct BlockRangeResult {
    #[serde(default)]
    blocks: Vec<Block>,
}


impl ReqwestChainClient {
    pub fn from_url(url: impl IntoUrl) -> Self {
        let http = default_http_client();
        Self::new(http, url)
    }

    pub fn new(http: Client, url: impl IntoUrl) -> Self {
        Self {
            http,
            url: url.into_url().unwrap(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> anyhow::Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!(method, "send request");

        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: RpcResponse<T> = response.json().await?;

        envelope
            .result
            .ok_or_else(|| anyhow!("{} response carries no result", method))
    }
}


#[async_trait]
impl ChainSource for ReqwestChainClient {
    #[instrument(level = "debug", skip_all, fields(url = %self.url.as_str()))]
    async fn head_height(&self) -> anyhow::Result<BlockNumber> {
        let props: GlobalProperties = self
            .call("database_api.get_dynamic_global_properties", json!({}))
            .await?;
        Ok(props.head_block_number)
    }

    #[instrument(level = "debug", skip_all, fields(
        url = %self.url.as_str(),
        start = %start,
        count = %count
    ))]
    async fn block_range(&self, start: BlockNumber, count: u64) -> anyhow::Result<Vec<Block>> {
        let range: BlockRangeResult = self
            .call(
                "block_api.get_block_range",
                json!({
                    "starting_block_num": start,
                    "count": count
                }),
            )
            .await?;
        Ok(range.blocks)
    }
}
