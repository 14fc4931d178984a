//! The state query capability and its JSON-RPC over HTTP implementation.
//!
//! [`StateQuery`] is the only seam between proof construction and the
//! network. Everything the endpoint says is untrusted raw JSON until
//! [`crate::api`] normalizes it.

use std::time::Duration;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use bridgeproof_core::UnlockError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::api::{RpcBlock, RpcProof};
use crate::config::{UnlockProofConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Read access to historical state of the source chain.
#[async_trait]
pub trait StateQuery: Send + Sync {
    /// `eth_getProof(address, slots, block)`.
    async fn get_proof(
        &self,
        address: Address,
        slots: &[B256],
        block: u64,
    ) -> Result<RpcProof, UnlockError>;

    /// `eth_getBlockByNumber(block, false)`. `None` if the node does not
    /// know the block.
    async fn get_block(&self, block: u64) -> Result<Option<RpcBlock>, UnlockError>;
}

#[async_trait]
impl<Q: StateQuery + ?Sized> StateQuery for std::sync::Arc<Q> {
    async fn get_proof(
        &self,
        address: Address,
        slots: &[B256],
        block: u64,
    ) -> Result<RpcProof, UnlockError> {
        (**self).get_proof(address, slots, block).await
    }

    async fn get_block(&self, block: u64) -> Result<Option<RpcBlock>, UnlockError> {
        (**self).get_block(block).await
    }
}

/// A [`StateQuery`] that talks JSON-RPC to an execution client over HTTP.
#[derive(Clone)]
pub struct HttpStateQuery {
    http_client: reqwest::Client,
    url: Url,
    timeout: Duration,
}

impl HttpStateQuery {
    /// Creates a new client that sends requests to `url`
    pub fn new(url: Url) -> Self {
        Self {
            http_client: reqwest::Client::default(),
            url,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &UnlockProofConfig) -> Self {
        Self::new(config.rpc_url.clone()).with_timeout(config.request_timeout())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one request. `Ok(None)` is a `null` result.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
        block: u64,
    ) -> Result<Option<T>, UnlockError> {
        let request = JsonRpcRequest::new(method, params);
        tracing::debug!(method, block, url = %self.url, "sending request");

        let response = self
            .http_client
            .post(self.url.as_str())
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| network_failure(method, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| network_failure(method, e))?;
        tracing::debug!(method, %status, bytes = body.len(), "received response");

        let envelope: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            let reason = if status.is_success() {
                format!("{method}: undecodable response: {e}")
            } else {
                format!("{method}: HTTP {status}")
            };
            UnlockError::NetworkFailure { reason }
        })?;

        if let Some(error) = envelope.error {
            tracing::debug!(method, code = error.code, message = %error.message, "rpc error");
            return Err(error.classify(block));
        }

        match envelope.result {
            None | Some(Value::Null) => Ok(None),
            Some(result) => serde_json::from_value(result)
                .map(Some)
                .map_err(|e| UnlockError::NetworkFailure {
                    reason: format!("{method}: unexpected result shape: {e}"),
                }),
        }
    }
}

fn network_failure(method: &str, e: reqwest::Error) -> UnlockError {
    let reason = if e.is_timeout() {
        format!("{method}: request timed out")
    } else {
        format!("{method}: {e}")
    };
    UnlockError::NetworkFailure { reason }
}

/// Block tag for a block number: `0x`-prefixed minimal hex.
pub fn block_tag(block: u64) -> String {
    format!("{block:#x}")
}

#[async_trait]
impl StateQuery for HttpStateQuery {
    async fn get_proof(
        &self,
        address: Address,
        slots: &[B256],
        block: u64,
    ) -> Result<RpcProof, UnlockError> {
        let params = vec![json!(address), json!(slots), json!(block_tag(block))];
        self.request::<RpcProof>("eth_getProof", params, block)
            .await?
            .ok_or_else(|| UnlockError::ProofUnavailable {
                block,
                reason: "eth_getProof returned null".to_string(),
            })
    }

    async fn get_block(&self, block: u64) -> Result<Option<RpcBlock>, UnlockError> {
        let params = vec![json!(block_tag(block)), json!(false)];
        self.request::<RpcBlock>("eth_getBlockByNumber", params, block)
            .await
    }
}
