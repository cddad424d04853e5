use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;
use url::Url;

use super::{
    ApiError, AssociationStatus, BalanceDetails, BroadcastReceipt, LeaseInfo, NodeApi,
    TransactionRecord,
};
use crate::{
    crypto::Address,
    transaction::{Transaction, TxKind},
};

const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for node client retries and timeouts
#[derive(Debug, Clone)]
pub struct NodeClientConfig {
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub connection_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for NodeClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            request_timeout: Duration::from_secs(30),
            connection_timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

/// HTTP client for the public node API
/// Parse a node address, assuming `http://` when it has no scheme
pub fn parse_node_url(node_address: &str) -> Result<Url, url::ParseError> {
    if node_address.contains("://") {
        Url::parse(node_address)
    } else {
        Url::parse(&format!("http://{}", node_address))
    }
}

pub struct NodeClient {
    client: Client,
    base_url: Url,
    config: NodeClientConfig,
}

impl NodeClient {
    /// Create a new node client with default configuration
    pub fn new(node_address: &str) -> Result<Self, ApiError> {
        Self::with_config(node_address, NodeClientConfig::default())
    }

    pub fn with_config(node_address: &str, config: NodeClientConfig) -> Result<Self, ApiError> {
        let base_url = parse_node_url(node_address)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connection_timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn build(&self, method: Method, url: &Url, body: Option<&Value>) -> RequestBuilder {
        let mut request = self.client.request(method, url.clone());
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    /// Send a request, retrying transport failures.
    ///
    /// Returns `None` on 404 so lookups can tell "unknown" from failure.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);

        let mut attempt = 0;
        loop {
            match self.send_once(method.clone(), &url, body).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        "Retrying request to {} (attempt {}/{}): {}",
                        url, attempt, self.config.max_retries, e
                    );
                    sleep(self.config.retry_delay).await;
                }
                Err(e) => {
                    debug!("Request to {} failed: {}", url, e);
                    return Err(e);
                }
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        let response = self
            .build(method, url, body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                message: if e.is_timeout() {
                    format!("timeout after {:?}", self.config.request_timeout)
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").into()),
            });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None)
            .await?
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: format!("{} not found", path),
            })
    }
}

// The node reports rejections as {"error": code, "message": ".."}
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| (!body.is_empty()).then(|| body.to_string()))
}

fn transactions_path(address: &Address, kind: Option<TxKind>, limit: usize) -> String {
    match kind {
        Some(kind) => format!(
            "transactions/address/{}?type={}&limit={}",
            address,
            kind.type_id(),
            limit
        ),
        None => format!("transactions/address/{}?limit={}", address, limit),
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    async fn broadcast(&self, transaction: &Transaction) -> Result<BroadcastReceipt, ApiError> {
        let body = transaction.to_json()?;
        self.request(Method::POST, "transactions/broadcast", Some(&body))
            .await?
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: "broadcast endpoint not found".into(),
            })
    }

    async fn transaction_info(&self, id: &str) -> Result<Option<TransactionRecord>, ApiError> {
        self.request(Method::GET, &format!("transactions/info/{}", id), None)
            .await
    }

    async fn transactions(
        &self,
        address: &Address,
        kind: Option<TxKind>,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        // One list per requested address
        let nested: Vec<Vec<TransactionRecord>> =
            self.get(&transactions_path(address, kind, limit)).await?;
        Ok(nested.into_iter().flatten().collect())
    }

    async fn lease_list(&self, address: &Address) -> Result<Vec<LeaseInfo>, ApiError> {
        self.get(&format!("leasing/active/{}", address)).await
    }

    async fn association_status(&self, address: &Address) -> Result<AssociationStatus, ApiError> {
        self.get(&format!("associations/status/{}", address)).await
    }

    async fn balance_details(&self, address: &Address) -> Result<BalanceDetails, ApiError> {
        self.get(&format!("addresses/balance/details/{}", address))
            .await
    }
}
