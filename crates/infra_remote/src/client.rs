//! HTTP adapter for the remote bill service
//!
//! Implements the domain's [`ItemGateway`] and [`FeeGateway`] ports
//! against the service's CRUD endpoints:
//!
//! ```text
//! GET    /bills/{billId}/items          list
//! POST   /bills/{billId}/items          create
//! PUT    /bills/{billId}/items/{id}     update
//! DELETE /bills/{billId}/items/{id}     delete
//! ```
//!
//! (and the same shape under `/fees`). Transport failures, non-success
//! statuses, and undecodable bodies are all translated into the opaque
//! [`GatewayError`] the domain expects; no domain semantics ride on the
//! HTTP detail.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use core_kernel::{BillId, DomainPort, FeeId, GatewayError, ItemId};
use domain_bill::{Fee, FeeDraft, FeeGateway, Item, ItemDraft, ItemGateway};

use crate::config::RemoteConfig;
use crate::dto::{FeeDto, FeePayload, ItemDto, ItemPayload};
use crate::error::RemoteError;

/// Reqwest-backed implementation of the bill gateway ports
#[derive(Debug, Clone)]
pub struct RemoteBillService {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteBillService {
    /// Creates an adapter from explicit configuration
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RemoteError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?
            .to_string();
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Creates an adapter from `BILLSPLIT_`-prefixed environment variables
    pub fn from_env() -> Result<Self, RemoteError> {
        Self::new(&RemoteConfig::from_env()?)
    }

    fn collection_url(&self, bill_id: BillId, kind: &str) -> String {
        format!("{}/bills/{}/{kind}", self.base_url, bill_id.as_uuid())
    }

    fn entity_url(&self, bill_id: BillId, kind: &str, id: &Uuid) -> String {
        format!("{}/bills/{}/{kind}/{id}", self.base_url, bill_id.as_uuid())
    }

    fn transport_error(&self, operation: &'static str, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if error.is_decode() {
            GatewayError::decode(error.to_string())
        } else {
            GatewayError::Connection {
                message: error.to_string(),
                source: Some(Box::new(error)),
            }
        }
    }

    /// Turns a non-success response into a status error
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::status(status.as_u16(), body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
    ) -> Result<T, GatewayError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::decode(e.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::decode(e.to_string()))
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self
            .http
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::decode(e.to_string()))
    }

    async fn delete_request(
        &self,
        operation: &'static str,
        url: String,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        Self::check(response).await?;
        Ok(())
    }
}

impl DomainPort for RemoteBillService {}

#[async_trait]
impl ItemGateway for RemoteBillService {
    #[instrument(skip(self), fields(bill_id = %bill_id))]
    async fn list(&self, bill_id: BillId) -> Result<Vec<Item>, GatewayError> {
        debug!("listing items");
        let dtos: Vec<ItemDto> = self
            .get_json("list_items", self.collection_url(bill_id, "items"))
            .await?;
        dtos.into_iter().map(Item::try_from).collect()
    }

    #[instrument(skip(self, draft), fields(bill_id = %bill_id))]
    async fn create(&self, bill_id: BillId, draft: ItemDraft) -> Result<Item, GatewayError> {
        debug!("creating item");
        let payload = ItemPayload::new(bill_id, &draft);
        let dto: ItemDto = self
            .post_json("create_item", self.collection_url(bill_id, "items"), &payload)
            .await?;
        Item::try_from(dto)
    }

    #[instrument(skip(self, draft), fields(bill_id = %bill_id, item_id = %id))]
    async fn update(
        &self,
        bill_id: BillId,
        id: ItemId,
        draft: ItemDraft,
    ) -> Result<Item, GatewayError> {
        debug!("updating item");
        let payload = ItemPayload::new(bill_id, &draft);
        let dto: ItemDto = self
            .put_json(
                "update_item",
                self.entity_url(bill_id, "items", id.as_uuid()),
                &payload,
            )
            .await?;
        Item::try_from(dto)
    }

    #[instrument(skip(self), fields(bill_id = %bill_id, item_id = %id))]
    async fn delete(&self, bill_id: BillId, id: ItemId) -> Result<(), GatewayError> {
        debug!("deleting item");
        self.delete_request("delete_item", self.entity_url(bill_id, "items", id.as_uuid()))
            .await
    }
}

#[async_trait]
impl FeeGateway for RemoteBillService {
    #[instrument(skip(self), fields(bill_id = %bill_id))]
    async fn list(&self, bill_id: BillId) -> Result<Vec<Fee>, GatewayError> {
        debug!("listing fees");
        let dtos: Vec<FeeDto> = self
            .get_json("list_fees", self.collection_url(bill_id, "fees"))
            .await?;
        dtos.into_iter().map(Fee::try_from).collect()
    }

    #[instrument(skip(self, draft), fields(bill_id = %bill_id))]
    async fn create(&self, bill_id: BillId, draft: FeeDraft) -> Result<Fee, GatewayError> {
        debug!("creating fee");
        let payload = FeePayload::new(bill_id, &draft);
        let dto: FeeDto = self
            .post_json("create_fee", self.collection_url(bill_id, "fees"), &payload)
            .await?;
        Fee::try_from(dto)
    }

    #[instrument(skip(self, draft), fields(bill_id = %bill_id, fee_id = %id))]
    async fn update(
        &self,
        bill_id: BillId,
        id: FeeId,
        draft: FeeDraft,
    ) -> Result<Fee, GatewayError> {
        debug!("updating fee");
        let payload = FeePayload::new(bill_id, &draft);
        let dto: FeeDto = self
            .put_json(
                "update_fee",
                self.entity_url(bill_id, "fees", id.as_uuid()),
                &payload,
            )
            .await?;
        Fee::try_from(dto)
    }

    #[instrument(skip(self), fields(bill_id = %bill_id, fee_id = %id))]
    async fn delete(&self, bill_id: BillId, id: FeeId) -> Result<(), GatewayError> {
        debug!("deleting fee");
        self.delete_request("delete_fee", self.entity_url(bill_id, "fees", id.as_uuid()))
            .await
    }
}
