use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{config::Region, error::DisplayErrorContext, types::AttributeValue, Client};
use models::VisitRecord;
use tracing::debug;

use super::{
    DeleteItemOutput, DeleteItemRequest, GetItemOutput, GetItemRequest, PutItemOutput,
    PutItemRequest, VisitStore, STATUS_OK,
};
use crate::errors::ServiceError;

const ID_ATTR: &str = "id";
const COUNT_ATTR: &str = "count";

/// DynamoDB table with partition key `id` (S) and attribute `count` (N).
///
/// The SDK only hands back modelled outputs on success, so successful calls
/// report 200; failures surface as `ServiceError::Store`.
#[derive(Clone)]
pub struct DynamoVisitStore {
    client: Client,
}

impl DynamoVisitStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential/region chain.
    /// `endpoint_url` targets DynamoDB Local or another compatible endpoint.
    pub async fn from_env(endpoint_url: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_owned()));
        }
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config))
    }
}

fn key(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_owned())
}

fn record_from_item(item: &HashMap<String, AttributeValue>) -> Result<VisitRecord, ServiceError> {
    let id = item
        .get(ID_ATTR)
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| ServiceError::Store("item has no string `id`".into()))?;
    let count = item
        .get(COUNT_ATTR)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| ServiceError::Store(format!("item `{id}` has no numeric `count`")))?
        .parse::<u64>()
        .map_err(|e| ServiceError::store(&format!("item `{id}` count"), e))?;
    Ok(VisitRecord { id: id.clone(), count })
}

#[async_trait]
impl VisitStore for DynamoVisitStore {
    async fn get_item(&self, req: GetItemRequest) -> Result<GetItemOutput, ServiceError> {
        let out = self
            .client
            .get_item()
            .table_name(req.table_name.as_str())
            .key(ID_ATTR, key(&req.id))
            .send()
            .await
            .map_err(|e| ServiceError::store("dynamodb get_item", DisplayErrorContext(&e)))?;
        let item = out.item().map(record_from_item).transpose()?;
        debug!(table = %req.table_name, id = %req.id, found = item.is_some(), "dynamodb get_item");
        Ok(GetItemOutput { status: STATUS_OK, item })
    }

    async fn put_item(&self, req: PutItemRequest) -> Result<PutItemOutput, ServiceError> {
        self.client
            .put_item()
            .table_name(req.table_name.as_str())
            .item(ID_ATTR, key(&req.item.id))
            .item(COUNT_ATTR, AttributeValue::N(req.item.count.to_string()))
            .send()
            .await
            .map_err(|e| ServiceError::store("dynamodb put_item", DisplayErrorContext(&e)))?;
        debug!(table = %req.table_name, id = %req.item.id, count = req.item.count, "dynamodb put_item");
        Ok(PutItemOutput { status: STATUS_OK })
    }

    async fn delete_item(&self, req: DeleteItemRequest) -> Result<DeleteItemOutput, ServiceError> {
        self.client
            .delete_item()
            .table_name(req.table_name.as_str())
            .key(ID_ATTR, key(&req.id))
            .send()
            .await
            .map_err(|e| ServiceError::store("dynamodb delete_item", DisplayErrorContext(&e)))?;
        debug!(table = %req.table_name, id = %req.id, "dynamodb delete_item");
        Ok(DeleteItemOutput { status: STATUS_OK })
    }
}
