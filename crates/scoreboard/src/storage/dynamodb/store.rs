//! DynamoDB data store implementation.
//!
//! Implements `DataStore` from `scoreboard_core::store` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tokio_stream::StreamExt;

use scoreboard_core::player::USER_ID_ATTR;
use scoreboard_core::store::{AttrValue, DataStore, Item, ItemStream, Result, ScanFilter};

use crate::config::AwsConfig;

use super::conversions::{attributes_to_item, item_to_attributes};
use super::error::{map_put_item_error, map_scan_error, map_update_item_error};
use super::expressions::{scan_expression, update_field_expression};

/// DynamoDB-backed data store for a single table keyed by `UserId`.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a store from AWS settings, using the SDK default credential chain.
    pub async fn connect(aws: &AwsConfig, table_name: impl Into<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(aws.region.clone()));

        if let Some(endpoint) = &aws.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), table_name)
    }

    fn scan_request(&self, filter: Option<&ScanFilter>, projection: &[&str]) -> ScanFluentBuilder {
        let expression = scan_expression(filter, projection);

        self.client
            .scan()
            .table_name(&self.table_name)
            .set_projection_expression(expression.projection.clone())
            .set_filter_expression(expression.filter.clone())
            .set_expression_attribute_names(expression.names())
            .set_expression_attribute_values(expression.values())
    }

    /// Sends the scan on first poll and yields the rows of the first page.
    ///
    /// The continuation key is ignored: results past DynamoDB's 1 MB page
    /// limit are not read.
    fn scan_stream(&self, request: ScanFluentBuilder) -> ItemStream {
        let table_name = self.table_name.clone();

        Box::pin(async_stream::stream! {
            let output = match request.send().await {
                Ok(output) => output,
                Err(e) => {
                    yield Err(map_scan_error(e));
                    return;
                }
            };

            if output.last_evaluated_key.is_some() {
                tracing::debug!(table = %table_name, "Scan truncated to the first page");
            }

            for attributes in output.items.unwrap_or_default() {
                yield attributes_to_item(&attributes);
            }
        })
    }
}

#[async_trait]
impl DataStore for DynamoDbStore {
    /// Filter-scan on `UserId`. DynamoDB reads the whole table and drops the
    /// non-matching rows, so the cost grows with the table, not with the result.
    async fn get_by_key(&self, key: &str, projection: &[&str]) -> Result<Vec<Item>> {
        let filter = ScanFilter::equals(USER_ID_ATTR, AttrValue::S(key.to_string()));
        let mut stream = self.scan_stream(self.scan_request(Some(&filter), projection));

        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    async fn update_field(&self, key: &str, field: &str, value: AttrValue) -> Result<()> {
        let expression = update_field_expression(field, &value);

        tracing::debug!(table = %self.table_name, user_id = %key, field, "Updating attribute");

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(USER_ID_ATTR, AttributeValue::S(key.to_string()))
            .set_update_expression(expression.update.clone())
            .set_expression_attribute_names(expression.names())
            .set_expression_attribute_values(expression.values())
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(())
    }

    async fn upsert(&self, item: Item) -> Result<()> {
        tracing::debug!(table = %self.table_name, attributes = item.len(), "Putting item");

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(&item)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    fn scan_all(&self, projection: &[&str]) -> ItemStream {
        self.scan_stream(self.scan_request(None, projection))
    }

    fn scan_filtered(&self, filter: &ScanFilter, projection: &[&str]) -> ItemStream {
        self.scan_stream(self.scan_request(Some(filter), projection))
    }
}
