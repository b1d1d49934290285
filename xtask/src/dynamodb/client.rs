//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::types::{KeyType, TableStatus as SdkTableStatus};
use aws_sdk_dynamodb::Client;

use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};

/// Where to reach DynamoDB.
#[derive(Debug, Clone, clap::Args)]
pub struct AwsArgs {
    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Custom endpoint URL (for local DynamoDB).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

impl AwsArgs {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(args: &AwsArgs) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(args.region.clone()));

    if let Some(endpoint) = &args.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    Client::new(&loader.load().await)
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err) => {
            let not_found = err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception());
            return if not_found {
                Ok(None)
            } else {
                Err(DynamodbError::AwsSdk(err.to_string()))
            };
        }
    };

    let Some(table) = response.table() else {
        return Ok(None);
    };

    let partition_key = table
        .key_schema()
        .iter()
        .find(|key| key.key_type() == &KeyType::Hash)
        .map(|key| key.attribute_name().to_string());

    let status = match table.table_status() {
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    Ok(Some(TableState {
        status,
        partition_key,
    }))
}
