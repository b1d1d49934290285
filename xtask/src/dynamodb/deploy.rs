//! Table deployment operations (Imperative Shell).

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use super::client;
use super::config::{AttributeType, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, TableStatus};

/// Attempts made while waiting for a new table to become active.
const ACTIVATION_ATTEMPTS: u32 = 60;

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        DeployPlan::KeyMismatch {
            table_name,
            expected,
            found,
        } => {
            return Err(DynamodbError::KeySchemaMismatch {
                table_name: table_name.clone(),
                expected: expected.clone(),
                found: found.clone(),
            });
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    if let DestroyPlan::DeleteTable { table_name } = plan {
        client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
    }
    Ok(())
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let key = &config.partition_key;

    let key_schema = KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&key.name)
        .attribute_type(to_scalar_type(key.attribute_type))
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    client
        .create_table()
        .table_name(&config.table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let delay = Duration::from_secs(2);

    for _ in 0..ACTIVATION_ATTEMPTS {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout)
}

fn to_scalar_type(attr_type: AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}
