use scoreboard_core::player::validate_user_id;
use scoreboard_core::{Result, SyncError};

/// Table used when none is configured.
pub const DEFAULT_TABLE_NAME: &str = "PlayerInfo";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Startup configuration for a synchronization session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Identity of the current player, issued by the identity provider.
    pub user_id: String,
    /// DynamoDB table holding player records.
    pub table_name: String,
    pub aws: AwsConfig,
}

impl Config {
    /// Rejects configurations missing a user id, table name or region.
    pub fn validate(&self) -> Result<()> {
        validate_user_id(&self.user_id)?;
        if self.table_name.trim().is_empty() {
            return Err(SyncError::Configuration(
                "table name is required but was empty".to_string(),
            ));
        }
        if self.aws.region.trim().is_empty() {
            return Err(SyncError::Configuration(
                "region is required but was empty".to_string(),
            ));
        }
        Ok(())
    }
}
