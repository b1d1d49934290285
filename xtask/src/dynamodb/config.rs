//! Table configuration types (Functional Core - pure data).

use scoreboard_core::player::USER_ID_ATTR;

/// Table name used when none is given.
pub const DEFAULT_TABLE_NAME: &str = "PlayerInfo";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the player-info table configuration: one row per `UserId`.
pub fn player_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: KeyAttribute {
            name: USER_ID_ATTR.to_string(),
            attribute_type: AttributeType::String,
        },
        billing_mode: BillingMode::PayPerRequest,
    }
}
