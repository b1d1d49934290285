//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB `AttributeValue` maps and
//! the store-neutral `Item` type. These are testable in isolation without
//! DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use scoreboard_core::store::{AttrValue, Item, StoreError};

/// Convert a store value to a DynamoDB attribute.
pub fn to_attribute_value(value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::S(s) => AttributeValue::S(s.clone()),
        AttrValue::N(n) => AttributeValue::N(n.clone()),
        AttrValue::Ss(set) => AttributeValue::Ss(set.clone()),
        AttrValue::Ns(set) => AttributeValue::Ns(set.clone()),
    }
}

/// Convert a DynamoDB attribute to a store value.
///
/// Only the string, number and string/number set kinds are supported.
pub fn from_attribute_value(name: &str, value: &AttributeValue) -> Result<AttrValue, StoreError> {
    match value {
        AttributeValue::S(s) => Ok(AttrValue::S(s.clone())),
        AttributeValue::N(n) => Ok(AttrValue::N(n.clone())),
        AttributeValue::Ss(set) => Ok(AttrValue::Ss(set.clone())),
        AttributeValue::Ns(set) => Ok(AttrValue::Ns(set.clone())),
        other => Err(StoreError::InvalidData(format!(
            "Unsupported attribute kind for {}: {:?}",
            name, other
        ))),
    }
}

/// Convert an item to a DynamoDB item.
pub fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect()
}

/// Convert a DynamoDB item to an item.
pub fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, StoreError> {
    attributes
        .iter()
        .map(|(name, value)| Ok((name.clone(), from_attribute_value(name, value)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreboard_core::player::PlayerRecord;

    #[test]
    fn test_player_item_round_trip() {
        let item = PlayerRecord::new("us-east-1:abc")
            .with_initials("AB")
            .with_high_score(10)
            .to_item();

        let attributes = item_to_attributes(&item);
        assert_eq!(
            attributes.get("UserId").unwrap().as_s().unwrap(),
            "us-east-1:abc"
        );
        assert_eq!(attributes.get("HighScore").unwrap().as_n().unwrap(), "10");

        assert_eq!(attributes_to_item(&attributes).unwrap(), item);
    }

    #[test]
    fn test_sets_keep_their_kind() {
        let value = AttrValue::Ns(vec!["1".to_string(), "2".to_string()]);
        let attribute = to_attribute_value(&value);

        assert!(attribute.is_ns());
        assert_eq!(from_attribute_value("Scores", &attribute).unwrap(), value);
    }

    #[test]
    fn test_unsupported_kind_is_invalid_data() {
        let result = from_attribute_value("Active", &AttributeValue::Bool(true));

        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }
}
