//! DynamoDB expression builders.
//!
//! Pure functions that turn filters, projections and field updates into
//! expression strings with placeholder maps. Attribute names always go through
//! `#` placeholders so reserved words never clash.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use scoreboard_core::store::{AttrValue, ScanFilter};

use super::conversions::to_attribute_value;

/// Expression strings plus their placeholder maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub projection: Option<String>,
    pub filter: Option<String>,
    pub update: Option<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// Returns the placeholder for `attribute`, registering it on first use.
    fn name(&mut self, attribute: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, name)| *name == attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#a{}", self.names.len());
        self.names.insert(placeholder.clone(), attribute.to_string());
        placeholder
    }

    /// Registers a value and returns its placeholder.
    fn value(&mut self, value: &AttrValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values
            .insert(placeholder.clone(), to_attribute_value(value));
        placeholder
    }

    /// Attribute name placeholders, or `None` when there are none.
    ///
    /// DynamoDB rejects empty placeholder maps, so callers pass this straight
    /// to the `set_expression_attribute_names` builder.
    pub fn names(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    /// Attribute value placeholders, or `None` when there are none.
    pub fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

/// Build the expressions for a scan with an optional filter and projection.
///
/// An empty projection reads every attribute.
pub fn scan_expression(filter: Option<&ScanFilter>, projection: &[&str]) -> Expression {
    let mut expression = Expression::default();

    if !projection.is_empty() {
        let placeholders: Vec<String> = projection
            .iter()
            .map(|attribute| expression.name(attribute))
            .collect();
        expression.projection = Some(placeholders.join(", "));
    }

    if let Some(filter) = filter {
        let name = expression.name(filter.attribute());
        let value = expression.value(filter.value());
        let operator = match filter {
            ScanFilter::Equals { .. } => "=",
            ScanFilter::GreaterThan { .. } => ">",
        };
        expression.filter = Some(format!("{name} {operator} {value}"));
    }

    expression
}

/// Build the expression setting a single attribute.
pub fn update_field_expression(field: &str, value: &AttrValue) -> Expression {
    let mut expression = Expression::default();
    let name = expression.name(field);
    let value = expression.value(value);
    expression.update = Some(format!("SET {name} = {value}"));
    expression
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup_expression() {
        let filter = ScanFilter::equals("UserId", AttrValue::S("us-east-1:abc".to_string()));
        let expression = scan_expression(Some(&filter), &["Initials", "HighScore"]);

        assert_eq!(expression.projection.as_deref(), Some("#a0, #a1"));
        assert_eq!(expression.filter.as_deref(), Some("#a2 = :v0"));

        let names = expression.names().unwrap();
        assert_eq!(names.get("#a0").map(String::as_str), Some("Initials"));
        assert_eq!(names.get("#a1").map(String::as_str), Some("HighScore"));
        assert_eq!(names.get("#a2").map(String::as_str), Some("UserId"));

        let values = expression.values().unwrap();
        assert_eq!(values.get(":v0").unwrap().as_s().unwrap(), "us-east-1:abc");
    }

    #[test]
    fn test_greater_than_reuses_projected_name() {
        let filter = ScanFilter::greater_than("HighScore", AttrValue::number(0));
        let expression = scan_expression(Some(&filter), &["UserId", "Initials", "HighScore"]);

        assert_eq!(expression.projection.as_deref(), Some("#a0, #a1, #a2"));
        assert_eq!(expression.filter.as_deref(), Some("#a2 > :v0"));
        assert_eq!(expression.names().unwrap().len(), 3);
        assert_eq!(
            expression.values().unwrap().get(":v0").unwrap().as_n().unwrap(),
            "0"
        );
    }

    #[test]
    fn test_plain_scan_has_no_placeholders() {
        let expression = scan_expression(None, &[]);

        assert_eq!(expression.projection, None);
        assert_eq!(expression.filter, None);
        assert_eq!(expression.names(), None);
        assert_eq!(expression.values(), None);
    }

    #[test]
    fn test_update_field_expression_touches_one_attribute() {
        let expression = update_field_expression("Initials", &AttrValue::S("CD".to_string()));

        assert_eq!(expression.update.as_deref(), Some("SET #a0 = :v0"));
        assert_eq!(expression.names().unwrap().len(), 1);
        assert_eq!(expression.values().unwrap().len(), 1);
        assert_eq!(
            expression.values().unwrap().get(":v0").unwrap().as_s().unwrap(),
            "CD"
        );
    }

    #[test]
    fn test_high_score_update_is_numeric() {
        let expression = update_field_expression("HighScore", &AttrValue::number(42));

        assert!(expression.values().unwrap().get(":v0").unwrap().is_n());
    }
}
