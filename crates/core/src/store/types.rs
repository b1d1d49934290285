use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored attribute value, tagged by kind.
///
/// Numbers travel as their decimal text, the way DynamoDB transmits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    /// A string.
    S(String),
    /// A number.
    N(String),
    /// A set of strings.
    Ss(Vec<String>),
    /// A set of numbers.
    Ns(Vec<String>),
}

impl AttrValue {
    /// Creates a numeric attribute from an integer.
    pub fn number(value: i64) -> Self {
        AttrValue::N(value.to_string())
    }

    /// Returns the string payload if this is a string attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttrValue::S(s) => Some(s),
            _ => None,
        }
    }

    /// Short kind tag, as used by DynamoDB.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::S(_) => "S",
            AttrValue::N(_) => "N",
            AttrValue::Ss(_) => "SS",
            AttrValue::Ns(_) => "NS",
        }
    }

    /// Orders two scalar attributes of the same kind.
    ///
    /// Strings compare lexicographically, numbers numerically. Sets and
    /// mismatched kinds are not ordered.
    pub fn compare(&self, other: &AttrValue) -> Option<Ordering> {
        match (self, other) {
            (AttrValue::S(a), AttrValue::S(b)) => Some(a.cmp(b)),
            (AttrValue::N(a), AttrValue::N(b)) => compare_numbers(a, b),
            _ => None,
        }
    }
}

fn compare_numbers(a: &str, b: &str) -> Option<Ordering> {
    let (a, b) = (a.trim(), b.trim());
    if let (Ok(a), Ok(b)) = (a.parse::<i128>(), b.parse::<i128>()) {
        return Some(a.cmp(&b));
    }
    let a = a.parse::<f64>().ok()?;
    let b = b.parse::<f64>().ok()?;
    a.partial_cmp(&b)
}

/// A stored row: attribute name to value, ordered by name.
pub type Item = BTreeMap<String, AttrValue>;

/// Keeps only the attributes named in `projection`.
///
/// An empty projection keeps every attribute.
pub fn project(item: &Item, projection: &[&str]) -> Item {
    if projection.is_empty() {
        return item.clone();
    }
    item.iter()
        .filter(|(name, _)| projection.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// A predicate applied to scanned rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFilter {
    /// `attribute = value`
    Equals { attribute: String, value: AttrValue },
    /// `attribute > value`
    GreaterThan { attribute: String, value: AttrValue },
}

impl ScanFilter {
    pub fn equals(attribute: impl Into<String>, value: AttrValue) -> Self {
        ScanFilter::Equals {
            attribute: attribute.into(),
            value,
        }
    }

    pub fn greater_than(attribute: impl Into<String>, value: AttrValue) -> Self {
        ScanFilter::GreaterThan {
            attribute: attribute.into(),
            value,
        }
    }

    /// The attribute the predicate reads.
    pub fn attribute(&self) -> &str {
        match self {
            ScanFilter::Equals { attribute, .. } | ScanFilter::GreaterThan { attribute, .. } => {
                attribute
            }
        }
    }

    /// The value the attribute is compared against.
    pub fn value(&self) -> &AttrValue {
        match self {
            ScanFilter::Equals { value, .. } | ScanFilter::GreaterThan { value, .. } => value,
        }
    }

    /// Evaluates the predicate against a row. Rows missing the attribute never match.
    pub fn matches(&self, item: &Item) -> bool {
        let Some(actual) = item.get(self.attribute()) else {
            return false;
        };
        match self {
            ScanFilter::Equals { value, .. } => {
                actual == value || actual.compare(value) == Some(Ordering::Equal)
            }
            ScanFilter::GreaterThan { value, .. } => {
                actual.compare(value) == Some(Ordering::Greater)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        let mut item = Item::new();
        item.insert("UserId".to_string(), AttrValue::S("us-east-1:abc".to_string()));
        item.insert("Initials".to_string(), AttrValue::S("AB".to_string()));
        item.insert("HighScore".to_string(), AttrValue::number(10));
        item
    }

    #[test]
    fn test_number_constructor() {
        assert_eq!(AttrValue::number(-7), AttrValue::N("-7".to_string()));
    }

    #[test]
    fn test_accessors() {
        let s = AttrValue::S("AB".to_string());
        let n = AttrValue::number(3);

        assert_eq!(s.as_s(), Some("AB"));
        assert_eq!(n.as_s(), None);
        assert_eq!(AttrValue::Ss(vec![]).kind(), "SS");
        assert_eq!(AttrValue::Ns(vec![]).kind(), "NS");
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let nine = AttrValue::N("9".to_string());
        let ten = AttrValue::N("10".to_string());

        assert_eq!(nine.compare(&ten), Some(Ordering::Less));
        assert_eq!(
            AttrValue::N("1.5".to_string()).compare(&AttrValue::N("1".to_string())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_mismatched_kinds_are_unordered() {
        let s = AttrValue::S("10".to_string());
        let n = AttrValue::number(10);

        assert_eq!(s.compare(&n), None);
        assert_eq!(AttrValue::Ss(vec!["a".into()]).compare(&s), None);
    }

    #[test]
    fn test_project_keeps_named_attributes() {
        let projected = project(&sample_item(), &["Initials", "HighScore"]);

        assert_eq!(projected.len(), 2);
        assert!(projected.contains_key("Initials"));
        assert!(projected.contains_key("HighScore"));
        assert!(!projected.contains_key("UserId"));
    }

    #[test]
    fn test_empty_projection_keeps_everything() {
        assert_eq!(project(&sample_item(), &[]), sample_item());
    }

    #[test]
    fn test_equals_filter() {
        let item = sample_item();

        assert!(ScanFilter::equals("UserId", AttrValue::S("us-east-1:abc".into())).matches(&item));
        assert!(!ScanFilter::equals("UserId", AttrValue::S("other".into())).matches(&item));
        assert!(ScanFilter::equals("HighScore", AttrValue::N("10.0".into())).matches(&item));
    }

    #[test]
    fn test_greater_than_filter() {
        let item = sample_item();

        assert!(ScanFilter::greater_than("HighScore", AttrValue::number(0)).matches(&item));
        assert!(!ScanFilter::greater_than("HighScore", AttrValue::number(10)).matches(&item));
    }

    #[test]
    fn test_filter_on_missing_attribute_never_matches() {
        let mut item = sample_item();
        item.remove("HighScore");

        assert!(!ScanFilter::greater_than("HighScore", AttrValue::number(0)).matches(&item));
    }
}
