//! Text shown on the display sink.

use crate::store::{AttrValue, Item};

use super::types::{PlayerField, RECORD_NAME};

/// Line framing each displayed row.
pub const ITEM_BANNER: &str = "************************************************";

/// Renders an attribute value as plain text. Sets are joined with `,`.
pub fn attr_value_text(value: &AttrValue) -> String {
    match value {
        AttrValue::S(s) | AttrValue::N(s) => s.clone(),
        AttrValue::Ss(set) | AttrValue::Ns(set) => set.join(","),
    }
}

/// Renders a scanned row as a framed `[Name]: value` block.
pub fn format_item(item: &Item) -> String {
    let mut output = String::from(ITEM_BANNER);
    output.push('\n');
    for (name, value) in item {
        output.push_str(&format!("[{}]: {}\n", name, attr_value_text(value)));
    }
    output.push_str(ITEM_BANNER);
    output
}

/// Confirmation shown after a field update is persisted.
pub fn updated_message(field: PlayerField, value: &str) -> String {
    format!("Updated {field} to: {value}")
}

/// Shown before a full record is written for another user id.
pub fn creating_message(user_id: &str) -> String {
    format!("Creating new {RECORD_NAME} for {user_id}")
}

/// Shown once a full record write is persisted.
pub fn created_message() -> String {
    format!("{RECORD_NAME} saved")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerRecord;

    #[test]
    fn test_attr_value_text() {
        assert_eq!(attr_value_text(&AttrValue::S("AB".into())), "AB");
        assert_eq!(attr_value_text(&AttrValue::number(42)), "42");
        assert_eq!(
            attr_value_text(&AttrValue::Ss(vec!["a".into(), "b".into()])),
            "a,b"
        );
        assert_eq!(
            attr_value_text(&AttrValue::Ns(vec!["1".into(), "2".into(), "3".into()])),
            "1,2,3"
        );
    }

    #[test]
    fn test_format_item_block() {
        let item = PlayerRecord::new("A")
            .with_initials("AB")
            .with_high_score(10)
            .to_item();

        let expected = format!(
            "{ITEM_BANNER}\n[HighScore]: 10\n[Initials]: AB\n[UserId]: A\n{ITEM_BANNER}"
        );
        assert_eq!(format_item(&item), expected);
    }

    #[test]
    fn test_format_empty_item() {
        assert_eq!(
            format_item(&Item::new()),
            format!("{ITEM_BANNER}\n{ITEM_BANNER}")
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            updated_message(PlayerField::Initials, "CD"),
            "Updated Initials to: CD"
        );
        assert_eq!(
            updated_message(PlayerField::HighScore, "42"),
            "Updated HighScore to: 42"
        );
        assert_eq!(creating_message("B"), "Creating new PlayerInfo for B");
        assert_eq!(created_message(), "PlayerInfo saved");
    }
}
