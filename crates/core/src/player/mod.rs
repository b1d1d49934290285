mod format;
mod reconcile;
mod types;
mod validation;

pub use format::{
    attr_value_text, created_message, creating_message, format_item, updated_message,
    ITEM_BANNER,
};
pub use reconcile::{plan_changes, SyncOutcome, SyncPlan};
pub use types::{
    FetchedFields, PlayerField, PlayerForm, PlayerRecord, HIGH_SCORE_ATTR, INITIALS_ATTR,
    RECORD_NAME, USER_ID_ATTR,
};
pub use validation::{parse_high_score, validate_user_id};

/// Attributes read when looking up the current player's row.
pub const FETCH_PROJECTION: [&str; 2] = [INITIALS_ATTR, HIGH_SCORE_ATTR];

/// Attributes read when browsing the table.
pub const BROWSE_PROJECTION: [&str; 3] = [USER_ID_ATTR, INITIALS_ATTR, HIGH_SCORE_ATTR];
