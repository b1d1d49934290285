use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};
use crate::store::{self, AttrValue, Item, StoreError};

use super::validation::parse_high_score;

/// Partition key attribute.
pub const USER_ID_ATTR: &str = "UserId";
pub const INITIALS_ATTR: &str = "Initials";
pub const HIGH_SCORE_ATTR: &str = "HighScore";

/// Name used for the record in user-facing messages.
pub const RECORD_NAME: &str = "PlayerInfo";

/// The player-info record kept in sync with the data store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub user_id: String,
    pub initials: String,
    pub high_score: i64,
}

impl PlayerRecord {
    /// Creates a record with only the user id set.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = initials.into();
        self
    }

    pub fn with_high_score(mut self, high_score: i64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Stored value of one mutable field.
    pub fn value_of(&self, field: PlayerField) -> AttrValue {
        match field {
            PlayerField::Initials => AttrValue::S(self.initials.clone()),
            PlayerField::HighScore => AttrValue::number(self.high_score),
        }
    }

    /// Text of one mutable field, as shown in messages.
    pub fn text_of(&self, field: PlayerField) -> String {
        match field {
            PlayerField::Initials => self.initials.clone(),
            PlayerField::HighScore => self.high_score.to_string(),
        }
    }

    /// Copies one mutable field over from `other`.
    pub fn copy_field(&mut self, field: PlayerField, other: &PlayerRecord) {
        match field {
            PlayerField::Initials => self.initials = other.initials.clone(),
            PlayerField::HighScore => self.high_score = other.high_score,
        }
    }

    /// Converts the record to a full stored row.
    pub fn to_item(&self) -> Item {
        let mut item = Item::new();
        item.insert(USER_ID_ATTR.to_string(), AttrValue::S(self.user_id.clone()));
        item.insert(INITIALS_ATTR.to_string(), AttrValue::S(self.initials.clone()));
        item.insert(HIGH_SCORE_ATTR.to_string(), AttrValue::number(self.high_score));
        item
    }

    /// Reads a record from a scanned row.
    ///
    /// `UserId` is required; missing `Initials` or `HighScore` fall back to defaults.
    pub fn from_item(item: &Item) -> store::Result<Self> {
        let user_id = item
            .get(USER_ID_ATTR)
            .and_then(AttrValue::as_s)
            .ok_or_else(|| {
                StoreError::InvalidData(format!("Missing or invalid field: {USER_ID_ATTR}"))
            })?;

        let mut record = PlayerRecord::new(user_id);
        FetchedFields::from_item(item)?.apply_to(&mut record);
        Ok(record)
    }
}

/// One of the mutable fields of a `PlayerRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerField {
    Initials,
    HighScore,
}

impl PlayerField {
    /// The stored attribute name for this field.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            PlayerField::Initials => INITIALS_ATTR,
            PlayerField::HighScore => HIGH_SCORE_ATTR,
        }
    }
}

impl fmt::Display for PlayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// Fields read back by a lookup. Absent attributes stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedFields {
    pub initials: Option<String>,
    pub high_score: Option<i64>,
}

impl FetchedFields {
    /// Extracts the mutable fields from a stored row.
    pub fn from_item(item: &Item) -> store::Result<Self> {
        let initials = match item.get(INITIALS_ATTR) {
            None => None,
            Some(AttrValue::S(s)) => Some(s.clone()),
            Some(other) => {
                return Err(StoreError::InvalidData(format!(
                    "{INITIALS_ATTR} has kind {}, expected S",
                    other.kind()
                )))
            }
        };

        let high_score = match item.get(HIGH_SCORE_ATTR) {
            None => None,
            Some(AttrValue::N(n)) => Some(n.trim().parse::<i64>().map_err(|e| {
                StoreError::InvalidData(format!("Invalid {HIGH_SCORE_ATTR} {n:?}: {e}"))
            })?),
            Some(other) => {
                return Err(StoreError::InvalidData(format!(
                    "{HIGH_SCORE_ATTR} has kind {}, expected N",
                    other.kind()
                )))
            }
        };

        Ok(Self {
            initials,
            high_score,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.initials.is_none() && self.high_score.is_none()
    }

    /// Copies the present fields onto `record`.
    pub fn apply_to(&self, record: &mut PlayerRecord) {
        if let Some(initials) = &self.initials {
            record.initials = initials.clone();
        }
        if let Some(high_score) = self.high_score {
            record.high_score = high_score;
        }
    }
}

/// Raw text of the update/create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub user_id: String,
    pub initials: String,
    pub high_score: String,
}

impl PlayerForm {
    /// Pre-fills the form from the current record.
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            initials: record.initials.clone(),
            high_score: record.high_score.to_string(),
        }
    }

    /// The form can only be submitted when every input is filled in.
    pub fn is_submittable(&self) -> bool {
        !self.user_id.is_empty() && !self.initials.is_empty() && !self.high_score.is_empty()
    }

    /// Validates the inputs and builds the candidate record.
    pub fn into_candidate(self) -> Result<PlayerRecord> {
        if !self.is_submittable() {
            return Err(SyncError::Validation(
                "user id, initials and high score are all required".to_string(),
            ));
        }
        let high_score = parse_high_score(&self.high_score)?;
        Ok(PlayerRecord {
            user_id: self.user_id,
            initials: self.initials,
            high_score,
        })
    }
}
