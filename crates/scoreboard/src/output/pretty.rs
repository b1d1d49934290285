//! Pretty output formatting.

use scoreboard_core::player::{PlayerRecord, SyncOutcome};

/// Format a player record for display.
pub fn format_record(record: &PlayerRecord) -> String {
    let initials = if record.initials.is_empty() {
        "(none)"
    } else {
        &record.initials
    };
    format!(
        "{}\n  Initials: {}\n  High score: {}",
        record.user_id, initials, record.high_score
    )
}

/// One-line summary of what a submit did.
pub fn format_outcome(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Unchanged => "Nothing to save.".to_string(),
        SyncOutcome::Updated { fields } => {
            let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
            format!("Updated {}", names.join(", "))
        }
        SyncOutcome::Created { user_id } => format!("Created record for {}", user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreboard_core::player::PlayerField;

    #[test]
    fn test_format_record() {
        let record = PlayerRecord::new("A").with_initials("AB").with_high_score(10);

        assert_eq!(
            format_record(&record),
            "A\n  Initials: AB\n  High score: 10"
        );
    }

    #[test]
    fn test_format_record_without_initials() {
        assert_eq!(
            format_record(&PlayerRecord::new("A")),
            "A\n  Initials: (none)\n  High score: 0"
        );
    }

    #[test]
    fn test_format_outcome() {
        assert_eq!(format_outcome(&SyncOutcome::Unchanged), "Nothing to save.");
        assert_eq!(
            format_outcome(&SyncOutcome::Updated {
                fields: vec![PlayerField::Initials, PlayerField::HighScore]
            }),
            "Updated Initials, HighScore"
        );
        assert_eq!(
            format_outcome(&SyncOutcome::Created {
                user_id: "B".to_string()
            }),
            "Created record for B"
        );
    }
}
