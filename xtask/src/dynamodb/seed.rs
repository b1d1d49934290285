//! Seed command implementation.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use rand::Rng;

use scoreboard_core::player::{PlayerRecord, HIGH_SCORE_ATTR, INITIALS_ATTR, USER_ID_ATTR};

use super::error::{DynamodbError, Result};

/// Maximum number of items per `BatchWriteItem` call.
const BATCH_SIZE: usize = 25;

/// Share of generated players left without a high score.
const ZERO_SCORE_RATIO: f64 = 0.2;

/// Generate random players.
///
/// User ids look like identity-pool ids (`<region>:<hex>`). About a fifth of
/// the players get a zero high score so the high-score listing has rows to
/// leave out.
pub fn generate_players(rng: &mut impl Rng, region: &str, count: u32) -> Vec<PlayerRecord> {
    (0..count)
        .map(|_| {
            let user_id = format!(
                "{}:{:016x}{:016x}",
                region,
                rng.random::<u64>(),
                rng.random::<u64>()
            );
            let initials_len = rng.random_range(2..=3);
            let initials: String = (0..initials_len)
                .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
                .collect();
            let high_score = if rng.random_bool(ZERO_SCORE_RATIO) {
                0
            } else {
                rng.random_range(1..=99_999)
            };

            PlayerRecord::new(user_id)
                .with_initials(initials)
                .with_high_score(high_score)
        })
        .collect()
}

/// Convert a player record to a DynamoDB item.
fn player_to_item(player: &PlayerRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            USER_ID_ATTR.to_string(),
            AttributeValue::S(player.user_id.clone()),
        ),
        (
            INITIALS_ATTR.to_string(),
            AttributeValue::S(player.initials.clone()),
        ),
        (
            HIGH_SCORE_ATTR.to_string(),
            AttributeValue::N(player.high_score.to_string()),
        ),
    ])
}

/// Insert players into DynamoDB. Returns how many were written.
pub async fn seed_players(
    client: &Client,
    table_name: &str,
    players: &[PlayerRecord],
) -> Result<u32> {
    let mut inserted = 0;

    for chunk in players.chunks(BATCH_SIZE) {
        let write_requests = chunk
            .iter()
            .map(|player| {
                PutRequest::builder()
                    .set_item(Some(player_to_item(player)))
                    .build()
                    .map(|put| WriteRequest::builder().put_request(put).build())
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        let unprocessed = output
            .unprocessed_items()
            .and_then(|items| items.get(table_name))
            .map_or(0, Vec::len);

        inserted += (chunk.len() - unprocessed) as u32;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_generate_players_count_and_shape() {
        let mut rng = StdRng::seed_from_u64(7);

        let players = generate_players(&mut rng, "us-east-1", 40);

        assert_eq!(players.len(), 40);
        for player in &players {
            assert!(player.user_id.starts_with("us-east-1:"));
            assert_eq!(player.user_id.len(), "us-east-1:".len() + 32);
            assert!((2..=3).contains(&player.initials.len()));
            assert!(player.initials.chars().all(|c| c.is_ascii_uppercase()));
            assert!((0..=99_999).contains(&player.high_score));
        }
    }

    #[test]
    fn test_generate_players_is_seeded() {
        let first = generate_players(&mut StdRng::seed_from_u64(1), "eu-west-1", 5);
        let second = generate_players(&mut StdRng::seed_from_u64(1), "eu-west-1", 5);

        assert_eq!(first, second);
    }

    #[test]
    fn test_player_to_item() {
        let player = PlayerRecord::new("A").with_initials("AB").with_high_score(10);

        let item = player_to_item(&player);

        assert_eq!(item.len(), 3);
        assert_eq!(item.get("UserId"), Some(&AttributeValue::S("A".to_string())));
        assert_eq!(item.get("Initials"), Some(&AttributeValue::S("AB".to_string())));
        assert_eq!(item.get("HighScore"), Some(&AttributeValue::N("10".to_string())));
    }
}
