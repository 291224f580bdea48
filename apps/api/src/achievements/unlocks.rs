//! Unlock persistence.
//!
//! Primary store is Postgres with a unique (user_id, achievement_code)
//! constraint; a conflicting insert means "already unlocked" and reports
//! success with `created: false`. When Postgres is unreachable the recorder
//! degrades to a Redis-held JSON array (most-recent-first) under one key per
//! user, and reads degrade the same way. Both paths produce `UnlockRecord`,
//! so downstream views never know which store answered.

use std::collections::HashSet;

use chrono::Utc;
use redis::AsyncCommands;
use redis::Client as RedisClient;
use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::unlock::{UnlockOutcome, UnlockRecord};

fn fallback_key(user_id: Uuid) -> String {
    format!("laurel:unlocks:{user_id}")
}

/// Records an unlock. Idempotent: a second call for the same (user, code)
/// succeeds without creating anything.
pub async fn record_unlock(
    db: &PgPool,
    redis: &RedisClient,
    user_id: Uuid,
    code: &str,
    metadata: Value,
) -> Result<UnlockOutcome, AppError> {
    let insert = sqlx::query(
        r#"
        INSERT INTO achievement_unlocks (user_id, achievement_code, metadata)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, achievement_code) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(code)
    .bind(&metadata)
    .execute(db)
    .await;

    match insert {
        Ok(result) => Ok(UnlockOutcome {
            achievement_code: code.to_string(),
            created: result.rows_affected() == 1,
        }),
        Err(e) => {
            warn!("Postgres unavailable for unlock of {code}, using fallback store: {e}");
            record_unlock_fallback(redis, user_id, code, metadata).await
        }
    }
}

async fn record_unlock_fallback(
    redis: &RedisClient,
    user_id: Uuid,
    code: &str,
    metadata: Value,
) -> Result<UnlockOutcome, AppError> {
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Upstream(format!("fallback store unavailable: {e}")))?;

    let key = fallback_key(user_id);
    let raw: Option<String> = conn
        .get(&key)
        .await
        .map_err(|e| AppError::Upstream(format!("fallback store read failed: {e}")))?;
    let mut records = parse_fallback(raw.as_deref());

    let created = insert_front_if_absent(
        &mut records,
        UnlockRecord {
            id: Uuid::new_v4(),
            user_id,
            achievement_code: code.to_string(),
            unlocked_at: Utc::now(),
            metadata,
        },
    );

    if created {
        let json = serde_json::to_string(&records).map_err(|e| anyhow::anyhow!(e))?;
        let _: () = conn
            .set(&key, json)
            .await
            .map_err(|e| AppError::Upstream(format!("fallback store write failed: {e}")))?;
    }

    Ok(UnlockOutcome {
        achievement_code: code.to_string(),
        created,
    })
}

/// Returns all unlock records for a user, newest first.
///
/// On a healthy primary the result is mirrored into the fallback store; on a
/// dead primary the mirror is served; with both stores down this degrades to
/// an empty list rather than failing the request.
pub async fn fetch_unlocks(db: &PgPool, redis: &RedisClient, user_id: Uuid) -> Vec<UnlockRecord> {
    let fetched = sqlx::query_as::<_, UnlockRecord>(
        r#"
        SELECT id, user_id, achievement_code, unlocked_at, metadata
        FROM achievement_unlocks
        WHERE user_id = $1
        ORDER BY unlocked_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await;

    match fetched {
        Ok(records) => {
            mirror_to_fallback(redis, user_id, &records).await;
            records
        }
        Err(e) => {
            warn!("Postgres unavailable for unlock fetch, serving fallback store: {e}");
            read_fallback(redis, user_id).await
        }
    }
}

async fn mirror_to_fallback(redis: &RedisClient, user_id: Uuid, records: &[UnlockRecord]) {
    let json = match serde_json::to_string(records) {
        Ok(json) => json,
        Err(e) => {
            warn!("Could not serialize unlock mirror: {e}");
            return;
        }
    };
    let result: redis::RedisResult<()> = async {
        let mut conn = redis.get_multiplexed_async_connection().await?;
        conn.set(fallback_key(user_id), json).await
    }
    .await;
    if let Err(e) = result {
        warn!("Could not mirror unlocks to fallback store: {e}");
    }
}

async fn read_fallback(redis: &RedisClient, user_id: Uuid) -> Vec<UnlockRecord> {
    let raw: redis::RedisResult<Option<String>> = async {
        let mut conn = redis.get_multiplexed_async_connection().await?;
        conn.get(fallback_key(user_id)).await
    }
    .await;
    match raw {
        Ok(raw) => parse_fallback(raw.as_deref()),
        Err(e) => {
            warn!("Fallback store also unavailable, serving empty unlock list: {e}");
            Vec::new()
        }
    }
}

fn parse_fallback(raw: Option<&str>) -> Vec<UnlockRecord> {
    match raw {
        Some(json) => serde_json::from_str(json).unwrap_or_else(|e| {
            warn!("Corrupt fallback unlock array, ignoring: {e}");
            Vec::new()
        }),
        None => Vec::new(),
    }
}

/// Pushes a record to the front unless its code is already present.
/// Returns whether the record was inserted.
fn insert_front_if_absent(records: &mut Vec<UnlockRecord>, record: UnlockRecord) -> bool {
    if records
        .iter()
        .any(|r| r.achievement_code == record.achievement_code)
    {
        return false;
    }
    records.insert(0, record);
    true
}

pub fn unlocked_codes(records: &[UnlockRecord]) -> HashSet<String> {
    records.iter().map(|r| r.achievement_code.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn record(code: &str, days_ago: i64) -> UnlockRecord {
        let base = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        UnlockRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            achievement_code: code.to_string(),
            unlocked_at: base - Duration::days(days_ago),
            metadata: json!({}),
        }
    }

    #[test]
    fn test_insert_front_keeps_most_recent_first() {
        let mut records = vec![record("older", 3)];
        assert!(insert_front_if_absent(&mut records, record("newer", 0)));
        assert_eq!(records[0].achievement_code, "newer");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_duplicate_code_is_not_inserted() {
        let mut records = vec![record("first_post", 3)];
        assert!(!insert_front_if_absent(&mut records, record("first_post", 0)));
        assert_eq!(records.len(), 1);
        // The original record survives, not the retry.
        assert_eq!(records[0].unlocked_at.date_naive().to_string(), "2025-06-17");
    }

    #[test]
    fn test_parse_fallback_tolerates_garbage() {
        assert!(parse_fallback(None).is_empty());
        assert!(parse_fallback(Some("not json")).is_empty());
        let roundtrip = serde_json::to_string(&vec![record("first_post", 1)]).unwrap();
        assert_eq!(parse_fallback(Some(&roundtrip)).len(), 1);
    }

    #[test]
    fn test_unlocked_codes_set() {
        let records = vec![record("a", 1), record("b", 2), record("a", 3)];
        let codes = unlocked_codes(&records);
        assert_eq!(codes.len(), 2);
        assert!(codes.contains("a"));
    }

    #[test]
    fn test_fallback_key_is_per_user() {
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();
        assert_ne!(fallback_key(u1), fallback_key(u2));
        assert!(fallback_key(u1).starts_with("laurel:unlocks:"));
    }
}
