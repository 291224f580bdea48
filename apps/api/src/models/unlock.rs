use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One unlocked achievement for one user.
///
/// The same struct is the Postgres row, the Redis fallback entry, and the
/// wire shape — both storage paths produce it, so timeline, streak, and
/// export consumers never care which store served it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UnlockRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_code: String,
    pub unlocked_at: DateTime<Utc>,
    pub metadata: Value,
}

/// Result of an unlock attempt. `created` is false when the record already
/// existed — the attempt still counts as success.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockOutcome {
    pub achievement_code: String,
    pub created: bool,
}
