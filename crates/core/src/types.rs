/// All primary keys are UUIDv7 (time-ordered).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Actor recorded when a request carries no `X-User-Id` header.
pub const SYSTEM_ACTOR: DbId = uuid::Uuid::nil();
