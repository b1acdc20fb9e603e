/// Projects, participants and tasks use PostgreSQL BIGSERIAL keys.
pub type DbId = i64;

/// Users are identified by a UUID.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
