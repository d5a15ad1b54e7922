//! SQL DDL for initializing the enquiry and account storage.
//! SQLite-first design; every statement is idempotent.

/// SQLite schema with:
/// - `users.username` as the primary key (one row per login identity)
/// - `users.password_hash` holding an Argon2id PHC string
/// - `enquiries.id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `enquiries.timestamp` as UTC epoch milliseconds, NULL when the caller sent none
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS enquiries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    furniture_type TEXT NOT NULL,
    message TEXT NOT NULL,
    timestamp INTEGER NULL -- epoch millis, UTC
);

CREATE INDEX IF NOT EXISTS idx_enquiries_timestamp ON enquiries(timestamp);

CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
);
"#;
