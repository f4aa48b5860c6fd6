//! SQLite schema definition.

/// Complete database schema for sen-screen.
///
/// A single key-value table: each collection is stored as one row whose
/// value is the JSON-encoded array.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS app_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON-encoded array
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
