use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result as SqlResult};
use std::path::Path;
use uuid::Uuid;

/// Local store for the anonymous session token (single row).
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open the store at the default location.
    pub fn open_default() -> SqlResult<Self> {
        Self::with_path("data/client.db")
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> SqlResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Return the persisted session token, generating and storing a new
    /// one on first run.
    pub fn load_or_create(&self) -> SqlResult<String> {
        let existing: Option<String> = self
            .conn
            .query_row("SELECT token FROM session WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        if let Some(token) = existing {
            return Ok(token);
        }

        let token = generate_token();
        self.conn.execute(
            "INSERT INTO session (id, token, created_at) VALUES (1, ?1, ?2)",
            rusqlite::params![token, Utc::now().timestamp_millis()],
        )?;
        log::info!("Generated new session token");
        Ok(token)
    }
}

/// Anonymous session token: random part plus the current unix-millis,
/// both base36.
pub fn generate_token() -> String {
    let random = to_base36(Uuid::new_v4().as_u128());
    let stamp = to_base36(Utc::now().timestamp_millis() as u128);
    format!("{random}{stamp}")
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_survives_reload() {
        let store = SessionStore::in_memory().unwrap();
        let first = store.load_or_create().unwrap();
        let second = store.load_or_create().unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn tokens_are_distinct_across_generations() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn tokens_are_lowercase_alphanumeric() {
        let token = generate_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn base36_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }
}
