pub mod session;

pub use session::{SessionStore, generate_token};

use std::fs;

/// Ensure data directory exists
pub fn ensure_data_dir() -> std::io::Result<()> {
    fs::create_dir_all("data")?;
    Ok(())
}
