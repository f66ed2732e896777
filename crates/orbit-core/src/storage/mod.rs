mod config;
pub mod snapshot;

pub use config::{Config, RankConfig};
pub use snapshot::{decode_document, encode_document, HabitFile};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `habits.json` and `config.toml`.
///
/// `ORBIT_DATA_DIR` wins if set. Otherwise `~/.config/orbit[-dev]/`,
/// with `ORBIT_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("ORBIT_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ORBIT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("orbit-dev")
            } else {
                base_dir.join("orbit")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
