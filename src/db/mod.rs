use crate::api::models::AuthSession;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// Local persistence failures. Callers treat these as soft errors and fall
/// back to defaults.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("corrupt stored value: {0}")]
    Corrupt(String),
}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "lectern.app_settings";
#[cfg(target_arch = "wasm32")]
const SESSION_KEY: &str = "lectern.auth_session";

/// Playback rate multipliers the player cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackSpeed {
    #[default]
    Normal,
    Faster,
    Fast,
    Double,
}

impl PlaybackSpeed {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Faster => 1.25,
            Self::Fast => 1.5,
            Self::Double => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "1x",
            Self::Faster => "1.25x",
            Self::Fast => "1.5x",
            Self::Double => "2x",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Faster,
            Self::Faster => Self::Fast,
            Self::Fast => Self::Double,
            Self::Double => Self::Normal,
        }
    }
}

/// App settings persisted across launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub volume: f64,
    #[serde(default)]
    pub playback_speed: PlaybackSpeed,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            playback_speed: PlaybackSpeed::Normal,
        }
    }
}

// Persistence runs directly on desktop/mobile; the web build keeps the same
// signatures over localStorage.

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DbError::Storage(e.to_string()))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), DbError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    save_keyed_value("app_settings", &settings)
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    LocalStorage::set(SETTINGS_KEY, settings).map_err(|e| DbError::Storage(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    Ok(load_keyed_value("app_settings")?.unwrap_or_default())
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(AppSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_session(session: Option<AuthSession>) -> Result<(), DbError> {
    match session {
        Some(session) => save_keyed_value("auth_session", &session),
        None => {
            let conn = get_db_connection()?;
            conn.execute("DELETE FROM settings WHERE key = 'auth_session'", [])
                .map_err(|e| DbError::Storage(e.to_string()))?;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn save_session(session: Option<AuthSession>) -> Result<(), DbError> {
    match session {
        Some(session) => {
            LocalStorage::set(SESSION_KEY, session).map_err(|e| DbError::Storage(e.to_string()))
        }
        None => {
            LocalStorage::delete(SESSION_KEY);
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_session() -> Result<Option<AuthSession>, DbError> {
    load_keyed_value("auth_session")
}

#[cfg(target_arch = "wasm32")]
pub async fn load_session() -> Result<Option<AuthSession>, DbError> {
    match LocalStorage::get(SESSION_KEY) {
        Ok(session) => Ok(Some(session)),
        Err(_) => Ok(None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_keyed_value<T: Serialize>(key: &str, value: &T) -> Result<(), DbError> {
    let conn = get_db_connection()?;
    let json = serde_json::to_string(value).map_err(|e| DbError::Corrupt(e.to_string()))?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [key, json.as_str()],
    )
    .map_err(|e| DbError::Storage(e.to_string()))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_keyed_value<T: for<'de> Deserialize<'de>>(key: &str) -> Result<Option<T>, DbError> {
    let conn = get_db_connection()?;
    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        [key],
        |row: &rusqlite::Row| row.get(0),
    );
    match result {
        Ok(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| DbError::Corrupt(e.to_string())),
        Err(_) => Ok(None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("lectern"))
        .unwrap_or_else(|| std::path::PathBuf::from(".lectern"));
    std::fs::create_dir_all(&data_dir).map_err(|e| DbError::Storage(e.to_string()))?;
    let db_path = data_dir.join("lectern.db");

    rusqlite::Connection::open(&db_path)
        .map_err(|e| DbError::Storage(format!("failed to open database: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_cycle_wraps_around() {
        let mut speed = PlaybackSpeed::Normal;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(speed.as_f64());
            speed = speed.next();
        }
        assert_eq!(seen, vec![1.0, 1.25, 1.5, 2.0]);
        assert_eq!(speed, PlaybackSpeed::Normal);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = AppSettings {
            volume: 0.35,
            playback_speed: PlaybackSpeed::Fast,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn missing_speed_field_defaults_to_normal() {
        let back: AppSettings = serde_json::from_str(r#"{"volume":0.5}"#).unwrap();
        assert_eq!(back.playback_speed, PlaybackSpeed::Normal);
    }
}
