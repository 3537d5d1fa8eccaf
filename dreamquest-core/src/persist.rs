//! Save/load for game state and settings.
//!
//! A single game save plus a settings file, both versioned JSON. Corrupted
//! or version-mismatched files are treated as absent: the caller gets the
//! defaults and a warning is logged, so a bad save never blocks launch.

use crate::state::{GameState, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current game save file version.
const SAVE_VERSION: u32 = 1;

/// Current settings file version.
const SETTINGS_VERSION: u32 = 1;

/// A saved game with everything needed to resume play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the save was created (UNIX seconds).
    pub saved_at: String,

    /// The complete game state.
    pub state: GameState,

    /// Quick-access metadata about the save.
    pub metadata: SaveMetadata,
}

/// Metadata shown on the continue button without loading the full state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    /// Player character name.
    pub character_name: String,

    /// Current location.
    pub location: String,

    /// Points earned so far.
    pub points: u64,

    /// Number of endings unlocked across playthroughs.
    pub endings_unlocked: usize,
}

impl SavedGame {
    /// Create a new save envelope from game state.
    pub fn new(state: GameState) -> Self {
        let metadata = SaveMetadata {
            character_name: state.character.name.clone(),
            location: state.current_location.clone(),
            points: state.points,
            endings_unlocked: state.endings_unlocked.len(),
        };

        Self {
            version: SAVE_VERSION,
            saved_at: unix_now(),
            state,
            metadata,
        }
    }

    /// Save to a JSON file, creating the parent directory if needed.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;

        if saved.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }

    /// Get save metadata without deserializing the full game state.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<SaveMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: SaveMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

/// Saved user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSettings {
    /// Settings format version.
    pub version: u32,

    /// The settings themselves.
    pub settings: Settings,
}

impl SavedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            version: SETTINGS_VERSION,
            settings,
        }
    }

    /// Save to a JSON file, creating the parent directory if needed.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;

        if saved.version != SETTINGS_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SETTINGS_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }
}

/// Load a game save, falling back to defaults on any failure.
///
/// Missing files are normal (first launch). Corrupt or mismatched files are
/// logged and discarded rather than surfaced to the player.
pub async fn load_game_or_default(path: impl AsRef<Path>) -> GameState {
    let path = path.as_ref();
    match SavedGame::load_json(path).await {
        Ok(saved) => saved.state,
        Err(PersistError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            GameState::default()
        }
        Err(err) => {
            tracing::warn!("discarding unreadable save {}: {err}", path.display());
            GameState::default()
        }
    }
}

/// Load settings, falling back to defaults on any failure.
pub async fn load_settings_or_default(path: impl AsRef<Path>) -> Settings {
    let path = path.as_ref();
    match SavedSettings::load_json(path).await {
        Ok(saved) => saved.settings,
        Err(PersistError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            Settings::default()
        }
        Err(err) => {
            tracing::warn!("discarding unreadable settings {}: {err}", path.display());
            Settings::default()
        }
    }
}

/// Delete a save file. Missing files are not an error.
pub async fn delete_save(path: impl AsRef<Path>) -> Result<(), PersistError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Platform data directory for the game, e.g. `~/.local/share/dreamquest`.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dreamquest")
}

/// Path of the single game save within a data directory.
pub fn game_save_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join("save.json")
}

/// Path of the settings file within a data directory.
pub fn settings_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join("settings.json")
}

/// Current timestamp as UNIX seconds.
fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", now.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Archetype, Background, CharacterProfile, FontSize};
    use tempfile::TempDir;

    fn sample_state() -> GameState {
        let mut state = GameState::default();
        state.character = CharacterProfile {
            name: "Ava".to_string(),
            archetype: Archetype::Scholar,
            background: Background::Orphan,
        };
        state.points = 30;
        state.current_location = "The Sunken Library".to_string();
        state
    }

    #[test]
    fn test_saved_game_metadata() {
        let saved = SavedGame::new(sample_state());

        assert_eq!(saved.version, SAVE_VERSION);
        assert_eq!(saved.metadata.character_name, "Ava");
        assert_eq!(saved.metadata.location, "The Sunken Library");
        assert_eq!(saved.metadata.points, 30);
        assert_eq!(saved.metadata.endings_unlocked, 0);
    }

    #[test]
    fn test_save_paths() {
        assert!(game_save_path("/data").to_string_lossy().ends_with("save.json"));
        assert!(settings_path("/data")
            .to_string_lossy()
            .ends_with("settings.json"));
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = game_save_path(temp_dir.path());

        let saved = SavedGame::new(sample_state());
        saved.save_json(&path).await.expect("Save should succeed");
        assert!(path.exists());

        let loaded = SavedGame::load_json(&path).await.expect("Load should succeed");
        assert_eq!(loaded.state.character.name, "Ava");
        assert_eq!(loaded.state.points, 30);
    }

    #[tokio::test]
    async fn test_peek_metadata() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = game_save_path(temp_dir.path());

        SavedGame::new(sample_state())
            .save_json(&path)
            .await
            .expect("Save should succeed");

        let metadata = SavedGame::peek_metadata(&path)
            .await
            .expect("Peek should succeed");
        assert_eq!(metadata.character_name, "Ava");
        assert_eq!(metadata.points, 30);
    }

    #[tokio::test]
    async fn test_version_mismatch_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = game_save_path(temp_dir.path());

        let mut value = serde_json::to_value(SavedGame::new(sample_state())).unwrap();
        value["version"] = serde_json::json!(99);
        tokio::fs::write(&path, serde_json::to_string(&value).unwrap())
            .await
            .unwrap();

        let result = SavedGame::load_json(&path).await;
        assert!(matches!(
            result,
            Err(PersistError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_save_gives_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = load_game_or_default(game_save_path(temp_dir.path())).await;
        assert_eq!(state.points, 0);
        assert_eq!(state.current_location, "The Beginning");
    }

    #[tokio::test]
    async fn test_corrupt_save_gives_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = game_save_path(temp_dir.path());
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let state = load_game_or_default(&path).await;
        assert_eq!(state.points, 0);
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = settings_path(temp_dir.path());

        let mut settings = Settings::default();
        settings.font_size = FontSize::Large;
        settings.high_contrast = true;

        SavedSettings::new(settings)
            .save_json(&path)
            .await
            .expect("Save should succeed");

        let loaded = load_settings_or_default(&path).await;
        assert_eq!(loaded.font_size, FontSize::Large);
        assert!(loaded.high_contrast);
    }

    #[tokio::test]
    async fn test_delete_save_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = game_save_path(temp_dir.path());

        SavedGame::new(sample_state())
            .save_json(&path)
            .await
            .expect("Save should succeed");
        delete_save(&path).await.expect("Delete should succeed");
        assert!(!path.exists());

        // Deleting again is fine.
        delete_save(&path).await.expect("Delete should succeed");
    }
}
