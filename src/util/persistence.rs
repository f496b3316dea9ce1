use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::app_state::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "LandedCost";
const APP_NAME: &str = "LandedCost";

/// Overrides where the calculator state is stored.
pub const STATE_FILE_ENV: &str = "LANDED_COST_STATE_FILE";

/// Quiet period after the last edit before the state is written.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(400);

pub fn state_file() -> Option<PathBuf> {
    if let Some(path) = env::var_os(STATE_FILE_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("state.json"))
}

/// Load the stored inputs. Failures are logged and treated as "nothing stored".
pub fn load_persisted_state() -> Option<PersistedState> {
    let Some(path) = state_file() else {
        tracing::warn!("{}", PersistLoadError::StorageUnavailable);
        return None;
    };
    match read_state(&path) {
        Ok(Some(state)) => {
            tracing::info!(path = %path.display(), "loaded calculator state");
            Some(state)
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), "no stored calculator state");
            None
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to load calculator state: {err}");
            None
        }
    }
}

/// A missing file is not an error; an unreadable or malformed one is.
pub fn read_state(path: &Path) -> Result<Option<PersistedState>, PersistLoadError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

/// Write the record on the blocking pool so the UI thread never waits on disk.
pub async fn save_persisted_state(state: PersistedState) -> Result<(), PersistSaveError> {
    let path = state_file().ok_or(PersistSaveError::StorageUnavailable)?;
    write_state_in_background(path.clone(), state).await?;
    tracing::debug!(path = %path.display(), "saved calculator state");
    Ok(())
}

pub async fn write_state_in_background(
    path: PathBuf,
    state: PersistedState,
) -> Result<(), PersistSaveError> {
    tokio::task::spawn_blocking(move || write_state(&path, &state)).await?
}

/// Hands out tickets for pending saves; only the newest one is still current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveQueue {
    latest: u64,
}

impl SaveQueue {
    pub fn enqueue(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

/// Write through a sibling temp file so a crash mid-write keeps the previous state.
pub fn write_state(path: &Path, state: &PersistedState) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json)?;
    fs::rename(&staging, path)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistLoadError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("stored state is malformed: {0}")]
    Serde(#[from] SerdeError),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error("background save did not finish: {0}")]
    Task(#[from] tokio::task::JoinError),
}
