//! Session-scoped draft snapshots.
//!
//! The wizard writes a `{ step, data, selectedPropertyType }` snapshot after
//! every draft mutation and reads it back once when the flow mounts. Storage
//! is a narrow key/value interface so the browser-session store, a file, or
//! an in-memory map can sit behind it.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Draft, PropertyKind};
use crate::errors::StorageError;
use crate::utils::paths::ensure_dir;

use super::WizardStep;

/// Storage key shared with every other part of the application that reads
/// the in-progress container draft.
pub const CONTAINER_FLOW_DRAFT_KEY: &str = "containerFlowDraft";

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub step: usize,
    pub data: Draft,
    pub selected_property_type: Option<PropertyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl DraftSnapshot {
    pub fn new(step: WizardStep, data: Draft, selected: Option<PropertyKind>) -> Self {
        Self {
            step: step.index(),
            data,
            selected_property_type: selected,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn wizard_step(&self) -> Option<WizardStep> {
        WizardStep::from_index(self.step)
    }
}

/// Key/value backend for snapshots.
pub trait DraftStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, for inspection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("draft store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("draft store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("draft store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a session directory.
#[derive(Debug, Clone)]
pub struct JsonFileDraftStore {
    dir: PathBuf,
}

impl JsonFileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DraftStore for JsonFileDraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Snapshot lifecycle on top of a [`DraftStore`].
///
/// Edit flows never touch the snapshot, and nothing is written while a
/// submission is in flight. Storage failures are logged and swallowed: the
/// in-memory draft stays authoritative.
pub struct DraftPersistence {
    store: Box<dyn DraftStore>,
    enabled: bool,
}

impl DraftPersistence {
    pub fn new(store: Box<dyn DraftStore>, edit_mode: bool) -> Self {
        Self {
            store,
            enabled: !edit_mode,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Writes the snapshot. Returns whether anything was written.
    pub fn save(
        &self,
        step: WizardStep,
        draft: &Draft,
        selected: Option<PropertyKind>,
        submission_in_flight: bool,
    ) -> bool {
        if !self.enabled || submission_in_flight {
            return false;
        }
        let snapshot = DraftSnapshot::new(step, draft.clone(), selected);
        let result = serde_json::to_string(&snapshot)
            .map_err(StorageError::from)
            .and_then(|json| self.store.write(CONTAINER_FLOW_DRAFT_KEY, &json));
        match result {
            Ok(()) => {
                debug!(step = %step, "draft snapshot saved");
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to save draft snapshot");
                false
            }
        }
    }

    /// Reads the snapshot. Unreadable snapshots are discarded.
    pub fn load(&self) -> Option<DraftSnapshot> {
        if !self.enabled {
            return None;
        }
        let raw = match self.store.read(CONTAINER_FLOW_DRAFT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read draft snapshot");
                return None;
            }
        };
        match serde_json::from_str::<DraftSnapshot>(&raw) {
            Ok(snapshot) if snapshot.wizard_step().is_some() => Some(snapshot),
            Ok(snapshot) => {
                warn!(step = snapshot.step, "discarding draft snapshot with unknown step");
                self.clear();
                None
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable draft snapshot");
                self.clear();
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.store.remove(CONTAINER_FLOW_DRAFT_KEY) {
            warn!(error = %err, "failed to clear draft snapshot");
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RentalMode;

    fn sample_draft() -> Draft {
        Draft {
            title: Some("Casa Verde".into()),
            rental_mode: Some(RentalMode::ByUnit),
            ..Draft::default()
        }
    }

    #[test]
    fn edit_mode_never_writes_or_reads() {
        let store = MemoryDraftStore::new();
        store
            .write(CONTAINER_FLOW_DRAFT_KEY, "{\"step\":1}")
            .unwrap();
        let persistence = DraftPersistence::new(Box::new(store.clone()), true);

        assert!(!persistence.save(WizardStep::BasicInfo, &sample_draft(), None, false));
        assert!(persistence.load().is_none());
        assert_eq!(
            store.raw(CONTAINER_FLOW_DRAFT_KEY).as_deref(),
            Some("{\"step\":1}")
        );
    }

    #[test]
    fn in_flight_submission_blocks_writes() {
        let store = MemoryDraftStore::new();
        let persistence = DraftPersistence::new(Box::new(store.clone()), false);
        assert!(!persistence.save(WizardStep::MediaGallery, &sample_draft(), None, true));
        assert!(store.raw(CONTAINER_FLOW_DRAFT_KEY).is_none());
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let store = MemoryDraftStore::new();
        store.write(CONTAINER_FLOW_DRAFT_KEY, "not json").unwrap();
        let persistence = DraftPersistence::new(Box::new(store.clone()), false);
        assert!(persistence.load().is_none());
        assert!(store.raw(CONTAINER_FLOW_DRAFT_KEY).is_none());
    }

    #[test]
    fn unknown_step_is_discarded() {
        let store = MemoryDraftStore::new();
        store
            .write(
                CONTAINER_FLOW_DRAFT_KEY,
                "{\"step\":42,\"data\":{},\"selectedPropertyType\":null}",
            )
            .unwrap();
        let persistence = DraftPersistence::new(Box::new(store.clone()), false);
        assert!(persistence.load().is_none());
    }

    #[test]
    fn snapshot_uses_documented_field_names() {
        let snapshot = DraftSnapshot {
            step: 3,
            data: Draft::default(),
            selected_property_type: Some(PropertyKind::Pension),
            saved_at: None,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["step"], 3);
        assert_eq!(value["selectedPropertyType"], "pension");
        assert!(value.get("data").is_some());
    }
}
