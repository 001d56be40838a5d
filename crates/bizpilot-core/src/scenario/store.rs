//! Single-slot persistence for the fitted scenario model
//!
//! # Artifact Format
//!
//! A gzip-compressed JSON envelope:
//!
//! ```text
//! { format_version, created_at, regressor, samples, checksum, payload }
//! ```
//!
//! `payload` is the serialized model and `checksum` its hex SHA-256. Saving
//! writes a temp file next to the slot and renames it into place, so readers
//! see either the previous artifact or the new one. Concurrent saves are not
//! coordinated: the last rename wins.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::regressor::Regressor;
use super::ScenarioModel;
use crate::error::{Error, Result};

/// Current artifact layout version
pub const FORMAT_VERSION: u32 = 1;

/// File name used inside the data directory
pub const ARTIFACT_FILE_NAME: &str = "scenario_model.json.gz";

/// Default artifact location (~/.local/share/bizpilot/models on Linux)
pub fn default_artifact_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bizpilot").join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
        .join(ARTIFACT_FILE_NAME)
}

#[derive(Serialize, Deserialize)]
struct ArtifactEnvelope {
    format_version: u32,
    created_at: DateTime<Utc>,
    regressor: String,
    samples: usize,
    checksum: String,
    payload: String,
}

/// Metadata about the persisted artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Local filesystem location, kept out of serialized output
    #[serde(skip)]
    pub path: String,
    pub format_version: u32,
    pub created_at: DateTime<Utc>,
    pub regressor: String,
    pub samples: usize,
    pub size_bytes: u64,
}

/// Model store backed by one file
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist a model, replacing any previous artifact
    pub fn save<R>(&self, model: &ScenarioModel<R>) -> Result<ArtifactInfo>
    where
        R: Regressor + Serialize,
    {
        let payload = serde_json::to_string(model)?;
        let envelope = ArtifactEnvelope {
            format_version: FORMAT_VERSION,
            created_at: Utc::now(),
            regressor: model.regressor().name().to_string(),
            samples: model.samples(),
            checksum: checksum(&payload),
            payload,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("Created model directory: {}", dir.display());
        }

        let tmp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let writer = BufWriter::new(tmp.as_file());
            let mut encoder = GzEncoder::new(writer, Compression::default());
            serde_json::to_writer(&mut encoder, &envelope)?;
            encoder.finish()?.into_inner().map_err(|e| e.into_error())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        let size_bytes = fs::metadata(&self.path)?.len();
        info!(
            path = %self.path.display(),
            samples = envelope.samples,
            size_bytes,
            "Saved scenario model artifact"
        );

        Ok(ArtifactInfo {
            path: self.path.display().to_string(),
            format_version: envelope.format_version,
            created_at: envelope.created_at,
            regressor: envelope.regressor,
            samples: envelope.samples,
            size_bytes,
        })
    }

    /// Load the most recently saved model
    pub fn load<R>(&self) -> Result<ScenarioModel<R>>
    where
        R: Regressor + DeserializeOwned,
    {
        let envelope = self.read_envelope()?;

        if checksum(&envelope.payload) != envelope.checksum {
            warn!(path = %self.path.display(), "Scenario model checksum mismatch");
            return Err(Error::CorruptArtifact("checksum mismatch".to_string()));
        }

        let model: ScenarioModel<R> = serde_json::from_str(&envelope.payload)
            .map_err(|e| Error::CorruptArtifact(format!("invalid model payload: {}", e)))?;

        if model.regressor().name() != envelope.regressor {
            return Err(Error::CorruptArtifact(format!(
                "artifact holds a '{}' regressor, expected '{}'",
                envelope.regressor,
                model.regressor().name()
            )));
        }

        debug!(path = %self.path.display(), samples = model.samples(), "Loaded scenario model");
        Ok(model)
    }

    /// Read artifact metadata
    pub fn info(&self) -> Result<ArtifactInfo> {
        let envelope = self.read_envelope()?;
        let size_bytes = fs::metadata(&self.path)?.len();
        Ok(ArtifactInfo {
            path: self.path.display().to_string(),
            format_version: envelope.format_version,
            created_at: envelope.created_at,
            regressor: envelope.regressor,
            samples: envelope.samples,
            size_bytes,
        })
    }

    /// Remove the artifact, returns false if there was none
    pub fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Deleted scenario model artifact: {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn read_envelope(&self) -> Result<ArtifactEnvelope> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No scenario model artifact");
                return Err(Error::ModelNotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let decoder = GzDecoder::new(BufReader::new(file));
        let envelope: ArtifactEnvelope = serde_json::from_reader(decoder).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Unreadable scenario model artifact");
            Error::CorruptArtifact(format!("cannot read artifact: {}", e))
        })?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(Error::CorruptArtifact(format!(
                "unsupported format version {} (expected {})",
                envelope.format_version, FORMAT_VERSION
            )));
        }

        Ok(envelope)
    }
}

fn checksum(payload: &str) -> String {
    hex::encode(Sha256::digest(payload.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::models::ScenarioInput;
    use crate::scenario::regressor::{ForestParams, ForestRegressor};
    use std::io::Write;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, ModelStore) {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path().join("models").join(ARTIFACT_FILE_NAME));
        (dir, store)
    }

    fn small_model() -> ScenarioModel {
        let forest = ForestRegressor::new(ForestParams {
            n_trees: 10,
            seed: 42,
        });
        ScenarioModel::fit(&generate(), forest).unwrap()
    }

    fn write_gz(path: &Path, content: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap();
    }

    #[test]
    fn test_load_missing_is_model_not_found() {
        let (_dir, store) = setup_store();
        assert!(!store.exists());
        let err = store.load::<ForestRegressor>().unwrap_err();
        assert!(matches!(err, Error::ModelNotFound(_)));
        assert!(matches!(store.info(), Err(Error::ModelNotFound(_))));
    }

    #[test]
    fn test_save_creates_directory_and_loads() {
        let (_dir, store) = setup_store();
        let model = small_model();

        let info = store.save(&model).unwrap();
        assert!(store.exists());
        assert_eq!(info.samples, 12);
        assert_eq!(info.regressor, "random_forest");
        assert_eq!(info.format_version, FORMAT_VERSION);
        assert!(info.size_bytes > 0);

        let loaded: ScenarioModel = store.load().unwrap();
        assert_eq!(loaded.samples(), 12);
        assert_eq!(loaded.scaler(), model.scaler());

        let input = ScenarioInput::new(30000.0, 10000.0, 6);
        let a = model.predict(input).unwrap();
        let b = loaded.predict(input).unwrap();
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_info_matches_save() {
        let (_dir, store) = setup_store();
        let saved = store.save(&small_model()).unwrap();
        assert_eq!(store.info().unwrap(), saved);
    }

    #[test]
    fn test_save_overwrites_previous() {
        let (_dir, store) = setup_store();
        store.save(&small_model()).unwrap();

        let six = crate::models::Dataset::new(generate().into_records()[..6].to_vec());
        let smaller = ScenarioModel::fit(&six, ForestRegressor::default()).unwrap();
        store.save(&smaller).unwrap();

        let loaded: ScenarioModel = store.load().unwrap();
        assert_eq!(loaded.samples(), 6);

        // Only the artifact itself remains in the directory
        let entries = fs::read_dir(store.path().parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let (_dir, store) = setup_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"not a model").unwrap();

        let err = store.load::<ForestRegressor>().unwrap_err();
        assert!(matches!(err, Error::CorruptArtifact(_)));
    }

    #[test]
    fn test_checksum_mismatch_is_corrupt() {
        let (_dir, store) = setup_store();
        store.save(&small_model()).unwrap();

        // Rewrite the envelope with a tampered payload
        let file = File::open(store.path()).unwrap();
        let mut envelope: ArtifactEnvelope =
            serde_json::from_reader(GzDecoder::new(BufReader::new(file))).unwrap();
        envelope.payload = envelope.payload.replacen("\"samples\":12", "\"samples\":13", 1);
        write_gz(store.path(), &serde_json::to_vec(&envelope).unwrap());

        let err = store.load::<ForestRegressor>().unwrap_err();
        assert!(matches!(err, Error::CorruptArtifact(_)));
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn test_unknown_version_is_corrupt() {
        let (_dir, store) = setup_store();
        store.save(&small_model()).unwrap();

        let file = File::open(store.path()).unwrap();
        let mut envelope: ArtifactEnvelope =
            serde_json::from_reader(GzDecoder::new(BufReader::new(file))).unwrap();
        envelope.format_version = 99;
        write_gz(store.path(), &serde_json::to_vec(&envelope).unwrap());

        let err = store.load::<ForestRegressor>().unwrap_err();
        assert!(err.to_string().contains("format version 99"));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = setup_store();
        assert!(!store.delete().unwrap());
        store.save(&small_model()).unwrap();
        assert!(store.delete().unwrap());
        assert!(!store.exists());
    }

    #[test]
    fn test_saved_artifact_is_complete_on_disk() {
        let (_dir, store) = setup_store();
        let info = store.save(&small_model()).unwrap();

        let on_disk = fs::read(store.path()).unwrap();
        assert_eq!(on_disk.len() as u64, info.size_bytes);
        assert!(on_disk.starts_with(&[0x1f, 0x8b]));

        // The temp file was renamed into place, not left beside it
        let entries = fs::read_dir(store.path().parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_client_facing_output_omits_path() {
        let (dir, store) = setup_store();
        let dir_text = dir.path().display().to_string();

        let err = store.load::<ForestRegressor>().unwrap_err();
        assert!(matches!(&err, Error::ModelNotFound(path) if path.contains(&dir_text)));
        assert!(!err.to_string().contains(&dir_text));

        let info = store.save(&small_model()).unwrap();
        assert!(info.path.contains(&dir_text));
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("path").is_none());

        fs::write(store.path(), b"not a model").unwrap();
        let err = store.load::<ForestRegressor>().unwrap_err();
        assert!(!err.to_string().contains(&dir_text));
    }

    #[test]
    fn test_default_artifact_path_file_name() {
        assert!(default_artifact_path().ends_with(ARTIFACT_FILE_NAME));
    }
}
