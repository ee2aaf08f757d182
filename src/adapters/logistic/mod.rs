//! Logistic regression adapter: Implementation of `BinaryClassifier`.
//!
//! The model is exported from the training pipeline as `model.json`
//! (coefficients, intercept, optional standard scaler) and loaded once at
//! startup. After loading it is immutable and shared across threads.
//!
//! # Security
//!
//! - If `manifest.json` and `model.sig` sit next to the model, the Ed25519
//!   signature over the manifest and the SHA-256 of every bound file are
//!   verified before the model is parsed.
//! - Unsigned models are refused unless the loader is explicitly configured
//!   with `SignaturePolicy::AllowUnsigned`.
//!
//! # Schema
//!
//! `feature_names` in the artifact must equal the encoder's feature order
//! exactly. A reordered or renamed schema is a load error, not a warning.

pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::domain::{feature_codes, InferenceError, FEATURE_COUNT};
use crate::ports::BinaryClassifier;

use manifest::{ModelManifest, MANIFEST_FILE, SIGNATURE_FILE};

/// Default model file name inside a model directory.
pub const MODEL_FILE: &str = "model.json";

/// Supported artifact format.
pub const FORMAT_VERSION: u32 = 1;

/// The only algorithm this adapter evaluates.
pub const ALGORITHM: &str = "logistic_regression";

/// Failure to load the classifier artifact. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Model artifact not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model format: {0}")]
    Format(String),

    #[error("Model schema does not match the feature order: {0}")]
    Schema(String),

    #[error("Model signature rejected: {0}")]
    Signature(String),

    #[error("Model is unsigned and unsigned models are not allowed")]
    Unsigned,
}

/// Standardisation applied before the linear term: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Free-form training information, shown on the about screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dataset: Option<String>,
    /// Held-out accuracy reported by the training pipeline (0.0 to 1.0).
    #[serde(default)]
    pub accuracy: Option<f64>,
}

fn default_threshold() -> f64 {
    0.5
}

/// On-disk model export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub algorithm: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default = "default_threshold")]
    pub decision_threshold: f64,
    #[serde(default)]
    pub metadata: ModelMetadata,
}

/// Where a loaded model came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProvenance {
    pub path: PathBuf,
    /// Signature and file hashes were verified.
    pub signed: bool,
    pub manifest_serial: Option<u64>,
}

/// Loaded logistic regression classifier.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
    scaler: Option<StandardScaler>,
    threshold: f64,
    metadata: ModelMetadata,
    provenance: ModelProvenance,
}

impl LogisticModel {
    /// Build a model from a parsed artifact, checking schema and parameters.
    ///
    /// # Errors
    /// Returns `ModelLoadError::Schema` or `ModelLoadError::Format` if the
    /// artifact does not describe a usable 13-feature logistic model.
    pub fn from_artifact(
        artifact: ModelArtifact,
        provenance: ModelProvenance,
    ) -> Result<Self, ModelLoadError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::Format(format!(
                "unsupported format_version {}",
                artifact.format_version
            )));
        }
        if artifact.algorithm != ALGORITHM {
            return Err(ModelLoadError::Format(format!(
                "unsupported algorithm '{}'",
                artifact.algorithm
            )));
        }

        let expected = feature_codes();
        if artifact.feature_names.len() != FEATURE_COUNT
            || artifact
                .feature_names
                .iter()
                .zip(expected.iter())
                .any(|(got, want)| got != want)
        {
            return Err(ModelLoadError::Schema(format!(
                "expected {:?}, got {:?}",
                expected, artifact.feature_names
            )));
        }

        if artifact.coefficients.len() != FEATURE_COUNT {
            return Err(ModelLoadError::Format(format!(
                "expected {FEATURE_COUNT} coefficients, got {}",
                artifact.coefficients.len()
            )));
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelLoadError::Format("non-finite model parameter".into()));
        }

        if let Some(scaler) = &artifact.scaler {
            if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
                return Err(ModelLoadError::Format(
                    "scaler lengths do not match feature count".into(),
                ));
            }
            if scaler.mean.iter().any(|m| !m.is_finite())
                || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
            {
                return Err(ModelLoadError::Format(
                    "scaler parameters must be finite with non-zero scale".into(),
                ));
            }
        }

        let threshold = artifact.decision_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ModelLoadError::Format(format!(
                "decision_threshold {threshold} must lie in (0, 1)"
            )));
        }

        Ok(Self {
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            scaler: artifact.scaler,
            threshold,
            metadata: artifact.metadata,
            provenance,
        })
    }

    #[must_use]
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn provenance(&self) -> &ModelProvenance {
        &self.provenance
    }

    #[must_use]
    pub fn decision_threshold(&self) -> f64 {
        self.threshold
    }

    /// Log-odds of class 1.
    fn decision_function(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }

        let z = match &self.scaler {
            Some(scaler) => features
                .iter()
                .zip(&self.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((x, w), (m, s))| w * (x - m) / s)
                .sum::<f64>(),
            None => features
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| w * x)
                .sum::<f64>(),
        } + self.intercept;

        if !z.is_finite() {
            return Err(InferenceError::Evaluation(
                "decision function is not finite".into(),
            ));
        }
        Ok(z)
    }

    /// Numerically stable logistic function.
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }
}

impl BinaryClassifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<u8, InferenceError> {
        let p1 = Self::sigmoid(self.decision_function(features)?);
        Ok(u8::from(p1 > self.threshold))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], InferenceError> {
        let p1 = Self::sigmoid(self.decision_function(features)?);
        Ok([1.0 - p1, p1])
    }
}

/// Split a model path into its directory and file name.
///
/// A directory resolves to `model.json` inside it. The file name is the key
/// the signed manifest must bind.
///
/// # Errors
/// Returns `ModelLoadError::Format` if the file name is not valid UTF-8.
pub fn resolve_model_path(path: &Path) -> Result<(PathBuf, String), ModelLoadError> {
    if path.is_dir() {
        return Ok((path.to_path_buf(), MODEL_FILE.to_string()));
    }
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ModelLoadError::Format(format!("unusable model file name in {path:?}")))?;
    Ok((base_dir.to_path_buf(), name.to_string()))
}

/// How to treat a model without `manifest.json` / `model.sig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePolicy {
    /// Refuse to load unsigned models.
    Required,
    /// Load unsigned models with a warning. Signed models are still verified.
    AllowUnsigned,
}

/// Loads and verifies model artifacts.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    policy: SignaturePolicy,
    verifying_key: Option<VerifyingKey>,
}

impl ModelLoader {
    #[must_use]
    pub fn new(policy: SignaturePolicy) -> Self {
        Self {
            policy,
            verifying_key: None,
        }
    }

    /// Public key that model manifests must be signed with.
    #[must_use]
    pub fn with_verifying_key(mut self, key: VerifyingKey) -> Self {
        self.verifying_key = Some(key);
        self
    }

    /// Parse a base64-encoded 32-byte Ed25519 public key.
    ///
    /// # Errors
    /// Returns `ModelLoadError::Signature` if the key is malformed.
    pub fn verifying_key_from_b64(b64: &str) -> Result<VerifyingKey, ModelLoadError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64.trim())
            .map_err(|_| ModelLoadError::Signature("invalid public key base64".into()))?;
        let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            ModelLoadError::Signature("invalid public key length (expected 32 bytes)".into())
        })?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|_| ModelLoadError::Signature("invalid verifying key".into()))
    }

    /// Load a model from a directory (containing `model.json`) or a file path.
    ///
    /// # Errors
    /// Returns `ModelLoadError` if the artifact is missing, unreadable,
    /// malformed, mis-ordered, or fails signature verification.
    pub fn load(&self, path: &Path) -> Result<LogisticModel, ModelLoadError> {
        let (base_dir, model_name) = resolve_model_path(path)?;
        let model_path = base_dir.join(&model_name);

        if !model_path.is_file() {
            return Err(ModelLoadError::NotFound(model_path));
        }

        let manifest = self.verify_signature(&base_dir, &model_name)?;

        let content = fs::read_to_string(&model_path).map_err(|source| ModelLoadError::Io {
            path: model_path.clone(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|e| ModelLoadError::Format(e.to_string()))?;

        let provenance = ModelProvenance {
            path: model_path.clone(),
            signed: manifest.is_some(),
            manifest_serial: manifest.as_ref().map(|m| m.serial),
        };
        let model = LogisticModel::from_artifact(artifact, provenance)?;

        tracing::info!(
            "Loaded model from {:?} (algorithm={}, n_features={}, signed={})",
            model_path,
            ALGORITHM,
            model.n_features(),
            model.provenance.signed
        );

        Ok(model)
    }

    /// Verify `model.sig` over `manifest.json` and the bound file hashes.
    ///
    /// Returns `None` for an unsigned model that the policy allows.
    fn verify_signature(
        &self,
        base_dir: &Path,
        model_name: &str,
    ) -> Result<Option<ModelManifest>, ModelLoadError> {
        let sig_path = base_dir.join(SIGNATURE_FILE);
        let manifest_path = base_dir.join(MANIFEST_FILE);

        if !sig_path.exists() || !manifest_path.exists() {
            return match self.policy {
                SignaturePolicy::AllowUnsigned => {
                    tracing::warn!("Loading UNSIGNED model from {:?}", base_dir);
                    Ok(None)
                }
                SignaturePolicy::Required => {
                    tracing::error!("Model signature not found at {:?}", sig_path);
                    Err(ModelLoadError::Unsigned)
                }
            };
        }

        let verifying_key = self.verifying_key.ok_or_else(|| {
            ModelLoadError::Signature("model is signed but no verifying key is configured".into())
        })?;

        let sig_bytes = fs::read(&sig_path).map_err(|source| ModelLoadError::Io {
            path: sig_path.clone(),
            source,
        })?;
        let sig_bytes: [u8; 64] = sig_bytes.as_slice().try_into().map_err(|_| {
            ModelLoadError::Signature("invalid signature length (expected 64 bytes)".into())
        })?;
        let signature = Signature::from_bytes(&sig_bytes);

        let manifest_content = fs::read(&manifest_path).map_err(|source| ModelLoadError::Io {
            path: manifest_path.clone(),
            source,
        })?;

        verifying_key
            .verify(&manifest_content, &signature)
            .map_err(|_| ModelLoadError::Signature("invalid model signature".into()))?;

        let manifest: ModelManifest = serde_json::from_slice(&manifest_content)
            .map_err(|e| ModelLoadError::Signature(format!("invalid manifest format: {e}")))?;

        if !manifest.binds(model_name) {
            return Err(ModelLoadError::Signature(format!(
                "manifest does not bind {model_name}"
            )));
        }
        manifest.verify_files(base_dir, chrono::Utc::now().timestamp())?;

        tracing::info!(
            "Model signature and hashes verified (serial={})",
            manifest.serial
        );
        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::RngCore;
    use tempfile::tempdir;

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: FORMAT_VERSION,
            algorithm: ALGORITHM.into(),
            feature_names: feature_codes().iter().map(|s| s.to_string()).collect(),
            coefficients: vec![0.5; FEATURE_COUNT],
            intercept: -0.25,
            scaler: Some(StandardScaler {
                mean: vec![1.0; FEATURE_COUNT],
                scale: vec![2.0; FEATURE_COUNT],
            }),
            decision_threshold: 0.5,
            metadata: ModelMetadata::default(),
        }
    }

    fn provenance() -> ModelProvenance {
        ModelProvenance {
            path: PathBuf::from("model.json"),
            signed: false,
            manifest_serial: None,
        }
    }

    fn model(artifact: ModelArtifact) -> LogisticModel {
        LogisticModel::from_artifact(artifact, provenance()).expect("Valid artifact")
    }

    fn write_artifact(dir: &Path, artifact: &ModelArtifact) {
        let bytes = serde_json::to_vec_pretty(artifact).expect("serialize");
        fs::write(dir.join(MODEL_FILE), bytes).expect("write model");
    }

    fn signing_key() -> SigningKey {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        SigningKey::from_bytes(&seed)
    }

    fn sign_dir(dir: &Path, key: &SigningKey, files: &[&str]) {
        let manifest = ModelManifest::for_files(dir, files, 3, chrono::Utc::now().timestamp())
            .expect("manifest");
        let bytes = serde_json::to_vec_pretty(&manifest).expect("serialize manifest");
        fs::write(dir.join(MANIFEST_FILE), &bytes).expect("write manifest");
        let sig: Signature = key.sign(&bytes);
        fs::write(dir.join(SIGNATURE_FILE), sig.to_bytes()).expect("write sig");
    }

    #[test]
    fn test_probability_at_scaler_mean_is_sigmoid_of_intercept() {
        let m = model(artifact());
        let p = m.predict_proba(&[1.0; FEATURE_COUNT]).expect("Should evaluate");
        let expected = 1.0 / (1.0 + 0.25f64.exp());
        assert!((p[1] - expected).abs() < 1e-12);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
        assert_eq!(m.predict(&[1.0; FEATURE_COUNT]).expect("Should evaluate"), 0);
    }

    #[test]
    fn test_label_agrees_with_threshold() {
        let m = model(artifact());
        // z = 13 * 0.5 * (3 - 1) / 2 - 0.25 = 6.25
        let x = [3.0; FEATURE_COUNT];
        let p = m.predict_proba(&x).expect("Should evaluate");
        assert!(p[1] > 0.99);
        assert_eq!(m.predict(&x).expect("Should evaluate"), 1);
    }

    #[test]
    fn test_exact_tie_predicts_class_zero() {
        let mut a = artifact();
        a.intercept = 0.0;
        let m = model(a);
        let p = m.predict_proba(&[1.0; FEATURE_COUNT]).expect("Should evaluate");
        assert_eq!(p, [0.5, 0.5]);
        assert_eq!(m.predict(&[1.0; FEATURE_COUNT]).expect("Should evaluate"), 0);
    }

    #[test]
    fn test_unscaled_model() {
        let mut a = artifact();
        a.scaler = None;
        a.coefficients = vec![0.0; FEATURE_COUNT];
        a.coefficients[0] = 0.1;
        a.intercept = -5.0;
        let m = model(a);
        let mut x = [0.0; FEATURE_COUNT];
        x[0] = 50.0;
        let p = m.predict_proba(&x).expect("Should evaluate");
        assert!((p[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        assert_eq!(LogisticModel::sigmoid(-1000.0), 0.0);
        assert_eq!(LogisticModel::sigmoid(1000.0), 1.0);
        assert!((LogisticModel::sigmoid(0.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dimension_mismatch() {
        let m = model(artifact());
        let err = m.predict_proba(&[1.0; 9]).expect_err("must fail");
        assert_eq!(
            err,
            InferenceError::DimensionMismatch {
                expected: FEATURE_COUNT,
                got: 9
            }
        );
    }

    #[test]
    fn test_schema_reordering_is_rejected() {
        let mut a = artifact();
        a.feature_names.swap(0, 1);
        let err = LogisticModel::from_artifact(a, provenance()).expect_err("must fail");
        assert!(matches!(err, ModelLoadError::Schema(_)));
    }

    #[test]
    fn test_bad_parameters_are_rejected() {
        let mut a = artifact();
        a.coefficients.pop();
        assert!(matches!(
            LogisticModel::from_artifact(a, provenance()),
            Err(ModelLoadError::Format(_))
        ));

        let mut a = artifact();
        a.intercept = f64::NAN;
        assert!(LogisticModel::from_artifact(a, provenance()).is_err());

        let mut a = artifact();
        if let Some(s) = a.scaler.as_mut() {
            s.scale[4] = 0.0;
        }
        assert!(LogisticModel::from_artifact(a, provenance()).is_err());

        let mut a = artifact();
        a.decision_threshold = 1.0;
        assert!(LogisticModel::from_artifact(a, provenance()).is_err());

        let mut a = artifact();
        a.algorithm = "random_forest".into();
        assert!(LogisticModel::from_artifact(a, provenance()).is_err());
    }

    #[test]
    fn test_missing_model_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let err = ModelLoader::new(SignaturePolicy::AllowUnsigned)
            .load(temp.path())
            .expect_err("must fail");
        assert!(matches!(err, ModelLoadError::NotFound(_)));
    }

    #[test]
    fn test_unsigned_model_requires_opt_in() {
        let temp = tempdir().expect("tempdir");
        write_artifact(temp.path(), &artifact());

        let err = ModelLoader::new(SignaturePolicy::Required)
            .load(temp.path())
            .expect_err("must fail");
        assert!(matches!(err, ModelLoadError::Unsigned));

        let m = ModelLoader::new(SignaturePolicy::AllowUnsigned)
            .load(temp.path())
            .expect("unsigned allowed");
        assert!(!m.provenance().signed);
        assert_eq!(m.n_features(), FEATURE_COUNT);
    }

    #[test]
    fn test_load_by_file_path() {
        let temp = tempdir().expect("tempdir");
        write_artifact(temp.path(), &artifact());
        let m = ModelLoader::new(SignaturePolicy::AllowUnsigned)
            .load(&temp.path().join(MODEL_FILE))
            .expect("load by file");
        assert_eq!(m.provenance().path, temp.path().join(MODEL_FILE));
    }

    #[test]
    fn test_signed_model_loads() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifact(dir, &artifact());
        let key = signing_key();
        sign_dir(dir, &key, &[MODEL_FILE]);

        let m = ModelLoader::new(SignaturePolicy::Required)
            .with_verifying_key(key.verifying_key())
            .load(dir)
            .expect("signed model loads");
        assert!(m.provenance().signed);
        assert_eq!(m.provenance().manifest_serial, Some(3));
    }

    #[test]
    fn test_signed_model_with_wrong_key_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifact(dir, &artifact());
        sign_dir(dir, &signing_key(), &[MODEL_FILE]);

        let err = ModelLoader::new(SignaturePolicy::AllowUnsigned)
            .with_verifying_key(signing_key().verifying_key())
            .load(dir)
            .expect_err("must fail");
        assert!(matches!(err, ModelLoadError::Signature(_)));
    }

    #[test]
    fn test_tampered_model_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifact(dir, &artifact());
        let key = signing_key();
        sign_dir(dir, &key, &[MODEL_FILE]);

        let mut tampered = artifact();
        tampered.intercept = 3.0;
        write_artifact(dir, &tampered);

        let err = ModelLoader::new(SignaturePolicy::Required)
            .with_verifying_key(key.verifying_key())
            .load(dir)
            .expect_err("must fail");
        assert!(err.to_string().contains("hash mismatch"));
    }

    #[test]
    fn test_signed_model_under_custom_name_loads() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("heart_v2.json");
        let bytes = serde_json::to_vec_pretty(&artifact()).expect("serialize");
        fs::write(&path, bytes).expect("write model");

        let (dir, name) = resolve_model_path(&path).expect("resolves");
        assert_eq!(dir, temp.path());
        assert_eq!(name, "heart_v2.json");
        let key = signing_key();
        sign_dir(&dir, &key, &[name.as_str()]);

        let m = ModelLoader::new(SignaturePolicy::Required)
            .with_verifying_key(key.verifying_key())
            .load(&path)
            .expect("custom-named signed model loads");
        assert!(m.provenance().signed);
    }

    #[test]
    fn test_directory_resolves_to_default_model_file() {
        let temp = tempdir().expect("tempdir");
        let (dir, name) = resolve_model_path(temp.path()).expect("resolves");
        assert_eq!(dir, temp.path());
        assert_eq!(name, MODEL_FILE);
    }

    #[test]
    fn test_manifest_must_bind_loaded_model() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifact(dir, &artifact());
        fs::write(dir.join("notes.txt"), b"release notes").expect("write");
        let key = signing_key();
        sign_dir(dir, &key, &["notes.txt"]);

        let err = ModelLoader::new(SignaturePolicy::Required)
            .with_verifying_key(key.verifying_key())
            .load(dir)
            .expect_err("must fail");
        assert!(err.to_string().contains("does not bind"));
    }

    #[test]
    fn test_verifying_key_from_b64() {
        let key = signing_key();
        let b64 = base64::engine::general_purpose::STANDARD.encode(key.verifying_key().to_bytes());
        let parsed = ModelLoader::verifying_key_from_b64(&b64).expect("valid key");
        assert_eq!(parsed, key.verifying_key());

        assert!(ModelLoader::verifying_key_from_b64("not base64!").is_err());
        assert!(ModelLoader::verifying_key_from_b64("AAAA").is_err());
    }

    #[test]
    fn test_bundled_model_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let m = ModelLoader::new(SignaturePolicy::AllowUnsigned)
            .load(&dir)
            .expect("bundled model loads");
        assert_eq!(m.n_features(), FEATURE_COUNT);
        assert!(m.metadata().dataset.is_some());
    }
}
