//! Model signing utility.
//!
//! Writes `manifest.json` (SHA-256 of the model file) and `model.sig`
//! (Ed25519 over the manifest bytes) next to the model. A directory means
//! its `model.json`; a file path is bound under its own name. The loader
//! verifies both at startup.
//!
//! # Usage
//!
//! ```bash
//! CARDIORISK_MODEL_SIGNING_KEY_B64_FILE=seed.b64 \
//!     cargo run --bin sign_model -- <model_dir | model_file> [--serial <n>]
//! ```
//!
//! The signing seed is read from, in order:
//! - the file descriptor in `CARDIORISK_MODEL_SIGNING_KEY_B64_FD` (unix)
//! - the file named by `CARDIORISK_MODEL_SIGNING_KEY_B64_FILE`
//! - `CARDIORISK_MODEL_SIGNING_KEY_B64` (debug builds only)

use std::env;
use std::fs;
#[cfg(unix)]
use std::os::unix::io::FromRawFd;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use cardiorisk::adapters::logistic::manifest::{ModelManifest, MANIFEST_FILE, SIGNATURE_FILE};
use cardiorisk::adapters::logistic::resolve_model_path;

const USAGE: &str = "Usage: sign_model <model_dir | model_file> [--serial <u64>]";

#[derive(Zeroize, ZeroizeOnDrop)]
struct Seed([u8; 32]);

fn non_empty(secret: String) -> Result<Zeroizing<String>> {
    let secret = Zeroizing::new(secret);
    let trimmed = secret.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        bail!("Empty signing key");
    }
    Ok(Zeroizing::new(trimmed.to_string()))
}

fn read_signing_seed_b64() -> Result<Zeroizing<String>> {
    #[cfg(unix)]
    if let Ok(fd_str) = env::var("CARDIORISK_MODEL_SIGNING_KEY_B64_FD") {
        use std::io::Read;

        let fd: i32 = fd_str.trim().parse().context("Invalid key FD")?;
        if fd <= 2 {
            bail!("Refusing to read signing key from stdio FD");
        }
        // SAFETY: the caller hands this FD over for a one-time secret read.
        let mut file = unsafe { fs::File::from_raw_fd(fd) };
        let mut buf = String::new();
        file.read_to_string(&mut buf)
            .context("Failed reading signing key from FD")?;
        return non_empty(buf);
    }

    if let Ok(path) = env::var("CARDIORISK_MODEL_SIGNING_KEY_B64_FILE") {
        let content =
            fs::read_to_string(path.trim()).context("Failed reading signing key file")?;
        return non_empty(content);
    }

    if cfg!(debug_assertions) {
        if let Ok(v) = env::var("CARDIORISK_MODEL_SIGNING_KEY_B64") {
            return non_empty(v);
        }
    }

    Err(anyhow!(
        "Missing signing key. Provide CARDIORISK_MODEL_SIGNING_KEY_B64_FD or CARDIORISK_MODEL_SIGNING_KEY_B64_FILE (env var fallback only in debug builds)."
    ))
}

fn read_signing_seed() -> Result<Seed> {
    let b64 = read_signing_seed_b64()?;
    let raw = Zeroizing::new(
        general_purpose::STANDARD
            .decode(b64.trim())
            .context("Invalid base64 in signing key")?,
    );
    let seed: [u8; 32] = raw.as_slice().try_into().map_err(|_| {
        anyhow!(
            "Signing key seed must be 32 bytes after base64 decode (got {})",
            raw.len()
        )
    })?;
    Ok(Seed(seed))
}

fn parse_args() -> Result<(PathBuf, Option<u64>)> {
    let mut args = env::args().skip(1);
    let mut model_path: Option<PathBuf> = None;
    let mut serial: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--serial" => {
                let v = args.next().ok_or_else(|| anyhow!(USAGE))?;
                serial = Some(v.trim().parse().context("--serial must be a u64")?);
            }
            "-h" | "--help" => bail!(USAGE),
            _ if model_path.is_none() => model_path = Some(PathBuf::from(arg)),
            _ => bail!(USAGE),
        }
    }

    Ok((model_path.ok_or_else(|| anyhow!(USAGE))?, serial))
}

fn main() -> Result<()> {
    let (model_path, serial) = parse_args()?;
    let (model_dir, model_name) = resolve_model_path(&model_path)?;
    if !model_dir.join(&model_name).is_file() {
        bail!("No model file at {:?}", model_dir.join(&model_name));
    }

    let seed = read_signing_seed()?;
    let signing_key = SigningKey::from_bytes(&seed.0);
    drop(seed);

    let created_at = chrono::Utc::now().timestamp();
    let serial = serial.unwrap_or_else(|| u64::try_from(created_at).unwrap_or(1));

    let manifest = ModelManifest::for_files(&model_dir, &[model_name.as_str()], serial, created_at)?;
    let manifest_bytes =
        serde_json::to_vec_pretty(&manifest).context("Failed to serialize manifest")?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes)
        .with_context(|| format!("Failed to write {manifest_path:?}"))?;

    let sig: Signature = signing_key.sign(&manifest_bytes);
    let sig_path = model_dir.join(SIGNATURE_FILE);
    fs::write(&sig_path, sig.to_bytes()).with_context(|| format!("Failed to write {sig_path:?}"))?;

    println!("Signed manifest: {manifest_path:?} (serial {serial})");
    println!("Wrote signature: {sig_path:?}");
    println!(
        "CARDIORISK_MODEL_PUBKEY_B64={}",
        general_purpose::STANDARD.encode(signing_key.verifying_key().as_bytes())
    );

    Ok(())
}
