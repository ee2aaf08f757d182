//! Ed25519 keypair generation for model signing.
//!
//! Writes the base64 signing seed with 0600 permissions (unix) and,
//! optionally, the base64 public key for `CARDIORISK_MODEL_PUBKEY_B64_FILE`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_keypair -- --out-seed <path> [--out-pub <path>] [--force]
//! ```

use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

const USAGE: &str = "Usage: generate_keypair --out-seed <path> [--out-pub <path>] [--force]";

struct Args {
    out_seed: PathBuf,
    out_pub: Option<PathBuf>,
    force: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut out_seed = None;
    let mut out_pub = None;
    let mut force = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out-seed" => out_seed = Some(PathBuf::from(args.next().ok_or_else(|| anyhow!(USAGE))?)),
            "--out-pub" => out_pub = Some(PathBuf::from(args.next().ok_or_else(|| anyhow!(USAGE))?)),
            "--force" => force = true,
            "-h" | "--help" => bail!(USAGE),
            other => bail!("Unknown arg: {other}\n{USAGE}"),
        }
    }

    Ok(Args {
        out_seed: out_seed.ok_or_else(|| anyhow!(USAGE))?,
        out_pub,
        force,
    })
}

fn write_new(path: &Path, contents: &[u8], mode: u32, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Refusing to overwrite existing file {path:?}. Use --force.");
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {parent:?}"))?;
    }

    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = opts
        .open(path)
        .with_context(|| format!("Failed to open {path:?}"))?;
    file.write_all(contents)?;
    file.write_all(b"\n")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let mut seed = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(&mut *seed);
    let signing_key = SigningKey::from_bytes(&seed);
    let pub_b64 = general_purpose::STANDARD.encode(signing_key.verifying_key().as_bytes());
    let seed_b64 = Zeroizing::new(general_purpose::STANDARD.encode(&*seed));

    write_new(&args.out_seed, seed_b64.as_bytes(), 0o600, args.force)?;
    // Public key is non-secret.
    if let Some(pub_path) = &args.out_pub {
        write_new(pub_path, pub_b64.as_bytes(), 0o644, args.force)?;
    }

    // Print only non-secret material.
    println!("Wrote signing seed (base64) to {:?}", args.out_seed);
    if let Some(pub_path) = &args.out_pub {
        println!("Wrote public key (base64) to {pub_path:?}");
    }
    println!("CARDIORISK_MODEL_PUBKEY_B64={pub_b64}");

    Ok(())
}
