//! Filesystem-backed JSON persistence for ledgers.
//!
//! One pretty-printed JSON file per ledger under a caller-chosen data
//! directory. Writes land in a `.tmp` sibling first and are renamed into
//! place, so a crash mid-write never leaves a torn snapshot behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use outlay_core::{CoreError, Ledger, LedgerStorage, Result};

const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Platform data directory for outlay ledgers, for callers without their
/// own preference. The caller owns the choice; nothing here is global.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("outlay"))
        .unwrap_or_else(|| PathBuf::from(".outlay"))
}

/// Stores each ledger as a JSON snapshot file under one root directory.
#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    root: PathBuf,
}

impl JsonLedgerStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn save(&self, name: &str, ledger: &Ledger) -> Result<()> {
        let path = self.ledger_path(name);
        let tmp = tmp_path(&path);
        write_file(&tmp, &serialize_ledger(ledger)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        let path = self.ledger_path(name);
        let data = fs::read_to_string(&path)
            .map_err(|err| CoreError::Storage(format!("{}: {}", path.display(), err)))?;
        serde_json::from_str(&data).map_err(|err| CoreError::Storage(err.to_string()))
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
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

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_ledger(ledger: &Ledger) -> Result<String> {
    serde_json::to_string_pretty(ledger).map_err(|err| CoreError::Storage(err.to_string()))
}
