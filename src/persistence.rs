// File: src/persistence.rs
use crate::core::types::WordBankEntry;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The on-disk form of the word bank. A `BTreeMap` keeps the JSON key-sorted
/// so regenerated banks diff cleanly.
pub type BankMap = BTreeMap<String, WordBankEntry>;

/// Writes the whole bank, replacing whatever was at `path`.
pub fn save_bank(bank: &BankMap, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, bank)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

pub fn load_bank(path: &Path) -> Result<BankMap> {
    if !path.exists() {
        return Err(Error::BankMissing {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);
    let bank: BankMap = serde_json::from_reader(reader)?;
    Ok(bank)
}
