// ─────────────────────────────────────────────────────────────────────
// Lampyris — Result Archive
// ─────────────────────────────────────────────────────────────────────
//! Lossless JSON persistence of a `ComparisonResults` set.
//!
//! `serde_json` is built with `float_roundtrip`, so every f64 in the
//! archive parses back to the identical bit pattern.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use lampyris_types::{ComparisonResults, SyncError, SyncResult};

/// Serialise `results` to `writer`.
pub fn export_results<W: Write>(results: &ComparisonResults, writer: W) -> SyncResult<()> {
    serde_json::to_writer(writer, results).map_err(|e| SyncError::Archive(format!("encode: {e}")))
}

/// Deserialise and validate a result set from `reader`.
pub fn load_results<R: Read>(reader: R) -> SyncResult<ComparisonResults> {
    let results: ComparisonResults =
        serde_json::from_reader(reader).map_err(|e| SyncError::Archive(format!("decode: {e}")))?;
    results.validate()?;
    Ok(results)
}

/// Write `results` to a file at `path`, replacing any existing file.
pub fn save_results(results: &ComparisonResults, path: impl AsRef<Path>) -> SyncResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    export_results(results, &mut writer)?;
    writer.flush()?;
    log::info!("Saved {} model run(s) to {}", results.len(), path.display());
    Ok(())
}

/// Read a result set previously written by `save_results`.
pub fn open_results(path: impl AsRef<Path>) -> SyncResult<ComparisonResults> {
    let path = path.as_ref();
    let results = load_results(BufReader::new(File::open(path)?))?;
    log::info!("Loaded {} model run(s) from {}", results.len(), path.display());
    Ok(results)
}
