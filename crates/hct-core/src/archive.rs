// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — History Export / Coefficient Import
// ─────────────────────────────────────────────────────────────────────
//! JSON archive format: `{"coefficients": {...}, "history": [...]}`.
//!
//! Import only ever reads the `coefficients` object. The history array is
//! not parsed, so a truncated or hand-edited history cannot block a
//! coefficient restore.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use hct_types::{Coefficients, HctResult, KernelResult};

#[derive(Serialize)]
struct ArchiveOut<'a> {
    coefficients: &'a Coefficients,
    history: &'a [HctResult],
}

#[derive(Deserialize)]
struct ArchiveIn {
    coefficients: Coefficients,
}

pub(crate) fn write(
    path: &Path,
    coefficients: &Coefficients,
    history: &[HctResult],
) -> KernelResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(
        &mut writer,
        &ArchiveOut {
            coefficients,
            history,
        },
    )?;
    writer.flush()?;
    Ok(())
}

pub(crate) fn read_coefficients(path: &Path) -> KernelResult<Coefficients> {
    let reader = BufReader::new(File::open(path)?);
    let archive: ArchiveIn = serde_json::from_reader(reader)?;
    Ok(archive.coefficients)
}
