//! Semicolon-delimited table export.
//!
//! 1-D arrays are written as `index;value` lines. The last element is not
//! written. 2-D arrays are written one line per index of the inner
//! dimension, each holding `index;value; ;` for every outer row.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{info, warn};

/// Write `values[0..len-1]` as `i;v` lines.
pub fn export_1d<T: Display>(path: impl AsRef<Path>, values: &[T]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_1d(&mut out, values)?;
    out.flush()
}

/// Write a `rows[j][i]` table as one line per `i`.
pub fn export_2d<T: Display>(path: impl AsRef<Path>, rows: &[Vec<T>]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_2d(&mut out, rows)?;
    out.flush()
}

pub fn write_1d<T: Display>(out: &mut impl Write, values: &[T]) -> io::Result<()> {
    let n = values.len().saturating_sub(1);
    for (i, v) in values[..n].iter().enumerate() {
        writeln!(out, "{i};{v}")?;
    }
    Ok(())
}

pub fn write_2d<T: Display>(out: &mut impl Write, rows: &[Vec<T>]) -> io::Result<()> {
    let inner = rows.first().map_or(0, Vec::len);
    for i in 0..inner {
        for row in rows {
            if let Some(v) = row.get(i) {
                write!(out, "{i};{v}; ;")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// [`export_1d`] that logs the outcome instead of failing.
///
/// Returns whether the file was written.
pub fn export_1d_logged<T: Display>(path: &Path, values: &[T]) -> bool {
    match export_1d(path, values) {
        Ok(()) => {
            info!("{} has been exported", path.display());
            true
        }
        Err(err) => {
            warn!("failed to export {}: {err}", path.display());
            false
        }
    }
}

/// [`export_2d`] that logs the outcome instead of failing.
pub fn export_2d_logged<T: Display>(path: &Path, rows: &[Vec<T>]) -> bool {
    match export_2d(path, rows) {
        Ok(()) => {
            info!("{} has been exported", path.display());
            true
        }
        Err(err) => {
            warn!("failed to export {}: {err}", path.display());
            false
        }
    }
}
