//! Sysfs tunable access
//!
//! Tunables are opened per write and closed immediately. Write failures are
//! logged with the path and OS error and never propagated: a kernel missing
//! one knob must not abort the rest of a profile fan-out.

use std::fs;
use std::io;
use std::path::Path;

/// Write a literal string to a sysfs tunable.
pub(crate) fn write_str(path: &Path, value: &str) {
    if let Err(e) = fs::write(path, value) {
        tracing::error!("Error writing {} to {}: {}", value, path.display(), e);
    }
}

/// Write the decimal form of an integer to a sysfs tunable.
pub(crate) fn write_int(path: &Path, value: u32) {
    write_str(path, &value.to_string());
}

/// Read a sysfs file, stripping any trailing newline/carriage-return.
pub(crate) fn read_line(path: &Path) -> io::Result<String> {
    let mut contents = fs::read_to_string(path)?;
    let trimmed = contents.trim_end_matches(['\n', '\r']).len();
    contents.truncate(trimmed);
    Ok(contents)
}
