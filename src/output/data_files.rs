//! Historical PowerTrack data files
//!
//! Each file listed in a job's `urlList` is a gzipped stream of activities,
//! one JSON object per line. Files are saved decoded, as a JSON array.

use crate::error::{Error, Result, ResultExt};
use crate::types::JsonValue;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decode a downloaded data file into its activities.
///
/// The body is gunzipped when it carries the gzip header; a body the HTTP
/// client already decompressed is read as is. Blank lines are skipped.
pub fn decode_data_file(bytes: &[u8]) -> Result<Vec<JsonValue>> {
    let text = if bytes.starts_with(&GZIP_MAGIC) {
        let mut text = String::new();
        GzDecoder::new(bytes).read_to_string(&mut text)?;
        text
    } else {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::invalid_value("data file", e.to_string()))?
    };

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Activity on line {}", i + 1))
        })
        .collect()
}

/// Sibling path a file is written to before it is renamed into place
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Serialize `value` as JSON to `path`.
///
/// The data goes to [`partial_path`] first and is renamed over `path` only
/// once fully written, so `path` either does not exist or is complete.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let partial = partial_path(path);
    let file = File::create(&partial)
        .with_context(|| format!("Failed to create {}", partial.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    writer
        .into_inner()
        .map_err(std::io::IntoInnerError::into_error)?
        .sync_all()?;

    std::fs::rename(&partial, path)
        .with_context(|| format!("Failed to move {} into place", partial.display()))
}
