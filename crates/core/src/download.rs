//! File names offered when a rendered prescription is downloaded.

use crate::constants::{DOWNLOAD_FILE_EXTENSION, DOWNLOAD_FILE_PREFIX};
use chrono::NaiveDate;

/// Builds `receita_<patient>_<YYYY-MM-DD>.html`.
///
/// Runs of whitespace in the patient name collapse to a single `_`. Characters that would break
/// a quoted `Content-Disposition` filename (`"`, `\`, `/`) are dropped.
pub fn file_name(patient_name: &str, date: NaiveDate) -> String {
    let patient = patient_name
        .split_whitespace()
        .map(|part| part.replace(['"', '\\', '/'], ""))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    format!(
        "{}_{}_{}.{}",
        DOWNLOAD_FILE_PREFIX,
        patient,
        date.format("%Y-%m-%d"),
        DOWNLOAD_FILE_EXTENSION
    )
}

/// Builds an inline `Content-Disposition` value for `file_name`.
///
/// Header values must be visible ASCII, so the plain `filename` parameter carries an ASCII
/// fallback (other characters become `_`) and `filename*` carries the UTF-8 name
/// percent-encoded.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();

    let mut encoded = String::with_capacity(file_name.len() * 3);
    for b in file_name.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(b));
        } else {
            encoded.push_str(&format!("%{:02X}", b));
        }
    }

    format!("inline; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
