//! Loading transcript text from plain files and exported `.zip` bundles.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{ChatpulseError, Result};

/// Reads transcript text from `path`.
///
/// A `.zip` extension (case-insensitive) selects archive extraction via
/// [`read_archive`]; anything else is read as a plain UTF-8 text file.
///
/// # Errors
///
/// Returns an I/O error when the file cannot be read, a UTF-8 error when the
/// contents are not valid text, or an archive error for broken bundles.
pub fn load_transcript_text(path: impl AsRef<Path>, chat_file: Option<&str>) -> Result<String> {
    let path = path.as_ref();
    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        read_archive(path, chat_file)
    } else {
        let bytes = std::fs::read(path)?;
        String::from_utf8(bytes).map_err(Into::into)
    }
}

/// Extracts the chat transcript from an export bundle.
///
/// With `chat_file` set, only that exact entry name is accepted. Otherwise
/// the `.txt` entries are scanned and one is picked by [`pick_entry`].
///
/// # Errors
///
/// Returns [`ChatpulseError::Archive`] for unreadable bundles and
/// [`ChatpulseError::ChatFileNotFound`] when no suitable entry exists.
pub fn read_archive(path: &Path, chat_file: Option<&str>) -> Result<String> {
    let file = File::open(path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ChatpulseError::archive(e, Some(path.to_path_buf())))?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let entry_name = match chat_file {
        Some(wanted) => {
            if names.iter().any(|n| n == wanted) {
                wanted.to_string()
            } else {
                return Err(ChatpulseError::chat_file_not_found(format!(
                    "entry '{wanted}' not found in {}",
                    path.display()
                )));
            }
        }
        None => pick_entry(&names).ok_or_else(|| {
            ChatpulseError::chat_file_not_found(format!(
                "no .txt transcript entry in {}",
                path.display()
            ))
        })?,
    };

    let mut entry = archive
        .by_name(&entry_name)
        .map_err(|e| ChatpulseError::archive(e, Some(path.to_path_buf())))?;
    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
    entry.read_to_end(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| ChatpulseError::utf8(format!("archive entry '{entry_name}'"), e))
}

/// Chooses a transcript entry from the archive's file names.
///
/// Only `.txt` entries qualify. Names containing "whatsapp" (any case) win
/// over generic ones; ties go to the lexicographically smallest name so the
/// choice is stable across runs.
fn pick_entry(names: &[String]) -> Option<String> {
    let mut candidates: Vec<&String> = names
        .iter()
        .filter(|n| {
            Path::new(n.as_str())
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| {
        let a_hint = a.to_lowercase().contains("whatsapp");
        let b_hint = b.to_lowercase().contains("whatsapp");
        b_hint.cmp(&a_hint).then_with(|| a.cmp(b))
    });
    Some(candidates[0].clone())
}
