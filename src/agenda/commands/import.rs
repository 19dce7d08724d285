use crate::cards::parse_cards;
use crate::commands::{CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Imports contact cards from files, or from every matching file in a directory.
///
/// Unreadable paths become error messages on the result. Contacts imported
/// before the failure stay in `affected_contacts` so the caller still saves them.
pub fn run(directory: &mut Directory, paths: &[PathBuf], import_exts: &[String]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for path in paths {
        if path.is_dir() {
            import_dir(directory, path, import_exts, &mut result);
        } else if path.is_file() {
            import_file(directory, path, &mut result);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Path not found: {}",
                path.display()
            )));
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Total imported: {}",
        result.affected_contacts.len()
    )));
    Ok(result)
}

fn has_import_ext(path: &Path, import_exts: &[String]) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
        import_exts.iter().any(|wanted| wanted.to_lowercase() == ext)
    })
}

fn import_dir(directory: &mut Directory, path: &Path, import_exts: &[String], result: &mut CmdResult) {
    let listing = fs::read_dir(path).and_then(|entries| {
        let mut matching = Vec::new();
        for entry in entries {
            let sub_path = entry?.path();
            if sub_path.is_file() && has_import_ext(&sub_path, import_exts) {
                matching.push(sub_path);
            }
        }
        Ok(matching)
    });

    let mut entries = match listing {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read card directory");
            result.add_message(CmdMessage::error(format!(
                "Failed to read directory {}: {}",
                path.display(),
                e
            )));
            return;
        }
    };
    entries.sort();
    for sub_path in entries {
        import_file(directory, &sub_path, result);
    }
}

fn import_file(directory: &mut Directory, path: &Path, result: &mut CmdResult) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read card file");
            result.add_message(CmdMessage::error(format!(
                "Failed to import {}: {}",
                path.display(),
                e
            )));
            return;
        }
    };

    let mut imported = 0;
    for fields in parse_cards(&text) {
        match directory.create(&fields) {
            Ok(contact) => {
                result.affected_contacts.push(contact);
                imported += 1;
            }
            Err(e) => result.add_message(CmdMessage::warning(format!(
                "Skipped a card in {}: {}",
                path.display(),
                e
            ))),
        }
    }

    result.add_message(CmdMessage::info(format!(
        "Imported {} contact(s) from {}",
        imported,
        path.display()
    )));
}
