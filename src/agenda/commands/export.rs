use crate::commands::{CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::Result;

/// Serializes every contact, in canonical order, in the store's document format.
pub fn run(directory: &Directory) -> Result<CmdResult> {
    let document = directory.snapshot().to_json()?;
    let mut result = CmdResult::default().with_document(document);
    result.add_message(CmdMessage::success(format!(
        "Exported {} contact(s)",
        directory.len()
    )));
    Ok(result)
}
