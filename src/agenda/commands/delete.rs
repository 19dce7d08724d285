use crate::commands::{CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::{AgendaError, Result};
use crate::model::ContactId;

/// Removes the contact immediately. Any confirmation belongs to the caller.
pub fn run(directory: &mut Directory, id: ContactId) -> Result<CmdResult> {
    let removed = directory
        .delete(id)
        .ok_or(AgendaError::ContactNotFound(id))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact deleted ({}): {}",
        id,
        removed.display_name()
    )));
    result.affected_contacts.push(removed);
    Ok(result)
}
