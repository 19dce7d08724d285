use crate::commands::{require, CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::{AgendaError, Result};
use crate::model::{ContactFields, ContactId};

pub fn run(directory: &mut Directory, id: ContactId, patch: &ContactFields) -> Result<CmdResult> {
    let before = require(directory, id)?.clone();

    if !directory.update(id, patch) {
        return Err(AgendaError::ContactNotFound(id));
    }
    let after = require(directory, id)?.clone();

    let mut result = CmdResult::default();
    if after == before {
        result.add_message(CmdMessage::info(format!(
            "No changes for contact ({}): {}",
            id,
            after.display_name()
        )));
        return Ok(result.with_listed_contacts(vec![after]));
    }

    result.add_message(CmdMessage::success(format!(
        "Contact updated ({}): {}",
        id,
        after.display_name()
    )));
    result.affected_contacts.push(after);
    Ok(result)
}
