use crate::commands::{CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::Result;
use crate::model::ContactFields;

pub fn run(directory: &mut Directory, fields: &ContactFields) -> Result<CmdResult> {
    let contact = directory.create(fields)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact created ({}): {}",
        contact.id(),
        contact.display_name()
    )));
    result.affected_contacts.push(contact);
    Ok(result)
}
