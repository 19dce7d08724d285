use crate::commands::{require, CmdResult};
use crate::directory::Directory;
use crate::error::Result;
use crate::model::ContactId;

pub fn run(directory: &Directory, ids: &[ContactId]) -> Result<CmdResult> {
    let contacts = ids
        .iter()
        .map(|id| require(directory, *id).cloned())
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_contacts(contacts))
}
