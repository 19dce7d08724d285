use crate::commands::CmdResult;
use crate::directory::Directory;

pub fn run(directory: &Directory) -> CmdResult {
    let listed = directory.list().into_iter().cloned().collect();
    CmdResult::default().with_listed_contacts(listed)
}
