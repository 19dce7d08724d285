use crate::commands::CmdResult;
use crate::directory::Directory;

pub fn run(directory: &Directory, query: &str) -> CmdResult {
    let matches = directory.search(query).into_iter().cloned().collect();
    CmdResult::default().with_listed_contacts(matches)
}
