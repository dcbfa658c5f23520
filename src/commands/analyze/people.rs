use std::collections::BTreeSet;

use super::models::IssueRecord;

/// Logins of the author, assignees and comment authors, deduplicated.
///
/// Entries without a login contribute nothing.
pub fn involved_people(issue: &IssueRecord) -> BTreeSet<String> {
    let author = issue.author.iter();
    let assignees = issue.assignees.iter();
    let commenters = issue.comments.iter().filter_map(|c| c.author.as_ref());

    author
        .chain(assignees)
        .chain(commenters)
        .filter_map(|a| a.login.clone())
        .collect()
}
