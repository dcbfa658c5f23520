use serde::{Deserialize, Deserializer, Serialize};

/// A cached issue export as written by `gh issue view --json ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: String,
    pub created_at: String,
    pub url: String,
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignees: Vec<Author>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(
        default,
        deserialize_with = "present_author",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(
        default,
        deserialize_with = "present_author",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<Author>,
}

/// An `author` key may be missing, but when present it must be an object.
fn present_author<'de, D>(deserializer: D) -> Result<Option<Author>, D::Error>
where
    D: Deserializer<'de>,
{
    Author::deserialize(deserializer).map(Some)
}

impl IssueRecord {
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }

    pub fn is_assigned(&self) -> bool {
        !self.assignees.is_empty()
    }
}
