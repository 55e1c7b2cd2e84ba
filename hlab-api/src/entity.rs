use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Backend collection with list, fetch, create, update and delete routes
/// under `/api/{PATH}`.
pub trait Resource:
    Clone + std::fmt::Debug + DeserializeOwned + PartialEq + Send + Sync + 'static
{
    const PATH: &'static str;
    const NAME: &'static str;

    type Payload: Clone + std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static;

    fn id(&self) -> u64;
    fn title(&self) -> &str;
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Document {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DocumentPayload {
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl Resource for Document {
    const PATH: &'static str = "docs";
    const NAME: &'static str = "Document";

    type Payload = DocumentPayload;

    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Script {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub script_content: String,
    #[serde(default = "default_script_type")]
    pub script_type: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

pub fn default_script_type() -> String {
    "bash".to_owned()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScriptPayload {
    pub title: String,
    pub description: String,
    pub script_type: String,
    pub script_content: String,
}

impl Resource for Script {
    const PATH: &'static str = "scripts";
    const NAME: &'static str = "Script";

    type Payload = ScriptPayload;

    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MediaRequest {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Admin fields are only sent while editing an existing request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MediaRequestPayload {
    pub title: String,
    pub media_type: String,
    pub description: String,
    pub requester_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource for MediaRequest {
    const PATH: &'static str = "media-requests";
    const NAME: &'static str = "Request";

    type Payload = MediaRequestPayload;

    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub implemented: bool,
}

fn default_priority() -> u8 {
    3
}

impl Recommendation {
    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            1 => "Critical",
            2 => "High",
            4 => "Low",
            5 => "Optional",
            _ => "Medium",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationList {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub error: Option<String>,
}
