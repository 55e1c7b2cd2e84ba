use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Node {
    pub node: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub maxcpu: Option<f64>,
    #[serde(default)]
    pub mem: Option<u64>,
    #[serde(default)]
    pub maxmem: Option<u64>,
}

impl Node {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

/// Entry of the cluster wide resource list. The list mixes nodes, guests
/// and storages, discriminated by `kind`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ClusterResource {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub maxcpu: Option<f64>,
    #[serde(default)]
    pub mem: Option<f64>,
    #[serde(default)]
    pub maxmem: Option<f64>,
    #[serde(default)]
    pub disk: Option<f64>,
    #[serde(default)]
    pub maxdisk: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_formatted: Option<String>,
    #[serde(default)]
    pub ports_formatted: Vec<String>,
}

impl Container {
    pub fn is_running(&self) -> bool {
        self.status.to_lowercase().contains("up")
    }

    pub fn is_paused(&self) -> bool {
        self.status.to_lowercase().contains("paused")
    }

    pub fn image_name(&self) -> &str {
        self.image.split(':').next().unwrap_or(&self.image)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContainerAction {
    Restart,
    Start,
    Stop,
}

impl ContainerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerAction::Restart => "restart",
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ContainerAction::Restart => "restarted",
            ContainerAction::Start => "started",
            ContainerAction::Stop => "stopped",
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StorageMount {
    pub path: String,
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub mount_point: Option<String>,
    #[serde(default)]
    pub total_gb: f64,
    #[serde(default)]
    pub used_gb: f64,
    #[serde(default)]
    pub free_gb: f64,
    #[serde(default)]
    pub percent_used: f64,
    #[serde(default)]
    pub filesystem: Option<String>,
}

impl StorageMount {
    pub fn is_accessible(&self) -> bool {
        self.exists && self.error.is_none()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Zpool {
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub allocated: String,
    #[serde(default)]
    pub free: String,
    #[serde(default)]
    pub health: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ZpoolList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub pools: Vec<Zpool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic acknowledgement of mutating endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SshTest {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
