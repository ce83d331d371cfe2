use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChainId(pub String);

impl ChainId {
    /// CAIP-2 identifier for an EVM chain, e.g. `eip155:10`.
    pub fn eip155(numeric_id: u64) -> Self {
        Self(format!("eip155:{numeric_id}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemeUrl(pub String);

/// Margins reserved by the host client's chrome. Absent insets clamp to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafeAreaInsets {
    #[serde(default)]
    pub top: u32,
    #[serde(default)]
    pub bottom: u32,
    #[serde(default)]
    pub left: u32,
    #[serde(default)]
    pub right: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameUser {
    pub fid: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDetails {
    pub url: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    pub added: bool,
    #[serde(default, rename = "safeAreaInsets")]
    pub safe_area_insets: Option<SafeAreaInsets>,
    #[serde(default, rename = "notificationDetails")]
    pub notification_details: Option<NotificationDetails>,
}

/// Context record the host hands the frame once per mount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: FrameUser,
    pub client: ClientInfo,
}

/// Lifecycle events the host emits after the frame signals ready.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    FrameAdded {
        #[serde(default)]
        notification_details: Option<NotificationDetails>,
    },
    FrameAddRejected {
        reason: String,
    },
    FrameRemoved,
    NotificationsEnabled {
        #[serde(default)]
        notification_details: Option<NotificationDetails>,
    },
    NotificationsDisabled,
    PrimaryButtonClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEventKind {
    FrameAdded,
    FrameAddRejected,
    FrameRemoved,
    NotificationsEnabled,
    NotificationsDisabled,
    PrimaryButtonClicked,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::FrameAdded { .. } => HostEventKind::FrameAdded,
            HostEvent::FrameAddRejected { .. } => HostEventKind::FrameAddRejected,
            HostEvent::FrameRemoved => HostEventKind::FrameRemoved,
            HostEvent::NotificationsEnabled { .. } => HostEventKind::NotificationsEnabled,
            HostEvent::NotificationsDisabled => HostEventKind::NotificationsDisabled,
            HostEvent::PrimaryButtonClicked => HostEventKind::PrimaryButtonClicked,
        }
    }
}

/// Outcome of the install prompt, as a closed variant rather than
/// error-type inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddFrameOutcome {
    #[default]
    Added,
    RejectedByUser { reason: String },
    InvalidManifest { reason: String },
    Failed { detail: String },
}

impl AddFrameOutcome {
    /// Human-readable status string. Success produces none; the host's
    /// frame-added event is the authoritative success signal.
    pub fn describe(&self) -> Option<String> {
        match self {
            AddFrameOutcome::Added => None,
            AddFrameOutcome::RejectedByUser { reason } => Some(format!("Not added: {reason}")),
            AddFrameOutcome::InvalidManifest { reason } => Some(format!("Not added: {reason}")),
            AddFrameOutcome::Failed { detail } => Some(format!("Error: {detail}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxParams {
    pub to: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "chainId")]
    pub chain_id: ChainId,
    pub method: String,
    pub params: TxParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
}

/// A wallet-provider announcement from the discovery stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub uuid: String,
    pub name: String,
    pub rdns: String,
}

/// Per-action submission status, so UIs and tests can observe in-flight
/// behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}
