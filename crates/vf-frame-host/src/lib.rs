//! Host capability seam.
//!
//! The frame runs embedded in a social-platform client; everything it can do
//! (fetch its context, prompt for install, submit wallet transactions, listen
//! for lifecycle events) goes through the [`FrameHost`] trait. The browser
//! front end binds this to the host's JS SDK; tests inject [`RecordingHost`].
//!
//! The frame runtime is a single-threaded event loop, so the traits are
//! `?Send` and implementations are shared as `Rc<dyn FrameHost>`.

pub mod events;
pub mod testing;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use vf_frame_types::{
    AddFrameOutcome, HostEventKind, ProviderInfo, SessionContext, TransactionRequest, TxReceipt,
};

pub use events::{EventBus, EventHandler, Subscription};
pub use testing::RecordingHost;

/// Transaction submission failure, as a closed taxonomy.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("transaction rejected by user")]
    RejectedByUser,
    #[error("host error: {0}")]
    Host(String),
}

/// Capabilities the embedding host exposes to the frame.
///
/// Every call is best-effort and single-attempt; the host owns transport,
/// timeouts, and cancellation (there is none).
#[async_trait(?Send)]
pub trait FrameHost {
    /// One-shot context fetch. `None` means the host is not ready; the
    /// session treats that as terminal and does not retry.
    async fn context(&self) -> Result<Option<SessionContext>>;

    /// Tell the host the UI is ready so it can drop its own splash screen.
    async fn ready(&self);

    /// Prompt the user to add the frame to their client.
    async fn add_frame(&self) -> AddFrameOutcome;

    /// Submit a wallet transaction through the host.
    async fn submit_transaction(&self, req: TransactionRequest) -> Result<TxReceipt, HostError>;

    /// Register a handler for one lifecycle event kind. The returned handle
    /// keeps the registration alive; dropping it unregisters exactly once.
    fn subscribe(&self, kind: HostEventKind, handler: EventHandler) -> Subscription;
}

pub type ProviderHandler = std::rc::Rc<dyn Fn(&ProviderInfo)>;

/// Stream of installed-wallet-provider announcements. Infinite, not
/// restartable, informational only.
pub trait ProviderDiscovery {
    fn watch(&self, handler: ProviderHandler) -> Subscription;
}
