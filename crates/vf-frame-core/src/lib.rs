//! VibeFrame widget core.
//!
//! Session bootstrap and meme interaction flow for the embeddable frame,
//! independent of any rendering layer. The host capability is injected
//! ([`vf_frame_host::FrameHost`]), so the same core drives both the browser
//! front end and the test suite.

pub mod config;
pub mod flow;
pub mod session;
pub mod state;

pub use config::FrameConfig;
pub use session::FrameWidget;
pub use state::{DisplayState, SessionState, SharedState};
