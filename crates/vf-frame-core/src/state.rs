//! Shared session state.
//!
//! Single-threaded `Rc<RefCell<_>>` state, mutated only from the event-loop
//! context (the same discipline the browser runtime imposes).

use std::cell::RefCell;
use std::rc::Rc;

use vf_frame_types::{ActionStatus, MemeUrl, SafeAreaInsets, SessionContext};

/// Display state of the meme card.
///
/// `Saved` is terminal for the save dimension within a session; minting is
/// independent of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Hidden,
    Unsaved(MemeUrl),
    Saved(MemeUrl),
}

impl DisplayState {
    pub fn current_meme(&self) -> Option<&MemeUrl> {
        match self {
            DisplayState::Hidden => None,
            DisplayState::Unsaved(meme) | DisplayState::Saved(meme) => Some(meme),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, DisplayState::Saved(_))
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub context: Option<SessionContext>,
    pub added: bool,
    pub safe_area_insets: SafeAreaInsets,
    /// Human-readable install-prompt outcome; set only on failure.
    pub add_frame_result: Option<String>,
    pub display: DisplayState,
    /// Selection fixed by a successful save; survives display resets within
    /// the session.
    pub saved_meme: Option<MemeUrl>,
    pub save_status: ActionStatus,
    pub mint_status: ActionStatus,
}

pub type SharedState = Rc<RefCell<SessionState>>;

pub fn shared() -> SharedState {
    Rc::new(RefCell::new(SessionState::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_state_accessors() {
        let meme = MemeUrl("https://example.test/a.jpg".to_owned());

        assert!(DisplayState::Hidden.current_meme().is_none());
        assert!(!DisplayState::Hidden.is_saved());

        let unsaved = DisplayState::Unsaved(meme.clone());
        assert_eq!(unsaved.current_meme(), Some(&meme));
        assert!(!unsaved.is_saved());

        let saved = DisplayState::Saved(meme.clone());
        assert_eq!(saved.current_meme(), Some(&meme));
        assert!(saved.is_saved());
    }
}
