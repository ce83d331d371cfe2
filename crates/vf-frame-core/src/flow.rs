//! Meme interaction flow.
//!
//! Display state machine plus the two user actions. Save is idempotent and
//! guarded against double-submit; mint deliberately is not — every click is
//! a fresh submission, which is the observed contract.

use tracing::{debug, info, warn};
use vf_frame_host::FrameHost;
use vf_frame_types::{ActionStatus, TransactionRequest, TxParams};

use crate::config::FrameConfig;
use crate::session::FrameWidget;
use crate::state::{DisplayState, SharedState};

const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// Bring the card up once the frame is installed: a previously saved
/// selection wins over a fresh random draw. Re-entrant installed signals
/// while already displaying do not re-pick.
pub(crate) fn show_meme(state: &SharedState, config: &FrameConfig) {
    let mut state = state.borrow_mut();
    if state.display != DisplayState::Hidden {
        return;
    }

    state.display = match state.saved_meme.clone() {
        Some(saved) => DisplayState::Saved(saved),
        None => match config.random_meme() {
            Some(meme) => DisplayState::Unsaved(meme),
            None => return,
        },
    };
}

impl FrameWidget {
    /// Pay to fix the displayed meme as the session's saved selection.
    ///
    /// Only valid while displaying an unsaved meme; once saved (or while a
    /// submission is in flight) further calls submit nothing. Failures keep
    /// the state untouched and go to the diagnostic channel only.
    pub async fn save(&self) {
        let meme = {
            let mut state = self.state.borrow_mut();
            let DisplayState::Unsaved(meme) = state.display.clone() else {
                debug!("save ignored: nothing unsaved on display");
                return;
            };
            if state.save_status == ActionStatus::Pending {
                debug!("save ignored: submission already in flight");
                return;
            }
            state.save_status = ActionStatus::Pending;
            meme
        };

        let request = TransactionRequest {
            chain_id: self.config.save_chain.clone(),
            method: ETH_SEND_TRANSACTION.to_owned(),
            params: TxParams {
                to: self.config.save_recipient.clone(),
                // TODO: confirm whether the host expects this scaled to wei;
                // the decimal string is passed through as observed.
                value: Some(self.config.save_price.clone()),
                data: None,
            },
        };

        match self.host.submit_transaction(request).await {
            Ok(receipt) => {
                let mut state = self.state.borrow_mut();
                state.saved_meme = Some(meme.clone());
                state.display = DisplayState::Saved(meme);
                state.save_status = ActionStatus::Succeeded;
                info!(tx_hash = %receipt.tx_hash, "vibe saved");
            }
            Err(error) => {
                self.state.borrow_mut().save_status = ActionStatus::Failed;
                warn!("save failed: {error}");
            }
        }
    }

    /// Mint the displayed meme as an NFT.
    ///
    /// No display-state precondition and no dedup: N clicks are N
    /// submissions, and the host may mint N times. Outcome is log-only.
    pub async fn mint(&self) {
        self.state.borrow_mut().mint_status = ActionStatus::Pending;

        let request = TransactionRequest {
            chain_id: self.config.mint_chain.clone(),
            method: ETH_SEND_TRANSACTION.to_owned(),
            params: TxParams {
                to: self.config.mint_contract.clone(),
                value: None,
                data: Some(self.config.mint_calldata.clone()),
            },
        };

        match self.host.submit_transaction(request).await {
            Ok(receipt) => {
                self.state.borrow_mut().mint_status = ActionStatus::Succeeded;
                info!(tx_hash = %receipt.tx_hash, "mint submitted");
            }
            Err(error) => {
                self.state.borrow_mut().mint_status = ActionStatus::Failed;
                warn!("mint failed: {error}");
            }
        }
    }
}
