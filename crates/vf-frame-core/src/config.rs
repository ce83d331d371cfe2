//! Fixed widget configuration.
//!
//! Everything here is known at build time: the meme catalogue, the save
//! price, and the chain/destination pair for each of the two actions.

use rand::seq::SliceRandom;
use vf_frame_types::{Address, ChainId, MemeUrl};

pub const PROJECT_ID: &str = "vibeframe";
pub const PROJECT_TITLE: &str = "🔥 Fresh Vibe Check 🔥";

/// Ordered meme catalogue; the session pick is uniform over this list.
pub const MEMES: [&str; 5] = [
    "https://i.imgflip.com/7q3y0b.jpg",
    "https://i.imgflip.com/82gkcl.jpg",
    "https://i.imgflip.com/85y8hv.jpg",
    "https://i.imgflip.com/8cw14x.jpg",
    "https://i.imgflip.com/8kzy2n.jpg",
];

/// Price of the save action, in ETH, as a decimal string.
pub const SAVE_PRICE_ETH: &str = "0.0005";

/// Save fees go to the project wallet on Optimism.
const SAVE_CHAIN: u64 = 10;
const SAVE_RECIPIENT: &str = "0x7c3bd8b1a0f2cd94e65d3a1e7fbc2b5d94c0af11";

/// Mints go through the NFT contract on Base.
const MINT_CHAIN: u64 = 8453;
const MINT_CONTRACT: &str = "0x41fa0d9bb55cf816d29cd3e3a0c0e85d27c7d94a";
/// Calldata for `mint()`.
const MINT_CALLDATA: &str = "0x1249c58b";

#[derive(Debug, Clone)]
pub struct FrameConfig {
    pub memes: Vec<MemeUrl>,
    pub save_price: String,
    pub save_chain: ChainId,
    pub save_recipient: Address,
    pub mint_chain: ChainId,
    pub mint_contract: Address,
    pub mint_calldata: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            memes: MEMES.iter().map(|url| MemeUrl((*url).to_owned())).collect(),
            save_price: SAVE_PRICE_ETH.to_owned(),
            save_chain: ChainId::eip155(SAVE_CHAIN),
            save_recipient: Address(SAVE_RECIPIENT.to_owned()),
            mint_chain: ChainId::eip155(MINT_CHAIN),
            mint_contract: Address(MINT_CONTRACT.to_owned()),
            mint_calldata: MINT_CALLDATA.to_owned(),
        }
    }
}

impl FrameConfig {
    /// Uniform random draw from the catalogue; `None` only if the catalogue
    /// is empty.
    pub fn random_meme(&self) -> Option<MemeUrl> {
        self.memes.choose(&mut rand::thread_rng()).cloned()
    }
}
