//! Card generation for the xiuxian chat game.
//!
//! [`CardService`] turns a [`data::CardData`] record into a PNG under the
//! assets `output/` directory (or into PNG bytes). Everything it needs is
//! loaded once: the config, the asset layout and the font.

mod assets;
pub use assets::*;
mod cache;
pub use cache::CardCache;
mod config;
pub use config::*;
pub mod doctor;
pub mod output;
mod service;
pub use service::*;

pub use data::{CardData, CardKind};

/// Text shown to a player when a card could not be produced.
pub fn user_message(err: &anyhow::Error) -> String {
    format!("生成卡片失败：{err}")
}
