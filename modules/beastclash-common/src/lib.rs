pub mod config;
pub mod error;
pub mod media;
pub mod types;

pub use config::Config;
pub use error::BeastclashError;
pub use media::{AudioPlayer, ImageUrlResolver, PicsumResolver, SilentAudioPlayer};
pub use types::{BattleInput, BattleResult, GroundingLink, RandomMatchup, Stats};
