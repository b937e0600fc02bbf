pub mod oracle;
pub mod session;
pub mod traits;

pub use oracle::BattleOracle;
pub use session::{BattleSession, Phase};
pub use traits::OutcomeService;
