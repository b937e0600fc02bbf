use async_trait::async_trait;

use beastclash_common::{BattleResult, BeastclashError, RandomMatchup};

/// The boundary to the generative model: exactly one call per operation,
/// strict output schema, typed failure. No retries, no caching, no state.
#[async_trait]
pub trait OutcomeService: Send + Sync {
    /// Adjudicate a hypothetical contest between the two named species.
    ///
    /// On success, `winner` and `loser` echo the two submitted names (one
    /// each), `probability` and every stat are integers in [0,100], and
    /// `grounding_links` carries any provider citations.
    async fn predict_battle_outcome(
        &self,
        animal1: &str,
        animal2: &str,
    ) -> Result<BattleResult, BeastclashError>;

    /// Ask the model to invent a fresh pairing of two distinct species.
    async fn get_random_matchup(&self) -> Result<RandomMatchup, BeastclashError>;
}
