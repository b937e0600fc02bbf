use std::sync::Arc;
use std::time::Duration;

use ai_client::{Citation, Gemini};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use beastclash_common::{
    BattleInput, BattleResult, BeastclashError, Config, GroundingLink, ImageUrlResolver,
    RandomMatchup, Stats,
};

use crate::traits::OutcomeService;

const BATTLE_SYSTEM_PROMPT: &str = r#"You are a wildlife combat adjudicator. Given two real-world species, decide which would win a direct one-on-one confrontation, grounded wherever possible in documented biology and behavior: size, weaponry, speed, defenses, intelligence, temperament. Use web search results when they are available to you.

Rules:
- "winner" and "loser" must each echo one of the two submitted names verbatim.
- "probability" is the winner's chance of victory as an integer from 0 to 100.
- Every stat is an integer from 0 to 100 on an absolute scale across the animal kingdom (a blue whale's strength is near 100, a housefly's near 0).
- "reasoning" is a short, vivid explanation of the decisive factors.

Return only the JSON object."#;

const MATCHUP_SYSTEM_PROMPT: &str = r#"You invent fun hypothetical battles between real-world species or creatures. Propose one creative, unexpected pairing of two DIFFERENT species. Avoid obvious classics like lion vs tiger; prefer pairings the user is unlikely to have seen before. Return only the JSON object."#;

// =============================================================================
// Wire types (what the model is asked to return)
// =============================================================================

/// What the model returns for a battle. The gif-url fields are deliberately
/// absent: imagery is derived locally from the image resolver, never
/// generated.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BattleVerdict {
    /// Name of the winning species, echoed verbatim from the input.
    pub winner: String,
    /// Name of the losing species, echoed verbatim from the input.
    pub loser: String,
    /// Winner's chance of victory, 0-100.
    #[schemars(range(min = 0, max = 100))]
    pub probability: i64,
    /// Short explanation of the decisive factors.
    pub reasoning: String,
    pub stats: VerdictStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerdictStats {
    #[schemars(range(min = 0, max = 100))]
    pub animal1_strength: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal1_speed: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal1_intelligence: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal1_defense: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal1_agility: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal2_strength: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal2_speed: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal2_intelligence: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal2_defense: i64,
    #[schemars(range(min = 0, max = 100))]
    pub animal2_agility: i64,
}

/// What the model returns for the randomizer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchupVerdict {
    pub animal1: String,
    pub animal2: String,
}

// =============================================================================
// BattleOracle
// =============================================================================

/// Outcome Service backed by Gemini with search grounding.
pub struct BattleOracle {
    gemini: Gemini,
    images: Arc<dyn ImageUrlResolver>,
}

impl BattleOracle {
    pub fn new(config: &Config, images: Arc<dyn ImageUrlResolver>) -> Self {
        let gemini = Gemini::new(config.gemini_api_key.as_str(), config.gemini_model.as_str())
            .with_timeout(Duration::from_secs(config.request_timeout_secs));
        Self { gemini, images }
    }
}

#[async_trait]
impl OutcomeService for BattleOracle {
    async fn predict_battle_outcome(
        &self,
        animal1: &str,
        animal2: &str,
    ) -> Result<BattleResult, BeastclashError> {
        let input = BattleInput::new(animal1, animal2)?;

        let user_prompt = format!(
            "Adjudicate this battle.\n\nanimal1: {}\nanimal2: {}",
            input.animal1, input.animal2
        );

        let (verdict, citations): (BattleVerdict, Vec<Citation>) = self
            .gemini
            .extract_grounded(BATTLE_SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(|e| BeastclashError::Generation(e.to_string()))?;

        let result = build_battle_result(verdict, citations, &input, self.images.as_ref())?;

        info!(
            winner = %result.winner,
            probability = result.probability,
            citations = result.grounding_links.len(),
            "battle adjudicated"
        );

        Ok(result)
    }

    async fn get_random_matchup(&self) -> Result<RandomMatchup, BeastclashError> {
        let verdict: MatchupVerdict = self
            .gemini
            .extract(MATCHUP_SYSTEM_PROMPT, "Propose one new matchup.")
            .await
            .map_err(|e| BeastclashError::Generation(e.to_string()))?;

        validate_matchup(verdict)
    }
}

// =============================================================================
// Verdict validation
// =============================================================================

/// Validate a raw verdict against the submitted names and assemble the
/// domain result. Any deviation — missing field, out-of-range number, a
/// winner that matches neither combatant — is a generation failure; there
/// is no partial recovery.
pub fn build_battle_result(
    verdict: BattleVerdict,
    citations: Vec<Citation>,
    input: &BattleInput,
    images: &dyn ImageUrlResolver,
) -> Result<BattleResult, BeastclashError> {
    let probability = score("probability", verdict.probability)?;
    let stats = validate_stats(verdict.stats)?;

    // The model may re-case or pad the names. Match loosely, then echo the
    // submitted strings verbatim so equality checks downstream hold.
    let winner = canonical_name(&verdict.winner, input).ok_or_else(|| {
        BeastclashError::Generation(format!(
            "winner {:?} does not match either combatant",
            verdict.winner
        ))
    })?;
    let loser = canonical_name(&verdict.loser, input).ok_or_else(|| {
        BeastclashError::Generation(format!(
            "loser {:?} does not match either combatant",
            verdict.loser
        ))
    })?;
    if winner == loser {
        return Err(BeastclashError::Generation(
            "winner and loser resolve to the same combatant".to_string(),
        ));
    }

    if verdict.reasoning.trim().is_empty() {
        return Err(BeastclashError::Generation(
            "verdict has empty reasoning".to_string(),
        ));
    }

    let grounding_links = citations
        .into_iter()
        .filter(|c| !c.uri.is_empty())
        .map(|c| GroundingLink {
            uri: c.uri,
            title: c.title,
        })
        .collect();

    Ok(BattleResult {
        winner_gif_url: images.image_url(&winner),
        loser_gif_url: images.image_url(&loser),
        winner,
        loser,
        probability,
        reasoning: verdict.reasoning,
        grounding_links,
        stats,
    })
}

pub fn validate_matchup(verdict: MatchupVerdict) -> Result<RandomMatchup, BeastclashError> {
    let animal1 = verdict.animal1.trim();
    let animal2 = verdict.animal2.trim();

    if animal1.is_empty() || animal2.is_empty() {
        return Err(BeastclashError::Generation(
            "matchup slot is empty".to_string(),
        ));
    }
    if animal1.eq_ignore_ascii_case(animal2) {
        return Err(BeastclashError::Generation(format!(
            "matchup returned the same species twice: {animal1:?}"
        )));
    }

    Ok(RandomMatchup {
        animal1: animal1.to_string(),
        animal2: animal2.to_string(),
    })
}

fn canonical_name(candidate: &str, input: &BattleInput) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.eq_ignore_ascii_case(&input.animal1) {
        Some(input.animal1.clone())
    } else if candidate.eq_ignore_ascii_case(&input.animal2) {
        Some(input.animal2.clone())
    } else {
        None
    }
}

fn score(field: &str, value: i64) -> Result<u8, BeastclashError> {
    if !(0..=100).contains(&value) {
        return Err(BeastclashError::Generation(format!(
            "{field} out of range: {value}"
        )));
    }
    Ok(value as u8)
}

fn validate_stats(stats: VerdictStats) -> Result<Stats, BeastclashError> {
    Ok(Stats {
        animal1_strength: score("animal1Strength", stats.animal1_strength)?,
        animal1_speed: score("animal1Speed", stats.animal1_speed)?,
        animal1_intelligence: score("animal1Intelligence", stats.animal1_intelligence)?,
        animal1_defense: score("animal1Defense", stats.animal1_defense)?,
        animal1_agility: score("animal1Agility", stats.animal1_agility)?,
        animal2_strength: score("animal2Strength", stats.animal2_strength)?,
        animal2_speed: score("animal2Speed", stats.animal2_speed)?,
        animal2_intelligence: score("animal2Intelligence", stats.animal2_intelligence)?,
        animal2_defense: score("animal2Defense", stats.animal2_defense)?,
        animal2_agility: score("animal2Agility", stats.animal2_agility)?,
    })
}
