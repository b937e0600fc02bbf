use serde::{Deserialize, Serialize};

use crate::error::BeastclashError;

/// A validated pair of combatant names, created fresh per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleInput {
    pub animal1: String,
    pub animal2: String,
}

impl BattleInput {
    /// Trims both names. Empty slots are rejected here, before any network
    /// call is made.
    pub fn new(animal1: &str, animal2: &str) -> Result<Self, BeastclashError> {
        let animal1 = animal1.trim();
        let animal2 = animal2.trim();
        if animal1.is_empty() || animal2.is_empty() {
            return Err(BeastclashError::Validation(
                "both combatant names are required".to_string(),
            ));
        }
        Ok(Self {
            animal1: animal1.to_string(),
            animal2: animal2.to_string(),
        })
    }
}

/// Advisory citation substantiating the verdict. Zero or more per result;
/// no dedup or validation beyond existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

/// Per-trait scores for both combatants, each an integer in [0,100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub animal1_strength: u8,
    pub animal1_speed: u8,
    pub animal1_intelligence: u8,
    pub animal1_defense: u8,
    pub animal1_agility: u8,
    pub animal2_strength: u8,
    pub animal2_speed: u8,
    pub animal2_intelligence: u8,
    pub animal2_defense: u8,
    pub animal2_agility: u8,
}

/// A fully adjudicated outcome. Immutable once constructed; each new
/// submission replaces the previous result wholesale, never merges.
///
/// Invariant: `winner` and `loser` each equal one of the two submitted
/// names, one each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub winner: String,
    pub loser: String,
    /// Win probability for `winner`, 0-100.
    pub probability: u8,
    pub reasoning: String,
    pub winner_gif_url: String,
    pub loser_gif_url: String,
    pub grounding_links: Vec<GroundingLink>,
    pub stats: Stats,
}

/// A model-proposed pairing; feeds back into `BattleInput`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomMatchup {
    pub animal1: String,
    pub animal2: String,
}
