//! Headless presentation state for one battle screen: two input slots, the
//! current phase, and the injected collaborators. No view logic lives here;
//! a front end renders off `phase()` and drives `submit()`/`randomize()`.

use std::sync::Arc;

use tracing::error;

use beastclash_common::{AudioPlayer, BattleResult, SilentAudioPlayer};

use crate::traits::OutcomeService;

/// User-facing failure copy, one fixed message per action type. The
/// underlying error goes to the log, never to the user.
pub const SIMULATION_ERROR_MSG: &str =
    "SIMULATION ERROR: Neural link severed. Reconnect and try again.";
pub const RANDOMIZER_ERROR_MSG: &str = "RANDOMIZER FAILED: Unit archives unavailable.";

/// Where the session currently is. No failure is fatal; every phase except
/// the two pending ones accepts new user actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Submitting,
    Randomizing,
    Success(BattleResult),
    Failed(String),
}

pub struct BattleSession {
    service: Arc<dyn OutcomeService>,
    audio: Arc<dyn AudioPlayer>,
    animal1: String,
    animal2: String,
    phase: Phase,
}

impl BattleSession {
    pub fn new(service: Arc<dyn OutcomeService>) -> Self {
        Self::with_audio(service, Arc::new(SilentAudioPlayer))
    }

    pub fn with_audio(service: Arc<dyn OutcomeService>, audio: Arc<dyn AudioPlayer>) -> Self {
        Self {
            service,
            audio,
            animal1: String::new(),
            animal2: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn set_animal1(&mut self, name: impl Into<String>) {
        self.animal1 = name.into();
    }

    pub fn set_animal2(&mut self, name: impl Into<String>) {
        self.animal2 = name.into();
    }

    pub fn animal1(&self) -> &str {
        &self.animal1
    }

    pub fn animal2(&self) -> &str {
        &self.animal2
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The current result, if the last action succeeded.
    pub fn result(&self) -> Option<&BattleResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Submitting | Phase::Randomizing)
    }

    /// Run the battle. A no-op while a request is pending or while either
    /// input is empty after trimming; the service is never invoked in those
    /// cases. A failure leaves the input slots unchanged.
    pub async fn submit(&mut self) {
        if self.is_pending() {
            return;
        }
        if self.animal1.trim().is_empty() || self.animal2.trim().is_empty() {
            return;
        }

        self.phase = Phase::Submitting;

        match self
            .service
            .predict_battle_outcome(&self.animal1, &self.animal2)
            .await
        {
            Ok(result) => self.phase = Phase::Success(result),
            Err(e) => {
                error!(error = %e, "battle simulation failed");
                self.phase = Phase::Failed(SIMULATION_ERROR_MSG.to_string());
            }
        }
    }

    /// Ask the model for a fresh pairing. On success the two input slots are
    /// overwritten and the session returns to idle; no battle result is
    /// produced. The dice cue fires on click regardless of outcome.
    pub async fn randomize(&mut self) {
        if self.is_pending() {
            return;
        }

        self.audio.play_dice_roll();
        self.phase = Phase::Randomizing;

        match self.service.get_random_matchup().await {
            Ok(matchup) => {
                self.animal1 = matchup.animal1;
                self.animal2 = matchup.animal2;
                self.phase = Phase::Idle;
            }
            Err(e) => {
                error!(error = %e, "randomizer failed");
                self.phase = Phase::Failed(RANDOMIZER_ERROR_MSG.to_string());
            }
        }
    }

    #[cfg(test)]
    fn force_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use beastclash_common::{BeastclashError, GroundingLink, RandomMatchup, Stats};

    use super::*;

    struct MockService {
        battle: Mutex<Option<BattleResult>>,
        matchup: Option<RandomMatchup>,
        battle_calls: AtomicUsize,
        matchup_calls: AtomicUsize,
    }

    impl MockService {
        fn resolving(result: BattleResult) -> Self {
            Self {
                battle: Mutex::new(Some(result)),
                matchup: Some(RandomMatchup {
                    animal1: "Honey Badger".to_string(),
                    animal2: "King Cobra".to_string(),
                }),
                battle_calls: AtomicUsize::new(0),
                matchup_calls: AtomicUsize::new(0),
            }
        }

        fn rejecting() -> Self {
            Self {
                battle: Mutex::new(None),
                matchup: None,
                battle_calls: AtomicUsize::new(0),
                matchup_calls: AtomicUsize::new(0),
            }
        }

        fn set_battle(&self, result: BattleResult) {
            *self.battle.lock().unwrap() = Some(result);
        }
    }

    #[async_trait]
    impl OutcomeService for MockService {
        async fn predict_battle_outcome(
            &self,
            _animal1: &str,
            _animal2: &str,
        ) -> Result<BattleResult, BeastclashError> {
            self.battle_calls.fetch_add(1, Ordering::SeqCst);
            self.battle
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| BeastclashError::Generation("transport rejected".to_string()))
        }

        async fn get_random_matchup(&self) -> Result<RandomMatchup, BeastclashError> {
            self.matchup_calls.fetch_add(1, Ordering::SeqCst);
            self.matchup
                .clone()
                .ok_or_else(|| BeastclashError::Generation("transport rejected".to_string()))
        }
    }

    struct CountingAudio(AtomicUsize);

    impl AudioPlayer for CountingAudio {
        fn play_dice_roll(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn lion_wins(probability: u8) -> BattleResult {
        BattleResult {
            winner: "Lion".to_string(),
            loser: "Tiger".to_string(),
            probability,
            reasoning: "Mane advantage.".to_string(),
            winner_gif_url: "https://picsum.photos/seed/Lion/1200/800".to_string(),
            loser_gif_url: "https://picsum.photos/seed/Tiger/1200/800".to_string(),
            grounding_links: vec![GroundingLink {
                uri: "https://example.org/lions".to_string(),
                title: "Lions".to_string(),
            }],
            stats: Stats {
                animal1_strength: 85,
                animal1_speed: 74,
                animal1_intelligence: 60,
                animal1_defense: 72,
                animal1_agility: 68,
                animal2_strength: 88,
                animal2_speed: 78,
                animal2_intelligence: 62,
                animal2_defense: 70,
                animal2_agility: 75,
            },
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_invokes_service() {
        let service = Arc::new(MockService::resolving(lion_wins(62)));
        let mut session = BattleSession::new(service.clone());
        session.set_animal1("Lion");

        session.submit().await;

        assert_eq!(service.battle_calls.load(Ordering::SeqCst), 0);
        assert_eq!(*session.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_whitespace_input_never_invokes_service() {
        let service = Arc::new(MockService::resolving(lion_wins(62)));
        let mut session = BattleSession::new(service.clone());
        session.set_animal1("Lion");
        session.set_animal2("   ");

        session.submit().await;

        assert_eq!(service.battle_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_success_selects_winner_once() {
        let service = Arc::new(MockService::resolving(lion_wins(62)));
        let mut session = BattleSession::new(service);
        session.set_animal1("Lion");
        session.set_animal2("Tiger");

        session.submit().await;

        let result = session.result().expect("should have a result");
        assert_eq!(result.winner, "Lion");
        assert_eq!(result.probability, 62);
        // Exactly one of the two inputs is the dominant side
        let dominant: Vec<&str> = [session.animal1(), session.animal2()]
            .into_iter()
            .filter(|name| *name == result.winner)
            .collect();
        assert_eq!(dominant, vec!["Lion"]);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_inputs() {
        let service = Arc::new(MockService::rejecting());
        let mut session = BattleSession::new(service);
        session.set_animal1("Lion");
        session.set_animal2("Tiger");

        session.submit().await;

        assert_eq!(*session.phase(), Phase::Failed(SIMULATION_ERROR_MSG.to_string()));
        assert_eq!(session.animal1(), "Lion");
        assert_eq!(session.animal2(), "Tiger");
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_consecutive_successes_replace_result_wholesale() {
        let service = Arc::new(MockService::resolving(lion_wins(62)));
        let mut session = BattleSession::new(service.clone());
        session.set_animal1("Lion");
        session.set_animal2("Tiger");

        session.submit().await;
        assert_eq!(session.result().unwrap().probability, 62);

        let mut second = lion_wins(91);
        second.grounding_links.clear();
        service.set_battle(second);

        session.submit().await;
        let result = session.result().unwrap();
        assert_eq!(result.probability, 91);
        assert!(result.grounding_links.is_empty());
    }

    #[tokio::test]
    async fn test_randomize_populates_inputs_and_returns_to_idle() {
        let service = Arc::new(MockService::resolving(lion_wins(62)));
        let audio = Arc::new(CountingAudio(AtomicUsize::new(0)));
        let mut session = BattleSession::with_audio(service, audio.clone());

        session.randomize().await;

        assert_eq!(*session.phase(), Phase::Idle);
        assert_eq!(session.animal1(), "Honey Badger");
        assert_eq!(session.animal2(), "King Cobra");
        assert!(session.result().is_none());
        assert_eq!(audio.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_randomize_failure_keeps_inputs() {
        let service = Arc::new(MockService::rejecting());
        let mut session = BattleSession::new(service);
        session.set_animal1("Lion");
        session.set_animal2("Tiger");

        session.randomize().await;

        assert_eq!(
            *session.phase(),
            Phase::Failed(RANDOMIZER_ERROR_MSG.to_string())
        );
        assert_eq!(session.animal1(), "Lion");
        assert_eq!(session.animal2(), "Tiger");
    }

    #[tokio::test]
    async fn test_pending_guard_blocks_both_actions() {
        let service = Arc::new(MockService::resolving(lion_wins(62)));
        let mut session = BattleSession::new(service.clone());
        session.set_animal1("Lion");
        session.set_animal2("Tiger");
        session.force_phase(Phase::Submitting);

        session.submit().await;
        session.randomize().await;

        assert_eq!(service.battle_calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.matchup_calls.load(Ordering::SeqCst), 0);
        assert_eq!(*session.phase(), Phase::Submitting);
    }

    #[tokio::test]
    async fn test_resubmit_allowed_after_failure() {
        let service = Arc::new(MockService::rejecting());
        let mut session = BattleSession::new(service.clone());
        session.set_animal1("Lion");
        session.set_animal2("Tiger");

        session.submit().await;
        assert!(matches!(session.phase(), Phase::Failed(_)));

        service.set_battle(lion_wins(55));
        session.submit().await;
        assert_eq!(session.result().unwrap().probability, 55);
    }
}
