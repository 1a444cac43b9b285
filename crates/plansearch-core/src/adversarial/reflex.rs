use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

use crate::adversarial::game::AdversarialGame;

/// One-step lookahead agent for agent 0.
///
/// Every legal action is scored with `score(state, action)` and one of the
/// top-scoring actions is picked at random. Any legal action is returned
/// when there is at least one, even if every score is NaN.
#[derive(Debug, Clone)]
pub struct ReflexAgent<F> {
    score: F,
    rng: ChaCha8Rng,
}

impl<F> ReflexAgent<F> {
    pub fn new(score: F, seed: u64) -> Self {
        ReflexAgent {
            score,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn choose_action<G>(&mut self, game: &G, state: &G::State) -> Option<G::Action>
    where
        G: AdversarialGame,
        F: Fn(&G::State, &G::Action) -> f64,
    {
        let scored: Vec<(G::Action, f64)> = game
            .legal_actions(state, 0)
            .into_iter()
            .map(|action| {
                let value = (self.score)(state, &action);
                (action, value)
            })
            .collect();

        // NaN scores rank below everything; if nothing else is left, all actions tie.
        let best = scored
            .iter()
            .map(|(_, value)| *value)
            .filter(|value| !value.is_nan())
            .reduce(f64::max);

        let candidates: Vec<&G::Action> = scored
            .iter()
            .filter(|(_, value)| best.is_none_or(|best| *value == best))
            .map(|(action, _)| action)
            .collect();

        candidates.choose(&mut self.rng).map(|action| (*action).clone())
    }
}
