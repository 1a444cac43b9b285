use plansearch_core::{EpisodeSummary, Mdp, ReinforcementAgent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{ActionKey, CompiledMdp, StateKey, Transition};

/// How one simulated episode went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeReport {
    pub steps: usize,
    /// Undiscounted sum of rewards.
    pub total_reward: f64,
    /// Whether the episode ended in a terminal state rather than on the step cap.
    pub reached_terminal: bool,
    pub summary: EpisodeSummary,
}

/// Seeded environment over a compiled MDP.
///
/// The simulator drives learning agents: it asks for an action, samples the
/// outcome, and reports the transition back to the agent.
#[derive(Debug, Clone)]
pub struct MdpSimulator {
    mdp: CompiledMdp,
    rng: ChaCha8Rng,
}

impl MdpSimulator {
    pub fn new(mdp: CompiledMdp, seed: u64) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn mdp(&self) -> &CompiledMdp {
        &self.mdp
    }

    pub fn num_actions(&self, state: StateKey) -> usize {
        self.mdp.num_actions(state)
    }

    /// Sample one step. An unknown state or action ends the episode in place.
    pub fn step(&mut self, state: StateKey, action: ActionKey) -> Transition {
        let sample = self.rng.gen_range(0.0..1.0);
        self.mdp
            .sample_transition(state, action, sample)
            .unwrap_or(Transition {
                next: state,
                reward: 0.0,
                terminal: true,
            })
    }

    /// Run one episode from the start state, for at most `max_steps` steps.
    pub fn run_episode<A>(&mut self, agent: &mut A, max_steps: usize) -> EpisodeReport
    where
        A: ReinforcementAgent<State = StateKey, Action = ActionKey>,
    {
        agent.start_episode();

        let mut state = self.mdp.start();
        let mut steps = 0;
        let mut total_reward = 0.0;
        let mut reached_terminal = self.mdp.is_terminal(&state);

        while !reached_terminal && steps < max_steps {
            let Some(action) = agent.choose_action(&state) else {
                // No legal action: nothing more can happen.
                reached_terminal = true;
                break;
            };

            let transition = self.step(state, action);
            agent.observe_transition(&state, &action, &transition.next, transition.reward);

            steps += 1;
            total_reward += transition.reward;
            state = transition.next;
            reached_terminal = transition.terminal;
        }

        let summary = agent.stop_episode();
        debug!(
            episode = summary.episode,
            steps,
            total_reward,
            reached_terminal,
            "simulated episode"
        );

        EpisodeReport {
            steps,
            total_reward,
            reached_terminal,
            summary,
        }
    }

    /// Run `episodes` episodes back to back.
    pub fn train<A>(&mut self, agent: &mut A, episodes: usize, max_steps: usize) -> Vec<EpisodeReport>
    where
        A: ReinforcementAgent<State = StateKey, Action = ActionKey>,
    {
        let reports: Vec<EpisodeReport> = (0..episodes)
            .map(|_| self.run_episode(agent, max_steps))
            .collect();

        let mean = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|r| r.total_reward).sum::<f64>() / reports.len() as f64
        };
        info!(episodes, mean_reward = mean, "simulation finished");
        reports
    }
}
