//! Game-playing agent
//!
//! Agents are deliberately thin records: strategy revision lives in the
//! [`rules`](crate::rules) module and payoff arithmetic in the
//! [`Model`](crate::model::Model). What an agent owns is its current
//! strategy, its per-step payoff history, and its pre-drawn activity
//! schedule.

use crate::params::Strategy;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;

/// One member of the population
///
/// Identity is positional: `id` is the agent's index in both the
/// population vector and the social network. The whole activity
/// schedule is drawn up front at creation, which pins the per-run random
/// stream regardless of how many agents later skip their revisions.
#[derive(Debug, Clone, Serialize)]
pub struct GamerAgent {
    id: usize,
    strategy: Strategy,
    /// Payoff earned at each step, indexed by step
    payoffs: Vec<f64>,
    /// Whether the agent participates in strategy revision at each step
    active: Vec<bool>,
    /// Number of revisions that actually changed the strategy
    revisions: u32,
}

impl GamerAgent {
    /// Create an agent with a pre-drawn activity schedule
    ///
    /// Each of the `max_steps` activity flags is an independent
    /// Bernoulli draw with probability `p_act`.
    pub fn generate(
        id: usize,
        strategy: Strategy,
        max_steps: usize,
        p_act: f64,
        rng: &mut SmallRng,
    ) -> Self {
        let active = (0..max_steps).map(|_| rng.gen::<f64>() < p_act).collect();
        Self {
            id,
            strategy,
            payoffs: vec![0.0; max_steps],
            active,
            revisions: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Reassign the positional id after the population shuffle
    pub fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether this agent revises its strategy at `step`
    pub fn is_active(&self, step: usize) -> bool {
        self.active[step]
    }

    pub fn record_payoff(&mut self, step: usize, value: f64) {
        self.payoffs[step] = value;
    }

    pub fn payoff(&self, step: usize) -> f64 {
        self.payoffs[step]
    }

    /// Sum of payoffs earned so far
    pub fn net_wealth(&self, through_step: usize) -> f64 {
        self.payoffs[..=through_step].iter().sum()
    }

    /// Adopt `new_strategy`; returns whether the strategy changed
    pub fn revise(&mut self, new_strategy: Strategy) -> bool {
        if new_strategy == self.strategy {
            return false;
        }
        self.strategy = new_strategy;
        self.revisions += 1;
        true
    }

    pub fn revisions(&self) -> u32 {
        self.revisions
    }
}
