//! Voter model

use super::{imitate_best, ReviseContext, StrategyUpdateRule};
use crate::models::GamerAgent;
use crate::params::Strategy;
use rand::rngs::SmallRng;
use rand::Rng;

/// With probability `q_vm` copy a uniformly random neighbor regardless of
/// payoff; otherwise imitate the best among self and neighbors.
///
/// `q_vm = 1` is the pure voter model, `q_vm = 0` degenerates to UI.
pub struct VoterRule {
    q_vm: f64,
}

impl VoterRule {
    pub fn new(q_vm: f64) -> Self {
        Self { q_vm }
    }
}

impl StrategyUpdateRule for VoterRule {
    fn name(&self) -> &'static str {
        "VOTER"
    }

    fn revise(&self, agent: &GamerAgent, ctx: &ReviseContext<'_>, rng: &mut SmallRng) -> Strategy {
        if rng.gen::<f64>() < self.q_vm {
            match ctx.network.random_neighbor(agent.id(), rng) {
                Some(neighbor) => ctx.strategies[neighbor],
                None => ctx.strategies[agent.id()],
            }
        } else {
            imitate_best(agent.id(), ctx)
        }
    }
}
