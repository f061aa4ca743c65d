//! Fermi rule

use super::{ReviseContext, StrategyUpdateRule};
use crate::models::GamerAgent;
use crate::params::Strategy;
use rand::rngs::SmallRng;
use rand::Rng;

/// Pairwise comparison with one random neighbor, adopted with the
/// logistic probability `1 / (1 + exp(−(π_j − π_i) / K))`.
///
/// Low temperatures `K` make selection nearly deterministic; high
/// temperatures approach a coin flip.
pub struct FermiRule {
    temperature: f64,
}

impl FermiRule {
    pub fn new(temperature: f64) -> Self {
        Self { temperature }
    }

    fn adoption_probability(&self, diff: f64) -> f64 {
        1.0 / (1.0 + (-diff / self.temperature).exp())
    }
}

impl StrategyUpdateRule for FermiRule {
    fn name(&self) -> &'static str {
        "FERMI"
    }

    fn revise(&self, agent: &GamerAgent, ctx: &ReviseContext<'_>, rng: &mut SmallRng) -> Strategy {
        let own = ctx.strategies[agent.id()];
        let Some(neighbor) = ctx.network.random_neighbor(agent.id(), rng) else {
            return own;
        };

        let diff = ctx.payoffs[neighbor] - ctx.payoffs[agent.id()];
        if rng.gen::<f64>() < self.adoption_probability(diff) {
            ctx.strategies[neighbor]
        } else {
            own
        }
    }
}
