//! Moran death-birth rule

use super::{ReviseContext, StrategyUpdateRule};
use crate::models::GamerAgent;
use crate::params::Strategy;
use rand::rngs::SmallRng;
use rand::Rng;

/// The revising agent "dies" and adopts the strategy of a neighbor drawn
/// with probability proportional to the neighbor's payoff shifted by
/// `minPayOff`, so weights are always non-negative.
///
/// If every neighbor sits exactly at the payoff floor (total weight
/// zero), or the agent has no neighbors, it keeps its own strategy.
pub struct MoranRule;

impl StrategyUpdateRule for MoranRule {
    fn name(&self) -> &'static str {
        "MORAN"
    }

    fn revise(&self, agent: &GamerAgent, ctx: &ReviseContext<'_>, rng: &mut SmallRng) -> Strategy {
        let own = ctx.strategies[agent.id()];
        let neighbors = ctx.network.neighbors(agent.id());

        let total: f64 = neighbors
            .iter()
            .map(|&n| ctx.payoffs[n] - ctx.min_payoff)
            .sum();
        if total <= 0.0 {
            return own;
        }

        let mut target = rng.gen::<f64>() * total;
        for &neighbor in &neighbors {
            target -= ctx.payoffs[neighbor] - ctx.min_payoff;
            if target < 0.0 {
                return ctx.strategies[neighbor];
            }
        }
        // rounding pushed the draw past the last weight
        ctx.strategies[neighbors[neighbors.len() - 1]]
    }
}
