//! Unconditional imitation (UI)

use super::{imitate_best, ReviseContext, StrategyUpdateRule};
use crate::models::GamerAgent;
use crate::params::Strategy;
use rand::rngs::SmallRng;

/// Copy the strategy of the highest-payoff agent among self and all
/// neighbors. Ties keep the agent's own strategy.
pub struct UnconditionalImitationRule;

impl StrategyUpdateRule for UnconditionalImitationRule {
    fn name(&self) -> &'static str {
        "UI"
    }

    fn revise(&self, agent: &GamerAgent, ctx: &ReviseContext<'_>, _rng: &mut SmallRng) -> Strategy {
        imitate_best(agent.id(), ctx)
    }
}
