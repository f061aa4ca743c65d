//! Strategy-update rules
//!
//! Each rule decides, for one revising agent, which strategy it carries
//! into the next step. Rules see a *snapshot* of the population taken
//! before any agent revised, so updates within a step are synchronous
//! and order-independent. Randomness comes exclusively from the per-run
//! stream handed in by the model.

pub mod fermi;
pub mod moran;
pub mod proportional;
pub mod unconditional;
pub mod voter;

pub use fermi::FermiRule;
pub use moran::MoranRule;
pub use proportional::ProportionalImitationRule;
pub use unconditional::UnconditionalImitationRule;
pub use voter::VoterRule;

use crate::models::GamerAgent;
use crate::network::SocialNetwork;
use crate::params::{ModelParameters, Strategy, UpdateRuleKind};
use rand::rngs::SmallRng;

/// Frozen view of the population at revision time
///
/// `strategies[i]` and `payoffs[i]` are agent `i`'s strategy and
/// current-step payoff before any revision this step. `min_payoff` and
/// `max_payoff` bound the payoff range for the whole run.
pub struct ReviseContext<'a> {
    pub strategies: &'a [Strategy],
    pub payoffs: &'a [f64],
    pub network: &'a SocialNetwork,
    pub min_payoff: f64,
    pub max_payoff: f64,
}

/// One strategy-update rule
///
/// Implementations must be pure functions of the context and the RNG:
/// they return the strategy the agent should hold next, and never touch
/// the agent beyond reading its id and current strategy.
pub trait StrategyUpdateRule: Send + Sync {
    /// Short name used in exports and logs
    fn name(&self) -> &'static str;

    /// Decide the revising agent's next strategy
    fn revise(&self, agent: &GamerAgent, ctx: &ReviseContext<'_>, rng: &mut SmallRng) -> Strategy;
}

/// Build the configured rule
pub fn build_rule(params: &ModelParameters) -> Box<dyn StrategyUpdateRule> {
    match params.update_rule {
        UpdateRuleKind::Proportional => Box::new(ProportionalImitationRule),
        UpdateRuleKind::Ui => Box::new(UnconditionalImitationRule),
        UpdateRuleKind::Voter => Box::new(VoterRule::new(params.q_vm)),
        UpdateRuleKind::Fermi => Box::new(FermiRule::new(params.fermi_k)),
        UpdateRuleKind::Moran => Box::new(MoranRule),
    }
}

/// Highest-payoff strategy among self and neighbors, ties keep own
///
/// Shared by the UI rule and the voter model's non-copy branch.
pub(crate) fn imitate_best(agent_id: usize, ctx: &ReviseContext<'_>) -> Strategy {
    let mut best = agent_id;
    for neighbor in ctx.network.neighbors(agent_id) {
        if ctx.payoffs[neighbor] > ctx.payoffs[best] {
            best = neighbor;
        }
    }
    ctx.strategies[best]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_matches_configuration() {
        let mut params = ModelParameters::default();
        params.update_rule = UpdateRuleKind::Fermi;
        assert_eq!(build_rule(&params).name(), "FERMI");
        params.update_rule = UpdateRuleKind::Moran;
        assert_eq!(build_rule(&params).name(), "MORAN");
    }
}
