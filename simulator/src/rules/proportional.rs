//! Proportional imitation

use super::{ReviseContext, StrategyUpdateRule};
use crate::models::GamerAgent;
use crate::params::Strategy;
use rand::rngs::SmallRng;
use rand::Rng;

/// Pairwise comparison with one random neighbor: adopt its strategy with
/// probability `(π_j − π_i) / (maxPayOff − minPayOff)` when the neighbor
/// is better off, keep otherwise.
pub struct ProportionalImitationRule;

impl StrategyUpdateRule for ProportionalImitationRule {
    fn name(&self) -> &'static str {
        "PROPORTIONAL"
    }

    fn revise(&self, agent: &GamerAgent, ctx: &ReviseContext<'_>, rng: &mut SmallRng) -> Strategy {
        let own = ctx.strategies[agent.id()];
        let Some(neighbor) = ctx.network.random_neighbor(agent.id(), rng) else {
            return own;
        };

        let diff = ctx.payoffs[neighbor] - ctx.payoffs[agent.id()];
        let range = ctx.max_payoff - ctx.min_payoff;
        if diff <= 0.0 || range <= 0.0 {
            return own;
        }
        if rng.gen::<f64>() < diff / range {
            ctx.strategies[neighbor]
        } else {
            own
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::SocialNetwork;
    use crate::rng::run_rng;

    #[test]
    fn test_worse_neighbor_never_imitated() {
        let network = SocialNetwork::well_mixed(2).unwrap();
        let strategies = [Strategy::Truster, Strategy::UntrustworthyTrustee];
        let payoffs = [5.0, 1.0];
        let ctx = ReviseContext {
            strategies: &strategies,
            payoffs: &payoffs,
            network: &network,
            min_payoff: 0.0,
            max_payoff: 10.0,
        };
        let mut rng = run_rng(7, 0);
        let agent = GamerAgent::generate(0, Strategy::Truster, 1, 1.0, &mut rng);

        let rule = ProportionalImitationRule;
        for _ in 0..100 {
            assert_eq!(rule.revise(&agent, &ctx, &mut rng), Strategy::Truster);
        }
    }

    #[test]
    fn test_full_range_advantage_always_imitated() {
        let network = SocialNetwork::well_mixed(2).unwrap();
        let strategies = [Strategy::Truster, Strategy::TrustworthyTrustee];
        // diff equals the whole payoff range, adoption probability 1
        let payoffs = [0.0, 10.0];
        let ctx = ReviseContext {
            strategies: &strategies,
            payoffs: &payoffs,
            network: &network,
            min_payoff: 0.0,
            max_payoff: 10.0,
        };
        let mut rng = run_rng(7, 0);
        let agent = GamerAgent::generate(0, Strategy::Truster, 1, 1.0, &mut rng);

        let rule = ProportionalImitationRule;
        for _ in 0..100 {
            assert_eq!(
                rule.revise(&agent, &ctx, &mut rng),
                Strategy::TrustworthyTrustee
            );
        }
    }
}
