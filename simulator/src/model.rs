//! Simulation model for one Monte Carlo run
//!
//! [`Model`] owns the agent population and every per-step counter of a
//! single run. The Controller drives it through `start()`, `maxSteps`
//! calls to `step()`, and `finish()`, then reads the time series out.
//!
//! Payoffs use the global-mixing variant: an agent's payoff depends only
//! on the population composition at the step, never on its neighbors.
//! Topology enters the dynamics exclusively through the strategy-update
//! rules.

use crate::error::SimulationError;
use crate::models::GamerAgent;
use crate::network::SocialNetwork;
use crate::params::{ModelParameters, Strategy, ValidationMode};
use crate::rng::run_rng;
use crate::rules::{build_rule, ReviseContext, StrategyUpdateRule};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, error};

/// One Monte Carlo run's population and time series
pub struct Model<'a> {
    params: &'a ModelParameters,
    network: &'a SocialNetwork,
    rule: Box<dyn StrategyUpdateRule>,
    rng: SmallRng,
    agents: Vec<GamerAgent>,

    current_step: usize,
    /// Payoff bounds for the whole run, used by the rules for
    /// normalization and weighting, never for clamping
    min_payoff: f64,
    max_payoff: f64,

    k_i: Vec<u32>,
    k_t: Vec<u32>,
    k_u: Vec<u32>,
    global_payoff: Vec<f64>,
    strategy_changes: Vec<u32>,
}

impl<'a> Model<'a> {
    /// Build a model over a validated parameter set and a network of
    /// matching size
    pub fn new(
        params: &'a ModelParameters,
        network: &'a SocialNetwork,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        if network.size() != params.nr_agents {
            return Err(SimulationError::NetworkSizeMismatch {
                network: network.size(),
                agents: params.nr_agents,
            });
        }

        Ok(Self {
            params,
            network,
            rule: build_rule(params),
            // replaced by the run-derived stream in start()
            rng: SmallRng::seed_from_u64(params.seed),
            agents: Vec::with_capacity(params.nr_agents),
            current_step: 0,
            min_payoff: 0.0,
            max_payoff: 0.0,
            k_i: vec![0; params.max_steps],
            k_t: vec![0; params.max_steps],
            k_u: vec![0; params.max_steps],
            global_payoff: vec![0.0; params.max_steps],
            strategy_changes: vec![0; params.max_steps],
        })
    }

    /// Initialize one Monte Carlo run
    ///
    /// Checks the strategy-distribution invariant per the configured
    /// [`ValidationMode`], resets every per-step array, derives the
    /// run's RNG stream from `(seed, run)`, builds the population in
    /// strategy blocks, shuffles it and reassigns identities to
    /// positions.
    pub fn start(&mut self, run: usize) -> Result<(), SimulationError> {
        if let Err(err) = self.params.check_distribution() {
            match self.params.validation {
                ValidationMode::HardFail => return Err(err),
                ValidationMode::WarnAndContinue => {
                    error!(%err, run, "strategy distribution does not cover the population");
                }
            }
        }

        self.rng = run_rng(self.params.seed, run);
        self.current_step = 0;
        self.k_i.fill(0);
        self.k_t.fill(0);
        self.k_u.fill(0);
        self.global_payoff.fill(0.0);
        self.strategy_changes.fill(0);

        self.min_payoff = -self.params.tv;
        self.max_payoff = self.network.average_degree() * self.params.r_u * self.params.tv;

        // strategy blocks by index; surplus positions under
        // WarnAndContinue stay Undefined and trip the payoff check
        let trusters = self.params.k_i;
        let trustworthies = trusters + self.params.k_t;
        let trustees = trustworthies + self.params.k_u;
        self.agents.clear();
        for idx in 0..self.params.nr_agents {
            let strategy = if idx < trusters {
                Strategy::Truster
            } else if idx < trustworthies {
                Strategy::TrustworthyTrustee
            } else if idx < trustees {
                Strategy::UntrustworthyTrustee
            } else {
                Strategy::Undefined
            };
            let agent = GamerAgent::generate(
                idx,
                strategy,
                self.params.max_steps,
                self.params.p_act,
                &mut self.rng,
            );
            self.agents.push(agent);
        }

        self.agents.shuffle(&mut self.rng);
        for (position, agent) in self.agents.iter_mut().enumerate() {
            agent.set_id(position);
        }

        debug!(
            run,
            agents = self.agents.len(),
            rule = self.rule.name(),
            "run initialized"
        );
        Ok(())
    }

    /// Advance one simulation step
    ///
    /// Records the strategy counts, computes every agent's payoff from
    /// the global population composition, and applies the update rule
    /// when the step closes a `T_rounds` window. Returns whether more
    /// steps remain.
    pub fn step(&mut self) -> Result<bool, SimulationError> {
        let step = self.current_step;
        if step >= self.params.max_steps {
            return Ok(false);
        }

        for agent in &self.agents {
            match agent.strategy() {
                Strategy::Truster => self.k_i[step] += 1,
                Strategy::TrustworthyTrustee => self.k_t[step] += 1,
                Strategy::UntrustworthyTrustee => self.k_u[step] += 1,
                Strategy::Undefined => {}
            }
        }

        self.compute_payoffs(step)?;

        if (step + 1) % self.params.t_rounds == 0 {
            self.apply_update_rule(step);
        }

        self.current_step += 1;
        Ok(self.current_step < self.params.max_steps)
    }

    /// Global-mixing payoff for every agent at `step`
    fn compute_payoffs(&mut self, step: usize) -> Result<(), SimulationError> {
        let denom = (self.k_t[step] + self.k_u[step]) as f64;
        if denom == 0.0 {
            // no trustees, nobody to transfer to: exactly zero for all
            for agent in &mut self.agents {
                agent.record_payoff(step, 0.0);
            }
            self.global_payoff[step] = 0.0;
            return Ok(());
        }

        let params = self.params;
        let k_i = self.k_i[step] as f64;
        let k_t = self.k_t[step] as f64;
        let mut total = 0.0;
        for agent in &mut self.agents {
            let payoff = match agent.strategy() {
                Strategy::Truster => params.tv * (params.r_t * (k_t / denom) - 1.0),
                Strategy::TrustworthyTrustee => params.r_t * params.tv * (k_i / denom),
                Strategy::UntrustworthyTrustee => params.r_u * params.tv * (k_i / denom),
                Strategy::Undefined => {
                    return Err(SimulationError::UndefinedStrategy {
                        agent: agent.id(),
                        step,
                    })
                }
            };
            agent.record_payoff(step, payoff);
            total += payoff;
        }
        self.global_payoff[step] = total;
        Ok(())
    }

    /// Synchronous strategy revision from a pre-revision snapshot
    fn apply_update_rule(&mut self, step: usize) {
        let strategies: Vec<Strategy> = self.agents.iter().map(GamerAgent::strategy).collect();
        let payoffs: Vec<f64> = self.agents.iter().map(|agent| agent.payoff(step)).collect();
        let ctx = ReviseContext {
            strategies: &strategies,
            payoffs: &payoffs,
            network: self.network,
            min_payoff: self.min_payoff,
            max_payoff: self.max_payoff,
        };

        let mut changes = 0;
        for idx in 0..self.agents.len() {
            if !self.agents[idx].is_active(step) {
                continue;
            }
            let next = self.rule.revise(&self.agents[idx], &ctx, &mut self.rng);
            if self.agents[idx].revise(next) {
                changes += 1;
            }
        }
        self.strategy_changes[step] = changes;
    }

    /// Terminal hook for one run
    ///
    /// No state mutation happens after this point; the per-agent
    /// revision totals go to the debug log.
    pub fn finish(&self, run: usize) {
        let revisions: u32 = self.agents.iter().map(GamerAgent::revisions).sum();
        debug!(
            run,
            revisions,
            steps = self.current_step,
            "run finished"
        );
    }

    pub fn min_payoff(&self) -> f64 {
        self.min_payoff
    }

    pub fn max_payoff(&self) -> f64 {
        self.max_payoff
    }

    pub fn k_i_series(&self) -> &[u32] {
        &self.k_i
    }

    pub fn k_t_series(&self) -> &[u32] {
        &self.k_t
    }

    pub fn k_u_series(&self) -> &[u32] {
        &self.k_u
    }

    pub fn global_payoff_series(&self) -> &[f64] {
        &self.global_payoff
    }

    pub fn strategy_changes_series(&self) -> &[u32] {
        &self.strategy_changes
    }

    #[cfg(test)]
    pub(crate) fn agents(&self) -> &[GamerAgent] {
        &self.agents
    }
}
