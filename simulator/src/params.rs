//! Parameters of the evolutionary N-player Trust Game
//!
//! [`ModelParameters`] is the immutable configuration for one experiment:
//! population composition, payoff multipliers, step/run counts, update
//! rule and RNG seed. The engine consumes it fully formed; parsing a
//! configuration file into one of these is the CLI's job.
//!
//! # Invariants
//!
//! 1. `k_i + k_t + k_u == nr_agents` (checked at `Model::start()`,
//!    warn-or-fail per [`ValidationMode`])
//! 2. `r_u == (1.0 + r_ut) * r_t` (derived, never set independently)
//! 3. Same parameters (including `seed`) reproduce bit-identical results

use crate::error::SimulationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Strategy tag for an agent
///
/// A closed set: the payoff function matches exhaustively and treats
/// `Undefined` as a fatal configuration error rather than a zero payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Transfers `tv` to a trustee, receives a return based on the
    /// population composition (k_I)
    Truster,
    /// Returns a multiplier `R_T` of received transfers (k_T)
    TrustworthyTrustee,
    /// Returns the higher multiplier `R_U` but defects on trust (k_U)
    UntrustworthyTrustee,
    /// No strategy assigned; reaching payoff computation with this tag
    /// aborts the run
    Undefined,
}

impl Strategy {
    /// Short label used in exports and logs
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Truster => "k_I",
            Strategy::TrustworthyTrustee => "k_T",
            Strategy::UntrustworthyTrustee => "k_U",
            Strategy::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier for the agents' strategy-update rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRuleKind {
    /// Proportional imitation: adopt a better-off random neighbor with
    /// probability proportional to the payoff difference
    Proportional,
    /// Unconditional imitation: copy the best-paid agent among self and
    /// neighbors
    Ui,
    /// Voter model: copy a random neighbor with probability `q_vm`,
    /// otherwise fall back to unconditional imitation
    Voter,
    /// Fermi rule: pairwise comparison with a logistic adoption
    /// probability at temperature `fermi_k`
    Fermi,
    /// Moran death-birth: adopt a neighbor drawn proportionally to its
    /// shifted payoff
    Moran,
}

impl UpdateRuleKind {
    /// Name used by `export()` and in experiment logs
    pub fn export_name(&self) -> &'static str {
        match self {
            UpdateRuleKind::Proportional => "PROPORTIONAL_UPDATE_RULE",
            UpdateRuleKind::Ui => "UI_UPDATE_RULE",
            UpdateRuleKind::Voter => "VOTER_UPDATE_RULE",
            UpdateRuleKind::Fermi => "FERMI_UPDATE_RULE",
            UpdateRuleKind::Moran => "MORAN_UPDATE_RULE",
        }
    }
}

/// How to treat a malformed strategy distribution at `Model::start()`
///
/// `WarnAndContinue` logs the problem and proceeds, leaving the surplus
/// agents with an undefined strategy; `HardFail` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Return an error from `start()` before any agent is built
    #[default]
    HardFail,
    /// Log an error and proceed; agents beyond the strategy blocks stay
    /// `Undefined` and abort the run at the first payoff computation
    WarnAndContinue,
}

/// Immutable configuration for one experiment
///
/// # Example
///
/// ```rust
/// use trust_simulator_core::params::ModelParameters;
///
/// let mut params = ModelParameters::default();
/// params.nr_agents = 100;
/// params.update_counts_from_percentages(0.4, 0.3).unwrap();
/// assert_eq!(params.k_i, 40);
/// assert_eq!(params.k_t, 30);
/// assert_eq!(params.k_u, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Population size N
    pub nr_agents: usize,

    /// Trusters at the start of a run
    pub k_i: usize,
    /// Trustworthy trustees at the start of a run
    pub k_t: usize,
    /// Untrustworthy trustees at the start of a run
    pub k_u: usize,

    /// Multiplier of what k_T returns to k_I (`R_T * tv`)
    pub r_t: f64,
    /// Temptation-to-defect ratio in (0, 1); `R_U = (1 + r_UT) * R_T`
    pub r_ut: f64,
    /// Multiplier of what k_U keeps from k_I (`R_U * tv`), derived
    pub r_u: f64,

    /// Transfer value paid by trusters per interaction
    pub tv: f64,

    /// Steps per Monte Carlo run
    pub max_steps: usize,
    /// Steps between strategy-update applications
    pub t_rounds: usize,
    /// Independent Monte Carlo repetitions
    pub runs_mc: usize,

    /// Strategy-update rule applied every `t_rounds` steps
    pub update_rule: UpdateRuleKind,
    /// Voter-model mixing in [0, 1]: probability of copying a random
    /// neighbor instead of imitating the best. Meaningful only when
    /// `update_rule` is `Voter`.
    pub q_vm: f64,
    /// Selection temperature of the Fermi rule
    pub fermi_k: f64,

    /// Probability that an agent is active (revises its strategy) at any
    /// given step; drawn independently per step at agent creation
    pub p_act: f64,

    /// Seed for the whole experiment; run `i` draws from a stream derived
    /// from `(seed, i)`
    pub seed: u64,

    /// Behavior when `k_i + k_t + k_u != nr_agents`
    pub validation: ValidationMode,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            nr_agents: 0,
            k_i: 0,
            k_t: 0,
            k_u: 0,
            r_t: 1.0,
            r_ut: 0.0,
            r_u: 1.0,
            tv: 1.0,
            max_steps: 1,
            t_rounds: 1,
            runs_mc: 1,
            update_rule: UpdateRuleKind::Proportional,
            q_vm: 1.0,
            fermi_k: 0.1,
            p_act: 1.0,
            seed: 0,
            validation: ValidationMode::HardFail,
        }
    }
}

impl ModelParameters {
    /// Recompute `r_u` from `r_t` and `r_ut`
    ///
    /// Call after changing either multiplier; `validate()` rejects a
    /// stale `r_u`.
    pub fn derive_r_u(&mut self) {
        self.r_u = (1.0 + self.r_ut) * self.r_t;
    }

    /// Derive `k_i`, `k_t`, `k_u` from initial percentages
    ///
    /// `k_i = round(N * pct_trusters)`, `k_t = round(N * pct_trustworthies)`,
    /// `k_u` takes the remainder so the three always sum to N.
    pub fn update_counts_from_percentages(
        &mut self,
        pct_trusters: f64,
        pct_trustworthies: f64,
    ) -> Result<(), SimulationError> {
        if pct_trusters + pct_trustworthies > 1.0 {
            return Err(SimulationError::PercentagesExceedOne {
                trusters: pct_trusters,
                trustworthies: pct_trustworthies,
            });
        }
        if !(0.0..=1.0).contains(&pct_trusters) || !(0.0..=1.0).contains(&pct_trustworthies) {
            return Err(SimulationError::InvalidParameters(
                "percentages must lie in [0, 1]".to_string(),
            ));
        }

        self.k_i = (self.nr_agents as f64 * pct_trusters).round() as usize;
        self.k_t = (self.nr_agents as f64 * pct_trustworthies).round() as usize;
        self.k_u = self.nr_agents - (self.k_i + self.k_t);
        Ok(())
    }

    /// Validate structural constraints
    ///
    /// The strategy-distribution invariant is deliberately *not* checked
    /// here; `Model::start()` enforces it per [`ValidationMode`].
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.nr_agents == 0 {
            return Err(SimulationError::InvalidParameters(
                "nr_agents must be > 0".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(SimulationError::InvalidParameters(
                "max_steps must be > 0".to_string(),
            ));
        }
        if self.runs_mc == 0 {
            return Err(SimulationError::InvalidParameters(
                "runs_mc must be > 0".to_string(),
            ));
        }
        if self.t_rounds == 0 {
            return Err(SimulationError::InvalidParameters(
                "t_rounds must be >= 1".to_string(),
            ));
        }
        if self.tv < 0.0 {
            return Err(SimulationError::InvalidParameters(
                "tv must be non-negative".to_string(),
            ));
        }
        let expected_r_u = (1.0 + self.r_ut) * self.r_t;
        if (self.r_u - expected_r_u).abs() > 1e-9 {
            return Err(SimulationError::InvalidParameters(format!(
                "r_u must equal (1 + r_ut) * r_t = {expected_r_u}, got {}",
                self.r_u
            )));
        }
        if self.update_rule == UpdateRuleKind::Voter && !(0.0..=1.0).contains(&self.q_vm) {
            return Err(SimulationError::InvalidParameters(
                "q_vm must lie in [0, 1] for the voter rule".to_string(),
            ));
        }
        if self.update_rule == UpdateRuleKind::Fermi && self.fermi_k <= 0.0 {
            return Err(SimulationError::InvalidParameters(
                "fermi_k must be > 0 for the Fermi rule".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.p_act) {
            return Err(SimulationError::InvalidParameters(
                "p_act must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the strategy-distribution invariant `k_i + k_t + k_u == N`
    pub fn check_distribution(&self) -> Result<(), SimulationError> {
        if self.k_i + self.k_t + self.k_u != self.nr_agents {
            return Err(SimulationError::DistributionMismatch {
                k_i: self.k_i,
                k_t: self.k_t,
                k_u: self.k_u,
                agents: self.nr_agents,
            });
        }
        Ok(())
    }

    /// Human-readable key = value dump of every parameter
    ///
    /// `q_VM` is only exported for the voter rule, `fermi_k` only for
    /// Fermi.
    pub fn export(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("MC_runs = {}\n", self.runs_mc));
        out.push_str(&format!("seed = {}\n", self.seed));
        out.push_str(&format!("nrAgents = {}\n", self.nr_agents));
        out.push_str(&format!("maxSteps = {}\n", self.max_steps));
        out.push_str(&format!("T_rounds = {}\n", self.t_rounds));
        out.push_str(&format!("k_I = {}\n", self.k_i));
        out.push_str(&format!("k_T = {}\n", self.k_t));
        out.push_str(&format!("k_U = {}\n", self.k_u));
        out.push_str(&format!("R_T = {}\n", self.r_t));
        out.push_str(&format!("r_UT = {}\n", self.r_ut));
        out.push_str(&format!("R_U = {}\n", self.r_u));
        out.push_str(&format!("tv = {}\n", self.tv));
        out.push_str(&format!("p_act = {}\n", self.p_act));
        out.push_str(&format!("updateRule = {}\n", self.update_rule.export_name()));
        match self.update_rule {
            UpdateRuleKind::Voter => out.push_str(&format!("q_VM = {}\n", self.q_vm)),
            UpdateRuleKind::Fermi => out.push_str(&format!("fermi_k = {}\n", self.fermi_k)),
            _ => {}
        }
        out
    }

    /// SHA-256 over the serialized parameter set, hex-encoded
    ///
    /// Embedded in reports and logs so an output file can be traced back
    /// to the exact configuration that produced it.
    pub fn config_hash(&self) -> String {
        // serde_json over a plain struct is deterministic (field order)
        let bytes = serde_json::to_vec(self).expect("parameters serialize infallibly");
        let digest = Sha256::digest(&bytes);
        let mut hex = String::with_capacity(64);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex
    }
}
