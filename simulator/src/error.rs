//! Simulation error types
//!
//! One taxonomy for the whole engine:
//! - configuration problems are caught before any run executes,
//! - a malformed strategy distribution is either a warning or a hard
//!   failure depending on [`ValidationMode`](crate::params::ValidationMode),
//! - an undefined strategy reaching payoff computation is always fatal.

use crate::network::NetworkError;
use thiserror::Error;

/// Errors that can occur while configuring or running an experiment
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Structural configuration error (zero sizes, out-of-range rates)
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// `k_I + k_T + k_U` does not match the population size
    #[error(
        "strategy distribution mismatch: k_I {k_i} + k_T {k_t} + k_U {k_u} != {agents} agents"
    )]
    DistributionMismatch {
        k_i: usize,
        k_t: usize,
        k_u: usize,
        agents: usize,
    },

    /// Initial percentages of trusters and trustworthy trustees exceed 1.0
    #[error(
        "percentage of trusters ({trusters}) plus trustworthies ({trustworthies}) exceeds 1.0"
    )]
    PercentagesExceedOne { trusters: f64, trustworthies: f64 },

    /// An agent with no defined strategy reached payoff computation.
    ///
    /// This is fatal for the enclosing run: defaulting to a zero payoff
    /// would silently skew every aggregate.
    #[error("agent {agent} has an undefined strategy at step {step}")]
    UndefinedStrategy { agent: usize, step: usize },

    /// Social network collaborator failed at experiment setup
    #[error("social network error")]
    Network(#[from] NetworkError),

    /// Population size disagrees with the social network size
    #[error("network has {network} nodes but the population has {agents} agents")]
    NetworkSizeMismatch { network: usize, agents: usize },
}
