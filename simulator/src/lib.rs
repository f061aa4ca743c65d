//! Trust Game Simulator - Simulation Engine
//!
//! Evolutionary N-player Trust Game over a population of agents on a
//! social network, run as seeded Monte Carlo experiments with cross-run
//! statistical reduction.
//!
//! # Architecture
//!
//! - **params**: Experiment configuration (`ModelParameters`)
//! - **models**: Domain types (`GamerAgent`)
//! - **network**: Social-network collaborator (well-mixed or graph)
//! - **rules**: Strategy-update rules (Proportional, UI, Voter, Fermi, Moran)
//! - **model**: One Monte Carlo run (payoffs, counters, revision)
//! - **controller**: Experiment orchestration across runs
//! - **stats**: Cross-run reduction (`RunStats`)
//! - **report**: Delimited-text and JSON report writers
//! - **rng**: Deterministic per-run random streams
//!
//! # Critical Invariants
//!
//! 1. `k_I + k_T + k_U == N` at every step
//! 2. All randomness is deterministic (per-run seeded streams)
//! 3. Identical parameters (including seed) reproduce bit-identical series

// Module declarations
pub mod controller;
pub mod error;
pub mod model;
pub mod models;
pub mod network;
pub mod params;
pub mod report;
pub mod rng;
pub mod rules;
pub mod stats;

// Re-exports for convenience
pub use controller::run_model;
pub use error::SimulationError;
pub use model::Model;
pub use models::GamerAgent;
pub use network::{NetworkError, SocialNetwork};
pub use params::{ModelParameters, Strategy, UpdateRuleKind, ValidationMode};
pub use rng::{derive_run_seed, run_rng};
pub use rules::{build_rule, ReviseContext, StrategyUpdateRule};
pub use stats::{MetricSeries, RunMatrix, RunStats, ScalarStats, SeriesStats};
