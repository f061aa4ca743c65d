//! Experiment configuration file
//!
//! Loads a TOML experiment description and turns it into the fully
//! formed `ModelParameters` plus `SocialNetwork` the engine consumes.
//! The initial population can be given either as explicit counts or as
//! percentages of the population size, never both.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use trust_simulator_core::network::{NetworkError, SocialNetwork};
use trust_simulator_core::params::{ModelParameters, UpdateRuleKind, ValidationMode};
use trust_simulator_core::SimulationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("population must be given as all three counts (k_i, k_t, k_u) or as percentages, not a mix")]
    AmbiguousPopulation,

    #[error("population section needs either counts or percentages")]
    MissingPopulation,

    #[error("network kind {0:?} requires an edge_list path")]
    MissingEdgeList(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Top-level experiment file
#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentConfig {
    pub experiment: ExperimentSection,
    pub population: PopulationSection,
    pub payoff: PayoffSection,
    pub update: UpdateSection,
    #[serde(default)]
    pub network: NetworkSection,
}

/// Run counts, seeding and output naming
#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentSection {
    /// Tag appended to every report file name
    pub output_file: String,
    pub runs_mc: usize,
    pub max_steps: usize,
    #[serde(default = "default_t_rounds")]
    pub t_rounds: usize,
    pub seed: u64,
    /// `hard_fail` (default) or `warn_and_continue`
    #[serde(default)]
    pub validation: ValidationMode,
}

/// Initial strategy distribution
#[derive(Debug, Clone, Deserialize)]
pub struct PopulationSection {
    pub nr_agents: usize,
    pub k_i: Option<usize>,
    pub k_t: Option<usize>,
    pub k_u: Option<usize>,
    pub percentage_trusters: Option<f64>,
    pub percentage_trustworthies: Option<f64>,
}

/// Payoff multipliers
#[derive(Debug, Clone, Deserialize)]
pub struct PayoffSection {
    pub r_t: f64,
    pub r_ut: f64,
    pub tv: f64,
}

/// Strategy-update rule and its knobs
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    pub rule: UpdateRuleKind,
    #[serde(default = "default_q_vm")]
    pub q_vm: f64,
    #[serde(default = "default_fermi_k")]
    pub fermi_k: f64,
    #[serde(default = "default_p_act")]
    pub p_act: f64,
}

/// Social-network topology
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NetworkSection {
    #[default]
    WellMixed,
    EdgeList {
        edge_list: PathBuf,
    },
}

fn default_t_rounds() -> usize {
    1
}

fn default_q_vm() -> f64 {
    1.0
}

fn default_fermi_k() -> f64 {
    0.1
}

fn default_p_act() -> f64 {
    1.0
}

impl ExperimentConfig {
    /// Load and parse the experiment file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the engine inputs, resolving percentages and the topology
    pub fn build(&self) -> Result<(ModelParameters, SocialNetwork), ConfigError> {
        let mut params = ModelParameters {
            nr_agents: self.population.nr_agents,
            r_t: self.payoff.r_t,
            r_ut: self.payoff.r_ut,
            tv: self.payoff.tv,
            max_steps: self.experiment.max_steps,
            t_rounds: self.experiment.t_rounds,
            runs_mc: self.experiment.runs_mc,
            update_rule: self.update.rule,
            q_vm: self.update.q_vm,
            fermi_k: self.update.fermi_k,
            p_act: self.update.p_act,
            seed: self.experiment.seed,
            validation: self.experiment.validation,
            ..ModelParameters::default()
        };
        params.derive_r_u();

        let counts = (
            self.population.k_i,
            self.population.k_t,
            self.population.k_u,
        );
        let percentages = (
            self.population.percentage_trusters,
            self.population.percentage_trustworthies,
        );
        match (counts, percentages) {
            ((Some(k_i), Some(k_t), Some(k_u)), (None, None)) => {
                params.k_i = k_i;
                params.k_t = k_t;
                params.k_u = k_u;
            }
            ((None, None, None), (Some(trusters), Some(trustworthies))) => {
                params.update_counts_from_percentages(trusters, trustworthies)?;
            }
            ((None, None, None), (None, None)) => return Err(ConfigError::MissingPopulation),
            _ => return Err(ConfigError::AmbiguousPopulation),
        }

        params.validate()?;

        let network = match &self.network {
            NetworkSection::WellMixed => SocialNetwork::well_mixed(params.nr_agents)?,
            NetworkSection::EdgeList { edge_list } => {
                SocialNetwork::from_edge_list(edge_list, params.nr_agents)?
            }
        };

        Ok((params, network))
    }
}
