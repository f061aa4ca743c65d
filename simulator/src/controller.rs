//! Monte Carlo orchestration
//!
//! The Controller drives `runsMC` independent repetitions of the
//! [`Model`] over one shared read-only network, copies each finished
//! run's time series into the [`RunStats`] matrices and reduces them
//! once at the end. Runs execute sequentially; each owns its Model
//! state and RNG stream, so disjoint RunStats rows are the only thing
//! they share.
//!
//! A fatal error inside any run aborts the whole experiment. Continuing
//! with zero-filled rows would silently skew every aggregate.

use crate::error::SimulationError;
use crate::model::Model;
use crate::network::SocialNetwork;
use crate::params::ModelParameters;
use crate::stats::RunStats;
use std::time::Instant;
use tracing::info;

/// Run the full experiment and reduce its statistics
///
/// # Example
///
/// ```rust
/// use trust_simulator_core::controller::run_model;
/// use trust_simulator_core::network::SocialNetwork;
/// use trust_simulator_core::params::ModelParameters;
///
/// let mut params = ModelParameters {
///     nr_agents: 10,
///     k_i: 4,
///     k_t: 3,
///     k_u: 3,
///     r_t: 2.0,
///     r_ut: 0.5,
///     tv: 10.0,
///     max_steps: 5,
///     runs_mc: 3,
///     seed: 42,
///     ..ModelParameters::default()
/// };
/// params.derive_r_u();
/// let network = SocialNetwork::well_mixed(10).unwrap();
///
/// let stats = run_model(&params, &network).unwrap();
/// assert_eq!(stats.runs(), 3);
/// assert_eq!(stats.k_i.stats.avg.len(), 5);
/// ```
pub fn run_model(
    params: &ModelParameters,
    network: &SocialNetwork,
) -> Result<RunStats, SimulationError> {
    params.validate()?;

    let mut stats = RunStats::new(params.runs_mc, params.max_steps);
    let mut model = Model::new(params, network)?;

    info!(
        runs = params.runs_mc,
        steps = params.max_steps,
        config = %params.config_hash(),
        "starting Monte Carlo experiment"
    );

    for run in 0..params.runs_mc {
        let started = Instant::now();
        model.start(run)?;
        while model.step()? {}
        model.finish(run);

        stats
            .k_i
            .set_run(run, &as_f64(model.k_i_series()));
        stats
            .k_t
            .set_run(run, &as_f64(model.k_t_series()));
        stats
            .k_u
            .set_run(run, &as_f64(model.k_u_series()));
        stats.net_wealth.set_run(run, model.global_payoff_series());
        stats
            .strategy_changes
            .set_run(run, &as_f64(model.strategy_changes_series()));

        info!(run, elapsed = ?started.elapsed(), "run complete");
    }

    stats.calc_all_stats();
    Ok(stats)
}

fn as_f64(series: &[u32]) -> Vec<f64> {
    series.iter().map(|&v| f64::from(v)).collect()
}
