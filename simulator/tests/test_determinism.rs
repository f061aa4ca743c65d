//! Bit-exact reproducibility

use trust_simulator_core::network::SocialNetwork;
use trust_simulator_core::params::{ModelParameters, UpdateRuleKind};
use trust_simulator_core::{run_model, Model};

fn params(seed: u64) -> ModelParameters {
    let mut params = ModelParameters {
        nr_agents: 30,
        k_i: 10,
        k_t: 10,
        k_u: 10,
        r_t: 2.0,
        r_ut: 0.5,
        tv: 10.0,
        max_steps: 30,
        t_rounds: 1,
        runs_mc: 3,
        update_rule: UpdateRuleKind::Voter,
        q_vm: 1.0,
        seed,
        ..ModelParameters::default()
    };
    params.derive_r_u();
    params
}

#[test]
fn test_identical_parameters_reproduce_identical_series() {
    let params = params(777);
    let network = SocialNetwork::well_mixed(30).unwrap();

    let first = run_model(&params, &network).unwrap();
    let second = run_model(&params, &network).unwrap();

    for run in 0..params.runs_mc {
        assert_eq!(first.k_i.matrix.row(run), second.k_i.matrix.row(run));
        assert_eq!(first.k_t.matrix.row(run), second.k_t.matrix.row(run));
        assert_eq!(first.k_u.matrix.row(run), second.k_u.matrix.row(run));
        assert_eq!(
            first.net_wealth.matrix.row(run),
            second.net_wealth.matrix.row(run)
        );
        assert_eq!(
            first.strategy_changes.matrix.row(run),
            second.strategy_changes.matrix.row(run)
        );
    }
    assert_eq!(first.k_i.stats.avg, second.k_i.stats.avg);
    assert_eq!(first.net_wealth.stats.std, second.net_wealth.stats.std);
}

#[test]
fn test_different_seeds_diverge() {
    let network = SocialNetwork::well_mixed(30).unwrap();
    let first = run_model(&params(1), &network).unwrap();
    let second = run_model(&params(2), &network).unwrap();

    // 90 voter steps of 30 agents: identical trajectories would mean a
    // broken seed derivation
    let identical = (0..3).all(|run| first.k_i.matrix.row(run) == second.k_i.matrix.row(run));
    assert!(!identical);
}

#[test]
fn test_runs_within_an_experiment_are_independent_streams() {
    let params = params(424242);
    let network = SocialNetwork::well_mixed(30).unwrap();
    let stats = run_model(&params, &network).unwrap();

    let identical = stats.k_i.matrix.row(0) == stats.k_i.matrix.row(1)
        && stats.k_i.matrix.row(1) == stats.k_i.matrix.row(2);
    assert!(!identical, "all runs produced the same trajectory");
}

#[test]
fn test_single_run_replays_in_isolation() {
    let params = params(99);
    let network = SocialNetwork::well_mixed(30).unwrap();
    let stats = run_model(&params, &network).unwrap();

    // replay run 1 directly through the Model
    let mut model = Model::new(&params, &network).unwrap();
    model.start(1).unwrap();
    while model.step().unwrap() {}

    let replayed: Vec<f64> = model.k_i_series().iter().map(|&v| f64::from(v)).collect();
    assert_eq!(stats.k_i.matrix.row(1), replayed.as_slice());
    assert_eq!(stats.net_wealth.matrix.row(1), model.global_payoff_series());
}
