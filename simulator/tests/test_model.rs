//! Model behavior over full runs

use trust_simulator_core::network::SocialNetwork;
use trust_simulator_core::params::{ModelParameters, UpdateRuleKind, ValidationMode};
use trust_simulator_core::{Model, SimulationError};

fn example_params() -> ModelParameters {
    let mut params = ModelParameters {
        nr_agents: 10,
        k_i: 4,
        k_t: 3,
        k_u: 3,
        r_t: 2.0,
        r_ut: 0.5,
        tv: 10.0,
        max_steps: 8,
        t_rounds: 100, // counts stay at the initial distribution
        runs_mc: 1,
        seed: 21,
        ..ModelParameters::default()
    };
    params.derive_r_u();
    params
}

#[test]
fn test_global_payoff_matches_hand_computation() {
    let params = example_params();
    let network = SocialNetwork::well_mixed(10).unwrap();
    let mut model = Model::new(&params, &network).unwrap();
    model.start(0).unwrap();
    model.step().unwrap();

    // denom = 6; trusters earn 10*(2*(3/6)-1) = 0 each,
    // 3 trustworthies earn 2*10*(4/6), 3 untrustworthies 3*10*(4/6)
    let expected = 3.0 * (2.0 * 10.0 * (4.0 / 6.0)) + 3.0 * (3.0 * 10.0 * (4.0 / 6.0));
    assert!((model.global_payoff_series()[0] - expected).abs() < 1e-9);
    assert!((model.global_payoff_series()[0] - 100.0).abs() < 1e-9);
}

#[test]
fn test_counts_match_initial_distribution_without_revision() {
    let params = example_params();
    let network = SocialNetwork::well_mixed(10).unwrap();
    let mut model = Model::new(&params, &network).unwrap();
    model.start(0).unwrap();
    while model.step().unwrap() {}

    for step in 0..params.max_steps {
        assert_eq!(model.k_i_series()[step], 4);
        assert_eq!(model.k_t_series()[step], 3);
        assert_eq!(model.k_u_series()[step], 3);
        assert_eq!(model.strategy_changes_series()[step], 0);
    }
}

#[test]
fn test_zero_trustees_yield_exactly_zero_payoff() {
    let mut params = example_params();
    params.k_i = 10;
    params.k_t = 0;
    params.k_u = 0;
    let network = SocialNetwork::well_mixed(10).unwrap();
    let mut model = Model::new(&params, &network).unwrap();
    model.start(0).unwrap();
    while model.step().unwrap() {}

    for step in 0..params.max_steps {
        assert_eq!(model.global_payoff_series()[step], 0.0);
    }
}

#[test]
fn test_distribution_mismatch_fails_at_start_by_default() {
    let mut params = example_params();
    params.nr_agents = 7;
    params.k_i = 2;
    params.k_t = 2;
    params.k_u = 2;
    let network = SocialNetwork::well_mixed(7).unwrap();
    let mut model = Model::new(&params, &network).unwrap();

    assert!(matches!(
        model.start(0),
        Err(SimulationError::DistributionMismatch { agents: 7, .. })
    ));
}

#[test]
fn test_undefined_strategy_is_fatal_under_warn_and_continue() {
    let mut params = example_params();
    params.nr_agents = 7;
    params.k_i = 2;
    params.k_t = 2;
    params.k_u = 2;
    params.validation = ValidationMode::WarnAndContinue;
    let network = SocialNetwork::well_mixed(7).unwrap();
    let mut model = Model::new(&params, &network).unwrap();

    // start proceeds, the uncovered agent stays Undefined
    model.start(0).unwrap();
    // trustees exist, so the payoff pass reaches the undefined agent
    assert!(matches!(
        model.step(),
        Err(SimulationError::UndefinedStrategy { step: 0, .. })
    ));
}

#[test]
fn test_counts_conserved_under_every_rule() {
    for rule in [
        UpdateRuleKind::Proportional,
        UpdateRuleKind::Ui,
        UpdateRuleKind::Voter,
        UpdateRuleKind::Fermi,
        UpdateRuleKind::Moran,
    ] {
        let mut params = example_params();
        params.update_rule = rule;
        params.q_vm = 0.5;
        params.t_rounds = 1;
        params.max_steps = 30;
        let network = SocialNetwork::well_mixed(10).unwrap();
        let mut model = Model::new(&params, &network).unwrap();
        model.start(0).unwrap();
        while model.step().unwrap() {}

        for step in 0..params.max_steps {
            let total = model.k_i_series()[step]
                + model.k_t_series()[step]
                + model.k_u_series()[step];
            assert_eq!(total, 10, "population leaked under {rule:?} at {step}");
        }
    }
}

#[test]
fn test_inactive_agents_never_revise() {
    let mut params = example_params();
    params.update_rule = UpdateRuleKind::Voter;
    params.q_vm = 1.0;
    params.t_rounds = 1;
    params.p_act = 0.0;
    let network = SocialNetwork::well_mixed(10).unwrap();
    let mut model = Model::new(&params, &network).unwrap();
    model.start(0).unwrap();
    while model.step().unwrap() {}

    for step in 0..params.max_steps {
        assert_eq!(model.strategy_changes_series()[step], 0);
        assert_eq!(model.k_i_series()[step], 4);
    }
}
