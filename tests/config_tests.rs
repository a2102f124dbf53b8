use sapling_mcts::MctsParams;
use std::time::Duration;

#[test]
fn test_params_default_values() {
    let params = MctsParams::default();

    assert_eq!(params.exploitation, 1.0);
    assert!((params.exploration - 8f64.sqrt()).abs() < 1e-12);
    assert_eq!(params.alpha, -1.0);
    assert_eq!(params.beta, 1.0);
    assert_eq!(params.duration, Duration::from_millis(1000));
    assert_eq!(params.maxsim, 1e8);
    assert_eq!(params.numrolls, 1);
    assert_eq!(params.simsperroll, 1e6);
    assert_eq!(params.extracache, 100_000);
    assert_eq!(params.advancechunks, 100);
    assert!(params.background);
    assert!(!params.uniform);
    assert!(!params.inert);
    assert_eq!(params.seed, None);
}

#[test]
fn test_params_builder_methods() {
    let params = MctsParams::default()
        .with_exploitation(0.5)
        .with_exploration(2.0)
        .with_bounds(0.0, 1.0)
        .with_duration(Duration::from_millis(250))
        .with_maxsim(1e4)
        .with_numrolls(4)
        .with_simsperroll(1e3)
        .with_extracache(512)
        .with_advancechunks(10)
        .with_background(false)
        .with_uniform(true)
        .with_inert(true)
        .with_seed(99);

    assert_eq!(params.exploitation, 0.5);
    assert_eq!(params.exploration, 2.0);
    assert_eq!(params.alpha, 0.0);
    assert_eq!(params.beta, 1.0);
    assert_eq!(params.duration, Duration::from_millis(250));
    assert_eq!(params.maxsim, 1e4);
    assert_eq!(params.numrolls, 4);
    assert_eq!(params.simsperroll, 1e3);
    assert_eq!(params.extracache, 512);
    assert_eq!(params.advancechunks, 10);
    assert!(!params.background);
    assert!(params.uniform);
    assert!(params.inert);
    assert_eq!(params.seed, Some(99));
}
