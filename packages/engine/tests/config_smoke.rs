use buffon_engine::{SimError, SimulationConfig, SimulationParams};

#[test]
fn config_smoke_parses_partial_json() {
    let config = SimulationConfig::from_json(r#"{"batchSize": 25, "seed": 9}"#)
        .expect("partial config should parse");
    assert_eq!(config.batch_size, 25);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.timestep, SimulationConfig::default().timestep);

    let params = SimulationParams::from_json(r#"{"needleLength": 0.8, "lineSpacing": 1.0, "needleCount": 1000}"#)
        .expect("params without spread radius should parse");
    assert_eq!(params.spread_radius, 5.0);
    assert!(params.validated().is_ok());
}

#[test]
fn config_smoke_rejects_garbage() {
    assert!(matches!(SimulationConfig::from_json("{"), Err(SimError::Config(_))));
    assert!(SimulationParams::from_json(r#"{"needleLength": 1.0}"#).is_err());
}
