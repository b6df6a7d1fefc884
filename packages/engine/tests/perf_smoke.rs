use buffon_engine::{SimulationConfig, SimulationCore, SimulationParams};

#[test]
fn perf_smoke_step() {
    let config = SimulationConfig { seed: Some(1), ..SimulationConfig::default() };
    let mut core = SimulationCore::new(config, 16.0 / 9.0);
    core.enable_perf_metrics(true);
    core.start(SimulationParams::new(1.0, 1.0, 300, 5.0)).unwrap();
    core.advance();
    let stats = core.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.physics_ms() >= 0.0);
    assert_eq!(stats.live_bodies(), 100);
    assert_eq!(stats.frame(), 0);
}
