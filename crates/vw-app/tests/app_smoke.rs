//! Smoke test for the vw-app service layer.

use std::path::PathBuf;

use vw_app::{DashboardSession, load_config, summarize_config, validate_config};

#[test]
fn load_demo_config() {
    let mut config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    config_path.pop(); // go to crates
    config_path.pop(); // go to repo root
    config_path.push("demos");
    config_path.push("dashboard.yaml");

    if !config_path.exists() {
        eprintln!("Skipping test: demo config not found at {:?}", config_path);
        return;
    }

    let config = load_config(&config_path).expect("Failed to load config");
    validate_config(&config).expect("Validation should succeed");

    let summary = summarize_config(&config);
    assert_eq!(summary.cell_count, config.cells.len());
    assert!(summary.task_count >= 1);

    let mut session = DashboardSession::new(config).expect("session");
    session.simulate(Some(5), Some(3), None).expect("simulate");
    assert_eq!(session.view().history.len(), 5);
}
