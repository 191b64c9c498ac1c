use std::sync::{Arc, Mutex};

use record_utils::io::{
    load_json_with, LoadContext, LoadObserver, LoadOptions, LoadSeverity, LoadStats,
    TracingObserver,
};
use record_utils::LoadError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<usize>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats.rows);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: Arc<dyn LoadObserver>, alert_at_or_above: LoadSeverity) -> LoadOptions {
    LoadOptions {
        observer: Some(obs),
        alert_at_or_above,
    }
}

#[test]
fn observer_receives_success_with_row_count() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), LoadSeverity::Critical);

    let ds = load_json_with("tests/fixtures/sample.json", &opts).unwrap();

    assert_eq!(obs.successes.lock().unwrap().clone(), vec![ds.row_count()]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), LoadSeverity::Critical);

    // Missing file -> NotFound -> Critical
    let _ = load_json_with("tests/fixtures/does_not_exist.json", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_malformed_content() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), LoadSeverity::Critical);

    // Malformed -> Error severity (not Critical) -> should not alert
    let _ = load_json_with("tests/fixtures/truncated.json", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_malformed_content() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), LoadSeverity::Error);

    let _ = load_json_with("tests/fixtures/truncated.json", &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

/// Overrides only `on_failure`, so alerts go through the trait's default forwarding.
#[derive(Default)]
struct FailureOnlyObserver {
    failures: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for FailureOnlyObserver {
    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }
}

#[test]
fn default_alert_forwards_to_on_failure() {
    let obs = Arc::new(FailureOnlyObserver::default());
    let opts = options_with(obs.clone(), LoadSeverity::Critical);

    load_json_with("tests/fixtures/sample.json", &opts).unwrap();
    let _ = load_json_with("tests/fixtures/does_not_exist.json", &opts).unwrap_err();

    // One report from on_failure, one forwarded from the default on_alert.
    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![LoadSeverity::Critical, LoadSeverity::Critical]
    );
}

#[test]
fn tracing_observer_reports_without_a_subscriber() {
    let opts = options_with(Arc::new(TracingObserver), LoadSeverity::Error);

    assert_eq!(load_json_with("tests/fixtures/sample.json", &opts).unwrap().row_count(), 6);
    let err = load_json_with("tests/fixtures/truncated.json", &opts).unwrap_err();
    assert!(err.to_string().starts_with("invalid json"));
}
