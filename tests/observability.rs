use std::sync::{Arc, Mutex};

use rowcheck::ProcessingError;
use rowcheck::observability::{
    ProcessingContext, ProcessingObserver, ProcessingOutcome, ProcessingSeverity,
};
use rowcheck::output::MemoryStore;
use rowcheck::service::FileValidationService;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(String, usize)>>,
    failures: Mutex<Vec<(String, ProcessingSeverity)>>,
}

impl ProcessingObserver for RecordingObserver {
    fn on_success(&self, ctx: &ProcessingContext, outcome: ProcessingOutcome) {
        self.successes
            .lock()
            .unwrap()
            .push((ctx.operation.to_string(), outcome.rows));
    }

    fn on_failure(&self, ctx: &ProcessingContext, severity: ProcessingSeverity, _error: &ProcessingError) {
        self.failures
            .lock()
            .unwrap()
            .push((ctx.operation.to_string(), severity));
    }
}

fn observed_service() -> (FileValidationService, Arc<RecordingObserver>) {
    let obs = Arc::new(RecordingObserver::default());
    let svc = FileValidationService::new(Arc::new(MemoryStore::default()))
        .with_observer(obs.clone());
    (svc, obs)
}

#[test]
fn successful_requests_report_operation_and_row_count() {
    let (svc, obs) = observed_service();

    svc.validate_csv(b"a,b\n1,2\n3,4\n").unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![("validate_csv".to_string(), 2)]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn failed_requests_report_error_severity() {
    let (svc, obs) = observed_service();

    let _ = svc.validate_excel(b"not a workbook").unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "validate_excel");
    assert_eq!(failures[0].1, ProcessingSeverity::Error);
    assert!(obs.successes.lock().unwrap().is_empty());
}
