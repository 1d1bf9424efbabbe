//! A storage layer with a checkpoint in front of each write.

use moonpool_check::{BoxError, FaultRegistry, is_fault, prob};
use std::collections::HashMap;

struct Store {
    faults: FaultRegistry,
    rows: HashMap<u32, String>,
    retries: u32,
}

impl Store {
    fn new(faults: FaultRegistry) -> Self {
        Self {
            faults,
            rows: HashMap::new(),
            retries: 0,
        }
    }

    fn write(&mut self, key: u32, value: &str) -> Result<(), BoxError> {
        self.faults.check("db-write")?;
        self.rows.insert(key, value.to_string());
        Ok(())
    }

    fn write_with_retry(&mut self, key: u32, value: &str, attempts: u32) -> Result<(), BoxError> {
        let mut last = None;
        for _ in 0..attempts {
            match self.write(key, value) {
                Ok(()) => return Ok(()),
                Err(err) if is_fault(&*err) => {
                    self.retries += 1;
                    last = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last.unwrap_or_else(|| "no attempts made".into()))
    }
}

#[test]
fn test_db_write_never_faults_at_zero() {
    let faults = FaultRegistry::new();
    faults.configure("db-write", [prob(0.0)]);
    let mut store = Store::new(faults.clone());

    for key in 0..100 {
        assert!(store.write(key, "row").is_ok());
    }
    assert_eq!(store.rows.len(), 100);
    assert_eq!(faults.stats("db-write").map(|s| s.skipped), Some(100));
}

#[test]
fn test_db_write_faults_at_one() {
    let faults = FaultRegistry::new();
    faults.configure("db-write", [prob(1.0)]);
    let mut store = Store::new(faults.clone());

    let failures = (0..100)
        .filter(|&key| match store.write(key, "row") {
            Err(err) => is_fault(&*err),
            Ok(()) => false,
        })
        .count();
    assert!(failures >= 99, "failures: {}", failures);
    assert!(store.rows.len() <= 1);
}

#[test]
fn test_retry_path_is_exercised() {
    let faults = FaultRegistry::new();
    faults.configure("db-write", [prob(0.5), moonpool_check::seed(8)]);
    let mut store = Store::new(faults.clone());

    let mut written = 0;
    for key in 0..200 {
        if store.write_with_retry(key, "row", 10).is_ok() {
            written += 1;
        }
    }

    assert!(store.retries > 0, "retry path never ran");
    assert!(written >= 195, "written: {}", written);
    assert_eq!(store.rows.len(), written);
}

#[test]
fn test_unconfigured_store_is_untouched() {
    let mut store = Store::new(FaultRegistry::new());
    for key in 0..100 {
        store.write_with_retry(key, "row", 1).expect("no faults configured");
    }
    assert_eq!(store.retries, 0);
}
