//! Mock attachment transport for deterministic testing.
//!
//! Records every call and supports scripted failures and progress
//! sequences, so lifecycle tests run without a server.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use watchdesk_core::models::uploads::{RawUploadResponse, StagedFile, StoredUpload};
use watchdesk_core::{AttachmentTransport, Error, ProgressFn, Result};

/// Mock transport with a call log and scripted outcomes.
#[derive(Clone)]
pub struct MockTransport {
    config: Arc<MockConfig>,
    /// Shared across clones so tests can lift a scripted failure after
    /// handing the transport to the tray.
    fail_names: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    uploads: Arc<Mutex<u64>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    fail_deletes: bool,
    /// Progress ticks reported for a successful upload.
    progress_script: Vec<u8>,
    /// Progress ticks reported before a scripted failure.
    failure_progress: Vec<u8>,
    url_base: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            fail_deletes: false,
            progress_script: vec![30, 70, 100],
            failure_progress: vec![30],
            url_base: "https://cdn.mock".to_string(),
        }
    }
}

/// One recorded transport call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub target: String,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            fail_names: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            uploads: Arc::new(Mutex::new(0)),
        }
    }

    /// Script a failure for every upload of a file with this name.
    pub fn with_failing_upload(self, name: impl Into<String>) -> Self {
        self.fail_names.lock().unwrap().insert(name.into());
        self
    }

    /// Allow a previously scripted failure to succeed on retry.
    pub fn clear_failing_upload(&self, name: &str) {
        self.fail_names.lock().unwrap().remove(name);
    }

    /// Make remote deletes fail.
    pub fn with_failing_deletes(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_deletes = true;
        self
    }

    /// Set the progress percentages reported for successful uploads.
    pub fn with_progress_script(mut self, script: Vec<u8>) -> Self {
        Arc::make_mut(&mut self.config).progress_script = script;
        self
    }

    /// Set the progress percentages reported before a scripted failure.
    pub fn with_failure_progress(mut self, script: Vec<u8>) -> Self {
        Arc::make_mut(&mut self.config).failure_progress = script;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upload_call_count(&self) -> usize {
        self.count("upload")
    }

    pub fn delete_call_count(&self) -> usize {
        self.count("delete")
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log(&self, operation: &str, target: &str) {
        self.calls.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            target: target.to_string(),
        });
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentTransport for MockTransport {
    async fn upload(&self, file: &StagedFile, progress: ProgressFn) -> Result<StoredUpload> {
        self.log("upload", &file.name);

        if self.fail_names.lock().unwrap().contains(&file.name) {
            for pct in &self.config.failure_progress {
                progress(*pct);
            }
            return Err(Error::Upload("simulated upload failure".to_string()));
        }

        for pct in &self.config.progress_script {
            progress(*pct);
        }

        let n = {
            let mut uploads = self.uploads.lock().unwrap();
            *uploads += 1;
            *uploads
        };
        Ok(StoredUpload::from_raw(RawUploadResponse {
            url: Some(format!("{}/{}", self.config.url_base, file.name)),
            id: Some(format!("mock-{}", n)),
            file_name: Some(file.name.clone()),
            size: Some(file.size() as u64),
            ..Default::default()
        }))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.log("delete", id);
        if self.config.fail_deletes {
            return Err(Error::Upload("simulated delete failure".to_string()));
        }
        Ok(())
    }
}
