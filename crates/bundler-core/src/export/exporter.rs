//! Batched export of a selection into named views.
//!
//! Calls are issued sequentially, one chunk at a time. A failed chunk is
//! logged and recorded in the report; the export always moves on to the next
//! chunk and the next project.

use std::time::Duration;

use super::api::{CreateViewRequest, ViewApi};
use super::batch::ExportBatch;
use super::report::{ChunkOutcome, ChunkReport, ExportReport};
use super::retry;
use crate::config::ExportConfig;
use crate::dataset::Row;
use crate::error::ExportError;

/// Knobs for the export loop.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries per chunk for transient failures
    pub retry_attempts: u32,
    /// Base backoff delay in milliseconds
    pub retry_delay_ms: u64,
    /// User id attached to each view
    pub user_id: Option<u64>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            retry_attempts: config.retry_attempts,
            retry_delay_ms: config.retry_delay_ms,
            user_id: None,
        }
    }
}

/// Pushes selections to a [`ViewApi`].
pub struct Exporter {
    api: Box<dyn ViewApi>,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(api: Box<dyn ViewApi>, options: ExportOptions) -> Self {
        Self { api, options }
    }

    /// Create one view per project (paged at 100 ids) named `name`.
    ///
    /// An empty selection issues no calls and returns an empty report.
    pub async fn export(&self, rows: &[&Row], name: &str) -> ExportReport {
        let batch = ExportBatch::from_rows(rows.iter().copied());
        let mut report = ExportReport::default();
        if batch.is_empty() {
            tracing::info!("Nothing selected, no views created");
            return report;
        }

        let chunks = batch.chunks(name);
        tracing::info!(
            "Exporting {} id(s) from {} project(s) as {} view(s) via {}",
            batch.total_ids(),
            batch.projects().len(),
            chunks.len(),
            self.api.name()
        );

        for chunk in chunks {
            let request =
                CreateViewRequest::for_ids(chunk.project, &chunk.title, chunk.ids, self.options.user_id);

            let outcome = match self.create_with_retry(&request).await {
                Ok(()) => {
                    tracing::info!(
                        "View '{}' has been created in project {} ({} ids)",
                        chunk.title,
                        chunk.project,
                        chunk.ids.len()
                    );
                    ChunkOutcome::Success
                }
                Err(e) => {
                    tracing::error!(
                        "Upload aborted for view '{}' in project {}: {e}",
                        chunk.title,
                        chunk.project
                    );
                    ChunkOutcome::Failure(e.to_string())
                }
            };

            report.push(ChunkReport {
                project: chunk.project,
                chunk_index: chunk.chunk_index,
                title: chunk.title,
                id_count: chunk.ids.len(),
                outcome,
            });
        }

        if report.failed() > 0 {
            tracing::warn!(
                "{} of {} view(s) could not be created",
                report.failed(),
                report.len()
            );
        }
        report
    }

    async fn create_with_retry(&self, request: &CreateViewRequest) -> Result<(), ExportError> {
        let timeout = Duration::from_millis(self.options.timeout_ms);
        let mut last_error = ExportError::Timeout {
            timeout_ms: self.options.timeout_ms,
        };

        for attempt in 0..=self.options.retry_attempts {
            if attempt > 0 {
                let delay = retry::backoff_duration(attempt - 1, self.options.retry_delay_ms);
                tracing::debug!(
                    "Retry {attempt}/{} for view '{}' after {delay:?}",
                    self.options.retry_attempts,
                    request.title()
                );
                tokio::time::sleep(delay).await;
            }

            match tokio::time::timeout(timeout, self.api.create_view(request)).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(e)) => {
                    let retryable = retry::is_retryable(&e);
                    last_error = e;
                    if !retryable {
                        break;
                    }
                }
                Err(_) => {
                    last_error = ExportError::Timeout {
                        timeout_ms: self.options.timeout_ms,
                    };
                }
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records every request and answers with a scripted result per call.
    struct MockApi {
        response_fn: Box<dyn Fn(usize, &CreateViewRequest) -> Result<(), ExportError> + Send + Sync>,
        calls: Arc<Mutex<Vec<(i64, String, usize)>>>,
        delay: Option<Duration>,
    }

    impl MockApi {
        fn new<F>(response_fn: F) -> Self
        where
            F: Fn(usize, &CreateViewRequest) -> Result<(), ExportError> + Send + Sync + 'static,
        {
            Self {
                response_fn: Box::new(response_fn),
                calls: Arc::new(Mutex::new(Vec::new())),
                delay: None,
            }
        }

        fn created() -> Self {
            Self::new(|_, _| Ok(()))
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls_handle(&self) -> Arc<Mutex<Vec<(i64, String, usize)>>> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl ViewApi for MockApi {
        fn name(&self) -> &str {
            "mock"
        }

        async fn create_view(&self, request: &CreateViewRequest) -> Result<(), ExportError> {
            let idx = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((request.project, request.title().to_string(), request.id_count()));
                calls.len() - 1
            };
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            (self.response_fn)(idx, request)
        }
    }

    fn row(id: i64, project: i64) -> Row {
        Row {
            index: id as usize,
            id,
            project,
            x: 0.0,
            y: 0.0,
            color: None,
            extra: vec![],
        }
    }

    fn fast_options() -> ExportOptions {
        ExportOptions {
            timeout_ms: 2000,
            retry_attempts: 0,
            retry_delay_ms: 10,
            user_id: None,
        }
    }

    async fn run(api: MockApi, rows: &[Row], name: &str, options: ExportOptions) -> ExportReport {
        let refs: Vec<&Row> = rows.iter().collect();
        Exporter::new(Box::new(api), options).export(&refs, name).await
    }

    #[tokio::test]
    async fn test_empty_selection_issues_no_calls() {
        let api = MockApi::created();
        let calls = api.calls_handle();
        let report = run(api, &[], "Empty", fast_options()).await;
        assert!(report.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_small_project_single_call() {
        let api = MockApi::created();
        let calls = api.calls_handle();
        let rows = vec![row(1, 4), row(2, 4), row(3, 4)];
        let report = run(api, &rows, "Batch1", fast_options()).await;

        assert_eq!(report.len(), 1);
        assert_eq!(report.chunks()[0].title, "Batch1");
        assert_eq!(report.chunks()[0].id_count, 3);
        assert!(report.chunks()[0].is_success());
        assert_eq!(*calls.lock().unwrap(), vec![(4, "Batch1".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_large_project_is_paged() {
        let api = MockApi::created();
        let calls = api.calls_handle();
        let rows: Vec<Row> = (0..250).map(|i| row(i, 1)).collect();
        let report = run(api, &rows, "Batch1", fast_options()).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], (1, "Batch1 - 0".to_string(), 100));
        assert_eq!(calls[1], (1, "Batch1 - 1".to_string(), 100));
        assert_eq!(calls[2], (1, "Batch1 - 2".to_string(), 50));
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.exported_ids(), 250);
    }

    #[tokio::test]
    async fn test_failed_chunk_does_not_abort_export() {
        let api = MockApi::new(|idx, _| {
            if idx == 0 {
                Err(ExportError::Status {
                    status: 400,
                    body: "{\"detail\":\"bad project\"}".to_string(),
                })
            } else {
                Ok(())
            }
        });
        let calls = api.calls_handle();
        let rows = vec![row(1, 1), row(2, 2), row(3, 2)];
        let report = run(api, &rows, "Mixed", fast_options()).await;

        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(report.len(), 2);
        match &report.chunks()[0].outcome {
            ChunkOutcome::Failure(detail) => assert!(detail.contains("400"), "got {detail}"),
            ChunkOutcome::Success => panic!("Expected first chunk to fail"),
        }
        assert_eq!(report.chunks()[1].project, 2);
        assert!(report.chunks()[1].is_success());
    }

    #[tokio::test]
    async fn test_ok_but_not_created_is_failure() {
        let api = MockApi::new(|_, _| {
            Err(ExportError::Status {
                status: 200,
                body: String::new(),
            })
        });
        let rows = vec![row(1, 1)];
        let report = run(api, &rows, "v", fast_options()).await;
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_and_export_continues() {
        let api = MockApi::created().with_delay(Duration::from_millis(500));
        let calls = api.calls_handle();
        let options = ExportOptions {
            timeout_ms: 20,
            ..fast_options()
        };
        let rows = vec![row(1, 1), row(2, 2)];
        let report = run(api, &rows, "Slow", options).await;

        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(report.failed(), 2);
        match &report.chunks()[0].outcome {
            ChunkOutcome::Failure(detail) => assert!(detail.contains("Timeout"), "got {detail}"),
            ChunkOutcome::Success => panic!("Expected timeout"),
        }
    }

    #[tokio::test]
    async fn test_transient_failure_retried_when_enabled() {
        let api = MockApi::new(|idx, _| {
            if idx == 0 {
                Err(ExportError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        });
        let calls = api.calls_handle();
        let options = ExportOptions {
            retry_attempts: 2,
            ..fast_options()
        };
        let report = run(api, &[row(1, 1)], "Retry", options).await;

        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(report.succeeded(), 1);
    }

    #[tokio::test]
    async fn test_auth_failure_not_retried() {
        let api = MockApi::new(|_, _| {
            Err(ExportError::Status {
                status: 401,
                body: "invalid token".to_string(),
            })
        });
        let calls = api.calls_handle();
        let options = ExportOptions {
            retry_attempts: 3,
            ..fast_options()
        };
        let report = run(api, &[row(1, 1)], "Auth", options).await;

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn test_user_id_is_forwarded() {
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        let api = MockApi::new(move |_, request| {
            *seen_clone.lock().unwrap() = request.user;
            Ok(())
        });
        let options = ExportOptions {
            user_id: Some(5),
            ..fast_options()
        };
        run(api, &[row(1, 1)], "User", options).await;
        assert_eq!(*seen.lock().unwrap(), Some(5));
    }
}
