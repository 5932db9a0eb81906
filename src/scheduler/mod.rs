//! Background job scheduler
//!
//! Each registered job runs on its own tokio task: once at start, then
//! every `interval` after a success or `retry_delay` after a failure. A
//! job that errors or panics is logged and retried without touching the
//! other jobs. `stop` signals every task and waits for them to finish.


use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct JobSpec {
    job: Arc<dyn Job>,
    interval: Duration,
    retry_delay: Duration,
}

impl JobSpec {
    pub fn new(job: Arc<dyn Job>, interval: Duration, retry_delay: Duration) -> Self {
        Self {
            job,
            interval,
            retry_delay,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobStatus {
    pub name: String,
    pub interval_secs: u64,
    pub retry_secs: u64,
    pub running: bool,
    pub runs: u64,
    pub failures: u64,
    pub last_run: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Shared, read-mostly view of every job's status
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    inner: Arc<RwLock<BTreeMap<String, JobStatus>>>,
}

impl JobBoard {
    pub fn snapshot(&self) -> Vec<JobStatus> {
        self.inner.read().values().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<JobStatus> {
        self.inner.read().get(name).cloned()
    }

    fn register(&self, spec: &JobSpec) {
        self.inner.write().insert(
            spec.job.name().to_string(),
            JobStatus {
                name: spec.job.name().to_string(),
                interval_secs: spec.interval.as_secs(),
                retry_secs: spec.retry_delay.as_secs(),
                ..JobStatus::default()
            },
        );
    }

    fn update(&self, name: &str, f: impl FnOnce(&mut JobStatus)) {
        if let Some(status) = self.inner.write().get_mut(name) {
            f(status);
        }
    }

    fn record_success(&self, name: &str) {
        let now = Utc::now();
        self.update(name, |s| {
            s.runs += 1;
            s.last_run = Some(now);
            s.last_success = Some(now);
        });
    }

    fn record_failure(&self, name: &str, reason: String) {
        self.update(name, |s| {
            s.runs += 1;
            s.failures += 1;
            s.last_run = Some(Utc::now());
            s.last_error = Some(reason);
        });
    }

    fn set_running(&self, name: &str, running: bool) {
        self.update(name, |s| s.running = running);
    }
}

pub struct JobScheduler {
    specs: Vec<JobSpec>,
    board: JobBoard,
    shutdown: Option<watch::Sender<bool>>,
    handles: Vec<JoinHandle<()>>,
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScheduler {
    pub fn new() -> Self {
        Self::with_board(JobBoard::default())
    }

    /// Report into an existing board, e.g. one already held by the API state
    pub fn with_board(board: JobBoard) -> Self {
        Self {
            specs: Vec::new(),
            board,
            shutdown: None,
            handles: Vec::new(),
        }
    }

    pub fn register(&mut self, spec: JobSpec) {
        self.board.register(&spec);
        self.specs.push(spec);
    }

    pub fn board(&self) -> JobBoard {
        self.board.clone()
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Spawn one task per job; calling twice is a no-op
    pub fn start(&mut self) {
        if self.is_running() {
            warn!("Scheduler already running");
            return;
        }

        let (tx, rx) = watch::channel(false);
        for spec in &self.specs {
            let spec = spec.clone();
            let board = self.board.clone();
            let rx = rx.clone();
            self.handles.push(tokio::spawn(run_job(spec, board, rx)));
        }
        self.shutdown = Some(tx);
        info!("⏱️ Scheduler started with {} jobs", self.specs.len());
    }

    /// Signal all jobs and wait for their tasks to exit
    pub async fn stop(&mut self) {
        let Some(tx) = self.shutdown.take() else {
            return;
        };
        let _ = tx.send(true);

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!("Job task ended abnormally: {}", e);
            }
        }
        info!("Scheduler stopped");
    }
}

async fn run_job(spec: JobSpec, board: JobBoard, mut shutdown: watch::Receiver<bool>) {
    let name = spec.job.name().to_string();
    board.set_running(&name, true);

    loop {
        if *shutdown.borrow() {
            break;
        }

        // Run on a child task so a panic is contained to this iteration
        let job = spec.job.clone();
        let outcome = tokio::spawn(async move { job.run().await }).await;

        let delay = match outcome {
            Ok(Ok(())) => {
                board.record_success(&name);
                spec.interval
            }
            Ok(Err(e)) => {
                error!("Job {} failed: {:#}; retrying in {:?}", name, e, spec.retry_delay);
                board.record_failure(&name, e.to_string());
                spec.retry_delay
            }
            Err(e) => {
                error!("Job {} panicked: {}; retrying in {:?}", name, e, spec.retry_delay);
                board.record_failure(&name, format!("panicked: {}", e));
                spec.retry_delay
            }
        };

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    board.set_running(&name, false);
    info!("Job {} stopped", name);
}
