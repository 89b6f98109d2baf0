//! Cron-based task scheduler for recurring tasks
//!
//! Drives the nightly weather cache refresh. Uses `tokio-cron-scheduler`
//! for cron-based scheduling; tasks run on the tokio runtime, independent of
//! request-handling work.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Invalid cron expression
    #[error("Invalid cron expression: {0}")]
    InvalidCronExpression(String),

    /// Task not found
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Internal scheduler error
    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

impl From<JobSchedulerError> for SchedulerError {
    fn from(err: JobSchedulerError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Statistics for a scheduled task
#[derive(Debug, Clone)]
pub struct TaskStats {
    /// Task name
    pub name: String,
    /// Cron expression
    pub cron_expression: String,
    /// Number of successful executions
    pub success_count: u64,
    /// Number of failed executions
    pub failure_count: u64,
    /// Last execution time
    pub last_run: Option<DateTime<Utc>>,
    /// Last error message
    pub last_error: Option<String>,
    /// Whether the task is paused
    pub paused: bool,
}

/// Internal task metadata
struct TaskMetadata {
    name: String,
    cron_expression: String,
    job_id: Uuid,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_run: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
    paused: AtomicBool,
}

impl TaskMetadata {
    fn new(name: String, cron_expression: String, job_id: Uuid) -> Self {
        Self {
            name,
            cron_expression,
            job_id,
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            last_run: RwLock::new(None),
            last_error: RwLock::new(None),
            paused: AtomicBool::new(false),
        }
    }

    fn to_stats(&self) -> TaskStats {
        TaskStats {
            name: self.name.clone(),
            cron_expression: self.cron_expression.clone(),
            success_count: self.success_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
            last_run: *self.last_run.read(),
            last_error: self.last_error.read().clone(),
            paused: self.paused.load(Ordering::Relaxed),
        }
    }

    fn record_success(&self) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
        *self.last_run.write() = Some(Utc::now());
    }

    fn record_failure(&self, error: String) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        *self.last_run.write() = Some(Utc::now());
        *self.last_error.write() = Some(error);
    }
}

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Whether to start the scheduler immediately
    pub auto_start: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { auto_start: true }
    }
}

/// Predefined cron expressions for common schedules
pub mod schedules {
    /// Every second (useful for tests)
    pub const EVERY_SECOND: &str = "* * * * * *";
    /// Every minute
    pub const EVERY_MINUTE: &str = "0 * * * * *";
    /// Every hour
    pub const HOURLY: &str = "0 0 * * * *";
    /// Every day at 01:00 (nightly weather refresh)
    pub const DAILY_1AM: &str = "0 0 1 * * *";
    /// Every day at midnight
    pub const DAILY_MIDNIGHT: &str = "0 0 0 * * *";
}

/// Task scheduler for recurring background tasks
pub struct TaskScheduler {
    scheduler: AsyncMutex<JobScheduler>,
    tasks: Arc<RwLock<HashMap<String, Arc<TaskMetadata>>>>,
    running: Arc<AtomicBool>,
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("running", &self.running.load(Ordering::Relaxed))
            .field("task_count", &self.tasks.read().len())
            .finish_non_exhaustive()
    }
}

impl TaskScheduler {
    /// Create a new task scheduler
    #[instrument(skip_all)]
    pub async fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new().await?;

        let instance = Self {
            scheduler: AsyncMutex::new(scheduler),
            tasks: Arc::new(RwLock::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
        };

        if config.auto_start {
            instance.start().await?;
        }

        info!("Task scheduler initialized");
        Ok(instance)
    }

    /// Start the scheduler
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<(), SchedulerError> {
        if self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already running");
            return Ok(());
        }

        self.scheduler.lock().await.start().await?;
        self.running.store(true, Ordering::Relaxed);
        info!("Task scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        if !self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already stopped");
            return Ok(());
        }

        self.scheduler.lock().await.shutdown().await?;
        self.running.store(false, Ordering::Relaxed);
        info!("Task scheduler stopped");
        Ok(())
    }

    /// Check if the scheduler is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Add a scheduled task
    ///
    /// # Arguments
    /// * `name` - Unique task name
    /// * `cron_expression` - Cron expression (6 fields: sec min hour day month weekday)
    /// * `task` - Async task function
    #[instrument(skip(self, task))]
    pub async fn add_task<F, Fut>(
        &self,
        name: &str,
        cron_expression: &str,
        task: F,
    ) -> Result<(), SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), String>> + Send + 'static,
    {
        // Validate cron expression before handing it to the scheduler
        cron_expression.parse::<cron::Schedule>().map_err(|e| {
            SchedulerError::InvalidCronExpression(format!("{cron_expression}: {e}"))
        })?;

        let name_clone = name.to_string();
        let tasks = Arc::clone(&self.tasks);

        let job = Job::new_async(cron_expression, move |_uuid, _lock| {
            let name = name_clone.clone();
            let tasks = Arc::clone(&tasks);
            let task_future = task();

            Box::pin(async move {
                if let Some(metadata) = tasks.read().get(&name) {
                    if metadata.paused.load(Ordering::Relaxed) {
                        debug!(task = %name, "Task is paused, skipping execution");
                        return;
                    }
                }

                debug!(task = %name, "Starting scheduled task");
                match task_future.await {
                    Ok(()) => {
                        if let Some(metadata) = tasks.read().get(&name) {
                            metadata.record_success();
                        }
                        info!(task = %name, "Task completed successfully");
                    },
                    Err(e) => {
                        if let Some(metadata) = tasks.read().get(&name) {
                            metadata.record_failure(e.clone());
                        }
                        error!(task = %name, error = %e, "Task failed");
                    },
                }
            })
        })
        .map_err(|e| SchedulerError::InvalidCronExpression(e.to_string()))?;

        let job_id = job.guid();
        self.scheduler.lock().await.add(job).await?;

        let metadata = Arc::new(TaskMetadata::new(
            name.to_string(),
            cron_expression.to_string(),
            job_id,
        ));
        self.tasks.write().insert(name.to_string(), metadata);

        info!(task = %name, cron = %cron_expression, "Task scheduled");
        Ok(())
    }

    /// Remove a scheduled task
    #[instrument(skip(self))]
    pub async fn remove_task(&self, name: &str) -> Result<(), SchedulerError> {
        let metadata = self
            .tasks
            .write()
            .remove(name)
            .ok_or_else(|| SchedulerError::TaskNotFound(name.to_string()))?;

        self.scheduler.lock().await.remove(&metadata.job_id).await?;
        info!(task = %name, "Task removed");
        Ok(())
    }

    /// Pause a task (keeps it scheduled but skips executions)
    #[instrument(skip(self))]
    pub fn pause_task(&self, name: &str) -> Result<(), SchedulerError> {
        let tasks = self.tasks.read();
        let metadata = tasks
            .get(name)
            .ok_or_else(|| SchedulerError::TaskNotFound(name.to_string()))?;

        metadata.paused.store(true, Ordering::Relaxed);
        info!(task = %name, "Task paused");
        Ok(())
    }

    /// Resume a paused task
    #[instrument(skip(self))]
    pub fn resume_task(&self, name: &str) -> Result<(), SchedulerError> {
        let tasks = self.tasks.read();
        let metadata = tasks
            .get(name)
            .ok_or_else(|| SchedulerError::TaskNotFound(name.to_string()))?;

        metadata.paused.store(false, Ordering::Relaxed);
        info!(task = %name, "Task resumed");
        Ok(())
    }

    /// Get statistics for a specific task
    #[must_use]
    pub fn get_task_stats(&self, name: &str) -> Option<TaskStats> {
        let tasks = self.tasks.read();
        tasks.get(name).map(|m| m.to_stats())
    }

    /// List all scheduled task names
    #[must_use]
    pub fn list_tasks(&self) -> Vec<String> {
        self.tasks.read().keys().cloned().collect()
    }

    /// Get the number of scheduled tasks
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.read().len()
    }
}
