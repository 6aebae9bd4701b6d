//! Test sweep scheduler (§4.10): Wed/Fri/Sun × 09:00/13:00/20:30
//! `Europe/Rome`, one cron job per (day, time) pair. Each firing enumerates
//! active campaigns and runs the full test sweep with no prospect filter.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Europe::Rome;
use prospecting_core::ports::{CampaignRepository, Repository};
use prospecting_core::TestRunner;
use prospecting_domain::CampaignStatus;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::error::{SchedulerError, SchedulerResult};
use super::status::{JobStatus, SchedulerStatus};

const SWEEP_DAYS: [(&str, &str); 3] = [("wed", "Wed"), ("fri", "Fri"), ("sun", "Sun")];
const SWEEP_TIMES: [(u8, u8); 3] = [(9, 0), (13, 0), (20, 30)];
const JOB_TIMEOUT_SECS: u64 = 600;
const START_TIMEOUT_SECS: u64 = 5;
const STOP_TIMEOUT_SECS: u64 = 5;

/// Runs the scheduled test sweep across every `(day, time)` pair in the
/// fixed grid from §4.10.
pub struct TestSweepScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    repository: Arc<dyn Repository>,
    runner: Arc<TestRunner>,
    task_handle: Option<JoinHandle<()>>,
    job_ids: HashMap<String, (Uuid, String)>,
    cancellation: Option<CancellationToken>,
}

impl TestSweepScheduler {
    pub async fn new(
        repository: Arc<dyn Repository>,
        runner: Arc<TestRunner>,
    ) -> SchedulerResult<Self> {
        let scheduler =
            JobScheduler::new().await.map_err(|e| SchedulerError::CreationFailed(e.to_string()))?;

        Ok(Self {
            scheduler: Arc::new(RwLock::new(scheduler)),
            repository,
            runner,
            task_handle: None,
            job_ids: HashMap::new(),
            cancellation: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!("starting test sweep scheduler");

        let cancel = CancellationToken::new();
        self.cancellation = Some(cancel.clone());

        for (day_label, cron_day) in SWEEP_DAYS {
            for (hour, minute) in SWEEP_TIMES {
                let job_label = format!("ia_run_{day_label}_{hour:02}{minute:02}");
                let job_id = self.register_sweep_job(&job_label, cron_day, hour, minute).await?;
                let cron_expr = format!("0 {minute} {hour} * * {cron_day}");
                self.job_ids.insert(job_label, (job_id, cron_expr));
            }
        }

        let scheduler = self.scheduler.clone();
        let start_timeout = Duration::from_secs(START_TIMEOUT_SECS);
        tokio::time::timeout(start_timeout, async move {
            let mut sched = scheduler.write().await;
            sched.start().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: START_TIMEOUT_SECS })?
        .map_err(|e| SchedulerError::StartFailed(e.to_string()))?;

        let scheduler = self.scheduler.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("test sweep scheduler monitor cancelled");
                }
            }
            drop(scheduler);
        });
        self.task_handle = Some(handle);

        info!(jobs = self.job_ids.len(), "test sweep scheduler started");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        info!("stopping test sweep scheduler");

        if let Some(ref cancel) = self.cancellation {
            cancel.cancel();
        }

        for (label, (job_id, _)) in self.job_ids.drain() {
            let mut sched = self.scheduler.write().await;
            if let Err(e) = sched.remove(&job_id).await {
                warn!(job = %label, error = %e, "failed to remove job");
            }
        }

        let scheduler = self.scheduler.clone();
        let stop_timeout = Duration::from_secs(STOP_TIMEOUT_SECS);
        tokio::time::timeout(stop_timeout, async move {
            let mut sched = scheduler.write().await;
            sched.shutdown().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: STOP_TIMEOUT_SECS })?
        .map_err(|e| SchedulerError::StopFailed(e.to_string()))?;

        if let Some(handle) = self.task_handle.take() {
            tokio::time::timeout(Duration::from_secs(5), handle)
                .await
                .map_err(|_| SchedulerError::Timeout { seconds: 5 })?
                .map_err(|e| SchedulerError::TaskJoinFailed(e.to_string()))?;
        }

        self.cancellation = None;
        info!("test sweep scheduler stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.task_handle.is_some()
            && self.cancellation.as_ref().is_some_and(|c| !c.is_cancelled())
    }

    /// Running flag plus, per job, its id, next-run timestamp, and trigger
    /// description (§4.10).
    pub async fn status(&self) -> SchedulerStatus {
        let mut scheduler = self.scheduler.write().await;
        let mut jobs = Vec::with_capacity(self.job_ids.len());
        for (label, (job_id, cron_expr)) in &self.job_ids {
            let next_run = match scheduler.next_tick_for_job(*job_id).await {
                Ok(tick) => tick,
                Err(e) => {
                    warn!(job = %label, error = %e, "failed to read next tick");
                    None
                }
            };
            jobs.push(JobStatus { id: label.clone(), trigger: cron_expr.clone(), next_run });
        }
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        SchedulerStatus { running: self.is_running(), jobs }
    }

    async fn register_sweep_job(
        &self,
        job_label: &str,
        cron_day: &str,
        hour: u8,
        minute: u8,
    ) -> SchedulerResult<Uuid> {
        let cron_expr = format!("0 {minute} {hour} * * {cron_day}");
        let repository = self.repository.clone();
        let runner = self.runner.clone();
        let label = job_label.to_string();

        let job = Job::new_async_tz(cron_expr.as_str(), Rome, move |uuid, _lock| {
            let repository = repository.clone();
            let runner = runner.clone();
            let label = label.clone();
            Box::pin(async move {
                debug!(job_id = %uuid, job = %label, "test sweep job triggered");
                match tokio::time::timeout(
                    Duration::from_secs(JOB_TIMEOUT_SECS),
                    run_sweep(repository, runner),
                )
                .await
                {
                    Ok(Ok(summary)) => {
                        info!(job = %label, processed = summary as u64, "test sweep completed");
                    }
                    Ok(Err(e)) => error!(job = %label, error = %e, "test sweep failed"),
                    Err(_) => warn!(job = %label, "test sweep timed out"),
                }
            })
        })
        .map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;

        let mut scheduler = self.scheduler.write().await;
        let job_id =
            scheduler.add(job).await.map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;
        debug!(job = %job_label, cron = %cron_expr, "test sweep job registered");
        Ok(job_id)
    }
}

async fn run_sweep(
    repository: Arc<dyn Repository>,
    runner: Arc<TestRunner>,
) -> prospecting_domain::Result<usize> {
    let campaigns = repository.list_campaigns().await?;
    let mut processed = 0;
    for campaign in campaigns.into_iter().filter(|c| c.status == CampaignStatus::Active) {
        match runner.run_for_campaign(&campaign.id, None, false).await {
            Ok(summary) => processed += summary.processed,
            Err(e) => error!(campaign = %campaign.id, error = %e, "campaign sweep failed"),
        }
    }
    Ok(processed)
}

impl Drop for TestSweepScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("TestSweepScheduler dropped while running; cancelling");
            if let Some(ref cancel) = self.cancellation {
                cancel.cancel();
            }
        }
    }
}
