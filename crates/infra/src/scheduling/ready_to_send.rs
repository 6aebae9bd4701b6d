//! Weekly ready-to-send promotion scheduler (§4.10): Monday 09:00
//! `Europe/Rome`, job id `monday_ready_to_send`. Promotes every
//! `READY_ASSETS` prospect that satisfies the asset gate to `READY_TO_SEND`,
//! logging and skipping any that don't.

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Europe::Rome;
use prospecting_core::ports::{CampaignRepository, ProspectRepository, Repository};
use prospecting_core::mark_ready_to_send;
use prospecting_domain::{CampaignStatus, ProspectStatus};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::error::{SchedulerError, SchedulerResult};
use super::status::{JobStatus, SchedulerStatus};

const JOB_LABEL: &str = "monday_ready_to_send";
const CRON_EXPR: &str = "0 0 9 * * Mon";
const JOB_TIMEOUT_SECS: u64 = 300;
const START_TIMEOUT_SECS: u64 = 5;
const STOP_TIMEOUT_SECS: u64 = 5;

pub struct ReadyToSendScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    repository: Arc<dyn Repository>,
    task_handle: Option<JoinHandle<()>>,
    job_id: Option<Uuid>,
    cancellation: Option<CancellationToken>,
}

impl ReadyToSendScheduler {
    pub async fn new(repository: Arc<dyn Repository>) -> SchedulerResult<Self> {
        let scheduler =
            JobScheduler::new().await.map_err(|e| SchedulerError::CreationFailed(e.to_string()))?;

        Ok(Self {
            scheduler: Arc::new(RwLock::new(scheduler)),
            repository,
            task_handle: None,
            job_id: None,
            cancellation: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!("starting ready-to-send scheduler");

        let cancel = CancellationToken::new();
        self.cancellation = Some(cancel.clone());

        let job_id = self.register_promotion_job().await?;
        self.job_id = Some(job_id);

        let scheduler = self.scheduler.clone();
        let start_timeout = Duration::from_secs(START_TIMEOUT_SECS);
        tokio::time::timeout(start_timeout, async move {
            let mut sched = scheduler.write().await;
            sched.start().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: START_TIMEOUT_SECS })?
        .map_err(|e| SchedulerError::StartFailed(e.to_string()))?;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("ready-to-send scheduler monitor cancelled");
                }
            }
        });
        self.task_handle = Some(handle);

        info!("ready-to-send scheduler started");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        info!("stopping ready-to-send scheduler");

        if let Some(ref cancel) = self.cancellation {
            cancel.cancel();
        }

        if let Some(job_id) = self.job_id.take() {
            let mut sched = self.scheduler.write().await;
            if let Err(e) = sched.remove(&job_id).await {
                warn!(job = JOB_LABEL, error = %e, "failed to remove job");
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
        info!("ready-to-send scheduler stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.task_handle.is_some()
            && self.cancellation.as_ref().is_some_and(|c| !c.is_cancelled())
    }

    /// Running flag plus, per job, its id, next-run timestamp, and trigger
    /// description (§4.10).
    pub async fn status(&self) -> SchedulerStatus {
        let jobs = match self.job_id {
            Some(job_id) => {
                let mut scheduler = self.scheduler.write().await;
                let next_run = match scheduler.next_tick_for_job(job_id).await {
                    Ok(tick) => tick,
                    Err(e) => {
                        warn!(job = JOB_LABEL, error = %e, "failed to read next tick");
                        None
                    }
                };
                vec![JobStatus {
                    id: JOB_LABEL.to_string(),
                    trigger: CRON_EXPR.to_string(),
                    next_run,
                }]
            }
            None => Vec::new(),
        };
        SchedulerStatus { running: self.is_running(), jobs }
    }

    async fn register_promotion_job(&self) -> SchedulerResult<Uuid> {
        let repository = self.repository.clone();

        let job = Job::new_async_tz(CRON_EXPR, Rome, move |uuid, _lock| {
            let repository = repository.clone();
            Box::pin(async move {
                debug!(job_id = %uuid, job = JOB_LABEL, "ready-to-send job triggered");
                match tokio::time::timeout(
                    Duration::from_secs(JOB_TIMEOUT_SECS),
                    promote_ready_prospects(repository),
                )
                .await
                {
                    Ok(Ok(promoted)) => {
                        info!(job = JOB_LABEL, promoted, "ready-to-send promotion completed");
                    }
                    Ok(Err(e)) => error!(job = JOB_LABEL, error = %e, "ready-to-send promotion failed"),
                    Err(_) => warn!(job = JOB_LABEL, "ready-to-send promotion timed out"),
                }
            })
        })
        .map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;

        let mut scheduler = self.scheduler.write().await;
        let job_id =
            scheduler.add(job).await.map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;
        debug!(job = JOB_LABEL, cron = CRON_EXPR, "ready-to-send job registered");
        Ok(job_id)
    }
}

async fn promote_ready_prospects(repository: Arc<dyn Repository>) -> prospecting_domain::Result<u64> {
    let campaigns = repository.list_campaigns().await?;
    let mut promoted = 0u64;

    for campaign in campaigns.into_iter().filter(|c| c.status == CampaignStatus::Active) {
        let ready_assets =
            repository.list_prospects(&campaign.id, Some(ProspectStatus::ReadyAssets)).await?;

        for mut prospect in ready_assets {
            let mut status = prospect.status;
            match mark_ready_to_send(
                &mut status,
                prospect.video_url.as_deref(),
                prospect.screenshot_url.as_deref(),
                prospect.eligibility_flag,
            ) {
                Ok(()) => {
                    prospect.status = status;
                    prospect.updated_at = chrono::Utc::now();
                    repository.save_prospect(&prospect).await?;
                    promoted += 1;
                }
                Err(e) => debug!(prospect = %prospect.id, error = %e, "not ready for promotion"),
            }
        }
    }

    Ok(promoted)
}

impl Drop for ReadyToSendScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("ReadyToSendScheduler dropped while running; cancelling");
            if let Some(ref cancel) = self.cancellation {
                cancel.cancel();
            }
        }
    }
}
