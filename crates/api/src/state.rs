//! Process-wide dependency injection (§4.11, §5): one `AppState` wiring the
//! repository, the adapter registry, the test runner, the deliverable
//! generator, and both background schedulers behind handles handlers can
//! share cheaply.

use std::path::PathBuf;
use std::sync::Arc;

use prospecting_core::ports::Repository;
use prospecting_core::test_runner::TestRunner;
use prospecting_core::ModelAdapterRegistry;
use prospecting_domain::{Config, ProspectingError, Result};
use prospecting_infra::{
    AdapterRegistry, DbManager, DeliverableGenerator, HttpClient, ReadyToSendScheduler,
    SchedulerStatus, SqliteRepository, TestSweepScheduler,
};
use tokio::sync::Mutex;

const DB_POOL_SIZE: u32 = 8;
const SEND_QUEUE_DIR: &str = "send_queue";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn Repository>,
    pub registry: Arc<dyn ModelAdapterRegistry>,
    pub runner: Arc<TestRunner>,
    pub generator: Arc<DeliverableGenerator>,
    pub test_sweep: Arc<Mutex<TestSweepScheduler>>,
    pub ready_to_send: Arc<Mutex<ReadyToSendScheduler>>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let db = DbManager::new(&config.db_path, DB_POOL_SIZE)?;
        db.run_migrations()?;
        let repository: Arc<dyn Repository> = Arc::new(SqliteRepository::new(Arc::new(db)));

        let http = HttpClient::new()?;
        let registry: Arc<dyn ModelAdapterRegistry> =
            Arc::new(AdapterRegistry::new(http, &config));

        let runner = Arc::new(TestRunner::new(
            repository.clone(),
            registry.clone(),
            config.testing_stale_after,
        ));

        let generator = Arc::new(DeliverableGenerator::new(PathBuf::from(SEND_QUEUE_DIR)));

        let test_sweep = TestSweepScheduler::new(repository.clone(), runner.clone())
            .await
            .map_err(ProspectingError::from)?;
        let ready_to_send = ReadyToSendScheduler::new(repository.clone())
            .await
            .map_err(ProspectingError::from)?;

        Ok(Self {
            config,
            repository,
            registry,
            runner,
            generator,
            test_sweep: Arc::new(Mutex::new(test_sweep)),
            ready_to_send: Arc::new(Mutex::new(ready_to_send)),
        })
    }

    /// Starts both background schedulers. Called once at process startup.
    pub async fn start_schedulers(&self) -> Result<()> {
        self.test_sweep.lock().await.start().await.map_err(ProspectingError::from)?;
        self.ready_to_send.lock().await.start().await.map_err(ProspectingError::from)?;
        Ok(())
    }

    /// Snapshot used by the campaign status endpoint (§4.10, §6): per
    /// scheduler, whether it's running plus each job's id, next-run
    /// timestamp, and trigger description.
    pub async fn scheduler_snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            test_sweep: self.test_sweep.lock().await.status().await,
            ready_to_send: self.ready_to_send.lock().await.status().await,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SchedulerSnapshot {
    pub test_sweep: SchedulerStatus,
    pub ready_to_send: SchedulerStatus,
}
