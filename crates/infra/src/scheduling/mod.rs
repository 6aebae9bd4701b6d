//! Scheduling infrastructure (§4.10): the two cron job families that drive
//! the lifecycle forward without a human in the loop.
//!
//! Both schedulers follow the same lifecycle discipline: explicit
//! start/stop, a join handle per monitoring task, a `CancellationToken` for
//! graceful shutdown, and timeout wrapping on every scheduler operation.

mod error;
mod ready_to_send;
mod status;
mod test_sweep;

pub use error::{SchedulerError, SchedulerResult};
pub use ready_to_send::ReadyToSendScheduler;
pub use status::{JobStatus, SchedulerStatus};
pub use test_sweep::TestSweepScheduler;
