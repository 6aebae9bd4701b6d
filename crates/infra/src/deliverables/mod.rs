//! Deliverable generation (§4.12): the audit page, the outreach email
//! draft, the video script, and the campaign-level send-queue CSV. Plain,
//! readable HTML/text — no templating engine, no styling system.

mod csv_export;
mod generator;

pub use csv_export::{write_send_queue_csv, SendQueueEntry};
pub use generator::{DeliverableGenerator, ProspectDeliverables};
