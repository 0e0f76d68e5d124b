pub mod submission_flow;
pub mod sync_flow;

pub use submission_flow::{DetectionHandle, SubmissionFlow};
pub use sync_flow::{run_sync, SyncOutcome};
