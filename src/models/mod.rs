pub mod language;
pub mod message;
pub mod settings;
pub mod solution;

pub use language::{extension_for, DETECTABLE_LANGUAGES};
pub use message::{CoordinatorMessage, PushRequest, PushResponse};
pub use settings::{GithubSettings, StoredSettings};
pub use solution::{PageLocation, RemoteFileTarget, Solution, SubmissionObservation};
