pub mod error;
pub mod mirror;
pub mod remote;
pub mod shared;
pub mod sync;

pub use error::MirrorError;
pub use mirror::{ensure_mirror, fetch, reset_remote_refs, restore_remote_refs, FetchSummary, RemoteRefSnapshot};
pub use remote::{Credentials, DEFAULT_REMOTE};
pub use shared::{SharedMirror, DEFAULT_READ_TIMEOUT};
pub use sync::{SyncWorker, DEFAULT_FETCH_INTERVAL};
