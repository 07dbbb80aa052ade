pub mod client;
pub mod coordinator;
pub mod http;
pub mod mutation;
pub mod remote;

pub use client::{ProfileCache, PullSummary, SyncClient};
pub use coordinator::{SyncCoordinator, is_temp_id};
pub use http::HttpLogService;
pub use remote::{RemoteLogService, Session};
