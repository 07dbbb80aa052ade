pub mod buckets;
pub mod groups;
pub mod summary;

pub use buckets::{Bucket, BucketKey, Metric, Metrics, build_buckets, contribution, totals};
pub use groups::{ExpansionState, TypeFilter, group_by_day};
pub use summary::{Status, WindowSummary, format_elapsed, latest_status, summarize};
