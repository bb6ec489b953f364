//! Classification of holdings into buckets.

mod maturity;

pub use maturity::{bucket_by_maturity, BucketMetrics, MaturityBucket, MaturityDistribution};
