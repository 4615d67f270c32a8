mod feed;
mod series;

pub use feed::{FeedRecord, Metric};
pub use series::CaseSeries;
