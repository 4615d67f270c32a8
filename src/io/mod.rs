mod feed_json;
mod fetch;

pub use feed_json::{parse_feed, read_feed_file, series_from_records, write_feed_file};
pub use fetch::{fetch_feed, DEFAULT_FEED_URL};
