// Output module - Filtering, deduplication and line output of harvested domains

pub mod dedup;
pub mod sink;

pub use dedup::DedupSet;
pub use sink::ResultSink;
