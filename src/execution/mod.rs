pub mod record;
pub mod tracker;

pub use record::*;
pub use tracker::ExecutionTracker;
