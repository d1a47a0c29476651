pub mod line;
pub mod sampler;
pub mod stats;

pub use line::{DragState, Endpoint, ProfileLine};
pub use sampler::{sample, sample_count, Profile, ProfileSample};
pub use stats::ProfileStats;
