pub mod policy;
pub mod scale;
pub mod stats;
