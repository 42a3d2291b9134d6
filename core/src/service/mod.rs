pub mod aggregator;
pub mod classifier;
pub mod compliance;
pub mod detect;
pub mod layout;
