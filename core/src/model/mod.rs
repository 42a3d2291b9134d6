pub mod entry;
pub mod grid;
pub mod month;
pub mod record;
pub mod stats;
