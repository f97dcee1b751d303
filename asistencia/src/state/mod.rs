pub mod attendance;
pub mod drill_down;
pub mod load;
pub mod stats;
