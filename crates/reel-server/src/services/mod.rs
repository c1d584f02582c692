//! Business logic services

pub mod activity;
pub mod stats;

pub use activity::ActivityService;
pub use stats::StatsService;
