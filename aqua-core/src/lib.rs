//! Region catalogue and household water-usage estimator.

pub mod activity;
pub mod dashboard;
pub mod error;
pub mod region;
pub mod stress;
pub mod usage;
