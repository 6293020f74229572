pub mod category;
pub mod common;
pub mod dashboard;
pub mod judge;
pub mod metric;
pub mod results;
pub mod score;
pub mod submission;
