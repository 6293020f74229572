pub mod category;
pub mod dashboard;
pub mod judge;
pub mod metric;
pub mod score;
pub mod submission;
pub mod user;
