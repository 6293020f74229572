pub mod categories;
pub mod dashboard;
pub mod health;
pub mod judge_panel;
pub mod judges;
pub mod metrics;
pub mod scores;
pub mod submissions;
