pub mod category;
pub mod judge_assignment;
pub mod metric;
pub mod metric_value;
pub mod score;
pub mod submission;
pub mod user;

pub use category::{Category, CategoryStatus};
pub use judge_assignment::JudgeAssignment;
pub use metric::{Metric, MetricType};
pub use metric_value::MetricValue;
pub use score::Score;
pub use submission::Submission;
pub use user::{User, UserRole};
