pub mod credentials;
pub mod lifecycle;
pub mod metric_values;
pub mod scoring;
pub mod weights;
