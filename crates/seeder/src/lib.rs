pub mod admin;
pub mod error;
pub mod sample;

pub use admin::{AdminAccount, check_admin, seed_admin};
pub use error::{Result, SeederError};
pub use sample::{SampleOutcome, sample_category_request, seed_sample_category};
