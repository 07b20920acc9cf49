//! Labor-market signals.
//!
//! - Employment: professional-services headcount, where a decline means
//!   displacement
//! - Job ratio: AI-skill postings relative to traditional-skill postings

mod employment;
mod job_ratio;

pub use employment::{EmploymentConfig, EmploymentExtractor};
pub use job_ratio::JobRatioExtractor;
