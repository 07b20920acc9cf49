//! Adoption signals: public attention and builder activity around AI.

mod github;
mod trends;

pub use github::GithubExtractor;
pub use trends::{TrendsConfig, TrendsExtractor};
