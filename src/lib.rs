pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod error;
pub mod github {
    pub mod pull;
}
pub mod output;
pub mod run;
pub mod window;

pub use error::FetchError;
pub use github::pull::{PullRequestFetcher, PullRequestRecord};
pub use window::DateRange;
