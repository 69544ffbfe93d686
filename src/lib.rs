pub mod api;
pub mod branch;
pub mod config;
pub mod error;
pub mod menu;
pub mod output;
pub mod prompt;
pub mod repository;
pub mod workflow;

pub use api::{BitbucketApi, BitbucketClient};
pub use config::{Config, ConfigStore};
pub use error::{BbprError, Result};
