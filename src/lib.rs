//! tagfinder
//!
//! Finds AWS resources by tag or service through the Resource Groups Tagging
//! API and parses Amazon Resource Names.
//!
//! - [`arn`] - ARN parsing and lossless re-serialization
//! - [`tags`] - Filtered, paginated resource listing
//! - [`config`] - Persisted user defaults
//! - [`output`] - Text / JSON / YAML rendering
//! - [`error`] - Error types

pub mod arn;
pub mod config;
pub mod error;
pub mod output;
pub mod tags;

pub use arn::{Arn, ResourceDelimiter};
pub use error::{describe_error, ArnError, TagsError};
pub use tags::{AwsSettings, Resource, ResourceFilter, ResourceLister, TaggingApi};
