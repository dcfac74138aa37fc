//! Resource Groups Tagging
//!
//! Lists tagged resources, optionally filtered by tags or resource type.
//!
//! # Module Structure
//!
//! - [`filter`] - Filter criteria and the `GetResources` request shape
//! - [`lister`] - The [`TaggingApi`] seam and the paginating [`ResourceLister`]
//! - [`sdk`] - [`TaggingApi`] backed by the AWS SDK
//!
//! # Example
//!
//! ```ignore
//! use tagfinder::tags::{AwsSettings, ResourceFilter, ResourceLister};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let lister = ResourceLister::from_env(&AwsSettings::default()).await?;
//!     let filter = ResourceFilter::new().with_tag("Name", "test");
//!     for resource in lister.list_resources(&filter).await? {
//!         println!("{}: {:?}", resource.arn, resource.tags);
//!     }
//!     Ok(())
//! }
//! ```

pub mod filter;
pub mod lister;
pub mod sdk;

pub use filter::{GetResourcesRequest, ResourceFilter, TagFilter};
pub use lister::{
    Resource, ResourceLister, ResourcePage, ResourceTagMapping, TagEntry, TaggingApi,
};
pub use sdk::{AwsSettings, SdkTaggingClient};
