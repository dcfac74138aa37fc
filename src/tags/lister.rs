//! Resource Lister
//!
//! Drives `GetResources` pagination to completion and normalizes each page
//! into flat [`Resource`] records.

use super::filter::{GetResourcesRequest, ResourceFilter};
use super::sdk::SdkTaggingClient;
use crate::arn::Arn;
use crate::error::{ArnError, TagsError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;

/// A single tag as returned by the tagging API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEntry {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl TagEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// One resource and its tags as returned by the tagging API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTagMapping {
    pub resource_arn: Option<String>,
    pub tags: Vec<TagEntry>,
}

/// One page of `GetResources` results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePage {
    pub mappings: Vec<ResourceTagMapping>,
    /// Absent or empty on the last page
    pub pagination_token: Option<String>,
}

/// Tagging API capability: fetch one page of resources
///
/// `Ok(None)` means the call succeeded but produced no response.
pub trait TaggingApi {
    fn get_resources(
        &self,
        request: &GetResourcesRequest,
    ) -> impl Future<Output = anyhow::Result<Option<ResourcePage>>> + Send;
}

/// A tagged resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub arn: String,
    pub tags: BTreeMap<String, String>,
}

impl Resource {
    /// Parse the resource's ARN into its components
    pub fn parse_arn(&self) -> Result<Arn, ArnError> {
        Arn::parse(&self.arn)
    }

    /// Build a resource from an API mapping.
    /// Duplicate tag keys are resolved last-write-wins.
    fn from_mapping(mapping: ResourceTagMapping) -> Result<Self, TagsError> {
        let Some(arn) = mapping.resource_arn else {
            return Err(TagsError::malformed("<unknown>", "resource ARN was missing"));
        };

        let mut tags = BTreeMap::new();
        for tag in mapping.tags {
            let Some(key) = tag.key else {
                return Err(TagsError::malformed(&arn, "tag key was missing"));
            };
            let Some(value) = tag.value else {
                return Err(TagsError::malformed(
                    &arn,
                    &format!("value for tag key {} was missing", key),
                ));
            };

            if let Some(old) = tags.get(&key) {
                tracing::warn!(
                    "resource {} - dup tag key {} - clobbering! (old val: {}, new val: {})",
                    arn,
                    key,
                    old,
                    value
                );
            }
            tags.insert(key, value);
        }

        Ok(Self { arn, tags })
    }
}

/// Lists tagged resources through a [`TaggingApi`]
pub struct ResourceLister<C = SdkTaggingClient> {
    client: C,
}

impl<C: TaggingApi> ResourceLister<C> {
    pub fn new(client: C) -> Self {
        tracing::debug!("resource lister initialized");
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// List every resource matching `filter`, following pagination until
    /// the API returns an absent or empty token.
    ///
    /// Any failure discards the resources gathered so far.
    pub async fn list_resources(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, TagsError> {
        let mut request = GetResourcesRequest::from(filter);
        let mut resources = Vec::new();
        let mut page_count = 0usize;

        loop {
            let page = match self.client.get_resources(&request).await {
                Ok(Some(page)) => page,
                Ok(None) => {
                    tracing::error!("response from GetResources was empty");
                    return Err(TagsError::EmptyResponse);
                }
                Err(e) => {
                    tracing::error!("error during the call to GetResources: {:#}", e);
                    return Err(TagsError::Transport(e));
                }
            };

            tracing::info!(
                "processing resources page {} ({} resources)",
                page_count,
                page.mappings.len()
            );

            for mapping in page.mappings {
                resources.push(Resource::from_mapping(mapping)?);
            }

            match page.pagination_token {
                None => {
                    tracing::debug!("pagination token was absent - exiting loop");
                    break;
                }
                Some(token) if token.is_empty() => {
                    tracing::debug!("pagination token was an empty string - exiting loop");
                    break;
                }
                Some(token) => {
                    page_count += 1;
                    request.pagination_token = Some(token);
                }
            }
        }

        tracing::debug!(
            "listed {} resources across {} pages",
            resources.len(),
            page_count + 1
        );

        Ok(resources)
    }
}
