//! AWS SDK backend
//!
//! [`TaggingApi`] over `aws-sdk-resourcegroupstagging`.

use super::filter::GetResourcesRequest;
use super::lister::{ResourceLister, ResourcePage, ResourceTagMapping, TagEntry, TaggingApi};
use crate::error::TagsError;
use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_resourcegroupstagging::types::TagFilter as SdkTagFilter;
use aws_sdk_resourcegroupstagging::Client;

/// Overrides applied on top of the ambient AWS configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Alternate endpoint, e.g. a LocalStack instance
    pub endpoint_url: Option<String>,
}

/// Resource Groups Tagging API client
#[derive(Clone, Debug)]
pub struct SdkTaggingClient {
    client: Client,
}

impl SdkTaggingClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }

    /// Resolve region and credentials from the environment, shared config
    /// files and the settings overrides.
    ///
    /// Fails when no region can be resolved; credentials are only resolved
    /// lazily on the first request.
    pub async fn from_env(settings: &AwsSettings) -> Result<Self, TagsError> {
        tracing::debug!("initializing aws session");

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        let Some(region) = sdk_config.region() else {
            return Err(TagsError::Config(
                "no AWS region configured; set AWS_REGION, a profile region or --region"
                    .to_string(),
            ));
        };
        tracing::info!("aws session initialized for region {}", region);

        Ok(Self::from_conf(&sdk_config))
    }
}

impl TaggingApi for SdkTaggingClient {
    async fn get_resources(&self, request: &GetResourcesRequest) -> Result<Option<ResourcePage>> {
        let mut call = self.client.get_resources();

        if let Some(filters) = &request.tag_filters {
            let filters = filters
                .iter()
                .map(|f| {
                    SdkTagFilter::builder()
                        .key(&f.key)
                        .set_values(Some(f.values.clone()))
                        .build()
                })
                .collect();
            call = call.set_tag_filters(Some(filters));
        }
        if let Some(types) = &request.resource_type_filters {
            call = call.set_resource_type_filters(Some(types.clone()));
        }
        if let Some(token) = &request.pagination_token {
            call = call.pagination_token(token);
        }

        tracing::debug!("GetResources (token: {:?})", request.pagination_token);
        let output = call.send().await.context("GetResources request failed")?;

        let mappings = output
            .resource_tag_mapping_list()
            .iter()
            .map(|m| ResourceTagMapping {
                resource_arn: m.resource_arn().map(String::from),
                tags: m.tags().iter().map(|t| TagEntry::new(t.key(), t.value())).collect(),
            })
            .collect();

        Ok(Some(ResourcePage {
            mappings,
            pagination_token: output.pagination_token().map(String::from),
        }))
    }
}

impl ResourceLister<SdkTaggingClient> {
    /// Build a lister over an SDK client resolved from ambient configuration
    pub async fn from_env(settings: &AwsSettings) -> Result<Self, TagsError> {
        let client = SdkTaggingClient::from_env(settings).await?;
        Ok(Self::new(client))
    }
}
