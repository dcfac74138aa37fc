//! Resource Filters
//!
//! Builds the `GetResources` request shape from tag and resource-type
//! criteria.

use crate::error::TagsError;
use std::collections::{BTreeMap, BTreeSet};

/// Filter criteria for a resource listing
///
/// Tags map each key to exactly one required value. The tagging API accepts
/// several values per key but that form is not supported here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub tags: Option<BTreeMap<String, String>>,
    pub resource_types: Option<BTreeSet<String>>,
}

impl ResourceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a tag `key` with value `value`
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = self.tags.get_or_insert_with(BTreeMap::new);
        for (key, value) in tags {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Restrict to a resource type as it appears in the ARN, e.g. `ec2` or `s3`
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_types
            .get_or_insert_with(BTreeSet::new)
            .insert(resource_type.into());
        self
    }

    pub fn with_resource_types<I, S>(mut self, resource_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.resource_types.get_or_insert_with(BTreeSet::new);
        set.extend(resource_types.into_iter().map(Into::into));
        self
    }

    /// True when neither dimension is set (unfiltered listing)
    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.resource_types.is_none()
    }

    /// Parse `key1,value1,key2,value2` into tag criteria
    pub fn parse_tag_pairs(text: &str) -> Result<BTreeMap<String, String>, TagsError> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() % 2 != 0 {
            return Err(TagsError::InvalidFilter(format!(
                "tags must be given as comma separated key/value pairs, got {} elements",
                parts.len()
            )));
        }

        let mut tags = BTreeMap::new();
        for pair in parts.chunks(2) {
            if pair[0].is_empty() {
                return Err(TagsError::InvalidFilter("tag key may not be empty".to_string()));
            }
            tags.insert(pair[0].to_string(), pair[1].to_string());
        }
        Ok(tags)
    }

    /// Parse `ec2,s3,rds` into resource-type criteria
    pub fn parse_resource_types(text: &str) -> BTreeSet<String> {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// One tag filter entry of a `GetResources` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub values: Vec<String>,
}

/// Request shape for a single `GetResources` page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetResourcesRequest {
    pub tag_filters: Option<Vec<TagFilter>>,
    pub resource_type_filters: Option<Vec<String>>,
    pub pagination_token: Option<String>,
}

impl From<&ResourceFilter> for GetResourcesRequest {
    fn from(filter: &ResourceFilter) -> Self {
        let tag_filters = filter.tags.as_ref().map(|tags| {
            tags.iter()
                .map(|(key, value)| TagFilter {
                    key: key.clone(),
                    values: vec![value.clone()],
                })
                .collect()
        });

        let resource_type_filters = filter
            .resource_types
            .as_ref()
            .map(|types| types.iter().cloned().collect());

        Self {
            tag_filters,
            resource_type_filters,
            pagination_token: None,
        }
    }
}
