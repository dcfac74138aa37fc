//! Amazon Resource Names
//!
//! Parses the three ARN layouts into their components:
//!
//! - `arn:partition:service:region:account-id:resource-id`
//! - `arn:partition:service:region:account-id:resource-type/resource-id`
//! - `arn:partition:service:region:account-id:resource-type:resource-id`
//!
//! Parsing is lossless: `Arn::parse(s)?.to_string() == s`.

use crate::error::ArnError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of top-level colon separated components in an ARN
const ARN_COMPONENTS: usize = 6;

/// Separator between the resource type and the resource id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceDelimiter {
    /// Only a resource id is present
    #[default]
    None,
    /// `resource-type/resource-id`
    Slash,
    /// `resource-type:resource-id`
    Colon,
}

impl ResourceDelimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceDelimiter::None => "",
            ResourceDelimiter::Slash => "/",
            ResourceDelimiter::Colon => ":",
        }
    }
}

impl fmt::Display for ResourceDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured representation of an Amazon Resource Name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arn {
    partition: String,
    service: String,
    region: String,
    account_id: String,
    resource_type: String,
    resource_delimiter: ResourceDelimiter,
    resource_id: String,
}

impl Arn {
    /// Parse an ARN string into its components
    pub fn parse(text: &str) -> Result<Self, ArnError> {
        let components: Vec<&str> = text.splitn(ARN_COMPONENTS, ':').collect();
        if components.len() != ARN_COMPONENTS {
            return Err(ArnError::MissingComponents {
                found: components.len(),
            });
        }
        if components[0] != "arn" {
            return Err(ArnError::InvalidPrefix {
                found: components[0].to_string(),
            });
        }

        // The resource part may itself contain colons or slashes; only the
        // first separator splits type from id, colon taking precedence.
        let resource = components[5];
        let (resource_type, resource_delimiter, resource_id) =
            if let Some((kind, id)) = resource.split_once(':') {
                (kind, ResourceDelimiter::Colon, id)
            } else if let Some((kind, id)) = resource.split_once('/') {
                (kind, ResourceDelimiter::Slash, id)
            } else {
                ("", ResourceDelimiter::None, resource)
            };

        Ok(Self {
            partition: components[1].to_string(),
            service: components[2].to_string(),
            region: components[3].to_string(),
            account_id: components[4].to_string(),
            resource_type: resource_type.to_string(),
            resource_delimiter,
            resource_id: resource_id.to_string(),
        })
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Service namespace, e.g. `ec2`, `s3`, `elasticloadbalancing`
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Empty for global services such as IAM or S3 buckets
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Empty for account-less resources such as S3 buckets
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Empty when the ARN carries only a resource id
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn resource_delimiter(&self) -> ResourceDelimiter {
        self.resource_delimiter
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:",
            self.partition, self.service, self.region, self.account_id
        )?;
        match self.resource_delimiter {
            ResourceDelimiter::None => f.write_str(&self.resource_id),
            delim => write!(f, "{}{}{}", self.resource_type, delim, self.resource_id),
        }
    }
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Arn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Arn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Arn::parse(&text).map_err(serde::de::Error::custom)
    }
}
