//! Output rendering for the command line

use crate::arn::Arn;
use crate::tags::Resource;
use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Flattened ARN components for structured output
#[derive(Serialize)]
struct ArnView<'a> {
    arn: String,
    partition: &'a str,
    service: &'a str,
    region: &'a str,
    account_id: &'a str,
    resource_type: &'a str,
    resource_delimiter: &'a str,
    resource_id: &'a str,
}

impl<'a> From<&'a Arn> for ArnView<'a> {
    fn from(arn: &'a Arn) -> Self {
        Self {
            arn: arn.to_string(),
            partition: arn.partition(),
            service: arn.service(),
            region: arn.region(),
            account_id: arn.account_id(),
            resource_type: arn.resource_type(),
            resource_delimiter: arn.resource_delimiter().as_str(),
            resource_id: arn.resource_id(),
        }
    }
}

/// Render a resource list
pub fn render(resources: &[Resource], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (idx, resource) in resources.iter().enumerate() {
                let tags = resource
                    .tags
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "resource[{}]: {}: tags: {{{}}}", idx, resource.arn, tags)?;
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(resources)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(resources)?),
    }
}

/// Render the components of a single ARN
pub fn render_arn(arn: &Arn, format: OutputFormat) -> Result<String> {
    let view = ArnView::from(arn);
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "arn:           {}", view.arn)?;
            writeln!(out, "partition:     {}", view.partition)?;
            writeln!(out, "service:       {}", view.service)?;
            writeln!(out, "region:        {}", view.region)?;
            writeln!(out, "account-id:    {}", view.account_id)?;
            writeln!(out, "resource-type: {}", view.resource_type)?;
            writeln!(out, "resource-id:   {}", view.resource_id)?;
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&view)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&view)?),
    }
}
