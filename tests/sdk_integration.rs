//! Integration tests for the AWS SDK tagging backend using wiremock
//!
//! The SDK is pointed at a mock endpoint speaking the Resource Groups Tagging
//! API's JSON protocol, so request translation and pagination are exercised
//! end to end without AWS credentials.

use aws_sdk_resourcegroupstagging::config::retry::RetryConfig;
use aws_sdk_resourcegroupstagging::config::{BehaviorVersion, Credentials, Region};
use serde_json::json;
use tagfinder::tags::{AwsSettings, SdkTaggingClient};
use tagfinder::{describe_error, ResourceFilter, ResourceLister, TagsError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GET_RESOURCES_TARGET: &str = "ResourceGroupsTaggingAPI_20170126.GetResources";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

fn lister_for(server: &MockServer) -> ResourceLister<SdkTaggingClient> {
    let conf = aws_sdk_resourcegroupstagging::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .endpoint_url(server.uri())
        .retry_config(RetryConfig::disabled())
        .build();
    let client = aws_sdk_resourcegroupstagging::Client::from_conf(conf);
    ResourceLister::new(SdkTaggingClient::new(client))
}

fn amz_json(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), AMZ_JSON)
}

/// Test module for the SDK-backed lister
mod sdk_backend_tests {
    use super::*;

    /// Test a single page listing returns resources with tags
    #[tokio::test]
    async fn test_single_page_listing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-amz-target", GET_RESOURCES_TARGET))
            .respond_with(amz_json(json!({
                "PaginationToken": "",
                "ResourceTagMappingList": [
                    {
                        "ResourceARN": "arn:aws:rds:us-east-1:123456789012:db:test",
                        "Tags": [
                            {"Key": "Name", "Value": "test"},
                            {"Key": "thing:test", "Value": "stuff"}
                        ]
                    },
                    {
                        "ResourceARN": "arn:aws:s3:::bucket",
                        "Tags": []
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resources = lister_for(&server)
            .list_resources(&ResourceFilter::new())
            .await
            .expect("Listing should succeed");

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].arn, "arn:aws:rds:us-east-1:123456789012:db:test");
        assert_eq!(resources[0].tags["Name"], "test");
        assert_eq!(resources[0].tags["thing:test"], "stuff");
        assert!(resources[1].tags.is_empty());
    }

    /// Test filters are sent in the request body
    #[tokio::test]
    async fn test_filters_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({
                "TagFilters": [{"Key": "Name", "Values": ["test"]}],
                "ResourceTypeFilters": ["rds"]
            })))
            .respond_with(amz_json(json!({
                "ResourceTagMappingList": [
                    {
                        "ResourceARN": "arn:aws:rds:us-east-1:123456789012:db:test",
                        "Tags": [{"Key": "Name", "Value": "test"}]
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = ResourceFilter::new()
            .with_tag("Name", "test")
            .with_resource_type("rds");
        let resources = lister_for(&server)
            .list_resources(&filter)
            .await
            .expect("Listing should succeed");

        assert_eq!(resources.len(), 1);
    }

    /// Test pagination follows PaginationToken until it is empty
    #[tokio::test]
    async fn test_pagination_with_pagination_token() {
        let server = MockServer::start().await;

        // Second page, matched first because it is more specific
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({"PaginationToken": "token-page-2"})))
            .respond_with(amz_json(json!({
                "PaginationToken": "",
                "ResourceTagMappingList": [
                    {"ResourceARN": "arn:aws:ec2:us-east-1:123456789012:instance/i-2", "Tags": []}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // First page
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(amz_json(json!({
                "PaginationToken": "token-page-2",
                "ResourceTagMappingList": [
                    {"ResourceARN": "arn:aws:ec2:us-east-1:123456789012:instance/i-1", "Tags": []}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resources = lister_for(&server)
            .list_resources(&ResourceFilter::new())
            .await
            .expect("Listing should succeed");

        let arns: Vec<&str> = resources.iter().map(|r| r.arn.as_str()).collect();
        assert_eq!(
            arns,
            vec![
                "arn:aws:ec2:us-east-1:123456789012:instance/i-1",
                "arn:aws:ec2:us-east-1:123456789012:instance/i-2",
            ]
        );
    }

    /// Test API errors surface as transport errors
    #[tokio::test]
    async fn test_throttling_returns_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(400)
                    .insert_header("x-amzn-errortype", "ThrottledException")
                    .set_body_raw(
                        json!({
                            "__type": "ThrottledException",
                            "Message": "Rate exceeded"
                        })
                        .to_string(),
                        AMZ_JSON,
                    ),
            )
            .mount(&server)
            .await;

        let err = lister_for(&server)
            .list_resources(&ResourceFilter::new())
            .await
            .expect_err("Listing should fail");

        assert!(matches!(err, TagsError::Transport(_)));
        let description = describe_error(&anyhow::Error::from(err));
        assert_eq!(description, "Rate limit exceeded. Please try again later.");
    }

    /// Test ambient resolution fails fast when no region can be found
    #[tokio::test]
    async fn test_from_env_without_region_is_config_error() {
        let missing = std::env::temp_dir().join(format!("tagfinder-missing-{}", std::process::id()));
        for var in ["AWS_REGION", "AWS_DEFAULT_REGION", "AWS_PROFILE"] {
            std::env::remove_var(var);
        }
        std::env::set_var("AWS_CONFIG_FILE", missing.join("config"));
        std::env::set_var("AWS_SHARED_CREDENTIALS_FILE", missing.join("credentials"));
        std::env::set_var("AWS_EC2_METADATA_DISABLED", "true");

        let result = ResourceLister::from_env(&AwsSettings::default()).await;

        assert!(
            matches!(result, Err(TagsError::Config(_))),
            "expected a configuration error"
        );
    }
}
