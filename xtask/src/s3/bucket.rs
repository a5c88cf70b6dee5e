//! Bucket operations (Imperative Shell).

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;

use crate::aws::AwsTarget;

use super::error::{Result, S3Error};

/// Creates an S3 client for the given target.
///
/// Local emulators are addressed path-style.
pub async fn create_client(target: &AwsTarget) -> Client {
    let sdk_config = target.load().await;
    let config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(target.is_local())
        .build();
    Client::from_conf(config)
}

/// Returns true when the bucket exists and is reachable with our credentials.
pub async fn bucket_exists(client: &Client, bucket: &str) -> Result<bool> {
    match client.head_bucket().bucket(bucket).send().await {
        Ok(_) => Ok(true),
        Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
        Err(err) => Err(S3Error::AwsSdk(DisplayErrorContext(&err).to_string())),
    }
}

/// Location constraint for a region; us-east-1 must not send one.
pub fn location_constraint(region: &str) -> Option<BucketLocationConstraint> {
    (region != "us-east-1").then(|| BucketLocationConstraint::from(region))
}

pub async fn create_bucket(client: &Client, bucket: &str, region: &str) -> Result<()> {
    let mut request = client.create_bucket().bucket(bucket);

    if let Some(constraint) = location_constraint(region) {
        request = request.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build(),
        );
    }

    request
        .send()
        .await
        .map_err(|e| S3Error::AwsSdk(DisplayErrorContext(&e).to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_location_constraint_in_us_east_1() {
        assert_eq!(location_constraint("us-east-1"), None);
    }

    #[test]
    fn test_location_constraint_for_other_regions() {
        assert_eq!(
            location_constraint("eu-west-1"),
            Some(BucketLocationConstraint::EuWest1)
        );
    }
}
