//! Shared AWS target selection for the infrastructure commands.

/// Where the commands send their requests.
#[derive(Debug, Clone)]
pub struct AwsTarget {
    /// Custom endpoint URL (for local DynamoDB or S3 emulators).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsTarget {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsTarget {
    pub fn is_local(&self) -> bool {
        self.endpoint_url.is_some()
    }

    /// Returns a display string for the target environment.
    pub fn display(&self, service: &str) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local {} ({})", service, url),
            None => format!("AWS {} (region: {})", service, self.region),
        }
    }

    /// Loads the SDK configuration for this target.
    pub async fn load(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));

        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }
}
