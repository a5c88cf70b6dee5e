use std::env;

/// Storage configuration loaded from environment variables.
///
/// AWS credentials, region and endpoint are not part of this struct; they are
/// resolved by `aws-config` (`AWS_REGION`, `AWS_PROFILE`, `AWS_ENDPOINT_URL`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// DynamoDB table holding customer records (default: "customers")
    pub table_name: String,
    /// Secondary index used for email lookups (default: "Email-id-index")
    pub email_index_name: String,
    /// S3 bucket holding customer images (default: "customer-images")
    pub images_bucket: String,
    /// Address buckets by path instead of virtual host, as local S3 emulators
    /// expect (default: false)
    pub s3_force_path_style: bool,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CUSTOMERS_TABLE_NAME` - DynamoDB table name (default: "customers")
    /// - `CUSTOMERS_EMAIL_INDEX` - Email index name (default: "Email-id-index")
    /// - `CUSTOMER_IMAGES_BUCKET` - S3 bucket name (default: "customer-images")
    /// - `S3_FORCE_PATH_STYLE` - `true`/`1` to use path-style S3 addressing (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            table_name: lookup("CUSTOMERS_TABLE_NAME").unwrap_or(defaults.table_name),
            email_index_name: lookup("CUSTOMERS_EMAIL_INDEX").unwrap_or(defaults.email_index_name),
            images_bucket: lookup("CUSTOMER_IMAGES_BUCKET").unwrap_or(defaults.images_bucket),
            s3_force_path_style: lookup("S3_FORCE_PATH_STYLE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.s3_force_path_style),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            table_name: "customers".to_string(),
            email_index_name: "Email-id-index".to_string(),
            images_bucket: "customer-images".to_string(),
            s3_force_path_style: false,
        }
    }
}

/// Load the shared AWS SDK configuration from the default provider chain.
#[cfg(any(feature = "dynamodb", feature = "s3"))]
pub async fn load_aws_config() -> aws_config::SdkConfig {
    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = StorageConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.table_name, "customers");
        assert_eq!(config.email_index_name, "Email-id-index");
        assert_eq!(config.images_bucket, "customer-images");
        assert!(!config.s3_force_path_style);
    }

    #[test]
    fn test_overrides() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            ("CUSTOMERS_TABLE_NAME", "customers-test"),
            ("CUSTOMERS_EMAIL_INDEX", "by-email"),
            ("CUSTOMER_IMAGES_BUCKET", "avatars"),
            ("S3_FORCE_PATH_STYLE", "TRUE"),
        ]));

        assert_eq!(config.table_name, "customers-test");
        assert_eq!(config.email_index_name, "by-email");
        assert_eq!(config.images_bucket, "avatars");
        assert!(config.s3_force_path_style);
    }

    #[test]
    fn test_force_path_style_rejects_other_values() {
        let config = StorageConfig::from_lookup(lookup_from(&[("S3_FORCE_PATH_STYLE", "nope")]));
        assert!(!config.s3_force_path_style);
    }
}
