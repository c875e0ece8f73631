use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("Bucket names are 3 to 63 characters long"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "Bucket names use lowercase letters, digits, hyphens and dots only",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("Bucket names cannot start or end with a hyphen"));
    }

    Ok(())
}

// Folders are joined into object keys as "{folder}/{file}", so a leading or
// trailing slash would produce empty key segments.
pub fn validate_object_folder(field_name: &str, folder: &str) -> Result<()> {
    validate_non_empty_string(field_name, folder)?;

    if folder.starts_with('/') || folder.ends_with('/') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: folder.to_string(),
            reason: "Folder must not start or end with '/'".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("table", "transaction").is_ok());
        assert!(validate_non_empty_string("table", "").is_err());
        assert!(validate_non_empty_string("table", "   ").is_err());
    }

    #[test]
    fn test_validate_s3_bucket_name() {
        assert!(validate_s3_bucket_name("bucket", "wmnanalytics").is_ok());
        assert!(validate_s3_bucket_name("bucket", "my-bucket.data").is_ok());
        assert!(validate_s3_bucket_name("bucket", "").is_err());
        assert!(validate_s3_bucket_name("bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("bucket", "Bad_Bucket").is_err());
        assert!(validate_s3_bucket_name("bucket", "-leading").is_err());
        assert!(validate_s3_bucket_name("bucket", "trailing-").is_err());
    }

    #[test]
    fn test_validate_object_folder() {
        assert!(validate_object_folder("folder", "analytics-output").is_ok());
        assert!(validate_object_folder("folder", "reports/monthly").is_ok());
        assert!(validate_object_folder("folder", "/analytics-output").is_err());
        assert!(validate_object_folder("folder", "analytics-output/").is_err());
        assert!(validate_object_folder("folder", "").is_err());
    }
}
