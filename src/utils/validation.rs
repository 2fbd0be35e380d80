use crate::utils::error::{AnagramError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 來源檔案必須存在且為一般檔案
pub fn validate_existing_file(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let file = Path::new(path);
    if !file.exists() {
        return Err(AnagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Source file doesn't exist".to_string(),
        });
    }
    if !file.is_file() {
        return Err(AnagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Source is not a regular file".to_string(),
        });
    }

    Ok(())
}

pub fn validate_sources(field_name: &str, sources: &[String]) -> Result<()> {
    if sources.is_empty() {
        return Err(AnagramError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one source is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for source in sources {
        validate_existing_file(field_name, source)?;
        if !seen.insert(source.as_str()) {
            tracing::warn!("⚠️ Source '{}' is listed more than once", source);
        }
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AnagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("result", "out/result.txt").is_ok());
        assert!(validate_path("result", "").is_err());
        assert!(validate_path("result", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_existing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(validate_existing_file("source", path).is_ok());
        assert!(validate_existing_file("source", "/definitely/not/here.txt").is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_existing_file("source", dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_sources_requires_one() {
        let err = validate_sources("sources", &[]).unwrap_err();
        assert!(matches!(err, AnagramError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("concurrency", 4, 1, 256).is_ok());
        assert!(validate_range("concurrency", 0, 1, 256).is_err());
        assert!(validate_range("concurrency", 300, 1, 256).is_err());
    }
}
