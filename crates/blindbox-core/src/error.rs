use thiserror::Error;

/// Top-level error type for the blind box system.
///
/// Subsystem crates construct the matching variant directly or rely on the
/// `From` impls below so that the `?` operator works across crate boundaries.
/// User-facing command rejections are not errors; they are composed as
/// replies by the interaction engine and never reach this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BlindBoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for BlindBoxError {
    fn from(err: toml::de::Error) -> Self {
        BlindBoxError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BlindBoxError {
    fn from(err: toml::ser::Error) -> Self {
        BlindBoxError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for BlindBoxError {
    fn from(err: serde_json::Error) -> Self {
        BlindBoxError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for blind box operations.
pub type Result<T> = std::result::Result<T, BlindBoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlindBoxError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = BlindBoxError::Storage("pool document locked".to_string());
        assert_eq!(err.to_string(), "Storage error: pool document locked");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BlindBoxError = io_err.into();
        assert!(matches!(err, BlindBoxError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: BlindBoxError = parsed.unwrap_err().into();
        assert!(matches!(err, BlindBoxError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        let err: BlindBoxError = parsed.unwrap_err().into();
        assert!(matches!(err, BlindBoxError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = BlindBoxError::Serialization("bad document".to_string());
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("Serialization"));
        assert!(dbg.contains("bad document"));
    }
}
