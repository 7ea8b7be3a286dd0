#[derive(Debug, thiserror::Error)]
pub enum DistilError {
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DistilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DistilError::Retrieval("no results".to_string());
        assert_eq!(err.to_string(), "Retrieval error: no results");

        let err = DistilError::Generation("quota exhausted".to_string());
        assert_eq!(err.to_string(), "Generation error: quota exhausted");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DistilError = io_err.into();
        assert!(matches!(err, DistilError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert_eq!(ok_result.unwrap(), 42);

        let err_result: Result<i32> = Err(DistilError::Config("invalid".to_string()));
        assert!(err_result.is_err());
    }
}
