use thiserror::Error;

/// Errors that can occur while loading feed data or fitting curves.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Fit did not converge: {0}")]
    FitNonConvergence(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ureq::Error> for DashboardError {
    fn from(e: ureq::Error) -> Self {
        DashboardError::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DashboardError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = DashboardError::ParseError("bad date".to_string());
        assert_eq!(err.to_string(), "Parse error: bad date");
    }

    #[test]
    fn test_validation_error_display() {
        let err = DashboardError::ValidationError("gap in series".to_string());
        assert_eq!(err.to_string(), "Validation error: gap in series");
    }

    #[test]
    fn test_non_convergence_display() {
        let err = DashboardError::FitNonConvergence("logistic: 100 iterations".to_string());
        assert_eq!(
            err.to_string(),
            "Fit did not converge: logistic: 100 iterations"
        );
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = DashboardError::InsufficientData("need 4 points".to_string());
        assert_eq!(err.to_string(), "Insufficient data: need 4 points");
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json{{{");
        let json_err = result.unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_is_debug() {
        let err = DashboardError::NotFound("metric xyz".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }
}
