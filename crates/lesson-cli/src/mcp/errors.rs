//! Error handling utilities for MCP server

use lesson_core::PlannerError;
use rmcp::ErrorData;

/// Helper to convert planner errors to MCP errors.
///
/// Errors caused by the request itself are reported as invalid parameters so
/// the client can correct them; storage failures are internal errors.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::PlanNotFound { .. }
        | PlannerError::StageNotFound { .. }
        | PlannerError::UnknownCategory { .. }
        | PlannerError::UnknownField { .. }
        | PlannerError::InvalidComment { .. }
        | PlannerError::InvalidTransition { .. }
        | PlannerError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_request_errors_are_invalid_params() {
        let error = to_mcp_error(
            "Failed to add comment",
            &PlannerError::StageNotFound {
                key: "gistReading".to_string(),
            },
        );
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert!(error.message.starts_with("Failed to add comment: "));
        assert!(error.message.contains("gistReading"));
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let error = to_mcp_error(
            "Failed to list plans",
            &PlannerError::Configuration {
                message: "no data directory".to_string(),
            },
        );
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
