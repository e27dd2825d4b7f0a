//! Dispatch error definitions.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while dispatching a matched route.
///
/// None of these are recovered inside the dispatcher; the hosting pipeline
/// decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No registered handler has the conventional type name.
    #[error("Handler {0} not found")]
    HandlerNotFound(String),

    /// The handler has no action with the conventional method name.
    #[error("Handler {handler} has no action method {action}")]
    ActionNotFound { handler: String, action: String },

    /// A declared action parameter has no route value with the same name.
    #[error("Action {action} requires route value `{parameter}`, which is missing")]
    ParameterBinding { action: String, parameter: String },

    /// A route value could not be parsed as the parameter's type.
    #[error("Action {action} cannot convert `{value}` to {expected} for parameter `{parameter}`")]
    ParameterConversion {
        action: String,
        parameter: String,
        value: String,
        expected: &'static str,
    },

    /// A matched route did not produce a value needed for dispatch.
    #[error("Route `{route}` did not supply a `{key}` value")]
    MissingRouteValue { route: String, key: &'static str },
}

impl DispatchError {
    /// HTTP status a host should answer with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::HandlerNotFound(_) | DispatchError::ActionNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            DispatchError::ParameterBinding { .. } | DispatchError::ParameterConversion { .. } => {
                StatusCode::BAD_REQUEST
            }
            DispatchError::MissingRouteValue { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::HandlerNotFound("HomeHandler".into());
        assert_eq!(err.to_string(), "Handler HomeHandler not found");

        let err = DispatchError::ParameterConversion {
            action: "Show".into(),
            parameter: "id".into(),
            value: "abc".into(),
            expected: "u32",
        };
        assert_eq!(
            err.to_string(),
            "Action Show cannot convert `abc` to u32 for parameter `id`"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            DispatchError::HandlerNotFound("XHandler".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DispatchError::ParameterBinding {
                action: "Show".into(),
                parameter: "id".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DispatchError::MissingRouteValue {
                route: "r".into(),
                key: "controller"
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
