//! Action results and return-value normalisation.
//!
//! # Responsibilities
//! - Describe how an action's outcome is rendered (content, JSON, redirect, status)
//! - Turn arbitrary action return values into an `ActionResult`
//! - Write the rendered response into the request context
//!
//! # Design Decisions
//! - Tagged union rather than a trait object: the set of result kinds is closed
//! - Plain values are stringified into `text/html` content
//! - `()` and `None` render as an empty body

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::context::HttpContext;

/// Content type given to values that are not already an `ActionResult`.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// How an action's outcome is turned into a response.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// A body with an explicit media type.
    Content { body: String, content_type: String },
    /// A JSON document.
    Json(serde_json::Value),
    /// A redirect to `location` (302, or 301 when permanent).
    Redirect { location: String, permanent: bool },
    /// An empty response with the given status.
    Status(StatusCode),
}

impl ActionResult {
    pub fn content(body: impl Into<String>, content_type: impl Into<String>) -> Self {
        ActionResult::Content {
            body: body.into(),
            content_type: content_type.into(),
        }
    }

    /// `text/html` content.
    pub fn html(body: impl Into<String>) -> Self {
        Self::content(body, DEFAULT_CONTENT_TYPE)
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::content(body, "text/plain; charset=utf-8")
    }

    pub fn json(value: impl Into<serde_json::Value>) -> Self {
        ActionResult::Json(value.into())
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        ActionResult::Redirect {
            location: location.into(),
            permanent: false,
        }
    }

    pub fn redirect_permanent(location: impl Into<String>) -> Self {
        ActionResult::Redirect {
            location: location.into(),
            permanent: true,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        ActionResult::Status(status)
    }

    /// Render this result and store it as the context's response.
    pub fn execute(self, ctx: &mut HttpContext) {
        ctx.set_response(self.into_response());
    }
}

impl IntoResponse for ActionResult {
    fn into_response(self) -> Response {
        match self {
            ActionResult::Content { body, content_type } => {
                match HeaderValue::from_str(&content_type) {
                    Ok(value) => ([(CONTENT_TYPE, value)], body).into_response(),
                    Err(_) => {
                        tracing::error!(content_type = %content_type, "Invalid content type");
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                }
            }
            ActionResult::Json(value) => Json(value).into_response(),
            ActionResult::Redirect { location, permanent } => {
                let status = if permanent {
                    StatusCode::MOVED_PERMANENTLY
                } else {
                    StatusCode::FOUND
                };
                match HeaderValue::from_str(&location) {
                    Ok(value) => (status, [(LOCATION, value)]).into_response(),
                    Err(_) => {
                        tracing::error!(location = %location, "Invalid redirect location");
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                }
            }
            ActionResult::Status(status) => status.into_response(),
        }
    }
}

/// Conversion of an action's return value into an [`ActionResult`].
pub trait IntoActionResult {
    fn into_action_result(self) -> ActionResult;
}

impl IntoActionResult for ActionResult {
    fn into_action_result(self) -> ActionResult {
        self
    }
}

impl IntoActionResult for () {
    fn into_action_result(self) -> ActionResult {
        ActionResult::html(String::new())
    }
}

impl<T: IntoActionResult> IntoActionResult for Option<T> {
    fn into_action_result(self) -> ActionResult {
        match self {
            Some(value) => value.into_action_result(),
            None => ActionResult::html(String::new()),
        }
    }
}

impl IntoActionResult for String {
    fn into_action_result(self) -> ActionResult {
        ActionResult::html(self)
    }
}

impl IntoActionResult for &'static str {
    fn into_action_result(self) -> ActionResult {
        ActionResult::html(self)
    }
}

macro_rules! impl_into_action_result_display {
    ($($ty:ty),*) => {
        $(
            impl IntoActionResult for $ty {
                fn into_action_result(self) -> ActionResult {
                    ActionResult::html(self.to_string())
                }
            }
        )*
    };
}

impl_into_action_result_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::context::RequestContext;

    #[test]
    fn test_plain_values_become_html_content() {
        assert_eq!(
            "hello".into_action_result(),
            ActionResult::content("hello", "text/html")
        );
        assert_eq!(42u32.into_action_result(), ActionResult::html("42"));
        assert_eq!(true.into_action_result(), ActionResult::html("true"));
    }

    #[test]
    fn test_empty_values_render_empty_body() {
        assert_eq!(().into_action_result(), ActionResult::html(""));
        assert_eq!(None::<String>.into_action_result(), ActionResult::html(""));
        assert_eq!(Some(7i64).into_action_result(), ActionResult::html("7"));
    }

    #[test]
    fn test_action_results_pass_through() {
        let result = ActionResult::redirect("/home");
        assert_eq!(result.clone().into_action_result(), result);
    }

    #[test]
    fn test_content_response_headers() {
        let response = ActionResult::html("<h1>Hi</h1>").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    }

    #[test]
    fn test_redirect_responses() {
        let response = ActionResult::redirect("/home").into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/home");

        let response = ActionResult::redirect_permanent("/new").into_response();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[test]
    fn test_invalid_header_value_is_server_error() {
        let response = ActionResult::redirect("/bad\nlocation").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_execute_writes_response() {
        let mut ctx = HttpContext::new(RequestContext::default());
        ActionResult::status(StatusCode::NO_CONTENT).execute(&mut ctx);
        assert_eq!(ctx.response().unwrap().status(), StatusCode::NO_CONTENT);
    }
}
