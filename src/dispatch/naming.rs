//! Naming conventions linking route tokens to handlers and actions.
//!
//! Only the first character of a token is changed; the rest is kept as-is.

/// Suffix every handler type name carries.
pub const HANDLER_SUFFIX: &str = "Handler";

/// Uppercase the first character of `token`.
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Handler type name for a controller token: `home` → `HomeHandler`.
pub fn handler_type_name(controller: &str) -> String {
    let mut name = capitalize(controller);
    name.push_str(HANDLER_SUFFIX);
    name
}

/// Action method name for an action token: `index` → `Index`.
pub fn action_method_name(action: &str) -> String {
    capitalize(action)
}
