//! Per-handler action tables.
//!
//! # Responsibilities
//! - Register a handler's actions under their conventional method names
//! - Resolve an action token to an action descriptor
//! - Bind route values to typed parameters and invoke the action
//!
//! # Design Decisions
//! - Each action is a typed closure; parameter parsing is chosen at registration
//! - Binding is strict: a missing or unparsable value fails the dispatch
//! - Parameters are bound in declaration order; the first failure wins
//! - Registration mistakes (arity mismatch, bad or duplicate names) panic at startup

use std::collections::HashMap;
use std::fmt;

use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::naming::{action_method_name, capitalize};
use crate::dispatch::result::{ActionResult, IntoActionResult};
use crate::routing::values::RouteValues;

/// Parsing of a raw route value into a parameter type.
pub trait FromRouteValue: Sized {
    /// Type name reported when parsing fails.
    const EXPECTED: &'static str;

    fn from_route_value(raw: &str) -> Option<Self>;
}

impl FromRouteValue for String {
    const EXPECTED: &'static str = "string";

    fn from_route_value(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromRouteValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_route_value(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl FromRouteValue for char {
    const EXPECTED: &'static str = "char";

    fn from_route_value(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

macro_rules! impl_from_route_value_parse {
    ($($ty:ty),*) => {
        $(
            impl FromRouteValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_route_value(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )*
    };
}

impl_from_route_value_parse!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Look up `parameter` in `values` and parse it as `T`.
fn bind<T: FromRouteValue>(
    action: &str,
    parameter: &str,
    values: &RouteValues,
) -> DispatchResult<T> {
    let raw = values
        .get(parameter)
        .ok_or_else(|| DispatchError::ParameterBinding {
            action: action.to_string(),
            parameter: parameter.to_string(),
        })?;

    T::from_route_value(raw).ok_or_else(|| DispatchError::ParameterConversion {
        action: action.to_string(),
        parameter: parameter.to_string(),
        value: raw.to_string(),
        expected: T::EXPECTED,
    })
}

/// A function usable as an action on handler `H`.
///
/// Implemented for `Fn(&mut H, T1, .., Tn) -> R` with up to six parameters,
/// where every `Ti: FromRouteValue` and `R: IntoActionResult`. Handler
/// methods such as `HomeHandler::about` qualify directly.
pub trait ActionFn<H, Args>: Send + Sync + 'static {
    /// Number of route-bound parameters.
    const ARITY: usize;

    /// Bind `params` (by name, in order) from `values` and call the action.
    fn call(
        &self,
        handler: &mut H,
        action: &str,
        params: &[&'static str],
        values: &RouteValues,
    ) -> DispatchResult<ActionResult>;
}

macro_rules! impl_action_fn {
    ($($ty:ident),*) => {
        impl<H, F, R, $($ty,)*> ActionFn<H, ($($ty,)*)> for F
        where
            F: Fn(&mut H, $($ty,)*) -> R + Send + Sync + 'static,
            R: IntoActionResult,
            $($ty: FromRouteValue,)*
        {
            const ARITY: usize = <[&'static str]>::len(&[$(stringify!($ty)),*]);

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn call(
                &self,
                handler: &mut H,
                action: &str,
                params: &[&'static str],
                values: &RouteValues,
            ) -> DispatchResult<ActionResult> {
                let mut names = params.iter().copied();
                $(
                    let $ty = bind::<$ty>(action, names.next().unwrap_or_default(), values)?;
                )*
                Ok((self)(handler, $($ty,)*).into_action_result())
            }
        }
    };
}

impl_action_fn!();
impl_action_fn!(T1);
impl_action_fn!(T1, T2);
impl_action_fn!(T1, T2, T3);
impl_action_fn!(T1, T2, T3, T4);
impl_action_fn!(T1, T2, T3, T4, T5);
impl_action_fn!(T1, T2, T3, T4, T5, T6);

type BoxedAction<H> =
    Box<dyn Fn(&mut H, &str, &[&'static str], &RouteValues) -> DispatchResult<ActionResult> + Send + Sync>;

struct Action<H> {
    name: String,
    params: Vec<&'static str>,
    invoke: BoxedAction<H>,
}

/// Resolved action: which handler, which method, which parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    handler: &'static str,
    name: String,
    params: Vec<&'static str>,
    index: usize,
}

impl ActionDescriptor {
    /// Type name of the handler the action belongs to.
    pub fn handler(&self) -> &'static str {
        self.handler
    }

    /// Method name, e.g. `Index`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter names, in binding order.
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.handler, self.name, self.params.join(", "))
    }
}

/// Dispatch table of a handler type's actions.
pub struct ActionTable<H> {
    actions: Vec<Action<H>>,
    by_name: HashMap<String, usize>,
}

impl<H: 'static> ActionTable<H> {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register `f` as action `name` with route-bound parameters `params`.
    ///
    /// ```
    /// use route_dispatch::dispatch::ActionTable;
    ///
    /// #[derive(Default)]
    /// struct Counter;
    ///
    /// impl Counter {
    ///     fn add(&mut self, a: i32, b: i32) -> i32 {
    ///         a + b
    ///     }
    /// }
    ///
    /// let mut actions = ActionTable::<Counter>::new();
    /// actions.action("Add", &["a", "b"], Counter::add);
    /// assert!(actions.contains("Add"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or not already capitalized (it could never
    /// be resolved), if it is registered twice, or if the number of `params`
    /// differs from the number of parameters `f` takes.
    pub fn action<F, Args>(&mut self, name: &str, params: &[&'static str], f: F) -> &mut Self
    where
        F: ActionFn<H, Args>,
        Args: 'static,
    {
        assert!(!name.is_empty(), "action name must not be empty");
        assert!(
            capitalize(name) == name,
            "action `{}` is unreachable: names must start with an uppercase letter",
            name
        );
        assert!(
            !self.by_name.contains_key(name),
            "action `{}` registered more than once",
            name
        );
        assert_eq!(
            params.len(),
            F::ARITY,
            "action `{}` declares {} parameter names but takes {} parameters",
            name,
            params.len(),
            F::ARITY
        );

        let invoke: BoxedAction<H> = Box::new(
            move |handler: &mut H, action: &str, params: &[&'static str], values: &RouteValues| {
                <F as ActionFn<H, Args>>::call(&f, handler, action, params, values)
            },
        );

        self.by_name.insert(name.to_string(), self.actions.len());
        self.actions.push(Action {
            name: name.to_string(),
            params: params.to_vec(),
            invoke,
        });
        self
    }

    /// Whether an action is registered under exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered action names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Find the action for `token` by the `Capitalize(token)` convention.
    pub fn resolve_action(
        &self,
        handler: &'static str,
        token: &str,
    ) -> DispatchResult<ActionDescriptor> {
        let name = action_method_name(token);
        match self.by_name.get(&name) {
            Some(&index) => Ok(ActionDescriptor {
                handler,
                name,
                params: self.actions[index].params.clone(),
                index,
            }),
            None => Err(DispatchError::ActionNotFound {
                handler: handler.to_string(),
                action: name,
            }),
        }
    }

    /// Bind parameters from `values` and invoke the described action.
    pub fn invoke(
        &self,
        handler: &mut H,
        descriptor: &ActionDescriptor,
        values: &RouteValues,
    ) -> DispatchResult<ActionResult> {
        let action = self
            .actions
            .get(descriptor.index)
            .filter(|a| a.name == descriptor.name)
            .ok_or_else(|| DispatchError::ActionNotFound {
                handler: descriptor.handler.to_string(),
                action: descriptor.name.clone(),
            })?;

        (action.invoke)(handler, &action.name, &action.params, values)
    }
}

impl<H: 'static> Default for ActionTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for ActionTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.actions.iter().map(|a| &a.name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Shop {
        calls: Vec<String>,
    }

    impl Shop {
        fn index(&mut self) -> &'static str {
            self.calls.push("index".into());
            "welcome"
        }

        fn show(&mut self, id: u32) -> String {
            self.calls.push(format!("show {}", id));
            format!("product {}", id)
        }

        fn search(&mut self, term: String, page: usize, exact: bool) -> ActionResult {
            ActionResult::json(serde_json::json!({
                "term": term,
                "page": page,
                "exact": exact,
            }))
        }

        fn ping(&mut self) {}
    }

    fn table() -> ActionTable<Shop> {
        let mut table = ActionTable::new();
        table
            .action("Index", &[], Shop::index)
            .action("Show", &["id"], Shop::show)
            .action("Search", &["term", "page", "exact"], Shop::search)
            .action("Ping", &[], Shop::ping);
        table
    }

    fn values(pairs: &[(&str, &str)]) -> RouteValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolve_capitalizes_first_letter() {
        let table = table();
        let lower = table.resolve_action("ShopHandler", "index").unwrap();
        let upper = table.resolve_action("ShopHandler", "Index").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.name(), "Index");
        assert_eq!(lower.to_string(), "ShopHandler.Index()");
    }

    #[test]
    fn test_resolve_unknown_action() {
        let err = table().resolve_action("ShopHandler", "checkout").unwrap_err();
        assert_eq!(
            err,
            DispatchError::ActionNotFound {
                handler: "ShopHandler".into(),
                action: "Checkout".into(),
            }
        );
    }

    #[test]
    fn test_resolution_is_case_sensitive_after_first_letter() {
        assert!(table().resolve_action("ShopHandler", "INDEX").is_err());
    }

    #[test]
    fn test_invoke_binds_typed_parameters() {
        let table = table();
        let mut shop = Shop::default();

        let show = table.resolve_action("ShopHandler", "show").unwrap();
        let result = table
            .invoke(&mut shop, &show, &values(&[("id", "42"), ("controller", "shop")]))
            .unwrap();
        assert_eq!(result, ActionResult::html("product 42"));
        assert_eq!(shop.calls, vec!["show 42"]);

        let search = table.resolve_action("ShopHandler", "search").unwrap();
        let result = table
            .invoke(
                &mut shop,
                &search,
                &values(&[("term", "lamp"), ("page", "2"), ("exact", "TRUE")]),
            )
            .unwrap();
        assert_eq!(
            result,
            ActionResult::json(serde_json::json!({"term": "lamp", "page": 2, "exact": true}))
        );
    }

    #[test]
    fn test_unit_return_is_empty_content() {
        let table = table();
        let ping = table.resolve_action("ShopHandler", "ping").unwrap();
        let result = table.invoke(&mut Shop::default(), &ping, &RouteValues::new()).unwrap();
        assert_eq!(result, ActionResult::html(""));
    }

    #[test]
    fn test_missing_parameter_is_binding_error() {
        let table = table();
        let mut shop = Shop::default();
        let show = table.resolve_action("ShopHandler", "show").unwrap();

        let err = table.invoke(&mut shop, &show, &RouteValues::new()).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ParameterBinding {
                action: "Show".into(),
                parameter: "id".into(),
            }
        );
        assert!(shop.calls.is_empty());
    }

    #[test]
    fn test_unparsable_parameter_is_conversion_error() {
        let table = table();
        let show = table.resolve_action("ShopHandler", "show").unwrap();

        let err = table
            .invoke(&mut Shop::default(), &show, &values(&[("id", "-1")]))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::ParameterConversion {
                action: "Show".into(),
                parameter: "id".into(),
                value: "-1".into(),
                expected: "u32",
            }
        );
    }

    #[test]
    fn test_first_failing_parameter_is_reported() {
        let table = table();
        let search = table.resolve_action("ShopHandler", "search").unwrap();

        // `page` fails to convert before the missing `exact` is looked up.
        let err = table
            .invoke(
                &mut Shop::default(),
                &search,
                &values(&[("term", "lamp"), ("page", "two")]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ParameterConversion { ref parameter, .. } if parameter == "page"
        ));
    }

    #[test]
    fn test_scalar_parsers() {
        assert_eq!(bool::from_route_value("False"), Some(false));
        assert_eq!(bool::from_route_value("yes"), None);
        assert_eq!(char::from_route_value("x"), Some('x'));
        assert_eq!(char::from_route_value("xy"), None);
        assert_eq!(f64::from_route_value("2.5"), Some(2.5));
        assert_eq!(i8::from_route_value("300"), None);
        assert_eq!(<i32 as FromRouteValue>::EXPECTED, "i32");
    }

    #[test]
    #[should_panic(expected = "declares 0 parameter names but takes 1 parameters")]
    fn test_arity_mismatch_panics() {
        ActionTable::<Shop>::new().action("Show", &[], Shop::show);
    }

    #[test]
    #[should_panic(expected = "registered more than once")]
    fn test_duplicate_action_panics() {
        ActionTable::<Shop>::new()
            .action("Index", &[], Shop::index)
            .action("Index", &[], Shop::index);
    }

    #[test]
    #[should_panic(expected = "unreachable")]
    fn test_lowercase_action_name_panics() {
        ActionTable::<Shop>::new().action("index", &[], Shop::index);
    }
}
