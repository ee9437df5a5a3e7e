//! Macros for ergonomic state declaration.

/// Declare unit state types together with their `State` implementation.
///
/// Each entry reads `struct Name: Input => Action;`. The generated structs
/// derive `Clone`, `Copy`, `Debug`, `Default`, `PartialEq`, `Eq` and `Hash`.
///
/// # Example
///
/// ```
/// use flowset::flow_state;
/// use flowset::core::State;
///
/// #[derive(Debug)]
/// pub enum CartAction {
///     Add(String),
///     Checkout,
/// }
///
/// flow_state! {
///     /// Items collected so far.
///     pub struct Cart: Vec<String> => CartAction;
///     pub struct Paid: () => ();
/// }
///
/// assert_eq!(Cart.id().name(), "Cart");
/// ```
#[macro_export]
macro_rules! flow_state {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis struct $name:ident : $input:ty => $action:ty ;
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            $vis struct $name;

            impl $crate::core::State for $name {
                type Input = $input;
                type Action = $action;
            }
        )+
    };
}
