//! Checkout flow walking a cart through shipping and payment.
//!
//! Run with `RUST_LOG=flowset=debug cargo run --example checkout` to see the
//! dispatch log.

use flowset::{flow_state, Flow, Transition, TransitionBuilder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug)]
pub enum CartAction {
    Add(String),
    Checkout,
}

#[derive(Debug)]
pub enum ShippingAction {
    Enter(Address),
    BackToCart,
}

#[derive(Debug)]
pub enum PaymentAction {
    Pay { amount_cents: u64 },
    ChangeAddress,
}

flow_state! {
    /// Items collected so far.
    pub struct Cart: Vec<String> => CartAction;
    /// Number of items being shipped.
    pub struct Shipping: usize => ShippingAction;
    /// Destination confirmed for payment.
    pub struct Payment: Address => PaymentAction;
    /// Amount charged, in cents.
    pub struct Confirmed: u64 => ();
}

fn on_cart(t: TransitionBuilder<Cart>, items: Option<&Vec<String>>, action: &CartAction) -> Transition<Cart> {
    let items = items.cloned().unwrap_or_default();
    match action {
        CartAction::Add(item) => {
            let mut items = items;
            items.push(item.clone());
            t.stay().using(items).into()
        }
        CartAction::Checkout => t.goto(Shipping).using(items.len()).into(),
    }
}

fn on_shipping(
    t: TransitionBuilder<Shipping>,
    _: Option<&usize>,
    action: &ShippingAction,
) -> Transition<Shipping> {
    match action {
        ShippingAction::Enter(address) => t.goto(Payment).using(address.clone()).into(),
        ShippingAction::BackToCart => t.go_back_to(Cart).into(),
    }
}

fn on_payment(
    t: TransitionBuilder<Payment>,
    _: Option<&Address>,
    action: &PaymentAction,
) -> Transition<Payment> {
    match action {
        PaymentAction::Pay { amount_cents } => t.goto(Confirmed).using(*amount_cents).into(),
        PaymentAction::ChangeAddress => t.go_back_to(Shipping).into(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut flow = Flow::builder()
        .named("checkout")
        .start_with(Cart, Vec::new())
        .for_state(Cart, on_cart)
        .for_state(Shipping, on_shipping)
        .for_state(Payment, on_payment)
        .on_transition(|_, (from, to), _| println!("  hook: {from} -> {to}"))
        .record_history()
        .build()?;

    flow.add_state_change_listener(|state, _| println!("Entered {state}"));

    flow.dispatch(Cart, CartAction::Add("keyboard".to_string()))?;
    flow.dispatch(Cart, CartAction::Add("mouse".to_string()))?;
    flow.dispatch(Cart, CartAction::Checkout)?;
    flow.dispatch(Shipping, ShippingAction::BackToCart)?;
    flow.dispatch(Cart, CartAction::Add("monitor".to_string()))?;
    flow.dispatch(Cart, CartAction::Checkout)?;
    flow.dispatch(
        Shipping,
        ShippingAction::Enter(Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
        }),
    )?;

    if let Some(address) = flow.data(Payment) {
        println!("Shipping {:?} items to {}, {}", flow.data(Shipping), address.street, address.city);
    }

    // Stale: the flow has already left Cart.
    let handled = flow.dispatch(Cart, CartAction::Checkout)?;
    println!("Dispatch from Cart handled: {handled}");

    flow.dispatch(Payment, PaymentAction::Pay { amount_cents: 12_999 })?;
    println!("Charged {:?} cents", flow.data(Confirmed));

    if let Some(history) = flow.history() {
        let path: Vec<_> = history.get_path().iter().map(|state| state.name()).collect();
        println!("Path: {}", path.join(" -> "));
        println!("History: {}", serde_json::to_string_pretty(history)?);
    }

    Ok(())
}
