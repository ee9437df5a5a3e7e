//! End-to-end behavior of flows: building, dispatching and observing.

use flowset::{
    flow_state, BuildError, Flow, State, StateId, Transition, TransitionBuilder, TransitionError,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
pub enum StartAction {
    Next(i32),
    Finish,
    Rename(String),
    Reply(i32, String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MiddleAction {
    Back,
    Done,
}

flow_state! {
    pub struct Start: String => StartAction;
    pub struct Middle: i32 => MiddleAction;
    pub struct End: () => ();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn on_start(t: TransitionBuilder<Start>, _: Option<&String>, action: &StartAction) -> Transition<Start> {
    match action {
        StartAction::Next(n) => t.goto(Middle).using(*n).into(),
        StartAction::Finish => t.goto(End).into(),
        StartAction::Rename(name) => t.stay().using(name.clone()).into(),
        StartAction::Reply(n, reply) => t.goto(Middle).using(*n).replying(reply.clone()).into(),
    }
}

fn on_middle(t: TransitionBuilder<Middle>, _: Option<&i32>, action: &MiddleAction) -> Transition<Middle> {
    match action {
        MiddleAction::Back => t.go_back_to(Start).into(),
        MiddleAction::Done => t.goto(End).into(),
    }
}

fn flow_starting_with(data: Option<String>) -> Flow {
    init_tracing();
    Flow::builder()
        .named("test")
        .start_with(Start, data)
        .for_state(Start, on_start)
        .for_state(Middle, on_middle)
        .build()
        .unwrap()
}

fn flow() -> Flow {
    flow_starting_with(Some("hello".to_string()))
}

fn shared<T>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (Arc::clone(&log), log)
}

#[test]
fn build_enters_default_state_with_its_data() {
    let flow = flow();

    assert!(flow.is_in(Start));
    assert_eq!(flow.current_state(), StateId::of::<Start>());
    assert_eq!(flow.data(Start).map(String::as_str), Some("hello"));
}

#[test]
fn build_without_default_state_fails() {
    let result = Flow::builder().for_state(Start, on_start).build();

    assert_eq!(
        result.unwrap_err(),
        BuildError::DefaultStateMissing {
            flow: "flow".to_string()
        }
    );
}

#[test]
fn dispatch_without_handler_reports_missing_transition() {
    let mut flow = flow();
    flow.dispatch(Start, StartAction::Finish).unwrap();

    let error = flow.dispatch(End, ()).unwrap_err();

    assert_eq!(
        error,
        TransitionError::TransitionMissing {
            state: End.id(),
            action: "()".to_string(),
        }
    );
    assert!(error.to_string().contains("'End'"));
    assert!(flow.is_in(End));
}

#[test]
fn goto_using_stores_target_data() {
    let mut flow = flow();

    assert!(flow.dispatch(Start, StartAction::Next(42)).unwrap());

    assert!(flow.is_in(Middle));
    assert_eq!(flow.data(Middle), Some(&42));
    assert_eq!(flow.data(Start).map(String::as_str), Some("hello"));
}

#[test]
fn unit_target_needs_no_payload() {
    let mut flow = flow();

    flow.dispatch(Start, StartAction::Finish).unwrap();

    assert!(flow.is_in(End));
    assert_eq!(flow.data(End), Some(&()));
}

#[test]
fn stay_replaces_own_data() {
    let mut flow = flow();

    flow.dispatch(Start, StartAction::Rename("world".to_string())).unwrap();

    assert!(flow.is_in(Start));
    assert_eq!(flow.data(Start).map(String::as_str), Some("world"));
}

#[test]
fn start_without_data_leaves_store_empty() {
    let mut flow = flow_starting_with(None);

    assert!(flow.is_in(Start));
    assert!(flow.data(Start).is_none());

    flow.dispatch(Start, StartAction::Next(1)).unwrap();
    assert!(flow.data(Start).is_none());
}

#[test]
fn go_back_keeps_previous_data() {
    let mut flow = flow();

    flow.dispatch(Start, StartAction::Next(3)).unwrap();
    flow.dispatch(Middle, MiddleAction::Back).unwrap();

    assert!(flow.is_in(Start));
    assert_eq!(flow.data(Start).map(String::as_str), Some("hello"));
    assert_eq!(flow.data(Middle), Some(&3));
}

#[test]
fn replying_updates_source_before_leaving() {
    let mut flow = flow();

    flow.dispatch(Start, StartAction::Reply(9, "answered".to_string()))
        .unwrap();
    assert!(flow.is_in(Middle));
    assert_eq!(flow.data(Middle), Some(&9));

    flow.dispatch(Middle, MiddleAction::Back).unwrap();
    assert_eq!(flow.data(Start).map(String::as_str), Some("answered"));
}

#[test]
fn dispatch_from_stale_state_is_ignored() {
    let mut flow = flow();
    flow.dispatch(Start, StartAction::Next(1)).unwrap();

    let handled = flow.dispatch(Start, StartAction::Next(2)).unwrap();

    assert!(!handled);
    assert!(flow.is_in(Middle));
    assert_eq!(flow.data(Middle), Some(&1));
}

#[test]
fn hook_runs_after_every_dispatch_including_stay() {
    init_tracing();
    let (sink, log) = shared();

    let mut flow = Flow::builder()
        .start_with(Start, "a".to_string())
        .for_state(Start, on_start)
        .for_state(Middle, on_middle)
        .on_transition(move |flow, (from, to), _| {
            assert_eq!(flow.current_state(), to);
            sink.lock().unwrap().push((from, to));
        })
        .build()
        .unwrap();

    flow.dispatch(Start, StartAction::Rename("b".to_string())).unwrap();
    flow.dispatch(Start, StartAction::Next(1)).unwrap();
    flow.dispatch(Middle, MiddleAction::Done).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            (Start.id(), Start.id()),
            (Start.id(), Middle.id()),
            (Middle.id(), End.id()),
        ]
    );
}

#[test]
fn hook_is_not_run_for_ignored_dispatch() {
    let (sink, log) = shared();

    let mut flow = Flow::builder()
        .start_with(Start, "a".to_string())
        .for_state(Start, on_start)
        .on_transition(move |_, endpoints, _| sink.lock().unwrap().push(endpoints))
        .build()
        .unwrap();

    flow.dispatch(Middle, MiddleAction::Done).unwrap();

    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn transition_listeners_see_state_changes_only() {
    let mut flow = flow();
    let (sink, log) = shared();

    flow.add_transition_listener(move |transition, _| {
        sink.lock().unwrap().push((transition.from, transition.to));
    });

    flow.dispatch(Start, StartAction::Rename("x".to_string())).unwrap();
    flow.dispatch(Start, StartAction::Next(5)).unwrap();
    flow.dispatch(Middle, MiddleAction::Back).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![(Start.id(), Middle.id()), (Middle.id(), Start.id())]
    );
}

#[test]
fn transition_listeners_run_in_registration_order() {
    let mut flow = flow();
    let (sink, log) = shared();

    let first = Arc::clone(&sink);
    flow.add_transition_listener(move |_, _| first.lock().unwrap().push("first"));
    flow.add_transition_listener(move |_, _| sink.lock().unwrap().push("second"));

    flow.dispatch(Start, StartAction::Next(1)).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn removed_transition_listener_is_not_notified() {
    let mut flow = flow();
    let (sink, log) = shared();

    let id = flow.add_transition_listener(move |transition, _| {
        sink.lock().unwrap().push(transition.to);
    });
    flow.dispatch(Start, StartAction::Next(1)).unwrap();

    assert!(flow.remove_transition_listener(id));
    flow.dispatch(Middle, MiddleAction::Back).unwrap();

    assert_eq!(*log.lock().unwrap(), vec![Middle.id()]);
    assert!(!flow.remove_transition_listener(id));
}

#[test]
fn state_change_listener_replays_current_state() {
    let mut flow = flow();
    let (sink, log) = shared();

    flow.add_state_change_listener(move |state, _| sink.lock().unwrap().push(state));

    assert_eq!(*log.lock().unwrap(), vec![Start.id()]);
}

#[test]
fn state_change_listener_sees_every_assignment() {
    let mut flow = flow();
    let (sink, log) = shared();

    flow.add_state_change_listener(move |state, _| sink.lock().unwrap().push(state));

    flow.dispatch(Start, StartAction::Rename("y".to_string())).unwrap();
    flow.dispatch(Start, StartAction::Next(1)).unwrap();
    flow.dispatch(Middle, MiddleAction::Back).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![Start.id(), Start.id(), Middle.id(), Start.id()]
    );
}

#[test]
fn removed_state_change_listener_is_not_notified() {
    let mut flow = flow();
    let (sink, log) = shared();

    let id = flow.add_state_change_listener(move |state, _| sink.lock().unwrap().push(state));
    assert!(flow.remove_state_change_listener(id));

    flow.dispatch(Start, StartAction::Next(1)).unwrap();

    assert_eq!(*log.lock().unwrap(), vec![Start.id()]);
}

#[test]
fn state_values_read_and_dispatch_through_flow() {
    let mut flow = flow();

    assert_eq!(Start.data(&flow).map(String::as_str), Some("hello"));
    assert!(Start.dispatch_action(&mut flow, StartAction::Next(8)).unwrap());
    assert_eq!(Middle.data(&flow), Some(&8));
    assert!(!Start.dispatch_action(&mut flow, StartAction::Finish).unwrap());
}

#[test]
fn history_exports_as_json() {
    let mut flow = Flow::builder()
        .start_with(Start, "h".to_string())
        .for_state(Start, on_start)
        .for_state(Middle, on_middle)
        .record_history()
        .build()
        .unwrap();

    flow.dispatch(Start, StartAction::Rename("i".to_string())).unwrap();
    flow.dispatch(Start, StartAction::Next(2)).unwrap();
    flow.dispatch(Middle, MiddleAction::Done).unwrap();

    let history = flow.history().unwrap();
    assert_eq!(history.get_path(), vec![Start.id(), Middle.id(), End.id()]);

    let json = serde_json::to_value(history).unwrap();
    let transitions = json["transitions"].as_array().unwrap();
    assert_eq!(transitions.len(), 2);
    assert_eq!(transitions[0]["from"], "Start");
    assert_eq!(transitions[0]["to"], "Middle");
    assert_eq!(transitions[1]["to"], "End");
}
