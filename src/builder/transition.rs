//! Staged builders handlers use to describe a transition.
//!
//! Each stage only offers the calls that are valid next, so a handler cannot
//! move to a state without supplying a payload of that state's input type.
//! States whose input is `()` are the one exemption.

use crate::core::{Payload, State, StateId};
use crate::flow::{Transition, TransitionKind};
use std::marker::PhantomData;

/// Entry point handed to every transition handler.
///
/// `F` is the state the handler is registered for.
pub struct TransitionBuilder<F: State> {
    _from: PhantomData<fn() -> F>,
}

impl<F: State> TransitionBuilder<F> {
    pub(crate) fn new() -> Self {
        Self { _from: PhantomData }
    }

    /// Move to `target`. Finish with [`EmptyTransition::using`].
    pub fn goto<T: State>(&self, _target: T) -> EmptyTransition<F, T> {
        EmptyTransition {
            _states: PhantomData,
        }
    }

    /// Move back to `target`, restoring the payload last stored for it.
    pub fn go_back_to<T: State>(&self, _target: T) -> BackTransition<F, T> {
        BackTransition {
            _states: PhantomData,
        }
    }

    /// Remain in the current state. Same as `goto` with the handler's own
    /// state.
    pub fn stay(&self) -> EmptyTransition<F, F> {
        EmptyTransition {
            _states: PhantomData,
        }
    }
}

/// Transition pinned to its source and target but still missing the target
/// payload.
pub struct EmptyTransition<F: State, T: State> {
    _states: PhantomData<fn() -> (F, T)>,
}

impl<F: State, T: State> EmptyTransition<F, T> {
    /// Supply the payload for the target state.
    pub fn using(self, data: T::Input) -> ActionTransition<F, T> {
        ActionTransition {
            data,
            _states: PhantomData,
        }
    }
}

/// Complete transition to `T` carrying its new payload.
pub struct ActionTransition<F: State, T: State> {
    data: T::Input,
    _states: PhantomData<fn() -> (F, T)>,
}

impl<F: State, T: State> ActionTransition<F, T> {
    /// Also overwrite the payload of the state being left.
    pub fn replying(self, from_data: F::Input) -> ReplyingTransition<F, T> {
        ReplyingTransition {
            to_data: self.data,
            from_data,
            _states: PhantomData,
        }
    }

    /// Payload the target state will receive.
    pub fn data(&self) -> &T::Input {
        &self.data
    }
}

/// Transition to `T` that also replaces the source state's payload.
pub struct ReplyingTransition<F: State, T: State> {
    to_data: T::Input,
    from_data: F::Input,
    _states: PhantomData<fn() -> (F, T)>,
}

/// Transition back to `T` that reuses whatever payload `T` already has.
pub struct BackTransition<F: State, T: State> {
    _states: PhantomData<fn() -> (F, T)>,
}

fn erase<S: State>(data: S::Input) -> Payload {
    Box::new(data)
}

impl<F: State, T: State> From<ActionTransition<F, T>> for Transition<F> {
    fn from(transition: ActionTransition<F, T>) -> Self {
        Transition::new(
            StateId::of::<T>(),
            TransitionKind::Action,
            Some(erase::<T>(transition.data)),
            None,
        )
    }
}

impl<F: State, T: State> From<ReplyingTransition<F, T>> for Transition<F> {
    fn from(transition: ReplyingTransition<F, T>) -> Self {
        Transition::new(
            StateId::of::<T>(),
            TransitionKind::Replying,
            Some(erase::<T>(transition.to_data)),
            Some(erase::<F>(transition.from_data)),
        )
    }
}

impl<F: State, T: State> From<BackTransition<F, T>> for Transition<F> {
    fn from(_: BackTransition<F, T>) -> Self {
        Transition::new(StateId::of::<T>(), TransitionKind::Back, None, None)
    }
}

/// A target without payload needs no `using` call.
impl<F: State, T: State<Input = ()>> From<EmptyTransition<F, T>> for Transition<F> {
    fn from(transition: EmptyTransition<F, T>) -> Self {
        transition.using(()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Form;
    #[derive(Debug, Clone, Copy)]
    struct Review;
    #[derive(Debug, Clone, Copy)]
    struct Done;

    impl State for Form {
        type Input = String;
        type Action = ();
    }

    impl State for Review {
        type Input = u32;
        type Action = ();
    }

    impl State for Done {
        type Input = ();
        type Action = ();
    }

    fn builder() -> TransitionBuilder<Form> {
        TransitionBuilder::new()
    }

    #[test]
    fn goto_using_builds_action_transition() {
        let transition: Transition<Form> = builder().goto(Review).using(3).into();

        assert_eq!(transition.from(), Form.id());
        assert_eq!(transition.to(), Review.id());
        assert_eq!(transition.kind(), TransitionKind::Action);
    }

    #[test]
    fn using_keeps_target_data() {
        let action = builder().goto(Review).using(9);
        assert_eq!(action.data(), &9);
    }

    #[test]
    fn replying_builds_replying_transition() {
        let transition: Transition<Form> = builder()
            .goto(Review)
            .using(3)
            .replying("edited".to_string())
            .into();

        assert_eq!(transition.to(), Review.id());
        assert_eq!(transition.kind(), TransitionKind::Replying);
    }

    #[test]
    fn go_back_to_builds_back_transition() {
        let transition: Transition<Form> = builder().go_back_to(Review).into();

        assert_eq!(transition.to(), Review.id());
        assert_eq!(transition.kind(), TransitionKind::Back);
    }

    #[test]
    fn stay_targets_source_state() {
        let transition: Transition<Form> = builder().stay().using("again".to_string()).into();

        assert_eq!(transition.from(), transition.to());
        assert!(transition.is_stay());
    }

    #[test]
    fn unit_target_skips_using() {
        let transition: Transition<Form> = builder().goto(Done).into();

        assert_eq!(transition.to(), Done.id());
        assert_eq!(transition.kind(), TransitionKind::Action);
    }
}
