use crate::eventbus::TransitionListener;
use crate::reducer::Transition;

/// Wraps a listener and filters transitions based on a user-supplied predicate.
pub struct FilteredListener {
    predicate: Box<dyn Fn(u32, &Transition) -> bool>,
    inner: Box<dyn TransitionListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(u32, &Transition) -> bool + 'static,
        inner: Box<dyn TransitionListener>,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner,
        }
    }
}

impl TransitionListener for FilteredListener {
    fn on_transition(&mut self, device: u32, transition: &Transition) {
        if (self.predicate)(device, transition) {
            self.inner.on_transition(device, transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter(Rc<Cell<usize>>);

    impl TransitionListener for Counter {
        fn on_transition(&mut self, _: u32, _: &Transition) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn predicate_gates_inner_listener() {
        let hits = Rc::new(Cell::new(0));
        let mut listener = FilteredListener::new(
            |_, t| matches!(t, Transition::Pressed { button: 0 }),
            Box::new(Counter(Rc::clone(&hits))),
        );
        listener.on_transition(0, &Transition::Pressed { button: 1 });
        listener.on_transition(0, &Transition::Pressed { button: 0 });
        assert_eq!(hits.get(), 1);
    }
}
