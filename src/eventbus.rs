use crate::event::ChannelKind;
use crate::reducer::Transition;
use std::collections::HashMap;

/// Trait for reacting to state transitions from any tracked device.
pub trait TransitionListener {
    fn on_transition(&mut self, device: u32, transition: &Transition);
}

/// Determines which transitions a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum TransitionFilter {
    All,
    ButtonsOnly,
    AxesOnly,
    /// Press/release and start/stop edges only; skips plain axis updates.
    EdgesOnly,
    Custom(fn(u32, &Transition) -> bool),
}

impl TransitionFilter {
    fn accepts(&self, device: u32, transition: &Transition) -> bool {
        match self {
            TransitionFilter::All => true,
            TransitionFilter::ButtonsOnly => {
                transition.channel_kind() == Some(ChannelKind::Button)
            }
            TransitionFilter::AxesOnly => transition.channel_kind() == Some(ChannelKind::Axis),
            TransitionFilter::EdgesOnly => transition.is_edge(),
            TransitionFilter::Custom(f) => f(device, transition),
        }
    }
}

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    listener: Box<dyn TransitionListener>,
    enabled: bool,
    filter: TransitionFilter,
    device: Option<u32>,
}

#[derive(Default)]
pub struct TransitionBus {
    next_id: u64,
    listeners: HashMap<u64, ListenerEntry>,
}

impl TransitionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener with a filter and an optional device index it is limited to.
    pub fn add_listener(
        &mut self,
        listener: impl TransitionListener + 'static,
        filter: TransitionFilter,
        device: Option<u32>,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                device,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&mut self, id: u64) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Emits one transition to all active and matching listeners.
    pub fn emit(&mut self, device: u32, transition: &Transition) {
        if matches!(transition, Transition::None) {
            return;
        }
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }
            if entry.device.is_some_and(|wanted| wanted != device) {
                continue;
            }
            if entry.filter.accepts(device, transition) {
                entry.listener.on_transition(device, transition);
            }
        }
    }

    /// Emits a batch of transitions from one device, in order.
    pub fn emit_all(&mut self, device: u32, transitions: &[Transition]) {
        for transition in transitions {
            self.emit(device, transition);
        }
    }
}
