use crate::event::JoyEvent;

/// Producer of already-demultiplexed controller events.
///
/// Backends that talk to hardware (or a windowing library's event queue) implement
/// this; the tracker only sees the events, in the order `poll` returns them.
pub trait EventSource {
    /// Drains the events captured since the last poll, oldest first.
    fn poll(&mut self) -> Vec<JoyEvent>;
    fn name(&self) -> &str;
}
