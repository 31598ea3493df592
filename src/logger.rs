use crate::eventbus::TransitionListener;
use crate::reducer::Transition;
use tracing::{debug, info};

/// A simple listener that logs transitions through `tracing`.
///
/// Edges go out at `info`, plain axis updates at `debug`.
#[derive(Debug, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl TransitionListener for Logger {
    fn on_transition(&mut self, device: u32, transition: &Transition) {
        match transition {
            Transition::AxisUpdated { .. } => debug!(device, ?transition, "[Input]"),
            _ => info!(device, ?transition, "[Input]"),
        }
    }
}
