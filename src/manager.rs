//! Multi-device routing.
//!
//! [`JoystickManager`] owns the registered [`EventSource`]s and one [`Joystick`] per
//! device index. Each frame the host ticks its clock and calls
//! [`pump`](JoystickManager::pump): every source is polled in registration order, its
//! events are routed to the tracker for their device index in capture order, and the
//! resulting transitions are published on the [`TransitionBus`]. Queries made after
//! `pump` returns see the whole frame applied.
//!
//! Trackers are created on the first event naming their device index and are never
//! dropped; a `DeviceRemoved` only suppresses events until the device is added again.

use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::device::EventSource;
use crate::error::ReduceError;
use crate::eventbus::{TransitionBus, TransitionFilter, TransitionListener};
use crate::event::JoyEvent;
use crate::joystick::Joystick;
use crate::reducer::Transition;
use std::collections::HashMap;
use tracing::{debug, info};

/// Outcome of one [`feed`](JoystickManager::feed) or [`pump`](JoystickManager::pump).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedReport {
    /// Events that reached a tracker and were published on the bus.
    pub applied: usize,
    /// Events for a removed device.
    pub dropped: usize,
    /// Events a tracker refused, with the reason, in input order.
    pub rejected: Vec<(JoyEvent, ReduceError)>,
}

impl FeedReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn absorb(&mut self, other: FeedReport) {
        self.applied += other.applied;
        self.dropped += other.dropped;
        self.rejected.extend(other.rejected);
    }
}

pub struct JoystickManager<C: Clock + Clone> {
    clock: C,
    config: TrackerConfig,
    sources: Vec<Box<dyn EventSource>>,
    joysticks: HashMap<u32, Joystick<C>>,
    bus: TransitionBus,
}

impl<C: Clock + Clone> JoystickManager<C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, TrackerConfig::default())
    }

    /// Every tracker created by this manager starts from `config`.
    pub fn with_config(clock: C, config: TrackerConfig) -> Self {
        Self {
            clock,
            config,
            sources: Vec::new(),
            joysticks: HashMap::new(),
            bus: TransitionBus::new(),
        }
    }

    pub fn add_source<S: EventSource + 'static>(&mut self, source: S) {
        info!(source = source.name(), "registered event source");
        self.sources.push(Box::new(source));
    }

    pub fn sources(&self) -> impl Iterator<Item = &dyn EventSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    pub fn add_listener(
        &mut self,
        listener: impl TransitionListener + 'static,
        filter: TransitionFilter,
        device: Option<u32>,
    ) -> u64 {
        self.bus.add_listener(listener, filter, device)
    }

    pub fn bus_mut(&mut self) -> &mut TransitionBus {
        &mut self.bus
    }

    /// Polls all sources in registration order and applies their events.
    pub fn pump(&mut self) -> FeedReport {
        let mut report = FeedReport::default();
        for i in 0..self.sources.len() {
            let events = self.sources[i].poll();
            report.absorb(self.feed(&events));
        }
        report
    }

    /// Applies events that did not come from a registered source.
    pub fn feed<'a, I>(&mut self, events: I) -> FeedReport
    where
        I: IntoIterator<Item = &'a JoyEvent>,
    {
        let mut report = FeedReport::default();
        for event in events {
            let device = event.device;
            let joystick = self.joysticks.entry(device).or_insert_with(|| {
                debug!(device, "tracking new device index");
                Joystick::with_config(device, self.clock.clone(), self.config.clone())
            });
            match joystick.handle_event(event) {
                Ok(Transition::Dropped) => report.dropped += 1,
                Ok(transition) => {
                    report.applied += 1;
                    self.bus.emit(device, &transition);
                }
                Err(err) => report.rejected.push((*event, err)),
            }
        }
        report
    }

    pub fn joystick(&self, device: u32) -> Option<&Joystick<C>> {
        self.joysticks.get(&device)
    }

    pub fn joystick_mut(&mut self, device: u32) -> Option<&mut Joystick<C>> {
        self.joysticks.get_mut(&device)
    }

    /// Tracked device indices, ascending.
    pub fn devices(&self) -> Vec<u32> {
        let mut devices: Vec<u32> = self.joysticks.keys().copied().collect();
        devices.sort_unstable();
        devices
    }

    /// Device indices currently attached, ascending.
    pub fn connected(&self) -> Vec<u32> {
        self.devices()
            .into_iter()
            .filter(|d| self.joysticks[d].is_attached())
            .collect()
    }
}
