//! Per-device input tracker.
//!
//! [`Joystick`] owns a [`ChannelStore`] bound to one device index, a [`Clock`] and a
//! [`TrackerConfig`]. Events naming any other index are dropped. Feed it the frame's
//! events with [`handle_event`](Joystick::handle_event), then query it any
//! number of times. Queries never mutate state and compute elapsed values against
//! the clock at call time, so two calls within one frame always agree.
//!
//! Every query returns `None` for a channel that has never been observed. Elapsed
//! queries also return `None` outside the phase they describe: `hold_time` is only
//! defined while pressed, `time_since_release` only while released.
//!
//! ```
//! use std::rc::Rc;
//! use joystate::{JoyEvent, Joystick, ManualClock};
//!
//! let clock = Rc::new(ManualClock::new(10.0, 100));
//! let mut joy = Joystick::new(0, Rc::clone(&clock));
//!
//! joy.handle_event(&JoyEvent::button_down(0, 0, 2)).unwrap();
//! assert_eq!(joy.just_pressed(2), Some(true));
//!
//! clock.advance(0.5, 30);
//! assert_eq!(joy.hold_frames(2), Some(30));
//! assert_eq!(joy.just_pressed(2), Some(false));
//! ```

use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::error::ReduceError;
use crate::event::{ChannelKind, JoyEvent};
use crate::reducer::{reduce, Transition};
use crate::snapshot::Snapshot;
use crate::state::{
    clamp_sensitivity, Attachment, AxisState, ButtonState, ChannelData, ChannelStore,
};
use tracing::{trace, warn};

pub struct Joystick<C: Clock> {
    clock: C,
    config: TrackerConfig,
    store: ChannelStore,
    input_kind: ChannelKind,
}

impl<C: Clock> Joystick<C> {
    /// Tracker for `device`.
    pub fn new(device: u32, clock: C) -> Self {
        Self::with_config(device, clock, TrackerConfig::default())
    }

    pub fn with_config(device: u32, clock: C, config: TrackerConfig) -> Self {
        Self {
            clock,
            config,
            store: ChannelStore::new(device),
            input_kind: ChannelKind::Button,
        }
    }

    /// Device index this tracker is bound to.
    pub fn device(&self) -> u32 {
        self.store.device()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    // ---- reduction ----

    /// Applies one event at the current clock reading.
    ///
    /// A rejected event leaves the tracker unchanged; the error is informational
    /// for whoever produced the event.
    pub fn handle_event(&mut self, event: &JoyEvent) -> Result<Transition, ReduceError> {
        let now = self.clock.now();
        let result = reduce(&mut self.store, event, now, &self.config);

        #[cfg(feature = "debug-log")]
        tracing::debug!(
            "[REDUCE] frame={} t={:.4} {:?} -> {:?}",
            now.frame,
            now.seconds,
            event,
            result
        );

        match &result {
            Ok(Transition::Dropped) => {
                trace!(device = event.device, kind = ?event.kind, "dropped event")
            }
            Err(err) => warn!(frame = now.frame, "rejected input event: {err}"),
            Ok(_) => {}
        }
        result
    }

    /// Applies events in order and returns the transitions that changed state.
    ///
    /// Rejected events are logged and skipped, as are events that were dropped or
    /// had no effect ([`Transition::Dropped`], [`Transition::None`]).
    pub fn handle_events<'a, I>(&mut self, events: I) -> Vec<Transition>
    where
        I: IntoIterator<Item = &'a JoyEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| self.handle_event(event).ok())
            .filter(|t| !matches!(t, Transition::Dropped | Transition::None))
            .collect()
    }

    // ---- state access ----

    pub fn button(&self, button: u16) -> Option<&ButtonState> {
        self.store.button(button)
    }

    pub fn axis(&self, axis: u16) -> Option<&AxisState> {
        self.store.axis(axis)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonState> {
        self.store.buttons()
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisState> {
        self.store.axes()
    }

    /// `false` only after a `DeviceRemoved` with no later `DeviceAdded`.
    pub fn is_attached(&self) -> bool {
        self.store.is_attached()
    }

    /// Instance id bound by the last `DeviceAdded`.
    pub fn instance_id(&self) -> Option<i32> {
        match self.store.attachment()? {
            Attachment::Attached { instance_id } => Some(instance_id),
            Attachment::Removed => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.store, self.clock.now())
    }

    // ---- generic channel access ----

    /// Selects which channel table [`input_data`](Self::input_data) reads.
    /// Defaults to [`ChannelKind::Button`].
    pub fn set_input_kind(&mut self, kind: ChannelKind) {
        self.input_kind = kind;
    }

    pub fn input_kind(&self) -> ChannelKind {
        self.input_kind
    }

    /// State of channel `index` in the table picked by the current input kind.
    pub fn input_data(&self, index: u16) -> Option<ChannelData<'_>> {
        match self.input_kind {
            ChannelKind::Button => self.button(index).map(ChannelData::Button),
            ChannelKind::Axis => self.axis(index).map(ChannelData::Axis),
        }
    }

    // ---- buttons ----

    pub fn is_pressed(&self, button: u16) -> Option<bool> {
        self.button(button).map(|b| b.pressed)
    }

    /// Pressed during the current frame.
    pub fn just_pressed(&self, button: u16) -> Option<bool> {
        let frame = self.clock.frame();
        self.button(button).map(|b| b.press_frame == frame)
    }

    /// Released during the current frame.
    pub fn just_released(&self, button: u16) -> Option<bool> {
        let frame = self.clock.frame();
        self.button(button)
            .map(|b| b.release_frame.is_some_and(|f| f == frame))
    }

    pub fn press_time(&self, button: u16) -> Option<f64> {
        self.button(button).map(|b| b.press_time)
    }

    pub fn press_frame(&self, button: u16) -> Option<u64> {
        self.button(button).map(|b| b.press_frame)
    }

    /// Seconds the button has been held. `None` while released.
    pub fn hold_time(&self, button: u16) -> Option<f64> {
        let b = self.button(button).filter(|b| b.pressed)?;
        Some(self.clock.seconds() - b.press_time)
    }

    /// Frames the button has been held. `None` while released.
    pub fn hold_frames(&self, button: u16) -> Option<u64> {
        let b = self.button(button).filter(|b| b.pressed)?;
        Some(self.clock.frame().saturating_sub(b.press_frame))
    }

    pub fn release_time(&self, button: u16) -> Option<f64> {
        self.button(button)?.release_time
    }

    pub fn release_frame(&self, button: u16) -> Option<u64> {
        self.button(button)?.release_frame
    }

    pub fn time_since_release(&self, button: u16) -> Option<f64> {
        let released = self.release_time(button)?;
        Some(self.clock.seconds() - released)
    }

    pub fn frames_since_release(&self, button: u16) -> Option<u64> {
        let released = self.release_frame(button)?;
        Some(self.clock.frame().saturating_sub(released))
    }

    // ---- axes ----

    /// Scaled value of the last sample.
    pub fn axis_value(&self, axis: u16) -> Option<f32> {
        self.axis(axis).map(|a| a.value)
    }

    pub fn sensitivity(&self, axis: u16) -> Option<f32> {
        self.axis(axis).map(|a| a.sensitivity)
    }

    pub fn is_moving(&self, axis: u16) -> Option<bool> {
        self.axis(axis).map(|a| a.moving)
    }

    /// Started moving during the current frame.
    pub fn just_moving(&self, axis: u16) -> Option<bool> {
        let frame = self.clock.frame();
        self.axis(axis).map(|a| a.move_frame == frame)
    }

    /// Settled inside the deadzone during the current frame.
    pub fn just_stopped_moving(&self, axis: u16) -> Option<bool> {
        let frame = self.clock.frame();
        self.axis(axis)
            .map(|a| a.stop_frame.is_some_and(|f| f == frame))
    }

    pub fn move_time(&self, axis: u16) -> Option<f64> {
        self.axis(axis).map(|a| a.move_time)
    }

    pub fn move_frame(&self, axis: u16) -> Option<u64> {
        self.axis(axis).map(|a| a.move_frame)
    }

    /// Seconds the axis has been moving. `None` while settled.
    pub fn axis_hold_time(&self, axis: u16) -> Option<f64> {
        let a = self.axis(axis).filter(|a| a.moving)?;
        Some(self.clock.seconds() - a.move_time)
    }

    /// Frames the axis has been moving. `None` while settled.
    pub fn axis_hold_frames(&self, axis: u16) -> Option<u64> {
        let a = self.axis(axis).filter(|a| a.moving)?;
        Some(self.clock.frame().saturating_sub(a.move_frame))
    }

    pub fn stop_time(&self, axis: u16) -> Option<f64> {
        self.axis(axis)?.stop_time
    }

    pub fn stop_frame(&self, axis: u16) -> Option<u64> {
        self.axis(axis)?.stop_frame
    }

    pub fn time_since_stop(&self, axis: u16) -> Option<f64> {
        let stopped = self.stop_time(axis)?;
        Some(self.clock.seconds() - stopped)
    }

    pub fn frames_since_stop(&self, axis: u16) -> Option<u64> {
        let stopped = self.stop_frame(axis)?;
        Some(self.clock.frame().saturating_sub(stopped))
    }

    // ---- sensitivity ----

    /// Sets an axis sensitivity, clamped to `[0.0, 1.0]`.
    ///
    /// Applies from the next sample on; the stored value is not rescaled. Returns
    /// the sensitivity now in effect, or `None` if the axis was never observed (no
    /// state is created). NaN leaves the current sensitivity in place.
    pub fn set_sensitivity(&mut self, axis: u16, value: f32) -> Option<f32> {
        let state = self.store.axis_mut(axis)?;
        match clamp_sensitivity(value) {
            Some(clamped) => state.sensitivity = clamped,
            None => warn!(axis, "ignoring NaN sensitivity"),
        }
        Some(state.sensitivity)
    }
}
