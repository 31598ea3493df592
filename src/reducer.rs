//! Event reducer.
//!
//! [`reduce`] applies one [`JoyEvent`] to a [`ChannelStore`] at a given clock
//! reading. It is the only place channel state changes. The caller supplies `now`,
//! so the reducer never reads a clock itself and replays are deterministic.
//!
//! ## Transitions
//! A store is bound to one device index. Any event naming another index is
//! [`Transition::Dropped`] without touching the store.
//! - **DeviceAdded** marks the device attached. Channel history is untouched.
//! - **DeviceRemoved** marks it removed. Later channel events are dropped until it
//!   is added again.
//! - **ButtonDown** (re)starts a press: press stamps are set to `now`, release stamps
//!   cleared. A repeated down on a held button restarts the press.
//! - **ButtonUp** releases a held button once. A release for a button never seen
//!   pressed is rejected with [`ReduceError::ReleaseWithoutPress`] and the store is
//!   left untouched; a release for an already released button is ignored.
//! - **AxisMotion** stores `raw * sensitivity`. The first sample creates the axis in
//!   the moving state. Later samples compare the scaled value against a band of
//!   half-width `sensitivity * deadzone` around zero (bounds inclusive) and flip
//!   `moving` on the frame the value crosses it. A NaN or infinite sample is
//!   rejected with [`ReduceError::NonFiniteAxisValue`].

use crate::clock::Stamp;
use crate::config::TrackerConfig;
use crate::error::ReduceError;
use crate::event::{ChannelKind, JoyEvent, JoyEventKind};
use crate::state::{Attachment, AxisState, ButtonState, ChannelStore};
use serde::{Deserialize, Serialize};

/// Observable effect of reducing one event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Nothing changed.
    None,
    DeviceAttached { instance_id: i32 },
    DeviceDetached,
    /// The event named another device index, or a channel event arrived while the
    /// device was removed. The store was not touched.
    Dropped,
    Pressed { button: u16 },
    /// A down arrived for a button already held; the press start was reset.
    Repressed { button: u16 },
    Released { button: u16 },
    StartedMoving { axis: u16, value: f32 },
    StoppedMoving { axis: u16 },
    /// New axis value without a change of the moving flag.
    AxisUpdated { axis: u16, value: f32, moving: bool },
}

impl Transition {
    /// Kind of channel this transition belongs to, `None` for device-level ones.
    pub fn channel_kind(&self) -> Option<ChannelKind> {
        match self {
            Transition::Pressed { .. }
            | Transition::Repressed { .. }
            | Transition::Released { .. } => Some(ChannelKind::Button),
            Transition::StartedMoving { .. }
            | Transition::StoppedMoving { .. }
            | Transition::AxisUpdated { .. } => Some(ChannelKind::Axis),
            Transition::None
            | Transition::DeviceAttached { .. }
            | Transition::DeviceDetached
            | Transition::Dropped => None,
        }
    }

    /// True when a button or axis flipped its pressed/moving flag.
    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            Transition::Pressed { .. }
                | Transition::Released { .. }
                | Transition::StartedMoving { .. }
                | Transition::StoppedMoving { .. }
        )
    }
}

/// `true` when `scaled` lies inside the deadzone band for `sensitivity`.
pub fn in_deadzone(scaled: f32, sensitivity: f32, deadzone: f32) -> bool {
    let half_width = sensitivity * deadzone;
    -half_width <= scaled && scaled <= half_width
}

/// Applies `event` to `store` as of `now`.
pub fn reduce(
    store: &mut ChannelStore,
    event: &JoyEvent,
    now: Stamp,
    config: &TrackerConfig,
) -> Result<Transition, ReduceError> {
    let device = event.device;
    let instance_id = event.instance_id;

    if device != store.device {
        return Ok(Transition::Dropped);
    }

    match event.kind {
        JoyEventKind::DeviceAdded => {
            store.attachment = Some(Attachment::Attached { instance_id });
            return Ok(Transition::DeviceAttached { instance_id });
        }
        JoyEventKind::DeviceRemoved => {
            store.attachment = Some(Attachment::Removed);
            return Ok(Transition::DeviceDetached);
        }
        _ if !store.accepts(device) => return Ok(Transition::Dropped),
        JoyEventKind::AxisMotion { axis, value } if !value.is_finite() => {
            return Err(ReduceError::NonFiniteAxisValue { device, axis });
        }
        _ => {}
    }

    let transition = match event.kind {
        JoyEventKind::ButtonDown { button } => {
            let held = store.buttons.get(&button).is_some_and(|b| b.pressed);
            store.buttons.insert(
                button,
                ButtonState::pressed_at(device, instance_id, button, now),
            );
            if held {
                Transition::Repressed { button }
            } else {
                Transition::Pressed { button }
            }
        }
        JoyEventKind::ButtonUp { button } => {
            let state = store
                .buttons
                .get_mut(&button)
                .ok_or(ReduceError::ReleaseWithoutPress { device, button })?;
            state.device = device;
            state.instance_id = instance_id;
            if state.pressed {
                state.release(now);
                Transition::Released { button }
            } else {
                Transition::None
            }
        }
        JoyEventKind::AxisMotion { axis, value } => match store.axis_mut(axis) {
            None => {
                let sensitivity = config.initial_sensitivity(axis);
                let scaled = value * sensitivity;
                store.axes.insert(
                    axis,
                    AxisState::moving_at(device, instance_id, axis, scaled, sensitivity, now),
                );
                Transition::StartedMoving {
                    axis,
                    value: scaled,
                }
            }
            Some(state) => {
                state.device = device;
                state.instance_id = instance_id;
                state.value = value * state.sensitivity;

                let settled = in_deadzone(state.value, state.sensitivity, config.deadzone);
                match (state.moving, settled) {
                    (true, true) => {
                        state.stop_moving(now);
                        Transition::StoppedMoving { axis }
                    }
                    (false, false) => {
                        state.start_moving(now);
                        Transition::StartedMoving {
                            axis,
                            value: state.value,
                        }
                    }
                    (moving, _) => Transition::AxisUpdated {
                        axis,
                        value: state.value,
                        moving,
                    },
                }
            }
        },
        JoyEventKind::DeviceAdded | JoyEventKind::DeviceRemoved => Transition::None,
    };

    Ok(transition)
}
