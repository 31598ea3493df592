//! Events consumed by the reducer.
//!
//! A [`JoyEvent`] is one already-demultiplexed change reported by a controller:
//! a device attaching or detaching, a button edge, or a new axis sample. Events are
//! applied one at a time, in the order they were captured.
//!
//! ## Value conventions
//! - **Axes:** the raw value as reported by the device. Most backends normalize to
//!   `[-1.0, 1.0]`, but the engine makes no assumption about the range.
//! - **Buttons:** press/release edges, never levels.
//!
//! Events are plain data and derive serde traits, so recorded input can be saved as
//! JSON and replayed through [`Joystick::handle_events`](crate::Joystick::handle_events).

use serde::{Deserialize, Serialize};

/// What happened on a device.
///
/// `axis`/`button` are device-local channel indices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JoyEventKind {
    /// The device behind `device` was (re)connected.
    DeviceAdded,

    /// The device behind `device` went away. Channel events for it are dropped
    /// until the next [`JoyEventKind::DeviceAdded`].
    DeviceRemoved,

    /// A continuous channel reported a new sample.
    AxisMotion { axis: u16, value: f32 },

    /// A button transitioned to pressed.
    ButtonDown { button: u16 },

    /// A button transitioned to released.
    ButtonUp { button: u16 },
}

/// Category of an input channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Axis,
    Button,
}

/// One event from one device.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoyEvent {
    /// Device index (slot) the event belongs to.
    pub device: u32,
    /// Session id of the physical device; changes across reconnects even when
    /// the index is reused.
    pub instance_id: i32,
    /// The actual change.
    #[serde(flatten)]
    pub kind: JoyEventKind,
}

impl JoyEvent {
    pub fn new(device: u32, instance_id: i32, kind: JoyEventKind) -> Self {
        Self {
            device,
            instance_id,
            kind,
        }
    }

    pub fn device_added(device: u32, instance_id: i32) -> Self {
        Self::new(device, instance_id, JoyEventKind::DeviceAdded)
    }

    pub fn device_removed(device: u32, instance_id: i32) -> Self {
        Self::new(device, instance_id, JoyEventKind::DeviceRemoved)
    }

    pub fn axis_motion(device: u32, instance_id: i32, axis: u16, value: f32) -> Self {
        Self::new(device, instance_id, JoyEventKind::AxisMotion { axis, value })
    }

    pub fn button_down(device: u32, instance_id: i32, button: u16) -> Self {
        Self::new(device, instance_id, JoyEventKind::ButtonDown { button })
    }

    pub fn button_up(device: u32, instance_id: i32, button: u16) -> Self {
        Self::new(device, instance_id, JoyEventKind::ButtonUp { button })
    }

    /// Channel touched by this event, if it is a channel event.
    pub fn channel(&self) -> Option<(ChannelKind, u16)> {
        match self.kind {
            JoyEventKind::AxisMotion { axis, .. } => Some((ChannelKind::Axis, axis)),
            JoyEventKind::ButtonDown { button } | JoyEventKind::ButtonUp { button } => {
                Some((ChannelKind::Button, button))
            }
            JoyEventKind::DeviceAdded | JoyEventKind::DeviceRemoved => None,
        }
    }

    /// True for attach/detach events.
    pub fn is_device_event(&self) -> bool {
        matches!(
            self.kind,
            JoyEventKind::DeviceAdded | JoyEventKind::DeviceRemoved
        )
    }
}
