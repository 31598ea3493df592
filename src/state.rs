//! Per-channel temporal state.
//!
//! [`ChannelStore`] owns everything the reducer mutates: one [`ButtonState`] per
//! button index, one [`AxisState`] per axis index, and the attachment status of
//! the one device index the store is bound to. Entries are created lazily by the first event that names
//! them and live as long as the store.
//!
//! Absent release/stop fields mean "currently held/moving"; they are `Option`s,
//! never sentinel values.

use crate::clock::Stamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Temporal state of one button.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonState {
    /// Device index that last reported this button.
    pub device: u32,
    /// Instance id that last reported this button.
    pub instance_id: i32,
    pub button: u16,
    pub pressed: bool,
    pub press_time: f64,
    pub press_frame: u64,
    /// Set when the button is released, `None` while pressed.
    pub release_time: Option<f64>,
    pub release_frame: Option<u64>,
}

impl ButtonState {
    pub(crate) fn pressed_at(device: u32, instance_id: i32, button: u16, now: Stamp) -> Self {
        Self {
            device,
            instance_id,
            button,
            pressed: true,
            press_time: now.seconds,
            press_frame: now.frame,
            release_time: None,
            release_frame: None,
        }
    }

    pub(crate) fn release(&mut self, now: Stamp) {
        self.pressed = false;
        self.release_time = Some(now.seconds);
        self.release_frame = Some(now.frame);
    }
}

/// Temporal state of one analog axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub device: u32,
    pub instance_id: i32,
    pub axis: u16,
    /// Last raw sample multiplied by the sensitivity in effect when it arrived.
    pub value: f32,
    pub moving: bool,
    /// Always within `[0.0, 1.0]`.
    pub sensitivity: f32,
    pub move_time: f64,
    pub move_frame: u64,
    /// Set when the axis settles inside the deadzone, `None` while moving.
    pub stop_time: Option<f64>,
    pub stop_frame: Option<u64>,
}

impl AxisState {
    pub(crate) fn moving_at(
        device: u32,
        instance_id: i32,
        axis: u16,
        value: f32,
        sensitivity: f32,
        now: Stamp,
    ) -> Self {
        Self {
            device,
            instance_id,
            axis,
            value,
            moving: true,
            sensitivity,
            move_time: now.seconds,
            move_frame: now.frame,
            stop_time: None,
            stop_frame: None,
        }
    }

    pub(crate) fn start_moving(&mut self, now: Stamp) {
        self.moving = true;
        self.move_time = now.seconds;
        self.move_frame = now.frame;
        self.stop_time = None;
        self.stop_frame = None;
    }

    pub(crate) fn stop_moving(&mut self, now: Stamp) {
        self.moving = false;
        self.stop_time = Some(now.seconds);
        self.stop_frame = Some(now.frame);
    }
}

/// Clamps a sensitivity into `[0.0, 1.0]`. NaN has no meaningful clamp and yields `None`.
pub fn clamp_sensitivity(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}

/// Whether a device index currently accepts channel events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    Attached { instance_id: i32 },
    Removed,
}

/// All mutable state of one engine, bound to a single device index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChannelStore {
    pub(crate) device: u32,
    /// `None` until the first device event for `device`.
    pub(crate) attachment: Option<Attachment>,
    pub(crate) buttons: HashMap<u16, ButtonState>,
    pub(crate) axes: HashMap<u16, AxisState>,
}

impl ChannelStore {
    pub fn new(device: u32) -> Self {
        Self {
            device,
            attachment: None,
            buttons: HashMap::new(),
            axes: HashMap::new(),
        }
    }

    /// Device index this store tracks.
    pub fn device(&self) -> u32 {
        self.device
    }

    pub fn button(&self, button: u16) -> Option<&ButtonState> {
        self.buttons.get(&button)
    }

    pub fn axis(&self, axis: u16) -> Option<&AxisState> {
        self.axes.get(&axis)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonState> {
        self.buttons.values()
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisState> {
        self.axes.values()
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    /// A store that never saw a device event counts as attached.
    pub fn is_attached(&self) -> bool {
        !matches!(self.attachment, Some(Attachment::Removed))
    }

    /// Channel events are accepted only from the bound device while it is attached.
    pub fn accepts(&self, device: u32) -> bool {
        device == self.device && self.is_attached()
    }

    pub(crate) fn axis_mut(&mut self, axis: u16) -> Option<&mut AxisState> {
        self.axes.get_mut(&axis)
    }
}

/// Borrowed state of one channel, as selected by a tracker's input kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChannelData<'a> {
    Button(&'a ButtonState),
    Axis(&'a AxisState),
}

impl ChannelData<'_> {
    /// Pressed for buttons, moving for axes.
    pub fn is_active(&self) -> bool {
        match self {
            ChannelData::Button(b) => b.pressed,
            ChannelData::Axis(a) => a.moving,
        }
    }
}
