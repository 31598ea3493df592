//! Point-in-time copy of a tracker's state.
//!
//! [`Snapshot`] is an **owned**, read-only view of every channel a
//! [`Joystick`](crate::Joystick) has observed, stamped with the clock reading it
//! was taken at. It's produced by [`Joystick::snapshot`](crate::Joystick::snapshot)
//! and is cheap enough to clone for per-frame fan-out, debug overlays, or dumping
//! to JSON when chasing an input bug.
//!
//! # Semantics
//! - Buttons and axes are sorted by index so dumps diff cleanly.
//! - A snapshot is **immutable** and does not follow the clock; elapsed values are
//!   computed against [`Snapshot::taken_at`].
//!
//! # Example
//! ```
//! use joystate::{JoyEvent, Joystick, ManualClock};
//!
//! let mut joy = Joystick::new(0, ManualClock::new(1.0, 60));
//! joy.handle_event(&JoyEvent::button_down(0, 0, 3)).unwrap();
//!
//! let json = joy.snapshot().to_json().unwrap();
//! assert!(json.contains("\"press_frame\":60"));
//! ```

use crate::clock::Stamp;
use crate::state::{Attachment, AxisState, ButtonState, ChannelStore};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at: Stamp,
    pub device: u32,
    /// `None` if the device never sent a device event.
    pub attachment: Option<Attachment>,
    pub buttons: Vec<ButtonState>,
    pub axes: Vec<AxisState>,
}

impl Snapshot {
    pub(crate) fn capture(store: &ChannelStore, taken_at: Stamp) -> Self {
        let mut buttons: Vec<_> = store.buttons().cloned().collect();
        buttons.sort_by_key(|b| b.button);

        let mut axes: Vec<_> = store.axes().cloned().collect();
        axes.sort_by_key(|a| a.axis);

        Self {
            taken_at,
            device: store.device(),
            attachment: store.attachment(),
            buttons,
            axes,
        }
    }

    #[inline]
    pub fn button(&self, button: u16) -> Option<&ButtonState> {
        self.buttons.iter().find(|b| b.button == button)
    }

    #[inline]
    pub fn axis(&self, axis: u16) -> Option<&AxisState> {
        self.axes.iter().find(|a| a.axis == axis)
    }

    /// Buttons held at the time of the snapshot.
    pub fn held(&self) -> impl Iterator<Item = &ButtonState> {
        self.buttons.iter().filter(|b| b.pressed)
    }

    /// Frames `button` had been held when the snapshot was taken.
    pub fn hold_frames(&self, button: u16) -> Option<u64> {
        let b = self.button(button).filter(|b| b.pressed)?;
        Some(self.taken_at.frame.saturating_sub(b.press_frame))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(src: &str) -> serde_json::Result<Self> {
        serde_json::from_str(src)
    }
}
