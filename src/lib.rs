//! joystate — frame-stamped controller input state.
//!
//! Turns a stream of controller events (device attach/detach, button edges, axis
//! samples) into per-channel state that game logic polls once per frame: "just
//! pressed", "held for N frames", "released 0.3 s ago", and whether an analog axis
//! is moving outside its sensitivity-scaled deadzone.
//!
//! The building blocks, leaves first:
//! - [`Clock`]: injected source of seconds and frame count.
//! - [`ChannelStore`]: button/axis state and device attachment.
//! - [`reduce`]: applies one event to a store.
//! - [`Joystick`]: store + clock + config, with the query API.
//! - [`JoystickManager`]: routes events from [`EventSource`]s to one tracker per device.

pub mod backends;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod joystick;
pub mod logger;
pub mod manager;
pub mod reducer;
pub mod snapshot;
pub mod state;

pub use clock::*;
pub use config::*;
pub use device::*;
pub use error::*;
pub use event::*;
pub use eventbus::*;
pub use filtered_listener::FilteredListener;
pub use joystick::*;
pub use logger::Logger;
pub use manager::*;
pub use reducer::*;
pub use snapshot::*;
pub use state::*;
