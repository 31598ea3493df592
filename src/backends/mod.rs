//! Event sources for `joystate`.
//!
//! Implementations of [`EventSource`](crate::device::EventSource). The crate does not
//! poll hardware itself; hosts wrap whatever produces controller events (a window
//! library's event queue, a HID reader, a network feed) behind the trait.
//!
//! [`virtual_input::VirtualPad`] is the built-in scripted source.

pub mod virtual_input;

pub use virtual_input::VirtualPad;
