//! Clock sources.
//!
//! The engine never reads a global clock. Every [`Joystick`](crate::Joystick) is
//! built around a [`Clock`] that supplies two monotonic readings:
//! - **seconds**: wall time since some fixed origin, as `f64`.
//! - **frame**: an integer incremented once per game-loop iteration.
//!
//! Both readings must stay constant between frame boundaries, so queries made
//! after the frame's events were reduced observe the same "now" as the reducer.
//!
//! [`FrameClock`] is the one to drive from a real game loop; [`ManualClock`] is a
//! deterministic clock for tests, replays and headless hosts.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A single reading of both clocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    /// Seconds since the clock origin.
    pub seconds: f64,
    /// Frame counter value.
    pub frame: u64,
}

impl Stamp {
    #[inline]
    pub fn new(seconds: f64, frame: u64) -> Self {
        Self { seconds, frame }
    }
}

/// Source of wall time and frame count.
pub trait Clock {
    /// Monotonic wall time in seconds.
    fn seconds(&self) -> f64;

    /// Monotonic frame counter.
    fn frame(&self) -> u64;

    /// Reads both clocks.
    fn now(&self) -> Stamp {
        Stamp::new(self.seconds(), self.frame())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn seconds(&self) -> f64 {
        (**self).seconds()
    }

    fn frame(&self) -> u64 {
        (**self).frame()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn seconds(&self) -> f64 {
        (**self).seconds()
    }

    fn frame(&self) -> u64 {
        (**self).frame()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn seconds(&self) -> f64 {
        (**self).seconds()
    }

    fn frame(&self) -> u64 {
        (**self).frame()
    }
}

/// Deterministic clock whose readings only change when told to.
///
/// Interior-mutable so a test can keep an `Rc<ManualClock>` and advance it while
/// a [`Joystick`](crate::Joystick) holds another reference.
///
/// ```
/// use joystate::{Clock, ManualClock};
///
/// let clock = ManualClock::new(10.0, 100);
/// clock.advance(0.5, 30);
/// assert_eq!(clock.frame(), 130);
/// assert_eq!(clock.seconds(), 10.5);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: Cell<f64>,
    frame: Cell<u64>,
}

impl ManualClock {
    pub fn new(seconds: f64, frame: u64) -> Self {
        Self {
            seconds: Cell::new(seconds),
            frame: Cell::new(frame),
        }
    }

    /// Jumps to an absolute reading. Values behind the current reading are ignored.
    pub fn set(&self, seconds: f64, frame: u64) {
        if seconds > self.seconds.get() {
            self.seconds.set(seconds);
        }
        if frame > self.frame.get() {
            self.frame.set(frame);
        }
    }

    /// Moves both clocks forward. A negative or NaN `dt` leaves seconds untouched.
    pub fn advance(&self, dt: f64, frames: u64) {
        if dt > 0.0 {
            self.seconds.set(self.seconds.get() + dt);
        }
        self.frame.set(self.frame.get().saturating_add(frames));
    }

    /// Advances by exactly one frame of `dt` seconds.
    pub fn step(&self, dt: f64) {
        self.advance(dt, 1);
    }
}

impl Clock for ManualClock {
    fn seconds(&self) -> f64 {
        self.seconds.get()
    }

    fn frame(&self) -> u64 {
        self.frame.get()
    }
}

/// Wall clock for a real game loop.
///
/// Call [`tick`](FrameClock::tick) once per loop iteration, before reducing the
/// frame's events. Seconds are latched at the tick, so every read within a frame
/// returns the same value.
#[derive(Debug)]
pub struct FrameClock {
    origin: Instant,
    latched: Cell<f64>,
    frame: Cell<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            latched: Cell::new(0.0),
            frame: Cell::new(0),
        }
    }

    /// Starts a new frame and returns the reading for it.
    pub fn tick(&self) -> Stamp {
        self.latched.set(self.origin.elapsed().as_secs_f64());
        self.frame.set(self.frame.get() + 1);
        self.now()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn seconds(&self) -> f64 {
        self.latched.get()
    }

    fn frame(&self) -> u64 {
        self.frame.get()
    }
}
