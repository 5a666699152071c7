//! Adapter utilities for the `recycle-view` crate.
//!
//! The `recycle-view` crate is UI-agnostic and only talks to its host through the `Viewport`
//! trait. This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A headless viewport that keeps a clamped scroll offset
//! - A tick-driven controller with tween-based smooth scrolling to an index
//!
//! This crate is intentionally framework-agnostic (no bindings to any UI toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod headless;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use headless::HeadlessViewport;
pub use tween::{Easing, Tween};
