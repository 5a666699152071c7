//! A headless recycling list view.
//!
//! For a host-less viewport and a tick-driven scroll controller, see the `recycle-view-adapter`
//! crate.
//!
//! Only the items intersecting the viewport are backed by a widget; everything else is lazily
//! computed geometry. The crate covers:
//! - lazy rect layout for vertical, horizontal, wrapping and bottom-up flows
//! - incremental show/hide at the window's edges as the content moves
//! - widget recycling through an internal pool or a caller-provided acquire/release pair
//! - coalesced, frame-deferred update passes
//! - scroll-to-index as a normalized scroll position
//!
//! It is UI-agnostic. A GUI layer is expected to provide:
//! - a [`Viewport`]: visible size, content offset, and a way to apply a normalized position
//! - widgets implementing [`ItemWidget`]
//! - item sizes, the item count and a populate callback
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod binder;
mod error;
mod layout;
mod options;
mod pool;
mod scheduler;
mod scroll;
mod types;
mod view;
mod viewport;
mod window;


pub use binder::{CountProvider, PopulateCallback, SizeProvider};
pub use error::{BoxError, Diagnostic, DiagnosticSink, Severity};
pub use layout::{LayoutEngine, LayoutSlot};
pub use options::RecycleViewOptions;
pub use pool::{AcquireCallback, ExternalRecycler, ItemPool, ReleaseCallback, WidgetRecycler};
pub use scheduler::{DeferredPass, PendingUpdate, RequestOutcome, UpdateScheduler};
pub use scroll::{NormalizedPosition, offset_for_position, position_for_rect, resolve_index};
pub use types::{Axis, ContentAnchor, FlowLayout, Padding, Point, Rect, Size, Spacing};
pub use view::{PoolFactory, RecycleView, TickRequester};
pub use viewport::Viewport;
pub use window::{CriticalIndices, ItemWidget, VisibilityWindow};
