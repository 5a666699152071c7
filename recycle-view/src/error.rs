//! Diagnostics reported by the view.
//!
//! Nothing here is ever returned from the engine's operations. User callbacks return
//! `Result<_, BoxError>`; a failure is wrapped into a [`Diagnostic`], handed to the diagnostic
//! sink (if any) and logged, and the engine carries on with a fallback value. One misbehaving
//! item must not take down the visible window.

use alloc::boxed::Box;
use thiserror::Error;

use crate::Size;

/// The error type user callbacks may fail with.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Receives every diagnostic the view produces.
pub type DiagnosticSink = Box<dyn FnMut(&Diagnostic)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Error)]
pub enum Diagnostic {
    /// The size provider failed; the default item size was used instead.
    #[error("item size callback failed for index {index}")]
    ItemSize {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// The populate callback failed; the widget keeps its geometry but not its content.
    #[error("populate callback failed for index {index}")]
    Populate {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// The count provider failed; the previous data count was kept.
    #[error("item count callback failed")]
    ItemCount {
        #[source]
        source: BoxError,
    },

    /// The external acquire callback failed; the item stays without a widget.
    #[error("acquire callback failed for index {index}")]
    Acquire {
        index: usize,
        #[source]
        source: BoxError,
    },

    /// The external release callback failed; the widget was dropped.
    #[error("release callback failed")]
    Release {
        #[source]
        source: BoxError,
    },

    /// Neither an item pool nor an external acquire/release pair is configured.
    #[error("no widget source configured; cannot show index {index}")]
    NoWidgetSource { index: usize },

    #[error("index {index} is out of bounds (count: {count})")]
    IndexOutOfBounds { index: isize, count: usize },

    #[error("no item count provider is set; using the pool size {pool_size} instead")]
    MissingCountProvider { pool_size: usize },

    #[error("item {index} has size {size:?}; both width and height should be greater than 0")]
    NonPositiveItemSize { index: usize, size: Size },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingCountProvider { .. } | Self::NonPositiveItemSize { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// The data index the diagnostic refers to, when there is one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::ItemSize { index, .. }
            | Self::Populate { index, .. }
            | Self::Acquire { index, .. }
            | Self::NoWidgetSource { index }
            | Self::NonPositiveItemSize { index, .. } => Some(*index),
            Self::IndexOutOfBounds { index, .. } => usize::try_from(*index).ok(),
            Self::ItemCount { .. } | Self::Release { .. } | Self::MissingCountProvider { .. } => {
                None
            }
        }
    }
}
