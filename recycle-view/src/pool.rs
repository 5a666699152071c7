use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{BoxError, Diagnostic};

/// Where visible items get their widgets from, and where they go back to.
///
/// Both the built-in [`ItemPool`] and an [`ExternalRecycler`] implement this contract:
/// `acquire` hands out a widget ready to be bound, `release` takes ownership back.
pub trait WidgetRecycler<W> {
    fn acquire(&mut self, index: usize) -> Result<W, Diagnostic>;
    fn release(&mut self, widget: W) -> Result<(), Diagnostic>;
}

/// A simple object pool for item widgets.
///
/// `get` pops a pooled widget or creates a new one. `recycle` resets a widget and keeps it while
/// fewer than `warm_size` widgets are pooled; surplus widgets are destroyed.
pub struct ItemPool<W> {
    free: Vec<W>,
    warm_size: usize,
    created: usize,
    create: Box<dyn FnMut() -> W>,
    reset: Option<Box<dyn FnMut(&mut W)>>,
    destroy: Option<Box<dyn FnMut(W)>>,
}

impl<W> ItemPool<W> {
    pub fn new(warm_size: usize, create: impl FnMut() -> W + 'static) -> Self {
        Self {
            free: Vec::with_capacity(warm_size),
            warm_size,
            created: 0,
            create: Box::new(create),
            reset: None,
            destroy: None,
        }
    }

    /// Called on every widget as it re-enters the pool.
    pub fn with_reset(mut self, reset: impl FnMut(&mut W) + 'static) -> Self {
        self.reset = Some(Box::new(reset));
        self
    }

    /// Called on widgets the pool discards (overflow and purge). Without it they are dropped.
    pub fn with_destroy(mut self, destroy: impl FnMut(W) + 'static) -> Self {
        self.destroy = Some(Box::new(destroy));
        self
    }

    pub fn get(&mut self) -> W {
        if let Some(widget) = self.free.pop() {
            return widget;
        }
        self.created = self.created.saturating_add(1);
        vtrace!(created = self.created, "ItemPool::get: creating widget");
        (self.create)()
    }

    pub fn recycle(&mut self, mut widget: W) {
        if self.free.len() < self.warm_size {
            if let Some(reset) = &mut self.reset {
                reset(&mut widget);
            }
            self.free.push(widget);
        } else {
            self.discard(widget);
        }
    }

    /// Destroys every pooled widget.
    pub fn purge(&mut self) {
        vdebug!(pooled = self.free.len(), "ItemPool::purge");
        while let Some(widget) = self.free.pop() {
            self.discard(widget);
        }
    }

    /// Number of widgets currently waiting in the pool.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn warm_size(&self) -> usize {
        self.warm_size
    }

    /// Total number of widgets the pool has created so far.
    pub fn created(&self) -> usize {
        self.created
    }

    fn discard(&mut self, widget: W) {
        match &mut self.destroy {
            Some(destroy) => destroy(widget),
            None => drop(widget),
        }
    }
}

impl<W> core::fmt::Debug for ItemPool<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemPool")
            .field("pooled", &self.free.len())
            .field("warm_size", &self.warm_size)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl<W> WidgetRecycler<W> for ItemPool<W> {
    fn acquire(&mut self, _index: usize) -> Result<W, Diagnostic> {
        Ok(self.get())
    }

    fn release(&mut self, widget: W) -> Result<(), Diagnostic> {
        self.recycle(widget);
        Ok(())
    }
}

pub type AcquireCallback<W> = Box<dyn FnMut(usize) -> Result<W, BoxError>>;
pub type ReleaseCallback<W> = Box<dyn FnMut(W) -> Result<(), BoxError>>;

/// A caller-supplied acquire/release pair that replaces the built-in pool.
pub struct ExternalRecycler<W> {
    acquire: AcquireCallback<W>,
    release: ReleaseCallback<W>,
}

impl<W> ExternalRecycler<W> {
    pub fn new(
        acquire: impl FnMut(usize) -> Result<W, BoxError> + 'static,
        release: impl FnMut(W) -> Result<(), BoxError> + 'static,
    ) -> Self {
        Self {
            acquire: Box::new(acquire),
            release: Box::new(release),
        }
    }
}

impl<W> core::fmt::Debug for ExternalRecycler<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ExternalRecycler(..)")
    }
}

impl<W> WidgetRecycler<W> for ExternalRecycler<W> {
    fn acquire(&mut self, index: usize) -> Result<W, Diagnostic> {
        (self.acquire)(index).map_err(|source| Diagnostic::Acquire { index, source })
    }

    fn release(&mut self, widget: W) -> Result<(), Diagnostic> {
        (self.release)(widget).map_err(|source| Diagnostic::Release { source })
    }
}
