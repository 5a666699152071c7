use alloc::boxed::Box;
use core::ops::RangeInclusive;

use crate::binder::DataBinder;
use crate::layout::LayoutEngine;
use crate::pool::{ExternalRecycler, ItemPool, WidgetRecycler};
use crate::scheduler::{PendingUpdate, RequestOutcome, UpdateScheduler};
use crate::scroll::{self, NormalizedPosition};
use crate::window::{CriticalIndices, ItemWidget, VisibilityWindow, WindowContext};
use crate::{
    Axis, BoxError, ContentAnchor, Diagnostic, Rect, RecycleViewOptions, Size, Viewport,
};

/// Builds the internal pool on first use. Receives `pool_size` as the warm size.
pub type PoolFactory<W> = Box<dyn FnOnce(usize) -> ItemPool<W>>;

/// Asks the host for one more frame so a deferred update can run on [`RecycleView::tick`].
pub type TickRequester = Box<dyn FnMut()>;

/// A recycling list view over a host [`Viewport`].
///
/// Only items intersecting the viewport hold a widget `W`; everything else is lazily computed
/// geometry. The host drives the view:
/// - [`Self::on_content_moved`] whenever it moves the content (drag, wheel, inertia)
/// - [`Self::on_normalized_position_changed`] when it jumps to a normalized position itself
/// - [`Self::tick`] once per rendered frame, so deferred updates can run
/// - [`Self::on_enable`] / [`Self::on_disable`] / [`Self::on_viewport_resized`] on lifecycle
///   changes
///
/// Data changes are announced with [`Self::request_full_update`] or
/// [`Self::request_incremental_update`].
pub struct RecycleView<W, V> {
    options: RecycleViewOptions,
    viewport: V,
    layout: LayoutEngine,
    window: VisibilityWindow<W>,
    binder: DataBinder<W>,
    pool_factory: Option<PoolFactory<W>>,
    pool: Option<ItemPool<W>>,
    external: Option<ExternalRecycler<W>>,
    scheduler: UpdateScheduler,
    tick_requester: Option<TickRequester>,
    initialized: bool,
    destroyed: bool,
    /// The viewport rect in content space at zero content offset.
    ref_rect: Rect,
}

impl<W, V> RecycleView<W, V> {
    pub fn new(viewport: V, options: RecycleViewOptions) -> Self {
        vdebug!(flow = ?options.flow, pool_size = options.pool_size, "RecycleView::new");
        Self {
            layout: LayoutEngine::new(&options),
            window: VisibilityWindow::default(),
            binder: DataBinder::new(options.default_item_size),
            pool_factory: None,
            pool: None,
            external: None,
            scheduler: UpdateScheduler::default(),
            tick_requester: None,
            initialized: false,
            destroyed: false,
            ref_rect: Rect::default(),
            options,
            viewport,
        }
    }

    /// Supplies the internal item pool.
    ///
    /// The factory runs on the first update pass, and only if no external acquire/release pair
    /// is set at that point.
    pub fn with_item_pool(
        mut self,
        factory: impl FnOnce(usize) -> ItemPool<W> + 'static,
    ) -> Self {
        self.pool_factory = Some(Box::new(factory));
        self
    }

    pub fn options(&self) -> &RecycleViewOptions {
        &self.options
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the host viewport.
    ///
    /// After moving the content through this, call [`Self::on_content_moved`].
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn data_count(&self) -> usize {
        self.layout.count()
    }

    pub fn content_size(&self) -> Size {
        self.layout.content_size()
    }

    pub fn critical_indices(&self) -> CriticalIndices {
        self.window.critical_indices()
    }

    pub fn visible_range(&self) -> Option<RangeInclusive<usize>> {
        self.window.critical_indices().visible_range()
    }

    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.window.visible_indices()
    }

    pub fn visible_count(&self) -> usize {
        self.window.visible_count()
    }

    pub fn widget(&self, index: usize) -> Option<&W> {
        self.window.widget(index)
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut W> {
        self.window.widget_mut(index)
    }

    pub fn pool(&self) -> Option<&ItemPool<W>> {
        self.pool.as_ref()
    }

    pub fn pending_update(&self) -> PendingUpdate {
        self.scheduler.pending()
    }

    pub fn has_deferred_update(&self) -> bool {
        self.scheduler.deferred().is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_size_provider(
        &mut self,
        f: impl FnMut(usize) -> Result<Size, BoxError> + 'static,
    ) {
        self.binder.set_size_provider(Some(Box::new(f)));
    }

    pub fn set_count_provider(&mut self, f: impl FnMut() -> Result<usize, BoxError> + 'static) {
        self.binder.set_count_provider(Some(Box::new(f)));
    }

    pub fn set_populate_callback(
        &mut self,
        f: impl FnMut(usize, &mut W) -> Result<(), BoxError> + 'static,
    ) {
        self.binder.set_populate(Some(Box::new(f)));
    }

    pub fn set_diagnostic_sink(&mut self, sink: impl FnMut(&Diagnostic) + 'static) {
        self.binder.set_sink(Some(Box::new(sink)));
    }

    pub fn set_tick_requester(&mut self, f: impl FnMut() + 'static) {
        self.tick_requester = Some(Box::new(f));
    }

    /// Replaces the internal pool with a caller-managed acquire/release pair.
    ///
    /// Widgets currently on screen are handed back to their previous owner first; the next
    /// update pass acquires from the new pair.
    pub fn set_acquire_release_pair(
        &mut self,
        acquire: impl FnMut(usize) -> Result<W, BoxError> + 'static,
        release: impl FnMut(W) -> Result<(), BoxError> + 'static,
    ) {
        self.release_all_widgets();
        self.external = Some(ExternalRecycler::new(acquire, release));
    }

    /// Clears every user callback (size, count, populate, acquire/release).
    ///
    /// Widgets from an external pair are returned to it before the pair is dropped; the view
    /// falls back to its internal pool.
    pub fn reset_all_providers(&mut self) {
        self.binder.set_size_provider(None);
        self.binder.set_count_provider(None);
        self.binder.set_populate(None);
        if self.external.is_some() {
            self.release_all_widgets();
            self.external = None;
            if self.initialized {
                self.ensure_pool();
            }
        }
    }

    /// Returns every widget to its owner and destroys the pool.
    ///
    /// Also runs on drop. The view is unusable for display afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.release_all_widgets();
        if let Some(mut pool) = self.pool.take() {
            pool.purge();
        }
        vdebug!("RecycleView::destroy");
    }

    /// The host stopped rendering. The next update pass re-captures the viewport.
    pub fn on_disable(&mut self) {
        self.initialized = false;
    }

    fn release_all_widgets(&mut self) {
        let (window, mut ctx) = self.split(Rect::default());
        window.release_all(&mut ctx);
    }

    fn ensure_pool(&mut self) {
        if self.external.is_some() || self.pool.is_some() {
            return;
        }
        if let Some(factory) = self.pool_factory.take() {
            self.pool = Some(factory(self.options.pool_size));
        }
    }

    fn split(&mut self, view_rect: Rect) -> (&mut VisibilityWindow<W>, WindowContext<'_, W>) {
        let recycler: Option<&mut dyn WidgetRecycler<W>> = match (&mut self.external, &mut self.pool)
        {
            (Some(external), _) => Some(external as &mut dyn WidgetRecycler<W>),
            (None, Some(pool)) => Some(pool as &mut dyn WidgetRecycler<W>),
            (None, None) => None,
        };
        (
            &mut self.window,
            WindowContext {
                layout: &mut self.layout,
                binder: &mut self.binder,
                recycler,
                view_rect,
            },
        )
    }
}

impl<W: ItemWidget, V: Viewport> RecycleView<W, V> {
    /// Relayouts everything on the next pass: all rects are recomputed.
    pub fn request_full_update(&mut self, immediate: bool) {
        self.request_update(PendingUpdate::Full, immediate);
    }

    /// Refreshes the data count and visible items, keeping clean rects where possible.
    pub fn request_incremental_update(&mut self, immediate: bool) {
        self.request_update(PendingUpdate::Incremental, immediate);
    }

    /// Runs the deferred update, if one is due. Call once per rendered frame.
    ///
    /// Returns `true` when an update pass ran.
    pub fn tick(&mut self) -> bool {
        if self.scheduler.take_due().is_none() {
            return false;
        }
        self.run_update();
        true
    }

    /// The host became active again. A parked update is scheduled for the next tick.
    pub fn on_enable(&mut self) {
        if self.scheduler.on_activate().is_some() {
            self.request_tick();
        }
    }

    /// The viewport changed size. Re-captures it and schedules a full update.
    pub fn on_viewport_resized(&mut self) {
        if self.initialized {
            self.refresh_view_rect();
        }
        self.request_full_update(false);
    }

    /// Applies new options. Every rect becomes dirty and a full update is scheduled.
    pub fn set_options(&mut self, options: RecycleViewOptions) {
        if options == self.options {
            return;
        }
        vdebug!(options = ?options, "RecycleView::set_options");
        self.layout.configure(&options);
        self.binder.set_default_item_size(options.default_item_size);
        if options.flow != self.options.flow {
            // The content has to be re-anchored for the new flow.
            self.initialized = false;
        }
        self.options = options;
        self.request_full_update(false);
    }

    /// The host moved the content. Shows and hides items at the window's edges.
    pub fn on_content_moved(&mut self) {
        if self.scheduler.pending().is_pending() {
            return;
        }
        let view_rect = self.view_rect();
        let (window, mut ctx) = self.split(view_rect);
        window.step_update(&mut ctx);
    }

    /// The host jumped to a normalized position. Recomputes the whole window.
    pub fn on_normalized_position_changed(&mut self) {
        if self.scheduler.pending().is_pending() {
            return;
        }
        self.full_reset();
    }

    /// Scrolls so that `index` starts at the viewport's leading edge (as far as the content
    /// allows). Negative indices count from the end.
    pub fn scroll_to_index(&mut self, index: isize) {
        let Some(position) = self.normalized_position_for_index(index) else {
            return;
        };
        vdebug!(index, axis = ?position.axis, value = position.value, "scroll_to_index");
        self.viewport
            .set_normalized_position(position.axis, position.value);
        self.on_normalized_position_changed();
    }

    /// The normalized position [`Self::scroll_to_index`] would apply, without applying it.
    pub fn normalized_position_for_index(&mut self, index: isize) -> Option<NormalizedPosition> {
        let index = scroll::resolve_index(index, self.layout.count())?;
        let rect = self.ensure_rect(index)?;
        Some(scroll::position_for_rect(
            &self.layout,
            self.layout.viewport_size(),
            rect,
        ))
    }

    /// The item at the viewport's leading edge when scrolled to `value`.
    ///
    /// Lays out every remaining dirty item.
    pub fn index_at_normalized_position(&mut self, value: f32) -> Option<usize> {
        let last = self.layout.count().checked_sub(1)?;
        self.ensure_rect(last)?;
        let offset = scroll::offset_for_position(&self.layout, self.layout.viewport_size(), value);
        scroll::index_at_offset(&self.layout, offset)
    }

    /// The item's rect in content space, computing it if needed.
    ///
    /// Out-of-range indices are reported and yield `None`.
    pub fn item_rect(&mut self, index: isize) -> Option<Rect> {
        let count = self.layout.count();
        match usize::try_from(index).ok().filter(|&i| i < count) {
            Some(index) => self.ensure_rect(index),
            None => {
                self.binder
                    .report(Diagnostic::IndexOutOfBounds { index, count });
                None
            }
        }
    }

    /// Whether `index` intersects the viewport at the current content offset.
    ///
    /// Out-of-range indices report [`Diagnostic::IndexOutOfBounds`] and yield `false`.
    pub fn is_item_in_view(&mut self, index: isize) -> bool {
        let view_rect = self.view_rect();
        self.item_rect(index)
            .is_some_and(|rect| rect.overlaps(&view_rect))
    }

    fn ensure_rect(&mut self, index: usize) -> Option<Rect> {
        let binder = &mut self.binder;
        self.layout
            .ensure_rect(index, &mut |i| binder.item_size(i))
    }

    fn request_update(&mut self, kind: PendingUpdate, immediate: bool) {
        let active = self.viewport.is_active();
        match self.scheduler.request(kind, immediate, active) {
            RequestOutcome::RunNow => self.run_update(),
            RequestOutcome::Deferred(_pass) => {
                vtrace!(pass = _pass.id(), kind = ?kind, "update deferred to next tick");
                self.request_tick();
            }
            RequestOutcome::Parked => {
                vdebug!(kind = ?kind, "update parked until the viewport is active");
            }
        }
    }

    fn request_tick(&mut self) {
        if let Some(f) = &mut self.tick_requester {
            f();
        }
    }

    /// The update pipeline: data count → rects → content size → visible items.
    fn run_update(&mut self) {
        if self.destroyed {
            return;
        }
        if !self.viewport.is_active() {
            vdebug!("run_update: viewport inactive, parking");
            self.scheduler.park();
            return;
        }
        if !self.initialized {
            self.initialize();
        }

        let pending = self.scheduler.pending();
        self.refresh_data_count(pending.keeps_old_items());

        let binder = &mut self.binder;
        let sizes = &mut |i| binder.item_size(i);
        match pending {
            PendingUpdate::Full => self.layout.recompute_all(sizes),
            PendingUpdate::Incremental | PendingUpdate::None => {
                self.layout.recompute_partial(sizes)
            }
        }
        self.viewport.set_content_size(self.layout.content_size());

        self.full_reset();
        self.scheduler.complete();

        if self.options.flow.is_bottom_up() {
            // Newest item first.
            self.viewport.set_normalized_position(Axis::Vertical, 0.0);
            self.on_normalized_position_changed();
        }
    }

    fn initialize(&mut self) {
        self.initialized = true;
        let flow = self.options.flow;
        self.viewport
            .reset_content(flow.scroll_axis(), flow.content_anchor());
        self.ensure_pool();
        self.refresh_view_rect();
        vdebug!(
            width = self.ref_rect.width,
            height = self.ref_rect.height,
            "RecycleView::initialize"
        );
    }

    fn refresh_view_rect(&mut self) {
        let size = self.viewport.size();
        self.layout.set_viewport_size(size);
        self.ref_rect = match self.options.flow.content_anchor() {
            ContentAnchor::TopLeft => Rect::new(0.0, -size.height, size.width, size.height),
            ContentAnchor::BottomLeft => Rect::new(0.0, 0.0, size.width, size.height),
        };
    }

    fn refresh_data_count(&mut self, keep_old_items: bool) {
        let previous = self.layout.count();
        let count = self.binder.item_count(self.options.pool_size, previous);
        self.layout.resize(count, keep_old_items);
        let (window, mut ctx) = self.split(Rect::default());
        window.resize(count, &mut ctx);
    }

    fn view_rect(&self) -> Rect {
        let offset = self.viewport.content_offset();
        self.ref_rect.translated(-offset.x, -offset.y)
    }

    fn full_reset(&mut self) {
        let view_rect = self.view_rect();
        let (window, mut ctx) = self.split(view_rect);
        window.full_reset(&mut ctx);
    }
}

impl<W, V> Drop for RecycleView<W, V> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<W, V> core::fmt::Debug for RecycleView<W, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecycleView")
            .field("options", &self.options)
            .field("data_count", &self.layout.count())
            .field("content_size", &self.layout.content_size())
            .field("critical", &self.window.critical_indices())
            .field("pending", &self.scheduler.pending())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
