use recycle_view::{ItemWidget, RecycleView, Size, Viewport, offset_for_position};

use crate::{Easing, HeadlessViewport, Tween};

/// A framework-neutral controller that wraps a [`RecycleView`] over a [`HeadlessViewport`] and
/// provides common adapter workflows (wheel/drag scrolling, tween-driven scroll-to-index).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame (deferred updates and tween scrolling)
///
/// The scroll offset returned from `tick()` can be mirrored onto a real scroll container.
#[derive(Debug)]
pub struct Controller<W> {
    view: RecycleView<W, HeadlessViewport>,
    tween: Option<Tween>,
}

impl<W: ItemWidget> Controller<W> {
    pub fn new(view: RecycleView<W, HeadlessViewport>) -> Self {
        Self { view, tween: None }
    }

    pub fn view(&self) -> &RecycleView<W, HeadlessViewport> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut RecycleView<W, HeadlessViewport> {
        &mut self.view
    }

    pub fn into_view(self) -> RecycleView<W, HeadlessViewport> {
        self.view
    }

    pub fn scroll_offset(&self) -> f32 {
        self.view.viewport().scroll_offset()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_viewport_size(&mut self, size: Size) {
        if self.view.viewport().size() == size {
            return;
        }
        self.view.viewport_mut().set_size(size);
        self.view.on_viewport_resized();
    }

    /// Call this when the UI scrolls by `delta` (e.g. user wheel/drag).
    ///
    /// This cancels any active tween. Returns the applied (clamped) offset.
    pub fn on_scroll(&mut self, delta: f32) -> f32 {
        self.cancel_animation();
        let offset = self.view.viewport_mut().scroll_by(delta);
        self.view.on_content_moved();
        offset
    }

    /// Advances the controller.
    ///
    /// Runs a deferred update pass if one is due. If a tween is active, moves the content and
    /// returns the new offset.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.view.tick();

        let tween = self.tween?;
        let offset = self.view.viewport_mut().set_scroll_offset(tween.sample(now_ms));
        self.view.on_content_moved();

        if tween.is_done(now_ms) {
            vdebug!(now_ms, offset, "Controller::tick: tween finished");
            self.tween = None;
        }
        Some(offset)
    }

    /// Jumps to an index immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: isize) -> f32 {
        self.cancel_animation();
        self.view.scroll_to_index(index);
        self.scroll_offset()
    }

    /// Applies a scroll offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: f32) -> f32 {
        self.cancel_animation();
        let offset = self.view.viewport_mut().set_scroll_offset(offset);
        self.view.on_content_moved();
        offset
    }

    /// Starts a tween to an index (adapter-driven).
    ///
    /// Returns the clamped target offset, or `None` for an empty list.
    pub fn start_tween_to_index(
        &mut self,
        index: isize,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<f32> {
        let position = self.view.normalized_position_for_index(index)?;
        let to = offset_for_position(
            self.view.layout(),
            self.view.layout().viewport_size(),
            position.value,
        );
        Some(self.start_tween_to_offset(to, now_ms, duration_ms, easing))
    }

    /// Starts a tween to an offset (adapter-driven).
    ///
    /// Returns the clamped target offset. A running tween is retargeted from where it is.
    pub fn start_tween_to_offset(
        &mut self,
        offset: f32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        let to = offset.clamp(0.0, self.view.viewport().max_scroll_offset());
        match &mut self.tween {
            Some(tween) if tween.easing == easing => tween.retarget(now_ms, to, duration_ms),
            _ => {
                let from = self.scroll_offset();
                self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
            }
        }
        vtrace!(to, now_ms, duration_ms, "Controller: tween started");
        to
    }
}
