/// What the next update pass has to do.
///
/// Variants are ordered by strength; merging two requests keeps the stronger one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingUpdate {
    #[default]
    None,
    /// Keep clean rects where possible.
    Incremental,
    /// Every rect is dirty.
    Full,
}

impl PendingUpdate {
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }

    pub fn is_pending(self) -> bool {
        self != Self::None
    }

    /// Whether existing item rects survive the data-count refresh.
    pub fn keeps_old_items(self) -> bool {
        self != Self::Full
    }
}

/// Handle of the single pass waiting for the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredPass {
    id: u64,
}

impl DeferredPass {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Coalesces update requests into at most one deferred pass.
///
/// Scheduling a new pass overwrites the previous handle, which is how a pending pass gets
/// cancelled.
#[derive(Clone, Debug, Default)]
pub struct UpdateScheduler {
    pending: PendingUpdate,
    deferred: Option<DeferredPass>,
    next_id: u64,
}

/// What the caller has to do after [`UpdateScheduler::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Run the pipeline now.
    RunNow,
    /// A pass was (re)scheduled for the next tick.
    Deferred(DeferredPass),
    /// Recorded; it will run once the host becomes active.
    Parked,
}

impl UpdateScheduler {
    pub fn pending(&self) -> PendingUpdate {
        self.pending
    }

    pub fn deferred(&self) -> Option<DeferredPass> {
        self.deferred
    }

    pub fn request(&mut self, kind: PendingUpdate, immediate: bool, active: bool) -> RequestOutcome {
        self.pending = self.pending.merge(kind);
        if immediate {
            self.deferred = None;
            return RequestOutcome::RunNow;
        }
        if !active {
            return RequestOutcome::Parked;
        }
        RequestOutcome::Deferred(self.schedule())
    }

    /// Reschedules a parked update when the host becomes active again.
    pub fn on_activate(&mut self) -> Option<DeferredPass> {
        if !self.pending.is_pending() {
            return None;
        }
        Some(self.schedule())
    }

    /// Takes the pass due on this tick, if any.
    pub fn take_due(&mut self) -> Option<DeferredPass> {
        self.deferred.take()
    }

    /// The pipeline could not run because the host is inactive. Everything is redone once it
    /// comes back.
    pub fn park(&mut self) {
        self.pending = PendingUpdate::Full;
        self.deferred = None;
    }

    pub fn complete(&mut self) {
        self.pending = PendingUpdate::None;
    }

    fn schedule(&mut self) -> DeferredPass {
        self.next_id = self.next_id.wrapping_add(1);
        let pass = DeferredPass { id: self.next_id };
        let _cancelled = self.deferred.replace(pass);
        vtrace!(
            cancelled = ?_cancelled.map(|p| p.id),
            scheduled = pass.id,
            "UpdateScheduler::schedule"
        );
        pass
    }
}
