//! Container resize tracking and per-frame layout scheduling.

/// Width (in pixels) below which a container counts as compact.
pub const DEFAULT_COMPACT_BREAKPOINT: u32 = 768;

/// Content-box size of the grid's container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub fn new(width: u32, height: u32) -> Self {
        ContainerSize { width, height }
    }
}

/// Last observed container state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeState {
    pub size: ContainerSize,
    pub is_compact: bool,
}

/// Records container sizes and filters out notifications that change nothing.
#[derive(Debug, Clone)]
pub struct ResizeTracker {
    breakpoint: u32,
    last: Option<ResizeState>,
}

impl Default for ResizeTracker {
    fn default() -> Self {
        Self::with_breakpoint(DEFAULT_COMPACT_BREAKPOINT)
    }
}

impl ResizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakpoint(breakpoint: u32) -> Self {
        ResizeTracker {
            breakpoint,
            last: None,
        }
    }

    /// Records a size report. Returns the new state if anything changed.
    pub fn observe(&mut self, size: ContainerSize) -> Option<ResizeState> {
        let next = ResizeState {
            size,
            is_compact: size.width < self.breakpoint,
        };
        if self.last == Some(next) {
            return None;
        }
        self.last = Some(next);
        Some(next)
    }

    pub fn current(&self) -> Option<ResizeState> {
        self.last
    }

    pub fn is_compact(&self) -> bool {
        self.last.is_some_and(|s| s.is_compact)
    }
}

/// Coalesces resize notifications into at most one pending layout pass.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a layout pass. Returns `true` if this request scheduled a new
    /// frame, `false` if one was already pending.
    pub fn notify(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consumes the pending pass, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_ignores_unchanged_sizes() {
        let mut tracker = ResizeTracker::new();
        assert_eq!(tracker.current(), None);
        assert!(!tracker.is_compact());

        let state = tracker.observe(ContainerSize::new(600, 400)).unwrap();
        assert!(state.is_compact);
        assert!(tracker.observe(ContainerSize::new(600, 400)).is_none());

        let state = tracker.observe(ContainerSize::new(1024, 400)).unwrap();
        assert!(!state.is_compact);
        assert_eq!(tracker.current().map(|s| s.size.width), Some(1024));
    }

    #[test]
    fn custom_breakpoint() {
        let mut tracker = ResizeTracker::with_breakpoint(500);
        assert!(!tracker.observe(ContainerSize::new(600, 0)).unwrap().is_compact);
        assert!(tracker.observe(ContainerSize::new(499, 0)).unwrap().is_compact);
    }

    #[test]
    fn scheduler_coalesces_bursts() {
        let mut frames = FrameScheduler::new();
        assert!(!frames.take());

        assert!(frames.notify());
        assert!(!frames.notify());
        assert!(!frames.notify());
        assert!(frames.is_pending());

        assert!(frames.take());
        assert!(!frames.take());
        assert!(frames.notify());
    }
}
