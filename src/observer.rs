//! Step observer trait for monitoring simulation progress.

use crate::controller::FrameReport;

/// Trait for observing cloth simulation ticks.
///
/// Passed to each `step` call, so it never outlives the borrow of the
/// simulation that drives it. All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after each sub-step has integrated and resolved collisions.
    fn on_sub_step(&mut self, _index: usize) {}

    /// Called when a sub-step corrected at least one node against an obstacle.
    fn on_collision(&mut self, _sub_step: usize, _contacts: usize) {}

    /// Called once the whole tick is complete and the state is consistent.
    fn on_frame_complete(&mut self, _report: &FrameReport) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
