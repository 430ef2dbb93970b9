//! Cooperative stepping protocol.
//!
//! Every algorithm is a steppable computation: an explicit state machine
//! whose locals live in struct fields so that one `advance` call performs
//! exactly one atomic decision, mutates the scene, and suspends. A driver
//! cancels simply by not calling `advance` again; no cleanup happens on the
//! machine's side — `Scene::reset` is the caller's job.

use crate::scene::Scene;

/// Narration for one unit of progress. Observers read the scene itself for
/// the mutations that accompanied it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub message: String,
}

impl Step {
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of one `advance` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Work was performed and shared state mutated; more remains.
    Yield(Step),
    /// The computation finished. Further calls must keep returning `Done`
    /// without touching the scene.
    Done,
}

/// A resumable, single-threaded unit of work. Suspension points sit at the
/// granularity of one decision: one point classified, one comparison made,
/// one hull vertex accepted.
pub trait Steppable {
    fn advance(&mut self, scene: &mut Scene) -> StepOutcome;
}
