//! Component lifecycle management
//!
//! Two pieces live here:
//! - [`LifecycleManager`] guards the mount/update/unmount state machine.
//! - [`EffectSlot`] scopes a resource to a dependency key: setup runs when the key
//!   changes, and the previous cleanup always runs first. Cleanup also runs on
//!   dispose and on drop.

use std::fmt;

use log::trace;

use crate::component::{ComponentError, LifecyclePhase};

/// Release callback returned by an effect's setup
pub type Cleanup = Box<dyn FnOnce()>;

/// Wrap a release callback for returning from an effect setup
pub fn on_release<F>(release: F) -> Option<Cleanup>
where
    F: FnOnce() + 'static,
{
    Some(Box::new(release))
}

/// Operations that move a component through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    Mount,
    Update,
    Unmount,
}

impl LifecycleOp {
    fn name(self) -> &'static str {
        match self {
            LifecycleOp::Mount => "mount",
            LifecycleOp::Update => "update",
            LifecycleOp::Unmount => "unmount",
        }
    }

    /// (required phase, phase while running, phase after success)
    fn phases(self) -> (LifecyclePhase, LifecyclePhase, LifecyclePhase) {
        match self {
            LifecycleOp::Mount => (
                LifecyclePhase::Created,
                LifecyclePhase::Mounting,
                LifecyclePhase::Mounted,
            ),
            LifecycleOp::Update => (
                LifecyclePhase::Mounted,
                LifecyclePhase::Updating,
                LifecyclePhase::Mounted,
            ),
            LifecycleOp::Unmount => (
                LifecyclePhase::Mounted,
                LifecyclePhase::Unmounting,
                LifecyclePhase::Unmounted,
            ),
        }
    }
}

/// Tracks the lifecycle phase of one component
#[derive(Debug)]
pub struct LifecycleManager {
    /// Current phase of the component
    phase: LifecyclePhase,
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleManager {
    /// Create a new lifecycle manager for a freshly created component
    pub fn new() -> Self {
        Self {
            phase: LifecyclePhase::Created,
        }
    }

    /// Get the current lifecycle phase
    pub fn current_phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == LifecyclePhase::Mounted
    }

    /// Enter the transitional phase of `op`
    pub fn begin(&mut self, op: LifecycleOp) -> Result<(), ComponentError> {
        let (required, running, _) = op.phases();
        if self.phase != required {
            return Err(ComponentError::InvalidLifecycleTransition(
                self.phase,
                op.name().to_string(),
            ));
        }
        trace!("lifecycle {:?} -> {:?}", self.phase, running);
        self.phase = running;
        Ok(())
    }

    /// Finish `op` successfully
    pub fn complete(&mut self, op: LifecycleOp) {
        let (_, _, done) = op.phases();
        trace!("lifecycle {:?} -> {:?}", self.phase, done);
        self.phase = done;
    }

    /// Roll back to the phase `op` started from
    pub fn abort(&mut self, op: LifecycleOp) {
        let (required, _, _) = op.phases();
        trace!("lifecycle {:?} rolled back to {:?}", self.phase, required);
        self.phase = required;
    }
}

/// A resource whose lifetime is scoped to a dependency key
pub struct EffectSlot<D> {
    name: &'static str,
    deps: Option<D>,
    cleanup: Option<Cleanup>,
}

impl<D> fmt::Debug for EffectSlot<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectSlot")
            .field("name", &self.name)
            .field("evaluated", &self.deps.is_some())
            .field("active", &self.cleanup.is_some())
            .finish()
    }
}

impl<D> EffectSlot<D> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            deps: None,
            cleanup: None,
        }
    }

    /// Whether the last setup acquired something that still needs releasing
    pub fn is_active(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Run the pending cleanup, if any
    pub fn release(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            trace!("releasing effect `{}`", self.name);
            cleanup();
        }
    }

    /// Release and forget the dependency key, so the next run always sets up again
    pub fn dispose(&mut self) {
        self.release();
        self.deps = None;
    }
}

impl<D: PartialEq> EffectSlot<D> {
    /// Re-run `setup` if `deps` differ from the previous run
    ///
    /// The previous cleanup completes before the new setup starts. Returns
    /// whether setup ran.
    pub fn run<F>(&mut self, deps: D, setup: F) -> bool
    where
        F: FnOnce(&D) -> Option<Cleanup>,
    {
        if self.deps.as_ref() == Some(&deps) {
            return false;
        }
        self.release();
        trace!("running effect `{}`", self.name);
        self.cleanup = setup(&deps);
        self.deps = Some(deps);
        true
    }
}

impl<D> Drop for EffectSlot<D> {
    fn drop(&mut self) {
        self.release();
    }
}
