//! Build lifecycle hooks that decide how long mirror entries live.

use tracing::{debug, trace};

use crate::mirror::{DefaultFileSystemMirror, MirrorStats};

/// Notified by the task executor right before a task writes its outputs.
pub trait TaskOutputsGenerationListener {
    /// Called synchronously before any outputs are generated.
    fn before_task_outputs_generated(&self);
}

/// Notified at the start and end of the root build.
pub trait RootBuildLifecycleListener {
    /// Called once the build has started.
    fn after_start(&self);

    /// Called just before the build completes.
    fn before_complete(&self);
}

/// Observable state of a mirror with respect to invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Normal operation; ordinary tables fill up as tasks probe files.
    Primed,
    /// An invalidation has happened and nothing ordinary has been stored since.
    JustInvalidated,
}

impl MirrorStats {
    /// Derives the lifecycle state from these counters.
    pub fn lifecycle_state(&self) -> LifecycleState {
        let t = &self.tables;
        let ordinary = t.ordinary_files + t.ordinary_trees + t.ordinary_contents;
        if self.invalidations > 0 && ordinary == 0 {
            LifecycleState::JustInvalidated
        } else {
            LifecycleState::Primed
        }
    }
}

impl TaskOutputsGenerationListener for DefaultFileSystemMirror {
    fn before_task_outputs_generated(&self) {
        // Any ordinary path may be about to change, so all of them go. Picking
        // out only the task's output paths is left for later.
        let discarded = self.invalidate_ordinary();
        debug!(
            files = discarded.files,
            trees = discarded.trees,
            contents = discarded.contents,
            "discarded ordinary snapshots before task outputs are generated"
        );
    }
}

impl RootBuildLifecycleListener for DefaultFileSystemMirror {
    fn after_start(&self) {
        trace!("build started");
    }

    fn before_complete(&self) {
        trace!("build completing");
    }
}
