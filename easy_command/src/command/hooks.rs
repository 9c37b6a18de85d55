//! Deferred success hooks of finished sub-commands.

use super::Command;

/// A finished sub-command whose success hook has not run yet.
pub(crate) trait HookCascade {
    /// Runs the hooks of this command's own children, then its own hook.
    fn run_hooks(&mut self);
}

/// Sub-command kept alive by its parent until the parent succeeds.
pub(crate) struct FinishedCommand<C> {
    command: C,
    children: Vec<Box<dyn HookCascade>>,
    succeeded: bool,
}

impl<C> FinishedCommand<C> {
    pub(crate) const fn new(
        command: C,
        children: Vec<Box<dyn HookCascade>>,
        succeeded: bool,
    ) -> Self {
        Self {
            command,
            children,
            succeeded,
        }
    }
}

impl<C: Command> HookCascade for FinishedCommand<C> {
    fn run_hooks(&mut self) {
        let command = std::any::type_name::<C>();
        if !self.succeeded {
            tracing::trace!(command, "skipping success hook of failed sub-command");
            return;
        }
        run_all(&mut self.children);
        tracing::trace!(command, "running sub-command success hook");
        self.command.on_success();
    }
}

/// Runs every cascade in registration order.
pub(crate) fn run_all(cascades: &mut [Box<dyn HookCascade>]) {
    for cascade in cascades {
        cascade.run_hooks();
    }
}
