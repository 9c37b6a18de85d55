//! Commands recording their success hooks in a shared journal.

use easy_command::{Command, CommandContext, Flow};
use std::cell::RefCell;
use std::rc::Rc;

/// Ordered record of hook executions.
pub type Journal = Rc<RefCell<Vec<&'static str>>>;

/// Child command whose hook appends `"sub_command"`.
pub struct SubCommand {
    pub add_error: bool,
    pub journal: Journal,
}

impl Command for SubCommand {
    type Output = ();

    fn perform(&mut self, ctx: &mut CommandContext) -> Flow<()> {
        if self.add_error {
            ctx.errors_mut().add("something", "forbidden", None);
        }
        Ok(())
    }

    fn on_success(&mut self) {
        self.journal.borrow_mut().push("sub_command");
    }
}

/// Parent command whose hook appends `"callback_command"`.
pub struct CallbackCommand {
    pub add_error: bool,
    pub sub_command: Option<SubCommand>,
    pub journal: Journal,
}

impl CallbackCommand {
    pub fn new(journal: &Journal) -> Self {
        Self {
            add_error: false,
            sub_command: None,
            journal: Rc::clone(journal),
        }
    }

    pub fn with_sub_command(mut self, add_error: bool) -> Self {
        self.sub_command = Some(SubCommand {
            add_error,
            journal: Rc::clone(&self.journal),
        });
        self
    }
}

impl Command for CallbackCommand {
    type Output = ();

    fn perform(&mut self, ctx: &mut CommandContext) -> Flow<()> {
        if let Some(child) = self.sub_command.take() {
            ctx.assert_subcommand(child)?;
        }
        if self.add_error {
            ctx.errors_mut().add("something", "forbidden", None);
        }
        Ok(())
    }

    fn on_success(&mut self) {
        self.journal.borrow_mut().push("callback_command");
    }
}
