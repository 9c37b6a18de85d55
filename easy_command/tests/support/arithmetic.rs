//! Arithmetic commands shared by the integration tests.

use easy_command::{Command, CommandContext, Flow};

/// Multiplies two operands.
pub struct MultiplicationCommand {
    pub a: i64,
    pub b: i64,
}

impl Command for MultiplicationCommand {
    type Output = i64;

    fn perform(&mut self, _ctx: &mut CommandContext) -> Flow<i64> {
        Ok(self.a * self.b)
    }
}

/// Adds two operands, optionally recording an `addition.failed` error first.
pub struct AdditionCommand {
    pub a: i64,
    pub b: i64,
    pub fail: bool,
}

impl Command for AdditionCommand {
    type Output = i64;

    fn perform(&mut self, ctx: &mut CommandContext) -> Flow<i64> {
        if self.fail {
            ctx.errors_mut().add("addition", "failed", None);
        }
        Ok(self.a + self.b)
    }
}

/// Computes `(a + b) * c` through two sub-commands.
pub struct AddThenMultiplyCommand {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub fail_addition: bool,
}

impl AddThenMultiplyCommand {
    pub const fn new(a: i64, b: i64, c: i64) -> Self {
        Self {
            a,
            b,
            c,
            fail_addition: false,
        }
    }
}

impl Command for AddThenMultiplyCommand {
    type Output = i64;

    fn perform(&mut self, ctx: &mut CommandContext) -> Flow<i64> {
        let sum = ctx.assert_subcommand(AdditionCommand {
            a: self.a,
            b: self.b,
            fail: self.fail_addition,
        })?;
        let product = ctx.assert_subcommand(MultiplicationCommand { a: sum, b: self.c })?;
        Ok(product)
    }
}

/// Doubles its input but always records a `base.some_error` error.
pub struct FailureCommand {
    pub input: i64,
}

impl Command for FailureCommand {
    type Output = i64;

    fn perform(&mut self, ctx: &mut CommandContext) -> Flow<i64> {
        ctx.errors_mut()
            .add("base", "some_error", Some("Error message"));
        Ok(self.input * 2)
    }
}
