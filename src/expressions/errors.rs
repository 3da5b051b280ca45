// Error taxonomy of the expression core. Conditions are raised at the
// point of detection and propagate with `?` to the constructor or
// evaluation entry point; the core never recovers, retries or logs on the
// error path. The absent-sequence and absent-entry conditions of the
// construction contract are unrepresentable here: constructors take owned
// `Vec<Expr>` values, which can be empty but never null and never contain
// missing entries.

use thiserror::Error;

use crate::expressions::expr_tree::{ExprKind, Variable};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// A container was constructed with an empty operand sequence.
    #[error("operand list for {kind} must contain at least one expression")]
    EmptyOperands { kind: ExprKind },
    /// Evaluation reached a variable with no binding in the supplied
    /// assignment.
    #[error("no value bound for variable '{0}' in the assignment")]
    UnboundVariable(Variable),
}
