//! # Visitor Protocol Module
//!
//! Double-dispatch traversal over the closed node set. A recursive
//! operation implements [`ExprVisitor`] with one handler per node kind;
//! [`Expr::accept`] matches exhaustively on the node's variant and calls
//! exactly the handler for that kind, threading the caller's state
//! through. Because the node set is a fixed sum type, adding a node kind
//! is a compile error in every visitor until its handler exists — the
//! compiler enforces coverage instead of a runtime contract.
//!
//! Visitors decide themselves whether and how to recurse: there is no
//! separate walk-all-children utility, each handler calls `accept` on the
//! children it needs. Traversal is plain single-threaded recursion with no
//! memoization of shared subtrees; depth is bounded by tree depth.
//!
//! Two reference operations live here:
//! - [`Evaluator`] — numerical evaluation under an [`Assignment`];
//! - [`Differentiator`] — analytical differentiation with respect to a
//!   target [`Variable`], built from the linearity rule, the generalized
//!   product rule and the chain rule.

use log::debug;
use num_traits::{One, Zero};

use crate::expressions::assignment::Assignment;
use crate::expressions::errors::ExprError;
use crate::expressions::expr_tree::{
    Addition, Constant, Expr, Multiplication, Unary, Variable,
};

/// A recursive operation over expression trees, parameterized by the state
/// it threads through the traversal and the per-call result it produces.
pub trait ExprVisitor {
    type State;
    type Output;

    fn visit_constant(&self, node: &Constant, state: &Self::State) -> Self::Output;
    fn visit_variable(&self, node: &Variable, state: &Self::State) -> Self::Output;
    fn visit_addition(&self, node: &Addition, state: &Self::State) -> Self::Output;
    fn visit_multiplication(&self, node: &Multiplication, state: &Self::State) -> Self::Output;
    fn visit_unary(&self, node: &Unary, state: &Self::State) -> Self::Output;
}

impl Expr {
    /// Dispatches to the visitor handler matching this node's concrete
    /// kind. This is the only traversal primitive.
    pub fn accept<V: ExprVisitor>(&self, visitor: &V, state: &V::State) -> V::Output {
        match self {
            Expr::Constant(node) => visitor.visit_constant(node, state),
            Expr::Var(node) => visitor.visit_variable(node, state),
            Expr::Add(node) => visitor.visit_addition(node, state),
            Expr::Mul(node) => visitor.visit_multiplication(node, state),
            Expr::Unary(node) => visitor.visit_unary(node, state),
        }
    }

    /// Evaluates the expression under the given variable bindings.
    ///
    /// Fails with [`ExprError::UnboundVariable`] as soon as the traversal
    /// reaches a variable absent from the assignment; there are no default
    /// bindings.
    pub fn eval(&self, assignment: &Assignment) -> Result<f64, ExprError> {
        debug!("evaluating expression under {} binding(s)", assignment.len());
        self.accept(&Evaluator, assignment)
    }

    /// Symbolic derivative of the expression with respect to `var`.
    ///
    /// The result is an ordinary expression: it can be evaluated and
    /// differentiated again.
    pub fn diff(&self, var: &Variable) -> Expr {
        debug!("differentiating with respect to {}", var);
        self.accept(&Differentiator, var)
    }
}

//__________________________________EVALUATOR_________________________________

/// Evaluates a tree bottom-up under an [`Assignment`].
pub struct Evaluator;

impl ExprVisitor for Evaluator {
    type State = Assignment;
    type Output = Result<f64, ExprError>;

    fn visit_constant(&self, node: &Constant, _state: &Assignment) -> Self::Output {
        Ok(node.value())
    }

    fn visit_variable(&self, node: &Variable, state: &Assignment) -> Self::Output {
        state
            .get(node)
            .ok_or_else(|| ExprError::UnboundVariable(node.clone()))
    }

    fn visit_addition(&self, node: &Addition, state: &Assignment) -> Self::Output {
        let mut total = 0.0;
        for term in node.terms() {
            total += term.accept(self, state)?;
        }
        Ok(total)
    }

    fn visit_multiplication(&self, node: &Multiplication, state: &Assignment) -> Self::Output {
        let mut product = 1.0;
        for factor in node.factors() {
            product *= factor.accept(self, state)?;
        }
        Ok(product)
    }

    fn visit_unary(&self, node: &Unary, state: &Assignment) -> Self::Output {
        // the concrete operator supplies its own combining rule
        Ok(node.operator().apply(node.child().accept(self, state)?))
    }
}

//________________________________DIFFERENTIATOR______________________________

/// Builds the symbolic derivative with respect to the target variable
/// carried as traversal state.
pub struct Differentiator;

impl ExprVisitor for Differentiator {
    type State = Variable;
    type Output = Expr;

    fn visit_constant(&self, _node: &Constant, _target: &Variable) -> Expr {
        Expr::zero()
    }

    fn visit_variable(&self, node: &Variable, target: &Variable) -> Expr {
        if node == target { Expr::one() } else { Expr::zero() }
    }

    /// d(f1 + ... + fn)/dv = f1' + ... + fn'
    fn visit_addition(&self, node: &Addition, target: &Variable) -> Expr {
        let derivatives = node
            .terms()
            .iter()
            .map(|term| term.accept(self, target))
            .collect();
        Expr::Add(Addition::from_operands(derivatives, true))
    }

    /// d(f1 * ... * fn)/dv = sum over i of (fi' * all other factors)
    fn visit_multiplication(&self, node: &Multiplication, target: &Variable) -> Expr {
        let factors = node.factors();
        let terms = (0..factors.len())
            .map(|i| {
                let mut product = factors.to_vec();
                product[i] = factors[i].accept(self, target);
                Expr::Mul(Multiplication::from_operands(product, true))
            })
            .collect();
        Expr::Add(Addition::from_operands(terms, true))
    }

    /// chain rule: d op(u)/dv = (d op(u)/du) * u'
    fn visit_unary(&self, node: &Unary, target: &Variable) -> Expr {
        let outer = node.operator().outer_derivative(node.child());
        let inner = node.child().accept(self, target);
        outer * inner
    }
}

//___________________________________TESTS____________________________________
