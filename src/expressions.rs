/// Immutable symbolic expression trees over the reals.
///
/// Nodes are built bottom-up from variables and constants; commutative
/// operators (sums, products) canonicalize their operand order so that
/// structurally equivalent trees compare equal no matter how they were
/// assembled.
///
/// # Example
/// ```
/// use realexpr::expressions::expr_tree::{Expr, Variable};
///
/// let x = Variable::new("x");
/// let y = Variable::new("y");
/// let a = Expr::from(x.clone()) + Expr::from(y.clone());
/// let b = Expr::from(y) + Expr::from(x);
/// assert_eq!(a, b);
/// println!("canonical sum: {}", a);
/// ```
pub mod expr_tree;
/// Mutable variable -> value bindings consumed by the evaluator.
pub mod assignment;
/// Error taxonomy for construction and evaluation.
pub mod errors;
/// The visitor protocol and its two reference operations: numerical
/// evaluation under an [`assignment::Assignment`] and analytical
/// differentiation with respect to a target variable.
///
/// # Example
/// ```
/// use realexpr::expressions::assignment::Assignment;
/// use realexpr::expressions::expr_tree::{Expr, Variable};
///
/// let x = Variable::new("x");
/// let y = Variable::new("y");
/// // f = x*y + x
/// let f = Expr::from(x.clone()) * Expr::from(y.clone()) + Expr::from(x.clone());
///
/// let mut bindings = Assignment::new();
/// bindings.insert(x.clone(), 2.0);
/// bindings.insert(y.clone(), 3.0);
/// assert_eq!(f.eval(&bindings).unwrap(), 8.0);
///
/// // df/dx evaluates to y + 1 = 4 under the same bindings
/// let df_dx = f.diff(&x);
/// assert_eq!(df_dx.eval(&bindings).unwrap(), 4.0);
/// ```
pub mod visitor;
