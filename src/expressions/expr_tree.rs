//! # Expression Tree Module
//!
//! Core representation of real-valued symbolic expressions as an immutable
//! tree. The node set is closed: constants, variables, n-ary sums, n-ary
//! products and a generic single-child container for unary operators.
//!
//! ## Main structures
//!
//! ### `Expr` enum
//! The expression sum type. Every variant wraps a dedicated node struct and
//! the [`Expression`] capability trait is dispatched over the enum with
//! `enum_dispatch`, so `expr.variables()` / `expr.structural_hash()` work on
//! any node without matching by hand.
//!
//! ### Canonicalization
//! Commutative containers built through the canonical constructors
//! ([`Expr::addition`], [`Expr::multiplication`], the `std::ops` sugar and
//! the `sum!` / `product!` macros) sort their operands with the total order
//! on `Expr` before storing them. Two canonical containers of the same kind
//! holding the same multiset of children therefore store identical child
//! order, carry identical memoized hashes and compare equal. The
//! `_unsorted` constructors keep the caller's order verbatim and give none
//! of those guarantees; they exist for callers rebuilding a node whose
//! operands are already in canonical order.
//!
//! ### Hashing and equality
//! Every node memoizes a structural hash at construction; it is never
//! recomputed. Each operator kind mixes a distinct large constant into the
//! hash so kind-swapped trees with identical children do not trivially
//! collide. Equality uses the memoized hash only as a fast rejection
//! filter and always confirms with a recursive structural comparison, so a
//! hash collision can never produce a false positive.
//!
//! ## Interesting code features
//!
//! 1. **Structural sharing**: containers hold `Arc<[Expr]>` and the unary
//!    child is `Arc<Expr>`, so cloning an expression is cheap and the same
//!    subtree may appear under several parents without aliasing hazards.
//!
//! 2. **Operator overloading**: `std::ops` impls give natural syntax
//!    (`x + y * z`) that always takes the canonical construction path.
//!
//! 3. **Identity elements**: `num_traits::{Zero, One}` are implemented so
//!    the additive and multiplicative identities used by differentiation
//!    are ordinary expressions.

use enum_dispatch::enum_dispatch;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::expressions::errors::ExprError;

// Per-kind hash offsets. The addition/multiplication values are the ones
// the equality and canonicalization behavior was originally tuned with.
const CONSTANT_HASH_SEED: u64 = 24593;
const VARIABLE_HASH_SEED: u64 = 49157;
const MULTIPLICATION_HASH_SEED: u64 = 10867;
const ADDITION_HASH_SEED: u64 = 59971;
const UNARY_HASH_SEED: u64 = 98317;

/// Runtime kind tag of a node. The derived `Ord` is the first comparator
/// key for canonical operand ordering: `Constant < Variable <
/// Multiplication < Addition < Unary`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    strum_macros::Display, strum_macros::EnumIter,
)]
pub enum ExprKind {
    Constant,
    Variable,
    Multiplication,
    Addition,
    Unary,
}

fn combine_hashes(seed: u64, parts: impl IntoIterator<Item = u64>) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write_u64(seed);
    for part in parts {
        hasher.write_u64(part);
    }
    hasher.finish()
}

/// Capability contract implemented by every node kind and dispatched over
/// [`Expr`].
#[enum_dispatch(Expr)]
pub trait Expression {
    /// Set of variables reachable from this node: the node itself for a
    /// variable leaf, the union over children for containers.
    fn variables(&self) -> BTreeSet<Variable>;
    /// Memoized structural fingerprint, computed once at construction.
    fn structural_hash(&self) -> u64;
    /// Runtime kind tag of this node.
    fn kind(&self) -> ExprKind;
}

//__________________________________LEAVES____________________________________

/// Real-valued literal leaf.
///
/// Equality and ordering go through the bit pattern (`f64::total_cmp`) so
/// both relations stay total; `NaN` constants are equal to themselves.
#[derive(Clone, Debug)]
pub struct Constant {
    value: f64,
    hash: u64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        let hash = combine_hashes(CONSTANT_HASH_SEED, [value.to_bits()]);
        Constant { value, hash }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Expression for Constant {
    fn variables(&self) -> BTreeSet<Variable> {
        BTreeSet::new()
    }
    fn structural_hash(&self) -> u64 {
        self.hash
    }
    fn kind(&self) -> ExprKind {
        ExprKind::Constant
    }
}

/// Named symbolic leaf. Two variables denote the same symbol iff their
/// names are equal.
#[derive(Clone, Debug)]
pub struct Variable {
    name: Arc<str>,
    hash: u64,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        let name: Arc<str> = name.into().into();
        let mut hasher = DefaultHasher::new();
        hasher.write_u64(VARIABLE_HASH_SEED);
        hasher.write(name.as_bytes());
        let hash = hasher.finish();
        Variable { name, hash }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates multiple variables from a comma-separated string.
    ///
    /// # Examples
    /// ```
    /// use realexpr::expressions::expr_tree::Variable;
    /// let vars = Variable::symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// assert_eq!(vars[0].name(), "x");
    /// ```
    pub fn symbols(symbols: &str) -> Vec<Variable> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Variable::new)
            .collect()
    }
}

impl Expression for Variable {
    fn variables(&self) -> BTreeSet<Variable> {
        BTreeSet::from([self.clone()])
    }
    fn structural_hash(&self) -> u64 {
        self.hash
    }
    fn kind(&self) -> ExprKind {
        ExprKind::Variable
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

//_____________________________CANONICAL CONTAINER____________________________

/// Ordered, immutable, non-empty operand sequence shared by the container
/// nodes, together with the memoized hash over the stored order.
#[derive(Clone, Debug)]
pub struct OperandList {
    children: Arc<[Expr]>,
    hash: u64,
}

impl OperandList {
    /// Infallible path for operand vectors already known to be non-empty
    /// (binary operator sugar, visitor rebuilds).
    fn build(seed: u64, mut children: Vec<Expr>, sort: bool) -> Self {
        if sort {
            children.sort();
        }
        let hash = combine_hashes(seed, children.iter().map(Expression::structural_hash));
        OperandList {
            children: children.into(),
            hash,
        }
    }

    fn new(kind: ExprKind, seed: u64, children: Vec<Expr>, sort: bool) -> Result<Self, ExprError> {
        if children.is_empty() {
            return Err(ExprError::EmptyOperands { kind });
        }
        Ok(Self::build(seed, children, sort))
    }

    pub fn children(&self) -> &[Expr] {
        &self.children
    }
}

/// Sum of one or more terms. Commutative; canonical construction sorts the
/// terms, so equal term multisets give equal nodes.
#[derive(Clone, Debug)]
pub struct Addition {
    operands: OperandList,
}

impl Addition {
    pub(crate) fn from_operands(terms: Vec<Expr>, sort: bool) -> Self {
        Addition {
            operands: OperandList::build(ADDITION_HASH_SEED, terms, sort),
        }
    }

    pub fn terms(&self) -> &[Expr] {
        self.operands.children()
    }
}

impl Expression for Addition {
    fn variables(&self) -> BTreeSet<Variable> {
        self.terms().iter().flat_map(Expression::variables).collect()
    }
    fn structural_hash(&self) -> u64 {
        self.operands.hash
    }
    fn kind(&self) -> ExprKind {
        ExprKind::Addition
    }
}

/// Product of one or more factors. Commutative, same canonicalization
/// policy as [`Addition`].
#[derive(Clone, Debug)]
pub struct Multiplication {
    operands: OperandList,
}

impl Multiplication {
    pub(crate) fn from_operands(factors: Vec<Expr>, sort: bool) -> Self {
        Multiplication {
            operands: OperandList::build(MULTIPLICATION_HASH_SEED, factors, sort),
        }
    }

    pub fn factors(&self) -> &[Expr] {
        self.operands.children()
    }
}

impl Expression for Multiplication {
    fn variables(&self) -> BTreeSet<Variable> {
        self.factors()
            .iter()
            .flat_map(Expression::variables)
            .collect()
    }
    fn structural_hash(&self) -> u64 {
        self.operands.hash
    }
    fn kind(&self) -> ExprKind {
        ExprKind::Multiplication
    }
}

//_______________________________UNARY CONTAINER______________________________

/// Contract for concrete unary operators (negation, elementary functions,
/// ...), which live outside this crate. The operator's `name` is its
/// identity for equality, ordering and hashing; `apply` is its evaluation
/// rule and `outer_derivative` its contribution to the chain rule,
/// d op(u)/du expressed in terms of the child `u`.
pub trait UnaryOperator: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, x: f64) -> f64;
    fn outer_derivative(&self, child: &Expr) -> Expr;
}

/// Single-child container applying a [`UnaryOperator`] to its argument.
/// There is exactly one child by construction, so canonicalization is a
/// no-op here.
#[derive(Clone, Debug)]
pub struct Unary {
    op: Arc<dyn UnaryOperator>,
    child: Arc<Expr>,
    hash: u64,
}

impl Unary {
    pub fn new(op: Arc<dyn UnaryOperator>, child: Expr) -> Self {
        let mut hasher = DefaultHasher::new();
        hasher.write_u64(UNARY_HASH_SEED);
        hasher.write(op.name().as_bytes());
        hasher.write_u64(child.structural_hash());
        let hash = hasher.finish();
        Unary {
            op,
            child: Arc::new(child),
            hash,
        }
    }

    pub fn operator(&self) -> &dyn UnaryOperator {
        self.op.as_ref()
    }

    pub fn child(&self) -> &Expr {
        &self.child
    }
}

impl Expression for Unary {
    fn variables(&self) -> BTreeSet<Variable> {
        self.child.variables()
    }
    fn structural_hash(&self) -> u64 {
        self.hash
    }
    fn kind(&self) -> ExprKind {
        ExprKind::Unary
    }
}

//________________________________EXPRESSION__________________________________

/// An immutable node in the symbolic tree. See the module docs for the
/// canonicalization, hashing and equality contracts.
#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum Expr {
    Constant(Constant),
    Var(Variable),
    Mul(Multiplication),
    Add(Addition),
    Unary(Unary),
}

impl Expr {
    pub fn constant(value: f64) -> Expr {
        Constant::new(value).into()
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Variable::new(name).into()
    }

    /// Creates a sum of the given terms in canonical (sorted) order.
    ///
    /// A single term is a legal degenerate sum. Fails with
    /// [`ExprError::EmptyOperands`] on an empty vector.
    pub fn addition(terms: Vec<Expr>) -> Result<Expr, ExprError> {
        let operands = OperandList::new(ExprKind::Addition, ADDITION_HASH_SEED, terms, true)?;
        Ok(Expr::Add(Addition { operands }))
    }

    /// Creates a sum keeping the caller-supplied term order verbatim.
    ///
    /// Meant for callers that already hold the operands in canonical order;
    /// two unsorted sums over the same multiset built in different orders
    /// are not guaranteed equal.
    pub fn addition_unsorted(terms: Vec<Expr>) -> Result<Expr, ExprError> {
        let operands = OperandList::new(ExprKind::Addition, ADDITION_HASH_SEED, terms, false)?;
        Ok(Expr::Add(Addition { operands }))
    }

    /// Creates a product of the given factors in canonical (sorted) order.
    ///
    /// A single factor is a legal degenerate product. Fails with
    /// [`ExprError::EmptyOperands`] on an empty vector.
    pub fn multiplication(factors: Vec<Expr>) -> Result<Expr, ExprError> {
        let operands =
            OperandList::new(ExprKind::Multiplication, MULTIPLICATION_HASH_SEED, factors, true)?;
        Ok(Expr::Mul(Multiplication { operands }))
    }

    /// Creates a product keeping the caller-supplied factor order verbatim.
    pub fn multiplication_unsorted(factors: Vec<Expr>) -> Result<Expr, ExprError> {
        let operands =
            OperandList::new(ExprKind::Multiplication, MULTIPLICATION_HASH_SEED, factors, false)?;
        Ok(Expr::Mul(Multiplication { operands }))
    }

    /// Wraps `child` in the given unary operator. Always has exactly one
    /// child, so this cannot fail.
    pub fn unary(op: Arc<dyn UnaryOperator>, child: Expr) -> Expr {
        Expr::Unary(Unary::new(op, child))
    }
}

fn cmp_children(a: &[Expr], b: &[Expr]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    a.len().cmp(&b.len())
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        // Memoized hash as rejection filter only; structural comparison
        // decides, so hash collisions cannot produce false positives.
        if self.structural_hash() != other.structural_hash() {
            return false;
        }
        match (self, other) {
            (Expr::Constant(a), Expr::Constant(b)) => a.value.to_bits() == b.value.to_bits(),
            (Expr::Var(a), Expr::Var(b)) => a == b,
            (Expr::Add(a), Expr::Add(b)) => a.terms() == b.terms(),
            (Expr::Mul(a), Expr::Mul(b)) => a.factors() == b.factors(),
            (Expr::Unary(a), Expr::Unary(b)) => {
                a.op.name() == b.op.name() && a.child == b.child
            }
            _ => false,
        }
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total deterministic order used exclusively to canonicalize commutative
/// operand lists: kind rank first, then within the same kind a recursive
/// structural comparison (first differing child decides, then arity).
impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind().cmp(&other.kind()).then_with(|| match (self, other) {
            (Expr::Constant(a), Expr::Constant(b)) => a.value.total_cmp(&b.value),
            (Expr::Var(a), Expr::Var(b)) => a.cmp(b),
            (Expr::Add(a), Expr::Add(b)) => cmp_children(a.terms(), b.terms()),
            (Expr::Mul(a), Expr::Mul(b)) => cmp_children(a.factors(), b.factors()),
            (Expr::Unary(a), Expr::Unary(b)) => a
                .op
                .name()
                .cmp(b.op.name())
                .then_with(|| a.child.cmp(&b.child)),
            _ => unreachable!("kind ranks already compared equal"),
        })
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Constant(c) => write!(f, "{}", c.value),
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Add(a) => write!(f, "({})", a.terms().iter().join(" + ")),
            Expr::Mul(m) => write!(f, "({})", m.factors().iter().join(" * ")),
            Expr::Unary(u) => write!(f, "{}({})", u.op.name(), u.child),
        }
    }
}

//________________________________OPERATOR SUGAR______________________________

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(Addition::from_operands(vec![self, rhs], true))
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(Multiplication::from_operands(vec![self, rhs], true))
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::constant(-1.0) * self
    }
}

// The node set is closed: subtraction is sugar for a + (-1)*b.
impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.clone() + rhs;
    }
}

impl std::ops::SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.clone() - rhs;
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.clone() * rhs;
    }
}

impl num_traits::Zero for Expr {
    fn zero() -> Self {
        Expr::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(c) if c.value == 0.0)
    }
}

impl num_traits::One for Expr {
    fn one() -> Self {
        Expr::constant(1.0)
    }

    fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(c) if c.value == 1.0)
    }
}

//___________________________________MACROS___________________________________

/// Macro to create a canonical sum from one or more expressions.
/// Usage: sum!(x, y, z) -> (x + y + z) in canonical order
#[macro_export]
macro_rules! sum {
    ($($term:expr),+ $(,)?) => {
        $crate::expressions::expr_tree::Expr::addition(vec![$($term),+])
            .expect("at least one term")
    };
}

/// Macro to create a canonical product from one or more expressions.
/// Usage: product!(x, y, z) -> (x * y * z) in canonical order
#[macro_export]
macro_rules! product {
    ($($factor:expr),+ $(,)?) => {
        $crate::expressions::expr_tree::Expr::multiplication(vec![$($factor),+])
            .expect("at least one factor")
    };
}

//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn xyz() -> (Expr, Expr, Expr) {
        (Expr::var("x"), Expr::var("y"), Expr::var("z"))
    }

    #[test]
    fn test_canonical_addition_is_commutative() {
        let (x, y, _) = xyz();
        let a = Expr::addition(vec![x.clone(), y.clone()]).unwrap();
        let b = Expr::addition(vec![y, x]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_canonical_multiplication_is_commutative() {
        let (x, y, z) = xyz();
        let a = Expr::multiplication(vec![x.clone(), y.clone(), z.clone()]).unwrap();
        let b = Expr::multiplication(vec![z, y, x]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
    }

    #[test]
    fn test_unsorted_constructor_preserves_order() {
        let (x, y, _) = xyz();
        let a = Expr::addition_unsorted(vec![y.clone(), x.clone()]).unwrap();
        let b = Expr::addition_unsorted(vec![x.clone(), y.clone()]).unwrap();
        assert_ne!(a, b);
        // operands already canonical -> identical to the sorting path
        let canonical = Expr::addition(vec![y, x]).unwrap();
        assert_eq!(b, canonical);
    }

    #[test]
    fn test_empty_operands_rejected() {
        let err = Expr::addition(vec![]).unwrap_err();
        assert_eq!(err, ExprError::EmptyOperands { kind: ExprKind::Addition });
        let err = Expr::multiplication_unsorted(vec![]).unwrap_err();
        assert_eq!(
            err,
            ExprError::EmptyOperands { kind: ExprKind::Multiplication }
        );
    }

    #[test]
    fn test_degenerate_single_child_containers() {
        let (x, _, _) = xyz();
        let sum = Expr::addition(vec![x.clone()]).unwrap();
        let product = Expr::multiplication(vec![x.clone()]).unwrap();
        assert_eq!(sum.kind(), ExprKind::Addition);
        assert_eq!(product.kind(), ExprKind::Multiplication);
        assert_ne!(sum, product);
        assert_ne!(sum, x);
    }

    #[test]
    fn test_kind_offsets_separate_add_and_mul() {
        let (x, y, _) = xyz();
        let sum = Expr::addition(vec![x.clone(), y.clone()]).unwrap();
        let product = Expr::multiplication(vec![x, y]).unwrap();
        assert_ne!(sum.structural_hash(), product.structural_hash());
        assert_ne!(sum, product);
    }

    #[test]
    fn test_shuffled_operands_settle_into_same_canonical_form() {
        let mut rng = StdRng::seed_from_u64(1729);
        let (x, y, z) = xyz();
        let base = vec![
            x.clone(),
            y.clone(),
            z.clone(),
            Expr::constant(3.0),
            x.clone() * y.clone(),
            x + y + z,
        ];
        let reference = Expr::addition(base.clone()).unwrap();
        for _ in 0..20 {
            let mut shuffled = base.clone();
            shuffled.shuffle(&mut rng);
            let rebuilt = Expr::addition(shuffled).unwrap();
            assert_eq!(rebuilt, reference);
            assert_eq!(rebuilt.structural_hash(), reference.structural_hash());
            assert_eq!(rebuilt.to_string(), reference.to_string());
        }
    }

    #[test]
    fn test_variables_of_compound_expression() {
        let (x, y, z) = xyz();
        let expr = (x + y) * z;
        let vars = expr.variables();
        let names: Vec<&str> = vars.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_variable_identity_is_name_based() {
        let a = Variable::new("x");
        let b = Variable::new("x");
        assert_eq!(a, b);
        assert_eq!(Expr::from(a), Expr::var("x"));
        assert_ne!(Variable::new("x"), Variable::new("y"));
    }

    #[test]
    fn test_symbols_helper() {
        let vars = Variable::symbols("x, y , z,");
        let names: Vec<&str> = vars.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_comparator_kind_rank() {
        let constant = Expr::constant(5.0);
        let var = Expr::var("a");
        let product = Expr::multiplication(vec![Expr::var("a"), Expr::var("b")]).unwrap();
        let sum = Expr::addition(vec![Expr::var("a"), Expr::var("b")]).unwrap();
        assert!(constant < var);
        assert!(var < product);
        assert!(product < sum);
    }

    #[test]
    fn test_comparator_is_deterministic_within_kind() {
        assert!(Expr::var("a") < Expr::var("b"));
        assert!(Expr::constant(-1.0) < Expr::constant(2.0));
        let short = Expr::addition(vec![Expr::var("a"), Expr::var("b")]).unwrap();
        let long =
            Expr::addition(vec![Expr::var("a"), Expr::var("b"), Expr::var("c")]).unwrap();
        assert!(short < long);
    }

    #[test]
    fn test_display_parenthesizes_operators() {
        let (x, y, _) = xyz();
        let expr = x.clone() * y.clone() + x;
        // variables rank before products in the canonical order
        assert_eq!(expr.to_string(), "(x + (x * y))");
        assert_eq!(y.to_string(), "y");
        assert_eq!(Expr::constant(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_ops_sugar_matches_canonical_constructors() {
        let (x, y, _) = xyz();
        let sugar = x.clone() + y.clone();
        let explicit = Expr::addition(vec![y.clone(), x.clone()]).unwrap();
        assert_eq!(sugar, explicit);
        let neg = -x.clone();
        let expected = Expr::multiplication(vec![Expr::constant(-1.0), x.clone()]).unwrap();
        assert_eq!(neg, expected);
        let diff = x.clone() - y.clone();
        assert_eq!(diff, x + (Expr::constant(-1.0) * y));
    }

    #[test]
    fn test_assign_ops() {
        let (x, y, _) = xyz();
        let mut expr = x.clone();
        expr += y.clone();
        assert_eq!(expr, x.clone() + y.clone());
        expr *= Expr::constant(2.0);
        assert_eq!(expr, (x + y) * Expr::constant(2.0));
    }

    #[test]
    fn test_zero_and_one_identities() {
        assert!(Expr::zero().is_zero());
        assert!(Expr::one().is_one());
        assert!(!Expr::var("x").is_zero());
        assert_eq!(Expr::zero(), Expr::constant(0.0));
        assert_eq!(Expr::one(), Expr::constant(1.0));
    }

    #[test]
    fn test_sum_and_product_macros() {
        let (x, y, z) = xyz();
        let s = sum!(z.clone(), y.clone(), x.clone());
        assert_eq!(s, Expr::addition(vec![x.clone(), y.clone(), z.clone()]).unwrap());
        let p = product!(y.clone(), x.clone());
        assert_eq!(p, x * y);
    }

    #[test]
    fn test_kind_ranks_enumerate_in_comparator_order() {
        use strum::IntoEnumIterator;
        let ranks: Vec<ExprKind> = ExprKind::iter().collect();
        assert_eq!(
            ranks,
            vec![
                ExprKind::Constant,
                ExprKind::Variable,
                ExprKind::Multiplication,
                ExprKind::Addition,
                ExprKind::Unary,
            ]
        );
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nan_constant_is_self_equal() {
        let a = Expr::constant(f64::NAN);
        let b = Expr::constant(f64::NAN);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_shared_subtree_under_multiple_parents() {
        let (x, y, _) = xyz();
        let shared = x + y;
        let parent = shared.clone() * shared.clone();
        let vars = parent.variables();
        assert_eq!(vars.len(), 2);
        assert_eq!(parent, shared.clone() * shared);
    }
}
