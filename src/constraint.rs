//! Date constraint model.
//!
//! A constraint compares the date assigned to a meeting variable against
//! either a literal date ([`UnaryDateConstraint`]) or the date of another
//! variable ([`BinaryDateConstraint`]), using one of the six comparison
//! operators of [`CompOp`]. Constraints are immutable after construction
//! and validated eagerly: an invalid operator symbol, a negative variable
//! index, or a binary self-reference is rejected before any solving runs.

use crate::error::CspError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Comparison operator relating the two sides of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompOp {
    /// All six operators, in symbol-table order.
    pub const ALL: [CompOp; 6] = [
        CompOp::Eq,
        CompOp::Ne,
        CompOp::Lt,
        CompOp::Le,
        CompOp::Gt,
        CompOp::Ge,
    ];

    /// Whether `left op right` holds.
    ///
    /// Pure and total over all date pairs and all six operators.
    pub fn holds(self, left: NaiveDate, right: NaiveDate) -> bool {
        match self {
            CompOp::Eq => left == right,
            CompOp::Ne => left != right,
            CompOp::Lt => left < right,
            CompOp::Le => left <= right,
            CompOp::Gt => left > right,
            CompOp::Ge => left >= right,
        }
    }

    /// The operator obtained by swapping the operand sides.
    ///
    /// Satisfies `op.holds(a, b) == op.inverse().holds(b, a)` for all
    /// `a`, `b`. Used whenever an arc direction is reversed while building
    /// or propagating the constraint graph.
    pub fn inverse(self) -> CompOp {
        match self {
            CompOp::Eq => CompOp::Eq,
            CompOp::Ne => CompOp::Ne,
            CompOp::Lt => CompOp::Gt,
            CompOp::Le => CompOp::Ge,
            CompOp::Gt => CompOp::Lt,
            CompOp::Ge => CompOp::Le,
        }
    }

    /// The operator's source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            CompOp::Eq => "==",
            CompOp::Ne => "!=",
            CompOp::Lt => "<",
            CompOp::Le => "<=",
            CompOp::Gt => ">",
            CompOp::Ge => ">=",
        }
    }
}

impl FromStr for CompOp {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompOp::Eq),
            "!=" => Ok(CompOp::Ne),
            "<" => Ok(CompOp::Lt),
            "<=" => Ok(CompOp::Le),
            ">" => Ok(CompOp::Gt),
            ">=" => Ok(CompOp::Ge),
            _ => Err(CspError::InvalidOperator(s.to_owned())),
        }
    }
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Constrains one meeting variable against a literal date.
///
/// # Examples
///
/// ```
/// use calsat::{CompOp, UnaryDateConstraint};
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(2019, 1, 3).unwrap();
/// let c = UnaryDateConstraint::new(0, CompOp::Le, d);
/// assert_eq!(c.to_string(), "0 <= 2019-01-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryDateConstraint {
    var: usize,
    op: CompOp,
    date: NaiveDate,
}

impl UnaryDateConstraint {
    /// Creates a constraint `var op date`.
    pub fn new(var: usize, op: CompOp, date: NaiveDate) -> Self {
        Self { var, op, date }
    }

    /// Creates a constraint from externally supplied parts: a possibly
    /// negative index and an operator symbol, both validated.
    pub fn from_parts(var: i64, op: &str, date: NaiveDate) -> Result<Self, CspError> {
        let op = op.parse()?;
        let var = usize::try_from(var).map_err(|_| CspError::InvalidVariableIndex(var))?;
        Ok(Self::new(var, op, date))
    }

    /// The constrained variable's index.
    pub fn var(&self) -> usize {
        self.var
    }

    /// The comparison operator.
    pub fn op(&self) -> CompOp {
        self.op
    }

    /// The literal date on the right-hand side.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for UnaryDateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.var, self.op, self.date)
    }
}

/// Constrains the dates of two distinct meeting variables against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryDateConstraint {
    left: usize,
    op: CompOp,
    right: usize,
}

impl BinaryDateConstraint {
    /// Creates a constraint `left op right`.
    ///
    /// Fails with [`CspError::SelfReference`] if both sides name the same
    /// variable.
    pub fn new(left: usize, op: CompOp, right: usize) -> Result<Self, CspError> {
        if left == right {
            return Err(CspError::SelfReference(left));
        }
        Ok(Self { left, op, right })
    }

    /// Creates a constraint from externally supplied parts, validating the
    /// operator symbol and rejecting negative indices.
    pub fn from_parts(left: i64, op: &str, right: i64) -> Result<Self, CspError> {
        let op = op.parse()?;
        let left = usize::try_from(left).map_err(|_| CspError::InvalidVariableIndex(left))?;
        let right = usize::try_from(right).map_err(|_| CspError::InvalidVariableIndex(right))?;
        Self::new(left, op, right)
    }

    /// The left-operand variable index.
    pub fn left(&self) -> usize {
        self.left
    }

    /// The comparison operator.
    pub fn op(&self) -> CompOp {
        self.op
    }

    /// The right-operand variable index.
    pub fn right(&self) -> usize {
        self.right
    }

    /// The same constraint seen from the right operand's side:
    /// `right op.inverse() left`.
    pub fn reversed(&self) -> Self {
        Self {
            left: self.right,
            op: self.op.inverse(),
            right: self.left,
        }
    }
}

impl fmt::Display for BinaryDateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// Either kind of date constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateConstraint {
    /// Variable-vs-literal comparison.
    Unary(UnaryDateConstraint),
    /// Variable-vs-variable comparison.
    Binary(BinaryDateConstraint),
}

impl DateConstraint {
    /// Convenience: build a unary constraint.
    pub fn unary(var: usize, op: CompOp, date: NaiveDate) -> Self {
        DateConstraint::Unary(UnaryDateConstraint::new(var, op, date))
    }

    /// Convenience: build a binary constraint.
    pub fn binary(left: usize, op: CompOp, right: usize) -> Result<Self, CspError> {
        BinaryDateConstraint::new(left, op, right).map(DateConstraint::Binary)
    }

    /// Number of variables the constraint mentions: 1 or 2.
    pub fn arity(&self) -> usize {
        match self {
            DateConstraint::Unary(_) => 1,
            DateConstraint::Binary(_) => 2,
        }
    }

    /// The left-operand variable index.
    pub fn left(&self) -> usize {
        match self {
            DateConstraint::Unary(u) => u.var(),
            DateConstraint::Binary(b) => b.left(),
        }
    }

    /// Whether every variable index is below `n`.
    pub fn mentions_only(&self, n: usize) -> bool {
        match self {
            DateConstraint::Unary(u) => u.var() < n,
            DateConstraint::Binary(b) => b.left() < n && b.right() < n,
        }
    }
}

impl From<UnaryDateConstraint> for DateConstraint {
    fn from(c: UnaryDateConstraint) -> Self {
        DateConstraint::Unary(c)
    }
}

impl From<BinaryDateConstraint> for DateConstraint {
    fn from(c: BinaryDateConstraint) -> Self {
        DateConstraint::Binary(c)
    }
}

impl fmt::Display for DateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateConstraint::Unary(u) => u.fmt(f),
            DateConstraint::Binary(b) => b.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_holds_all_operators() {
        let a = date(2019, 1, 1);
        let b = date(2019, 1, 2);

        assert!(CompOp::Eq.holds(a, a));
        assert!(!CompOp::Eq.holds(a, b));
        assert!(CompOp::Ne.holds(a, b));
        assert!(!CompOp::Ne.holds(b, b));
        assert!(CompOp::Lt.holds(a, b));
        assert!(!CompOp::Lt.holds(a, a));
        assert!(CompOp::Le.holds(a, a));
        assert!(!CompOp::Le.holds(b, a));
        assert!(CompOp::Gt.holds(b, a));
        assert!(!CompOp::Gt.holds(b, b));
        assert!(CompOp::Ge.holds(b, b));
        assert!(!CompOp::Ge.holds(a, b));
    }

    #[test]
    fn test_inverse_swaps_sides() {
        let a = date(2019, 3, 14);
        let b = date(2019, 11, 9);
        for op in CompOp::ALL {
            for (l, r) in [(a, b), (b, a), (a, a)] {
                assert_eq!(
                    op.holds(l, r),
                    op.inverse().holds(r, l),
                    "inverse law broken for {op} on {l}, {r}"
                );
            }
        }
    }

    #[test]
    fn test_inverse_is_involution() {
        for op in CompOp::ALL {
            assert_eq!(op.inverse().inverse(), op);
        }
    }

    #[test]
    fn test_op_round_trips_through_symbol() {
        for op in CompOp::ALL {
            assert_eq!(op.symbol().parse::<CompOp>(), Ok(op));
        }
    }

    #[test]
    fn test_invalid_operator_symbol() {
        assert_eq!(
            "=<".parse::<CompOp>(),
            Err(CspError::InvalidOperator("=<".into()))
        );
        assert!("".parse::<CompOp>().is_err());
        assert!("===".parse::<CompOp>().is_err());
    }

    #[test]
    fn test_unary_from_parts() {
        let c = UnaryDateConstraint::from_parts(3, "<=", date(2019, 11, 9)).unwrap();
        assert_eq!(c.var(), 3);
        assert_eq!(c.op(), CompOp::Le);
        assert_eq!(c.to_string(), "3 <= 2019-11-09");
    }

    #[test]
    fn test_unary_rejects_negative_index() {
        let err = UnaryDateConstraint::from_parts(-1, "==", date(2019, 1, 1)).unwrap_err();
        assert_eq!(err, CspError::InvalidVariableIndex(-1));
    }

    #[test]
    fn test_binary_rejects_self_reference() {
        assert_eq!(
            BinaryDateConstraint::new(2, CompOp::Ne, 2).unwrap_err(),
            CspError::SelfReference(2)
        );
        assert_eq!(
            BinaryDateConstraint::from_parts(0, "<", 0).unwrap_err(),
            CspError::SelfReference(0)
        );
    }

    #[test]
    fn test_binary_rejects_negative_index() {
        assert_eq!(
            BinaryDateConstraint::from_parts(0, "<", -4).unwrap_err(),
            CspError::InvalidVariableIndex(-4)
        );
    }

    #[test]
    fn test_binary_reversed() {
        let c = BinaryDateConstraint::new(0, CompOp::Lt, 1).unwrap();
        let r = c.reversed();
        assert_eq!(r.left(), 1);
        assert_eq!(r.op(), CompOp::Gt);
        assert_eq!(r.right(), 0);
    }

    #[test]
    fn test_arity_and_display() {
        let u = DateConstraint::unary(0, CompOp::Eq, date(2019, 1, 3));
        let b = DateConstraint::binary(0, CompOp::Ne, 1).unwrap();
        assert_eq!(u.arity(), 1);
        assert_eq!(b.arity(), 2);
        assert_eq!(u.to_string(), "0 == 2019-01-03");
        assert_eq!(b.to_string(), "0 != 1");
    }

    #[test]
    fn test_mentions_only() {
        let b = DateConstraint::binary(0, CompOp::Lt, 2).unwrap();
        assert!(b.mentions_only(3));
        assert!(!b.mentions_only(2));
        let u = DateConstraint::unary(5, CompOp::Eq, date(2019, 1, 1));
        assert!(!u.mentions_only(5));
        assert!(u.mentions_only(6));
    }
}
