//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with precedence, associativity, and fixity.
//! The parser's precedence ladder follows the `precedence` column: higher binds tighter.
//!
//! ## Notes
//! - Lookup via [`from_str`] is exact (operators have no case).
//! - The right-shift family (`>>`, `>>>`, `>>=`, `>>>=`) is never produced by the lexer. Those
//!   entries have [`OperatorInfo::composed`] set: the parser assembles them from adjacent `>` /
//!   `>=` tokens so that nested generics like `List<List<Id>>` need no lexer context.
//!
//! ## Examples
//! ```rust
//! use apex_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("<>"), Some(OperatorId::LtGt));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix, prefix or postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Postfix,
    /// Both prefix and postfix (`++`, `--`).
    Affix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    UShrEq,

    // Logical / bitwise
    OrOr,
    AndAnd,
    Pipe,
    Caret,
    Amp,

    // Equality
    EqEq,
    NotEq,
    LtGt,
    EqEqEq,
    NotEqEq,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Shift
    Shl,
    Shr,
    UShr,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Unary
    Bang,
    Tilde,
    PlusPlus,
    MinusMinus,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub composed: bool,
}

use Associativity::{Left, Right};
use Fixity::{Affix, Infix, Prefix};

/// Precedence of the assignment family.
pub const ASSIGNMENT_PRECEDENCE: u8 = 10;
/// Precedence of `? :` (handled with punctuation tokens, listed here for the ladder).
pub const TERNARY_PRECEDENCE: u8 = 20;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Assignment
    op(OperatorId::Eq, "=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::PlusEq, "+=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::MinusEq, "-=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::StarEq, "*=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::SlashEq, "/=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::AmpEq, "&=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::PipeEq, "|=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::CaretEq, "^=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    op(OperatorId::ShlEq, "<<=", ASSIGNMENT_PRECEDENCE, Right, Infix),
    composed(OperatorId::ShrEq, ">>=", ASSIGNMENT_PRECEDENCE, Right),
    composed(OperatorId::UShrEq, ">>>=", ASSIGNMENT_PRECEDENCE, Right),
    // Logical / bitwise
    op(OperatorId::OrOr, "||", 30, Left, Infix),
    op(OperatorId::AndAnd, "&&", 40, Left, Infix),
    op(OperatorId::Pipe, "|", 50, Left, Infix),
    op(OperatorId::Caret, "^", 60, Left, Infix),
    op(OperatorId::Amp, "&", 70, Left, Infix),
    // Equality
    op(OperatorId::EqEq, "==", 80, Left, Infix),
    op(OperatorId::NotEq, "!=", 80, Left, Infix),
    op(OperatorId::LtGt, "<>", 80, Left, Infix),
    op(OperatorId::EqEqEq, "===", 80, Left, Infix),
    op(OperatorId::NotEqEq, "!==", 80, Left, Infix),
    // Comparison (`instanceof` shares this level)
    op(OperatorId::Lt, "<", 90, Left, Infix),
    op(OperatorId::LtEq, "<=", 90, Left, Infix),
    op(OperatorId::Gt, ">", 90, Left, Infix),
    op(OperatorId::GtEq, ">=", 90, Left, Infix),
    // Shift
    op(OperatorId::Shl, "<<", 100, Left, Infix),
    composed(OperatorId::Shr, ">>", 100, Left),
    composed(OperatorId::UShr, ">>>", 100, Left),
    // Arithmetic
    op(OperatorId::Plus, "+", 110, Left, Infix),
    op(OperatorId::Minus, "-", 110, Left, Infix),
    op(OperatorId::Star, "*", 120, Left, Infix),
    op(OperatorId::Slash, "/", 120, Left, Infix),
    // Unary
    op(OperatorId::Bang, "!", 130, Right, Prefix),
    op(OperatorId::Tilde, "~", 130, Right, Prefix),
    op(OperatorId::PlusPlus, "++", 140, Left, Affix),
    op(OperatorId::MinusMinus, "--", 140, Left, Affix),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Whether `id` belongs to the assignment family.
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).precedence == ASSIGNMENT_PRECEDENCE
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        composed: false,
    }
}

const fn composed(id: OperatorId, spelling: &'static str, precedence: u8, associativity: Associativity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity: Infix,
        composed: true,
    }
}
