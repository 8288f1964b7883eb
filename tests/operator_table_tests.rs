//! The syntax tree's operator enums against the `apex_core` operator registry.

use apex_core::lang::operators::{self, Associativity, Fixity};
use apexscan::ast::*;
use apexscan::parser::parse_source;

const BINARY_OPS: [BinaryOp; 21] = [
    BinaryOp::Or,
    BinaryOp::And,
    BinaryOp::BitOr,
    BinaryOp::BitXor,
    BinaryOp::BitAnd,
    BinaryOp::Eq,
    BinaryOp::NotEq,
    BinaryOp::LtGt,
    BinaryOp::ExactEq,
    BinaryOp::ExactNotEq,
    BinaryOp::Lt,
    BinaryOp::LtEq,
    BinaryOp::Gt,
    BinaryOp::GtEq,
    BinaryOp::Shl,
    BinaryOp::Shr,
    BinaryOp::UShr,
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
];

const ASSIGN_OPS: [AssignOp; 11] = [
    AssignOp::Assign,
    AssignOp::AddAssign,
    AssignOp::SubAssign,
    AssignOp::MulAssign,
    AssignOp::DivAssign,
    AssignOp::AndAssign,
    AssignOp::OrAssign,
    AssignOp::XorAssign,
    AssignOp::ShlAssign,
    AssignOp::ShrAssign,
    AssignOp::UShrAssign,
];

/// One representative per level, loosest first; `<` and `>>` are left out to keep the
/// sources free of generic-looking `<` / `>` pairs.
const LADDER: [BinaryOp; 10] = [
    BinaryOp::Or,
    BinaryOp::And,
    BinaryOp::BitOr,
    BinaryOp::BitXor,
    BinaryOp::BitAnd,
    BinaryOp::Eq,
    BinaryOp::LtEq,
    BinaryOp::Shl,
    BinaryOp::Add,
    BinaryOp::Mul,
];

fn init(expr: &str) -> Expr {
    let unit = parse_source(&format!("class T {{ Object v = {expr}; }}")).unwrap();
    let TypeDeclaration::Class(class) = unit.declaration.node else {
        panic!("expected class");
    };
    match &class.members[0].node {
        ClassMember::Field(field) => field.declarators[0].node.init.clone().unwrap().node,
        other => panic!("expected field, got {other:?}"),
    }
}

fn as_binary(expr: &Expr) -> &BinaryExpr {
    match expr {
        Expr::Binary(b) => b,
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_binary_levels_follow_registry_precedence() {
    for a in BINARY_OPS {
        for b in BINARY_OPS {
            let pa = operators::info_for(a.operator()).precedence;
            let pb = operators::info_for(b.operator()).precedence;
            assert_eq!(
                a.level().cmp(&b.level()),
                pa.cmp(&pb),
                "{} vs {}",
                a.as_str(),
                b.as_str()
            );
        }
    }
}

#[test]
fn test_binary_operators_are_left_associative_infix() {
    for op in BINARY_OPS {
        let info = operators::info_for(op.operator());
        assert_eq!(info.associativity, Associativity::Left, "{}", info.spelling);
        assert_eq!(info.fixity, Fixity::Infix, "{}", info.spelling);
        assert!(!operators::is_assignment(op.operator()), "{}", info.spelling);
        assert!(operators::info_for(op.operator()).precedence > operators::TERNARY_PRECEDENCE);
    }
}

#[test]
fn test_assignment_operators_match_registry() {
    for op in ASSIGN_OPS {
        assert!(operators::is_assignment(op.operator()), "{}", op.as_str());
        assert_eq!(operators::info_for(op.operator()).associativity, Associativity::Right);
    }
}

#[test]
fn test_prefix_and_affix_operators_match_registry() {
    for op in [UnaryOp::Not, UnaryOp::BitNot] {
        assert_eq!(operators::info_for(op.operator()).fixity, Fixity::Prefix);
    }
    for op in [IncrementOp::Increment, IncrementOp::Decrement] {
        let info = operators::info_for(op.operator());
        assert_eq!(info.fixity, Fixity::Affix);
        assert!(info.precedence > operators::info_for(UnaryOp::Not.operator()).precedence);
    }
}

#[test]
fn test_parser_ladder_matches_registry() {
    for (i, loose) in LADDER.iter().enumerate() {
        for tight in &LADDER[i + 1..] {
            let source = format!("a {} b {} c", loose.as_str(), tight.as_str());
            let outer = init(&source);
            let outer = as_binary(&outer);
            assert_eq!(outer.op, *loose, "{source}");
            assert_eq!(as_binary(&outer.right.node).op, *tight, "{source}");

            let source = format!("a {} b {} c", tight.as_str(), loose.as_str());
            let outer = init(&source);
            let outer = as_binary(&outer);
            assert_eq!(outer.op, *loose, "{source}");
            assert_eq!(as_binary(&outer.left.node).op, *tight, "{source}");
        }
    }
}

#[test]
fn test_parser_folds_each_level_left() {
    for op in LADDER {
        let source = format!("a {0} b {0} c", op.as_str());
        let outer = init(&source);
        let outer = as_binary(&outer);
        assert_eq!(outer.op, op, "{source}");
        assert_eq!(as_binary(&outer.left.node).op, op, "{source}");
        assert!(matches!(outer.right.node, Expr::Name(_)), "{source}");
    }
}
