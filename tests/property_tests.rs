//! Property-based tests for the parser and traversal
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

mod common;

use apexscan::ast::*;
use apexscan::parser::parse_source;
use common::{check_leaf_round_trip, check_token_round_trip, trace, visitor_count};
use proptest::prelude::*;

// =============================================================================
// Precedence
// =============================================================================

/// Operand and operator sequences for `n0 op n1 op n2 ...`.
fn arithmetic() -> impl Strategy<Value = (Vec<i64>, Vec<char>)> {
    (1usize..10).prop_flat_map(|n| {
        (
            prop::collection::vec(0i64..100, n + 1),
            prop::collection::vec(prop::sample::select(vec!['+', '-', '*']), n),
        )
    })
}

fn render(nums: &[i64], ops: &[char]) -> String {
    let mut out = nums[0].to_string();
    for (op, n) in ops.iter().zip(&nums[1..]) {
        out.push_str(&format!(" {op} {n}"));
    }
    out
}

/// Multiplication first, then `+`/`-` left to right.
fn reference_value(nums: &[i64], ops: &[char]) -> i64 {
    let mut terms = vec![nums[0]];
    let mut signs = Vec::new();
    for (op, &n) in ops.iter().zip(&nums[1..]) {
        if *op == '*' {
            let last = terms.last_mut().unwrap();
            *last = last.wrapping_mul(n);
        } else {
            signs.push(*op);
            terms.push(n);
        }
    }
    let mut acc = terms[0];
    for (op, &t) in signs.iter().zip(&terms[1..]) {
        acc = if *op == '+' { acc.wrapping_add(t) } else { acc.wrapping_sub(t) };
    }
    acc
}

fn eval(expr: &Expr) -> i64 {
    match expr {
        Expr::Literal(Literal::Int(v)) => *v,
        Expr::Binary(b) => {
            let (l, r) = (eval(&b.left.node), eval(&b.right.node));
            match b.op {
                BinaryOp::Add => l.wrapping_add(r),
                BinaryOp::Sub => l.wrapping_sub(r),
                BinaryOp::Mul => l.wrapping_mul(r),
                other => panic!("unexpected operator {other:?}"),
            }
        }
        other => panic!("unexpected expression {other:?}"),
    }
}

fn field_init(source: &str) -> Expr {
    let unit = parse_source(source).expect("parse failed");
    let TypeDeclaration::Class(class) = unit.declaration.node else {
        panic!("expected class");
    };
    let ClassMember::Field(field) = &class.members[0].node else {
        panic!("expected field");
    };
    field.declarators[0].node.init.clone().expect("initializer").node
}

// =============================================================================
// Generated classes
// =============================================================================

const MEMBERS: &[&str] = &[
    "private Integer count = 0;",
    "public String name { get; set; }",
    "@TestVisible static final Long LIMIT_VALUE = 10L;",
    "public Sample(Integer n) { this.count = n; }",
    "global enum Level { LOW, HIGH }",
];

const STATEMENTS: &[&str] = &[
    "x = a + b * c;",
    "if (a < b) { update x; } else { x++; }",
    "for (Account acc : accs) { acc.Name = 'n' + i; }",
    "for (Integer i = 0; i < 10; i++) { total += i; }",
    "Map<Id, List<String>> m = new Map<Id, List<String>>();",
    "Integer y = (Integer) o;",
    "List<Account> rows = [SELECT Id FROM Account WHERE Name = :n];",
    "try { insert rows; } catch (Exception e) { throw e; } finally { x = null; }",
    "System.runAs(u) { delete rows; }",
    "while (x > 0) { x = x >> 1; }",
    "do { x--; } while (x != 0);",
    "String s = flag ? 'yes' : 'no';",
    "merge a b;",
    "upsert rows Account.Ext__c;",
    "Boolean ok = o instanceof Account && !done;",
    "Trigger.new[0].addError('bad');",
];

fn generated_class() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(MEMBERS), 0..4),
        prop::collection::vec(prop::sample::select(STATEMENTS), 0..10),
    )
        .prop_map(|(members, statements)| {
            format!(
                "public class Sample {{ {} void run() {{ {} }} }}",
                members.join(" "),
                statements.join(" ")
            )
        })
}

/// Forms whose separators, spelling or layout the tree has to remember to print them back.
const PRINTED_MEMBERS: &[&str] = &[
    ";",
    "@Future(callout=true) public static void go() { }",
    "@Deprecated() PUBLIC Integer LEGACY;",
    "@SuppressWarnings(a='x' b=1, c={1, 2},) Integer tagged;",
    "public enum Shade { DARK, LIGHT, }",
    "public inherited SHARING class Inner { Integer z; ; }",
    "String label { GET { return 'x'; } private Set; }",
];

const PRINTED_STATEMENTS: &[&str] = &[
    "if (a) x = 1; else if (b) x = 2; else x = -(-y);",
    "Object o = Trigger.New[0];",
    "x = - -y + ~z >>> 2;",
    "x = + ++y - --z;",
    "n >>= 1;",
    "List<Integer> nums = new List<Integer>{1, 2};",
    "Map<String, Integer> m = new Map<String, Integer>{'a' => 1};",
    "Integer[] arr = new Integer[]{1, 2};",
    "Decimal d = 2.50d + 7L;",
    "String s = 'tab\\there \\'q\\'';",
    "while (x > 0) x--;",
    "for (;;) { break; }",
    "Database.Insert(rows);",
    "SYSTEM.RUNAS(u) { }",
    "List<List<Id>> nested = null;",
];

fn printable_class() -> impl Strategy<Value = String> {
    let members: Vec<&str> = MEMBERS.iter().chain(PRINTED_MEMBERS).copied().collect();
    let statements: Vec<&str> = STATEMENTS.iter().chain(PRINTED_STATEMENTS).copied().collect();
    (
        prop::collection::vec(prop::sample::select(members), 0..5),
        prop::collection::vec(prop::sample::select(statements), 0..10),
    )
        .prop_map(|(members, statements)| {
            format!(
                "@IsTest PUBLIC class Sample {{ {} void run() {{ {} }} }};",
                members.join(" "),
                statements.join(" ")
            )
        })
}

proptest! {
    /// Property: the tree of a flat arithmetic chain evaluates like the usual precedence rules
    #[test]
    fn precedence_matches_reference((nums, ops) in arithmetic()) {
        let source = format!("class T {{ Object v = {}; }}", render(&nums, &ops));
        prop_assert_eq!(eval(&field_init(&source)), reference_value(&nums, &ops));
    }

    /// Property: every node is entered and exited exactly once, properly nested
    #[test]
    fn walk_is_balanced(source in generated_class()) {
        let unit = parse_source(&source).expect("generated class should parse");
        prop_assert!(trace(&unit).is_balanced());
    }

    /// Property: full visitor recursion reaches the same nodes as the listener walk
    #[test]
    fn visitor_and_listener_agree(source in generated_class()) {
        let unit = parse_source(&source).expect("generated class should parse");
        prop_assert_eq!(visitor_count(&unit), trace(&unit).entered);
    }

    /// Property: leaves line up with identifier and literal tokens
    #[test]
    fn leaves_round_trip(source in generated_class()) {
        if let Err(problem) = check_leaf_round_trip(&source) {
            return Err(TestCaseError::fail(problem));
        }
    }

    /// Property: printing the tree reproduces every token of the source
    #[test]
    fn tokens_round_trip_through_printer(source in printable_class()) {
        if let Err(problem) = check_token_round_trip(&source) {
            return Err(TestCaseError::fail(problem));
        }
    }

    /// Property: the parser returns instead of panicking on arbitrary input
    #[test]
    fn parse_never_panics(source in "\\PC{0,200}") {
        let _ = parse_source(&source);
    }
}
