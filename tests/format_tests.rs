//! Integration tests for the source printer
//!
//! Review snapshot changes: `cargo insta review`

mod common;

use apexscan::format::{check_formatted, format_source};
use common::check_token_round_trip;

#[test]
fn test_formatted_class() {
    let source = r#"
@IsTest
PUBLIC WITH SHARING class Greeter extends Base implements Comparable {
    private static Integer count=0, limit_value;
    public String name { GET; private set{ name=value; } }
    static { count = 1; }
    ;
    public Greeter(String name) { this.name = name; }
    @Future(callout=true) public static void ping(List<Id> ids) {
        for (Id i : ids) if (i == null) continue; else if (count > 2) break; else count += 1;
        try { insert new Account(Name='x'); } catch (DmlException e) { throw e; } finally { count--; }
        System.runAs(u) { Account a = [SELECT Id FROM Account WHERE Id IN :ids LIMIT 1]; }
    }
    public enum Mood { HAPPY, SAD, }
}
"#;
    insta::assert_snapshot!(format_source(source).expect("format failed"), @r"
@IsTest
public with sharing class Greeter extends Base implements Comparable {
    private static Integer count = 0, limit_value;

    public String name {
        get;
        private set {
            name = value;
        }
    }

    static {
        count = 1;
    }

    ;

    public Greeter(String name) {
        this.name = name;
    }

    @Future(callout = true)
    public static void ping(List<Id> ids) {
        for (Id i : ids)
            if (i == null)
                continue;
            else if (count > 2)
                break;
            else
                count += 1;
        try {
            insert new Account(Name = 'x');
        } catch (DmlException e) {
            throw e;
        } finally {
            count--;
        }
        System.runAs(u) {
            Account a = [SELECT Id FROM Account WHERE Id IN :ids LIMIT 1];
        }
    }

    public enum Mood { HAPPY, SAD, }
}
");
}

#[test]
fn test_formatted_trigger() {
    let source = "trigger AccountTrigger on Account (before insert, AFTER UPDATE) { for (Account a : Trigger.New) { a.Name = a.Name.trim(); } }";
    insta::assert_snapshot!(format_source(source).expect("format failed"), @r"
trigger AccountTrigger on Account (before insert, after update) {
    for (Account a : Trigger.New) {
        a.Name = a.Name.trim();
    }
}
");
}

#[test]
fn test_formatted_output_is_stable() {
    let source = "global interface Shape extends Comparable { Decimal area(); void scale(Decimal f); }";
    let once = format_source(source).expect("format failed");
    assert!(check_formatted(&once).expect("format failed"));
}

#[test]
fn test_token_round_trip_cases() {
    let cases = [
        "class A { Object o = Trigger.New[0]; Object p = Trigger.old; }",
        "class A { void f() { Database.Insert(rows); Schema.SObjectType.Account.getDescribe(); } }",
        "@SuppressWarnings(a='x' b=1, c={1, -2.5},) @Future() class A { ; }",
        "enum E { A, B, };",
        ";;",
        "",
        "class A { Integer x = - -y + + ++z - --w; Integer s = a >> 1 >>> 2; void f() { n >>= 1; m >>>= 2; } }",
        "class A { String s = 'a\\'b\\\\c\\n\\t\\u0041'; Decimal d = 1.50D; Long l = 9L; }",
        "class A { Object o = new Map<String, List<Integer>>{'a' => new List<Integer>{1}}; Integer[] a = new Integer[3]; }",
        "class A { void f() { if (a) if (b) x(); else y(); while (c) do { c--; } while (c > 0); } }",
        "class A { void f() { List<Account> rows = [find 'Acme*' IN ALL FIELDS RETURNING Account]; } }",
    ];
    for source in cases {
        if let Err(problem) = check_token_round_trip(source) {
            panic!("{source}: {problem}");
        }
    }
}

#[test]
fn test_long_chains_print_without_overflow() {
    let sum = format!("class A {{ Integer n = 1{}; }}", " + 1".repeat(59_999));
    let formatted = format_source(&sum).expect("format failed");
    assert_eq!(formatted.matches(" + 1").count(), 59_999);

    let calls = format!("class A {{ Object x = a{}; }}", ".b().c[0]".repeat(20_000));
    let formatted = format_source(&calls).expect("format failed");
    assert!(formatted.contains(&".b().c[0]".repeat(20_000)));

    let branches: String = (0..5_000).map(|i| format!("else if (x == {i}) y = {i}; ")).collect();
    let source = format!("class A {{ void f() {{ if (x < 0) y = 0; {branches}}} }}");
    let formatted = format_source(&source).expect("format failed");
    assert_eq!(formatted.matches("else if").count(), 5_000);
}
