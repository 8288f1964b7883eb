#[cfg(test)]
/// Parser unit tests.
///
/// These cover specific syntactic forms, the ambiguity decisions (cast vs paren, generics vs
/// comparison, declaration vs expression) and the shape of the first reported error.
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<CompilationUnit, ParseError> {
        parse_source(source)
    }

    fn class(source: &str) -> ClassDecl {
        match parse_str(source).unwrap().declaration.node {
            TypeDeclaration::Class(c) => c,
            other => panic!("Expected class, got {other:?}"),
        }
    }

    /// Parse `body` as the statements of a method and return them.
    fn stmts(body: &str) -> Vec<Spanned<Statement>> {
        let source = format!("class T {{ void m() {{ {body} }} }}");
        let decl = class(&source);
        match decl.members.into_iter().next().map(|m| m.node) {
            Some(ClassMember::Method(m)) => m.body.expect("method body").node.statements,
            other => panic!("Expected method, got {other:?}"),
        }
    }

    /// Parse a single expression statement.
    fn expr(source: &str) -> Expr {
        let mut statements = stmts(&format!("{source};"));
        assert_eq!(statements.len(), 1);
        match statements.remove(0).node {
            Statement::Expr(e) => e.node,
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    fn syntax_error(err: ParseError) -> SyntaxError {
        match err {
            ParseError::Syntax(e) => e,
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_empty_file() {
        let unit = parse_str("").unwrap();
        assert_eq!(unit.declaration.node, TypeDeclaration::Empty);
        let unit = parse_str(" ; ").unwrap();
        assert_eq!(unit.declaration.node, TypeDeclaration::Empty);
    }

    #[test]
    fn test_parse_class_header() {
        let c = class("public with sharing virtual class Foo extends Base implements Comparable, Schedulable { }");
        assert_eq!(c.name.node, "Foo");
        let mods: Vec<ModifierId> = c.modifiers.iter().map(|m| m.node).collect();
        assert_eq!(mods, vec![ModifierId::Public, ModifierId::WithSharing, ModifierId::Virtual]);
        assert_eq!(c.extends.as_ref().map(|t| t.node.to_string()), Some("Base".to_string()));
        assert_eq!(c.implements.len(), 2);
    }

    #[test]
    fn test_sharing_modifier_spans_both_words() {
        let source = "public inherited sharing class Foo { }";
        let c = class(source);
        let sharing = &c.modifiers[1];
        assert_eq!(sharing.node, ModifierId::InheritedSharing);
        assert_eq!(&source[sharing.span.start..sharing.span.end], "inherited sharing");
    }

    #[test]
    fn test_class_members() {
        let c = class(
            r#"
public class Account_Svc {
    private static final Integer MAX = 10, MIN;
    public String name { get; private set; }
    static { MIN = 1; }
    public Account_Svc(String n) { this(n, 1); }
    public Account_Svc(String n, Integer i) { super(); }
    public abstract void run();
    public List<Id> ids() { return null; }
    public enum Color { RED, GREEN, }
    interface Shape { Decimal area(); }
}
"#,
        );
        let kinds: Vec<&str> = c
            .members
            .iter()
            .map(|m| match &m.node {
                ClassMember::Field(_) => "field",
                ClassMember::Property(_) => "property",
                ClassMember::Initializer(_) => "initializer",
                ClassMember::Constructor(_) => "constructor",
                ClassMember::Method(_) => "method",
                ClassMember::Type(_) => "type",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["field", "property", "initializer", "constructor", "constructor", "method", "method", "type", "type"]
        );

        match &c.members[0].node {
            ClassMember::Field(f) => assert_eq!(f.declarators.len(), 2),
            _ => unreachable!(),
        }
        match &c.members[1].node {
            ClassMember::Property(p) => {
                assert!(p.getter().is_some_and(|g| g.node.body.is_none()));
                let setter = p.setter().expect("setter");
                assert_eq!(setter.node.modifiers[0].node, ModifierId::Private);
            }
            _ => unreachable!(),
        }
        match &c.members[5].node {
            ClassMember::Method(m) => {
                assert!(m.return_type.is_none());
                assert!(m.body.is_none());
            }
            _ => unreachable!(),
        }
        match &c.members[7].node {
            ClassMember::Type(TypeDeclaration::Enum(e)) => assert_eq!(e.constants.len(), 2),
            other => panic!("Expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_property_with_bodies() {
        let c = class("class P { Integer x { get { return y; } set { y = value; } } }");
        match &c.members[0].node {
            ClassMember::Property(p) => {
                assert_eq!(p.accessors.len(), 2);
                assert!(p.accessors.iter().all(|a| a.node.body.is_some()));
            }
            other => panic!("Expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_property_rejects_duplicate_accessor() {
        let err = parse_str("class P { Integer x { get; get; } }").unwrap_err();
        syntax_error(err);
    }

    #[test]
    fn test_interface_and_enum() {
        let unit = parse_str("global interface Job extends Base { void run(Integer n); String name(); }").unwrap();
        match unit.declaration.node {
            TypeDeclaration::Interface(i) => {
                assert_eq!(i.extends.len(), 1);
                assert_eq!(i.members.len(), 2);
            }
            other => panic!("Expected interface, got {other:?}"),
        }

        let unit = parse_str("public enum Season { WINTER, SPRING }").unwrap();
        match unit.declaration.node {
            TypeDeclaration::Enum(e) => {
                let names: Vec<&str> = e.constants.iter().map(|c| c.node.as_str()).collect();
                assert_eq!(names, vec!["WINTER", "SPRING"]);
            }
            other => panic!("Expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_modifier() {
        let err = parse_str("public public class A { }").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateModifier { ref modifier, .. } if modifier == "public"));
    }

    #[test]
    fn test_separators_kept_in_tree() {
        let unit = parse_str("enum E { A, B, };;").unwrap();
        assert_eq!(unit.trailing_semicolons, 2);
        match unit.declaration.node {
            TypeDeclaration::Enum(e) => assert!(e.trailing_comma),
            other => panic!("Expected enum, got {other:?}"),
        }

        let c = class("class T { ; Integer n; ; }");
        assert_eq!(c.members.len(), 3);
        assert_eq!(c.members[0].node, ClassMember::Type(TypeDeclaration::Empty));
        assert_eq!(c.members[0].span, Span::new(10, 11));
        assert!(matches!(c.members[2].node, ClassMember::Type(TypeDeclaration::Empty)));
    }

    #[test]
    fn test_missing_declaration_keyword() {
        let err = syntax_error(parse_str("public Foo { }").unwrap_err());
        assert_eq!(err.expected, vec!["'class'", "'interface'", "'enum'", "'trigger'"]);
        assert_eq!(err.found, "identifier 'Foo'");
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = syntax_error(parse_str("class A { } class B { }").unwrap_err());
        assert_eq!(err.expected, vec!["end of file"]);
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    #[test]
    fn test_annotations() {
        let c = class(
            "@IsTest(SeeAllData=true isParallel=false) @Deprecated private class T { @Future(callout = true) static void f() { } }",
        );
        assert_eq!(c.annotations.len(), 2);
        let elements = &c.annotations[0].node.elements;
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].node.key.as_ref().map(|k| k.node.as_str()), Some("SeeAllData"));
        assert_eq!(elements[1].node.value.node, AnnotationValue::Literal(Literal::Bool(false)));
        assert!(c.annotations[1].node.elements.is_empty());
    }

    #[test]
    fn test_annotation_positional_and_array_values() {
        let c = class("@JsonAccess(serializable='always') @Tags({'a', 'b', -1}) class T { }");
        let tags = &c.annotations[1].node.elements[0].node;
        assert!(tags.key.is_none());
        match &tags.value.node {
            AnnotationValue::Array(values) => {
                assert_eq!(values.len(), 3);
                assert_eq!(values[2].node, AnnotationValue::Literal(Literal::Int(-1)));
            }
            other => panic!("Expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_annotation_separators_are_recorded() {
        let c = class("@Future() @Tag(a=1, b=2 c=3,) @Deprecated class T { }");
        assert!(c.annotations[0].node.parenthesized);
        assert!(c.annotations[0].node.elements.is_empty());
        let commas: Vec<bool> = c.annotations[1].node.elements.iter().map(|e| e.node.comma).collect();
        assert_eq!(commas, vec![true, false, true]);
        assert!(!c.annotations[2].node.parenthesized);
    }

    #[test]
    fn test_malformed_annotation_value() {
        let err = parse_str("@Future(callout = a.b) class T { }").unwrap_err();
        assert!(matches!(err, ParseError::MalformedAnnotationValue { .. }), "got {err:?}");

        let err = parse_str("@Future(callout = 1 + 2) class T { }").unwrap_err();
        assert!(matches!(err, ParseError::MalformedAnnotationValue { .. }), "got {err:?}");
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    #[test]
    fn test_trigger_events() {
        let unit = parse_str("trigger T on Account (before insert, after update) { }").unwrap();
        match unit.declaration.node {
            TypeDeclaration::Trigger(t) => {
                assert_eq!(t.name.node, "T");
                assert_eq!(t.object.node, "Account");
                let events: Vec<TriggerEventId> = t.events.iter().map(|e| e.node).collect();
                assert_eq!(events, vec![TriggerEventId::BeforeInsert, TriggerEventId::AfterUpdate]);
            }
            other => panic!("Expected trigger, got {other:?}"),
        }
    }

    #[test]
    fn test_trigger_events_case_insensitive() {
        let unit = parse_str("TRIGGER T ON Contact (BEFORE DELETE, After Undelete) { }").unwrap();
        match unit.declaration.node {
            TypeDeclaration::Trigger(t) => {
                let events: Vec<TriggerEventId> = t.events.iter().map(|e| e.node).collect();
                assert_eq!(events, vec![TriggerEventId::BeforeDelete, TriggerEventId::AfterUndelete]);
            }
            other => panic!("Expected trigger, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_trigger_event() {
        let source = "trigger T on Account (before undelete) { }";
        let err = parse_str(source).unwrap_err();
        match err {
            ParseError::UnknownTriggerEvent { span, found } => {
                assert_eq!(found, "before undelete");
                assert_eq!(&source[span.start..span.end], "before undelete");
            }
            other => panic!("Expected UnknownTriggerEvent, got {other:?}"),
        }

        let err = parse_str("trigger T on Account (during insert) { }").unwrap_err();
        assert!(matches!(err, ParseError::UnknownTriggerEvent { ref found, .. } if found == "during"));
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_local_declaration_vs_expression() {
        let s = stmts("List<Account> accs = new List<Account>(); accs.add(a); Integer i; i = 2; a.b c;");
        assert!(matches!(s[0].node, Statement::LocalVariable(_)));
        assert!(matches!(s[1].node, Statement::Expr(_)));
        assert!(matches!(s[2].node, Statement::LocalVariable(_)));
        assert!(matches!(s[3].node, Statement::Expr(_)));
        match &s[4].node {
            Statement::LocalVariable(d) => assert_eq!(d.ty.node.to_string(), "a.b"),
            other => panic!("Expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_for_loops() {
        let s = stmts("for (Account a : accounts) { } for (Integer i = 0, j = 1; i < 10; i++, j--) { } for (;;) { }");
        assert!(matches!(s[0].node, Statement::ForEach(_)));
        match &s[1].node {
            Statement::For(f) => {
                assert!(matches!(f.init, Some(ForInit::Declaration(_))));
                assert_eq!(f.update.len(), 2);
            }
            other => panic!("Expected for, got {other:?}"),
        }
        match &s[2].node {
            Statement::For(f) => {
                assert!(f.init.is_none() && f.condition.is_none() && f.update.is_empty());
            }
            other => panic!("Expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_try_requires_handler() {
        let s = stmts("try { } catch (DmlException e) { } finally { }");
        match &s[0].node {
            Statement::Try(t) => {
                assert_eq!(t.catches.len(), 1);
                assert!(t.finally.is_some());
            }
            other => panic!("Expected try, got {other:?}"),
        }

        let err = syntax_error(parse_str("class T { void m() { try { } } }").unwrap_err());
        assert_eq!(err.expected, vec!["'catch'", "'finally'"]);
    }

    #[test]
    fn test_control_flow() {
        let s = stmts("if (a) x(); else if (b) { } else ; while (true) break; do { continue; } while (x); return; throw e;");
        assert!(matches!(s[0].node, Statement::If(_)));
        assert!(matches!(s[1].node, Statement::While(_)));
        assert!(matches!(s[2].node, Statement::DoWhile(_)));
        assert!(matches!(s[3].node, Statement::Return(None)));
        assert!(matches!(s[4].node, Statement::Throw(_)));
    }

    #[test]
    fn test_dml_statements() {
        let s = stmts("insert acc; update accs; delete [SELECT Id FROM Account]; undelete x; upsert recs Account.Ext_Id__c; upsert recs;");
        let ops: Vec<Option<DmlOp>> = s
            .iter()
            .map(|st| match &st.node {
                Statement::Dml(DmlStmt::Operation(op)) => Some(op.op),
                _ => None,
            })
            .collect();
        assert_eq!(
            ops,
            vec![Some(DmlOp::Insert), Some(DmlOp::Update), Some(DmlOp::Delete), Some(DmlOp::Undelete), None, None]
        );
        match &s[4].node {
            Statement::Dml(DmlStmt::Upsert(u)) => {
                assert_eq!(u.external_id.as_ref().map(|q| q.node.to_string()), Some("Account.Ext_Id__c".to_string()));
            }
            other => panic!("Expected upsert, got {other:?}"),
        }
        assert!(matches!(&s[5].node, Statement::Dml(DmlStmt::Upsert(u)) if u.external_id.is_none()));
    }

    #[test]
    fn test_merge_requires_two_targets() {
        let s = stmts("merge master dup;");
        match &s[0].node {
            Statement::Dml(DmlStmt::Merge(m)) => {
                assert_eq!(m.master.node, Expr::Name("master".into()));
                assert_eq!(m.duplicate.node, Expr::Name("dup".into()));
            }
            other => panic!("Expected merge, got {other:?}"),
        }

        let err = syntax_error(parse_str("class T { void m() { merge a; } }").unwrap_err());
        assert_eq!(err.expected, vec!["expression"]);
        assert_eq!(err.found, "';'");
    }

    #[test]
    fn test_run_as() {
        let s = stmts("System.runAs(u) { insert a; } system.RUNAS(u) { } System.debug(x);");
        match &s[0].node {
            Statement::RunAs(r) => {
                assert_eq!(r.context.node, Expr::Name("u".into()));
                assert_eq!(r.body.node.statements.len(), 1);
            }
            other => panic!("Expected runAs, got {other:?}"),
        }
        assert!(matches!(s[1].node, Statement::RunAs(_)));
        assert!(matches!(s[2].node, Statement::Expr(_)));
    }

    #[test]
    fn test_statement_span_includes_semicolon() {
        let source = "class T { void m() { x = 1; } }";
        let decl = class(source);
        let ClassMember::Method(m) = &decl.members[0].node else {
            panic!("Expected method");
        };
        let stmt = &m.body.as_ref().expect("body").node.statements[0];
        assert_eq!(&source[stmt.span.start..stmt.span.end], "x = 1;");
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence_additive_over_multiplicative() {
        match expr("x = a + b * c") {
            Expr::Assignment(a) => match a.value.node {
                Expr::Binary(b) => {
                    assert_eq!(b.op, BinaryOp::Add);
                    assert_eq!(b.left.node, Expr::Name("a".into()));
                    assert!(matches!(b.right.node, Expr::Binary(ref r) if r.op == BinaryOp::Mul));
                }
                other => panic!("Expected binary, got {other:?}"),
            },
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_left_associative_fold() {
        match expr("x = a - b - c") {
            Expr::Assignment(a) => match a.value.node {
                Expr::Binary(b) => {
                    assert_eq!(b.op, BinaryOp::Sub);
                    assert!(matches!(b.left.node, Expr::Binary(ref l) if l.op == BinaryOp::Sub));
                    assert_eq!(b.right.node, Expr::Name("c".into()));
                }
                other => panic!("Expected binary, got {other:?}"),
            },
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        match expr("a = b += c") {
            Expr::Assignment(a) => {
                assert_eq!(a.op, AssignOp::Assign);
                assert!(matches!(a.value.node, Expr::Assignment(ref inner) if inner.op == AssignOp::AddAssign));
            }
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_cast_vs_paren() {
        match expr("x = (Foo) bar") {
            Expr::Assignment(a) => match a.value.node {
                Expr::Cast(c) => {
                    assert_eq!(c.ty.node.to_string(), "Foo");
                    assert_eq!(c.expr.node, Expr::Name("bar".into()));
                }
                other => panic!("Expected cast, got {other:?}"),
            },
            other => panic!("Expected assignment, got {other:?}"),
        }

        match expr("x = (x + y)") {
            Expr::Assignment(a) => assert!(matches!(a.value.node, Expr::Paren(_))),
            other => panic!("Expected assignment, got {other:?}"),
        }

        match expr("x = (List<Account>) JSON.deserialize(s, t)") {
            Expr::Assignment(a) => assert!(matches!(a.value.node, Expr::Cast(_))),
            other => panic!("Expected assignment, got {other:?}"),
        }

        // A parenthesised name followed by `-` stays a subtraction.
        match expr("x = (a) - b") {
            Expr::Assignment(a) => assert!(matches!(a.value.node, Expr::Binary(ref b) if b.op == BinaryOp::Sub)),
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_vs_comparison() {
        let s = stmts("Map<Id, List<Account>> m = new Map<Id, List<Account>>(); b = x < y; c = a >> 2; d = a >>> 1; e >>= 1;");
        match &s[0].node {
            Statement::LocalVariable(d) => assert_eq!(d.ty.node.to_string(), "Map<Id, List<Account>>"),
            other => panic!("Expected declaration, got {other:?}"),
        }
        let value_op = |st: &Spanned<Statement>| match &st.node {
            Statement::Expr(Spanned {
                node: Expr::Assignment(a),
                ..
            }) => match &a.value.node {
                Expr::Binary(b) => Some(b.op),
                _ => None,
            },
            _ => None,
        };
        assert_eq!(value_op(&s[1]), Some(BinaryOp::Lt));
        assert_eq!(value_op(&s[2]), Some(BinaryOp::Shr));
        assert_eq!(value_op(&s[3]), Some(BinaryOp::UShr));
        assert!(matches!(&s[4].node, Statement::Expr(Spanned { node: Expr::Assignment(a), .. }) if a.op == AssignOp::ShrAssign));
    }

    #[test]
    fn test_spaced_greater_thans_are_comparisons() {
        let err = parse_str("class T { void m() { b = a > > 2; } }").unwrap_err();
        syntax_error(err);
    }

    #[test]
    fn test_instanceof_and_ternary() {
        match expr("r = o instanceof Account ? 'a' : n > 0 ? 'p' : 'z'") {
            Expr::Assignment(a) => match a.value.node {
                Expr::Ternary(t) => {
                    assert!(matches!(t.condition.node, Expr::InstanceOf(_)));
                    assert!(matches!(t.else_expr.node, Expr::Ternary(_)));
                }
                other => panic!("Expected ternary, got {other:?}"),
            },
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_postfix_chain() {
        match expr("Trigger.new[0].Name.toLowerCase()") {
            Expr::MethodCall(call) => {
                assert_eq!(call.name.node, "toLowerCase");
                let receiver = call.receiver.as_ref().expect("receiver");
                match &receiver.node {
                    Expr::MemberAccess(m) => {
                        assert_eq!(m.member.node, "Name");
                        assert!(matches!(m.object.node, Expr::Index(_)));
                    }
                    other => panic!("Expected member access, got {other:?}"),
                }
            }
            other => panic!("Expected method call, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_member_names_keep_spelling() {
        match expr("Trigger.New") {
            Expr::MemberAccess(m) => {
                assert_eq!(m.member.node, "New");
                assert_eq!(m.object.node, Expr::Name("Trigger".to_string()));
            }
            other => panic!("Expected member access, got {other:?}"),
        }
        match expr("Database.INSERT(rows)") {
            Expr::MethodCall(call) => assert_eq!(call.name.node, "INSERT"),
            other => panic!("Expected method call, got {other:?}"),
        }
        match expr("trigger.new") {
            Expr::MemberAccess(m) => {
                assert_eq!(m.member.node, "new");
                assert_eq!(m.object.node, Expr::Name("trigger".to_string()));
            }
            other => panic!("Expected member access, got {other:?}"),
        }
    }

    #[test]
    fn test_unary_and_increment() {
        assert!(matches!(expr("i++"), Expr::Increment(ref i) if !i.prefix));
        assert!(matches!(expr("--i"), Expr::Increment(ref i) if i.prefix && i.op == IncrementOp::Decrement));
        match expr("b = !a") {
            Expr::Assignment(a) => {
                assert!(matches!(a.value.node, Expr::Unary(ref u) if u.op == UnaryOp::Not));
            }
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_creators() {
        let creator = |source: &str| match expr(&format!("x = {source}")) {
            Expr::Assignment(a) => match a.value.node {
                Expr::New(c) => c.rest,
                other => panic!("Expected new, got {other:?}"),
            },
            other => panic!("Expected assignment, got {other:?}"),
        };

        assert!(matches!(creator("new Account(Name = 'x')"), CreatorRest::Object(ref args) if args.len() == 1));
        assert!(matches!(creator("new Integer[5]"), CreatorRest::Array { size: Some(_), elements: None }));
        assert!(matches!(
            creator("new String[]{'a', 'b'}"),
            CreatorRest::Array { size: None, elements: Some(ref e) } if e.len() == 2
        ));
        assert!(matches!(creator("new Set<String>{'a'}"), CreatorRest::Collection(ref e) if e.len() == 1));
        assert!(matches!(creator("new List<Id>{}"), CreatorRest::Collection(ref e) if e.is_empty()));
        assert!(matches!(creator("new Map<String, Integer>{}"), CreatorRest::Map(ref e) if e.is_empty()));
        assert!(matches!(
            creator("new Map<String, Integer>{'a' => 1, 'b' => 2}"),
            CreatorRest::Map(ref e) if e.len() == 2
        ));
    }

    #[test]
    fn test_query_literals() {
        match expr("accs = [SELECT Id FROM Account WHERE Name = :name]") {
            Expr::Assignment(a) => match a.value.node {
                Expr::Literal(Literal::Soql(q)) => {
                    assert_eq!(q.binds.len(), 1);
                    assert_eq!(q.binds[0].node, ":name");
                }
                other => panic!("Expected SOQL literal, got {other:?}"),
            },
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_error_reports_first_failure() {
        let source = "class T { void m() { x = ; y = ; } }";
        let err = syntax_error(parse_str(source).unwrap_err());
        assert_eq!(err.expected, vec!["expression"]);
        assert_eq!(err.span.start, source.find(';').expect("semicolon"));
    }

    #[test]
    fn test_inner_speculation_keeps_outer_active() {
        let tokens = crate::lexer::lex("List<String> x").unwrap();
        let mut parser = Parser::new(&tokens);
        let matched = parser.speculate(|p| {
            let inner = p.speculate(|q| q.type_ref().map(|_| ()));
            assert!(inner);
            assert!(p.speculating);
            p.type_ref()?;
            p.identifier()?;
            Ok(())
        });
        assert!(matched);
        assert!(!parser.speculating);
        assert_eq!(parser.cursor.position(), 0);
    }

    #[test]
    fn test_tokens_after_early_eof_are_rejected() {
        let mut tokens = crate::lexer::lex("enum E { A }").unwrap();
        let tail = crate::lexer::lex("class C { }").unwrap();
        let class_span = tail[0].span;
        tokens.extend(tail);
        let err = syntax_error(parse(&tokens).unwrap_err());
        assert_eq!(err.expected, vec!["end of token stream"]);
        assert_eq!(err.span, class_span);
    }

    #[test]
    fn test_parse_accepts_stream_without_eof() {
        let mut tokens = crate::lexer::lex("enum E { A }").unwrap();
        tokens.pop();
        let unit = parse(&tokens).unwrap();
        assert!(matches!(unit.declaration.node, TypeDeclaration::Enum(_)));
    }

    /// Run `f` on a thread with a roomy stack; the deep-nesting tests recurse heavily in debug builds.
    fn with_large_stack<T: Send>(f: impl FnOnce() -> T + Send) -> T {
        std::thread::scope(|s| {
            std::thread::Builder::new()
                .stack_size(256 << 20)
                .spawn_scoped(s, f)
                .expect("spawn parser thread")
                .join()
                .expect("parser thread panicked")
        })
    }

    #[test]
    fn test_long_else_if_chain() {
        let mut body = String::from("if (a == 0) { x = 0; }");
        for i in 1..=250 {
            body.push_str(&format!(" else if (a == {i}) {{ x = {i}; }}"));
        }
        body.push_str(" else { x = -1; }");

        let statements = stmts(&body);
        assert_eq!(statements.len(), 1);

        let mut branches = 0;
        let mut current = &statements[0];
        loop {
            let Statement::If(stmt) = &current.node else {
                assert!(matches!(current.node, Statement::Block(_)));
                break;
            };
            branches += 1;
            match &stmt.else_branch {
                Some(next) => {
                    assert!(next.span.start > current.span.start);
                    assert_eq!(next.span.end, current.span.end);
                    current = next;
                }
                None => panic!("chain should end in a plain else"),
            }
        }
        assert_eq!(branches, 251);
    }

    #[test]
    fn test_deep_but_reasonable_nesting_parses() {
        with_large_stack(|| {
            let depth = 150;
            let ifs = format!("{}x = 1;{}", "if (a) { ".repeat(depth), " }".repeat(depth));
            assert_eq!(stmts(&ifs).len(), 1);

            let blocks = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
            assert_eq!(stmts(&blocks).len(), 1);

            let parens = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
            assert!(matches!(expr(&parens), Expr::Paren(_)));
        });
    }

    #[test]
    fn test_nesting_limit() {
        with_large_stack(|| {
            let n = MAX_NESTING_DEPTH + 10;
            let deep = format!("class T {{ Object v = {}x{}; }}", "(".repeat(n), ")".repeat(n));
            let err = syntax_error(parse_str(&deep).unwrap_err());
            assert_eq!(err.expected, vec!["less deeply nested code"]);

            let blocks = format!("class T {{ void m() {{ {}{} }} }}", "{".repeat(n), "}".repeat(n));
            assert!(matches!(parse_str(&blocks), Err(ParseError::Syntax(_))));
        });
    }
}
