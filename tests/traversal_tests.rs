//! Listener and visitor contracts over realistic sources.

mod common;

use apexscan::ast::{ClassMethod, CompilationUnit, Span};
use apexscan::parser::parse_source;
use apexscan::walk::{self, ConsumerError, Listener, NodeKind, NodeRef, Visitor, accept};
use common::{check_leaf_round_trip, trace, visitor_count};

const SERVICE: &str = r#"
@RestResource(urlMapping='/accounts/*')
global inherited sharing class AccountService extends BaseService implements Queueable, Database.Batchable<SObject> {
    @TestVisible private static final Integer LIMIT_SIZE = 200;
    public Map<Id, List<Contact>> contactsById { get; private set; }

    static { LIMIT_SIZE = 100; }

    public AccountService() {
        this(new List<Account>());
    }

    public AccountService(List<Account> accounts) {
        super(accounts);
    }

    public void execute(QueueableContext ctx) {
        List<Account> accs = [SELECT Id, Name FROM Account WHERE Name = :ctx.name LIMIT 10];
        for (Integer i = 0, j = accs.size(); i < j; i++) {
            Account a = accs[i];
            a.Description = a.Name + ' #' + String.valueOf(i * 2 + 1);
            if (a.NumberOfEmployees >= LIMIT_SIZE && !(a instanceof Contact)) {
                continue;
            } else if (a.Rating == null) {
                a.Rating = a.AnnualRevenue > 1000000.0 ? 'Hot' : 'Cold';
            }
        }
        try {
            upsert accs Account.External_Id__c;
        } catch (DmlException e) {
            System.debug(LoggingLevel.ERROR, e.getMessage());
            throw new ServiceException('failed: ' + e.getMessage());
        } finally {
            contactsById = new Map<Id, List<Contact>>();
        }
        System.runAs(new User(Id = UserInfo.getUserId())) {
            Integer total = 0;
            do { total += 1; } while (total < 10L);
        }
    }

    public enum Mode { FAST, SAFE }

    public interface Hook { void run(Account a); }
}
"#;

const TRIGGER: &str = r#"
trigger AccountTrigger on Account (before insert, before update, after delete, after undelete) {
    if (Trigger.isBefore) {
        for (Account a : Trigger.new) {
            a.Name = a.Name.trim();
        }
    }
    merge Trigger.old[0] Trigger.old[1];
}
"#;

#[test]
fn test_enter_exit_exactly_once_per_node() {
    for source in [SERVICE, TRIGGER] {
        let unit = parse_source(source).unwrap();
        let trace = trace(&unit);
        assert!(trace.is_balanced(), "unbalanced walk for:\n{source}");
        assert!(trace.entered > 30);
    }
}

#[test]
fn test_visitor_node_count_equals_listener_node_count() {
    for source in [SERVICE, TRIGGER, "", ";"] {
        let unit = parse_source(source).unwrap();
        assert_eq!(visitor_count(&unit), trace(&unit).entered);
    }
}

#[test]
fn test_leaf_round_trip() {
    check_leaf_round_trip(SERVICE).unwrap();
    check_leaf_round_trip(TRIGGER).unwrap();
}

#[test]
fn test_walk_is_preorder_in_source_order() {
    let unit = parse_source("class A { Integer x = 1 + 2; void f() { } }").unwrap();
    assert_eq!(
        trace(&unit).kinds,
        vec![
            NodeKind::CompilationUnit,
            NodeKind::ClassDecl,
            NodeKind::Identifier,
            NodeKind::ClassVariable,
            NodeKind::TypeRef,
            NodeKind::Identifier,
            NodeKind::VariableDeclarator,
            NodeKind::Identifier,
            NodeKind::Additive,
            NodeKind::IntLiteral,
            NodeKind::IntLiteral,
            NodeKind::ClassMethod,
            NodeKind::Identifier,
            NodeKind::Block,
        ]
    );
}

#[test]
fn test_consumer_error_aborts_walk_verbatim() {
    struct Stopper {
        methods_seen: Vec<String>,
    }

    impl Listener for Stopper {
        type Error = ConsumerError;

        fn enter_class_method(&mut self, node: &ClassMethod, span: Span) -> Result<(), ConsumerError> {
            self.methods_seen.push(node.name.node.clone());
            Err(ConsumerError::new("first method reached", span))
        }
    }

    let source = "class A { void first() { } void second() { } }";
    let unit = parse_source(source).unwrap();
    let mut stopper = Stopper {
        methods_seen: Vec::new(),
    };
    let err = walk::walk(&unit, &mut stopper).unwrap_err();
    assert_eq!(err.message, "first method reached");
    assert_eq!(&source[err.span.start..err.span.end], "void first() { }");
    assert_eq!(stopper.methods_seen, vec!["first".to_string()]);
}

#[test]
fn test_visitor_descends_only_on_request() {
    /// Counts binary nodes but refuses to look inside method bodies.
    struct ShallowBinaries(usize);

    impl Visitor for ShallowBinaries {
        type Output = ();
        type Error = ConsumerError;

        fn default_result(&mut self) {}

        fn visit_additive(&mut self, node: &apexscan::ast::BinaryExpr, span: Span) -> Result<(), ConsumerError> {
            self.0 += 1;
            self.visit_node(NodeRef::new(walk::Node::Additive(node), span))
        }

        fn visit_class_method(&mut self, _node: &ClassMethod, _span: Span) -> Result<(), ConsumerError> {
            Ok(())
        }
    }

    let unit = parse_source("class A { Integer x = 1 + 2 + 3; void f() { Integer y = 4 + 5; } }").unwrap();
    let mut visitor = ShallowBinaries(0);
    walk::visit(&unit, &mut visitor).unwrap();
    assert_eq!(visitor.0, 2);
}

#[test]
fn test_accept_on_subtree() {
    let unit = parse_source("class A { void f() { if (a) { b(); } } }").unwrap();
    let root = NodeRef::root(&unit);
    let class = root.children()[0];
    let method = class.children()[1];
    assert_eq!(method.kind(), NodeKind::ClassMethod);
    assert_eq!(accept(method, &mut common::CountingVisitor).unwrap(), 9);

    let mut sub = common::Trace::default();
    walk::walk_node(method, &mut sub).unwrap();
    assert_eq!(sub.entered, 9);
}

#[test]
fn test_tree_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompilationUnit>();

    let unit = parse_source(SERVICE).unwrap();
    let expected = trace(&unit).entered;

    let counts: Vec<(usize, usize)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| (trace(&unit).entered, visitor_count(&unit))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (listened, visited) in counts {
        assert_eq!(listened, expected);
        assert_eq!(visited, expected);
    }
}

#[test]
fn test_deep_expression_chain_does_not_overflow_listener() {
    let mut source = String::from("class A { Integer x = 0");
    for _ in 0..60_000 {
        source.push_str(" + 1");
    }
    source.push_str("; }");
    let unit = parse_source(&source).unwrap();
    let trace = trace(&unit);
    assert!(trace.is_balanced());
    assert!(trace.max_depth > 60_000);
}

#[test]
fn test_deep_postfix_chain_drops_without_overflow() {
    let source = format!("class A {{ Object x = a{}; }}", ".b().c[0]".repeat(20_000));
    let unit = parse_source(&source).unwrap();
    assert!(trace(&unit).is_balanced());
    drop(unit);
}
