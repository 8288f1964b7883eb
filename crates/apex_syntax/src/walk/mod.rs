//! Tree traversal.
//!
//! Two contracts share one dispatch helper ([`NodeRef`]):
//! - [`Listener`]: the walker calls `enter_*` and `exit_*` for every node, pre/post order, in
//!   source order.
//! - [`Visitor`]: [`accept`] calls one `visit_*` callback and the consumer decides which children
//!   to descend into.
//!
//! Both only read the tree, so any number of walks may run over the same
//! [`CompilationUnit`](crate::ast::CompilationUnit) concurrently.

mod listener;
mod node;
mod visitor;

pub use listener::{Listener, walk, walk_node};
pub use node::{Node, NodeKind, NodeRef};
pub use visitor::{Visitor, accept, visit, visit_children};

use crate::ast::Span;
use miette::Diagnostic;
use thiserror::Error;

/// Error a consumer callback can return to stop a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(apex::walk))]
pub struct ConsumerError {
    pub message: String,
    #[label("while handling this node")]
    pub span: Span,
}

impl ConsumerError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ClassMethod, DmlOperation};
    use crate::parser::parse_source;
    use std::collections::HashMap;

    const SOURCE: &str = r#"
        @IsTest
        public with sharing class Sample extends Base {
            private Integer count = 0;
            public String name { get; set; }
            public Sample() { this(1); }
            void run(List<Account> accounts) {
                for (Account a : accounts) {
                    if (a.Name != null && count > 1) { update a; } else { count += a.Size * 2; }
                }
                Map<Id, Account> byId = new Map<Id, Account>([SELECT Id FROM Account]);
            }
        }
    "#;

    /// Records enter/exit pairs keyed by (kind, span).
    #[derive(Default)]
    struct Recorder {
        depth: usize,
        open: Vec<(NodeKind, Span)>,
        entered: HashMap<(NodeKind, usize, usize), usize>,
        exited: HashMap<(NodeKind, usize, usize), usize>,
        max_depth: usize,
    }

    impl Listener for Recorder {
        type Error = ConsumerError;

        fn enter_every_node(&mut self, node: NodeRef<'_>) -> Result<(), ConsumerError> {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            self.open.push((node.kind(), node.span));
            *self.entered.entry((node.kind(), node.span.start, node.span.end)).or_default() += 1;
            Ok(())
        }

        fn exit_every_node(&mut self, node: NodeRef<'_>) -> Result<(), ConsumerError> {
            self.depth -= 1;
            let top = self.open.pop();
            assert_eq!(top, Some((node.kind(), node.span)), "exit does not match innermost enter");
            *self.exited.entry((node.kind(), node.span.start, node.span.end)).or_default() += 1;
            Ok(())
        }
    }

    /// Counts every node by descending through `visit_children`.
    struct Counter;

    impl Visitor for Counter {
        type Output = usize;
        type Error = ConsumerError;

        fn default_result(&mut self) -> usize {
            0
        }

        fn aggregate_result(&mut self, aggregate: usize, next: usize) -> usize {
            aggregate + next
        }

        fn visit_node(&mut self, node: NodeRef<'_>) -> Result<usize, ConsumerError> {
            Ok(1 + visit_children(self, node)?)
        }
    }

    #[test]
    fn test_enter_and_exit_once_per_node() {
        let unit = parse_source(SOURCE).unwrap();
        let mut recorder = Recorder::default();
        walk(&unit, &mut recorder).unwrap();

        assert_eq!(recorder.depth, 0);
        assert!(recorder.open.is_empty());
        assert_eq!(recorder.entered, recorder.exited);
        assert!(recorder.max_depth > 5);
    }

    #[test]
    fn test_visitor_count_matches_listener_count() {
        let unit = parse_source(SOURCE).unwrap();
        let mut recorder = Recorder::default();
        walk(&unit, &mut recorder).unwrap();
        let listened: usize = recorder.entered.values().sum();

        let visited = visit(&unit, &mut Counter).unwrap();
        assert_eq!(visited, listened);
    }

    #[test]
    fn test_kind_specific_callbacks_follow_every_node_hooks() {
        #[derive(Default)]
        struct Order(Vec<&'static str>);

        impl Listener for Order {
            type Error = ConsumerError;

            fn enter_every_node(&mut self, node: NodeRef<'_>) -> Result<(), ConsumerError> {
                if node.kind() == NodeKind::DmlOperation {
                    self.0.push("enter_every");
                }
                Ok(())
            }

            fn enter_dml_operation(&mut self, _node: &DmlOperation, _span: Span) -> Result<(), ConsumerError> {
                self.0.push("enter_dml");
                Ok(())
            }

            fn exit_dml_operation(&mut self, _node: &DmlOperation, _span: Span) -> Result<(), ConsumerError> {
                self.0.push("exit_dml");
                Ok(())
            }

            fn exit_every_node(&mut self, node: NodeRef<'_>) -> Result<(), ConsumerError> {
                if node.kind() == NodeKind::DmlOperation {
                    self.0.push("exit_every");
                }
                Ok(())
            }
        }

        let unit = parse_source(SOURCE).unwrap();
        let mut order = Order::default();
        walk(&unit, &mut order).unwrap();
        assert_eq!(order.0, vec!["enter_every", "enter_dml", "exit_dml", "exit_every"]);
    }

    #[test]
    fn test_listener_error_stops_walk() {
        struct StopAtMethod {
            seen_after: usize,
            stopped: bool,
        }

        impl Listener for StopAtMethod {
            type Error = ConsumerError;

            fn enter_every_node(&mut self, _node: NodeRef<'_>) -> Result<(), ConsumerError> {
                if self.stopped {
                    self.seen_after += 1;
                }
                Ok(())
            }

            fn enter_class_method(&mut self, node: &ClassMethod, span: Span) -> Result<(), ConsumerError> {
                self.stopped = true;
                Err(ConsumerError::new(format!("stop at {}", node.name.node), span))
            }
        }

        let unit = parse_source(SOURCE).unwrap();
        let mut listener = StopAtMethod {
            seen_after: 0,
            stopped: false,
        };
        let err = walk(&unit, &mut listener).unwrap_err();
        assert_eq!(err.message, "stop at run");
        assert_eq!(listener.seen_after, 0);
    }

    #[test]
    fn test_accept_invokes_one_callback_without_descending() {
        struct Shallow(usize);

        impl Visitor for Shallow {
            type Output = ();
            type Error = ConsumerError;

            fn default_result(&mut self) {}

            fn visit_node(&mut self, _node: NodeRef<'_>) -> Result<(), ConsumerError> {
                self.0 += 1;
                Ok(())
            }
        }

        let unit = parse_source(SOURCE).unwrap();
        let mut shallow = Shallow(0);
        visit(&unit, &mut shallow).unwrap();
        assert_eq!(shallow.0, 1);
    }

    #[test]
    fn test_should_visit_next_child_stops_fold() {
        struct FirstChildOnly;

        impl Visitor for FirstChildOnly {
            type Output = usize;
            type Error = ConsumerError;

            fn default_result(&mut self) -> usize {
                0
            }

            fn aggregate_result(&mut self, aggregate: usize, next: usize) -> usize {
                aggregate + next
            }

            fn should_visit_next_child(&mut self, _node: NodeRef<'_>, current: &usize) -> bool {
                *current == 0
            }

            fn visit_node(&mut self, node: NodeRef<'_>) -> Result<usize, ConsumerError> {
                Ok(1 + visit_children(self, node)?)
            }
        }

        let unit = parse_source("class A { Integer x; Integer y; }").unwrap();
        // unit -> class -> first child (name identifier) only
        assert_eq!(visit(&unit, &mut FirstChildOnly).unwrap(), 3);
    }

    #[test]
    fn test_visitor_error_propagates_verbatim() {
        struct FailOnName;

        impl Visitor for FailOnName {
            type Output = ();
            type Error = ConsumerError;

            fn default_result(&mut self) {}

            fn visit_name(&mut self, name: &str, span: Span) -> Result<(), ConsumerError> {
                Err(ConsumerError::new(name, span))
            }
        }

        let unit = parse_source("class A { void f() { x = 1; } }").unwrap();
        let err = visit(&unit, &mut FailOnName).unwrap_err();
        assert_eq!(err.message, "x");
        assert_eq!(err.span.len(), 1);
    }

    #[test]
    fn test_walk_trace_snapshot() {
        struct Outline<'s> {
            source: &'s str,
            depth: usize,
            lines: Vec<String>,
        }

        impl Listener for Outline<'_> {
            type Error = ConsumerError;

            fn enter_every_node(&mut self, node: NodeRef<'_>) -> Result<(), ConsumerError> {
                let mut line = format!("{}{}", "  ".repeat(self.depth), node.kind().as_str());
                if node.is_leaf() {
                    line.push(' ');
                    line.push_str(&self.source[node.span.start..node.span.end]);
                }
                self.lines.push(line);
                self.depth += 1;
                Ok(())
            }

            fn exit_every_node(&mut self, _node: NodeRef<'_>) -> Result<(), ConsumerError> {
                self.depth -= 1;
                Ok(())
            }
        }

        let source = "class A { Map<Id, String> m; }";
        let unit = parse_source(source).unwrap();
        let mut outline = Outline {
            source,
            depth: 0,
            lines: Vec::new(),
        };
        walk(&unit, &mut outline).unwrap();
        insta::assert_snapshot!(outline.lines.join("\n"), @r"
compilation_unit
  class_decl
    identifier A
    class_variable
      type_ref
        identifier Map
        type_ref
          identifier Id
        type_ref
          identifier String
      variable_declarator
        identifier m
");
    }
}
