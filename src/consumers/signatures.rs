use super::{constructor_signature, method_signature, property_signature};
use apex_syntax::ast::*;
use apex_syntax::walk::{Node, NodeRef, Visitor, visit_children};
use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    Method,
    Constructor,
    Property,
}

/// One member signature together with the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub kind: SignatureKind,
    /// Dotted path of enclosing types, e.g. `Outer.Inner`.
    pub owner: String,
    pub text: String,
    pub span: Span,
}

/// Collects method, constructor and property signatures.
///
/// Member bodies, field initializers and trigger bodies are never entered.
#[derive(Debug, Default)]
pub struct SignatureCollector {
    owners: Vec<String>,
}

impl SignatureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn owner(&self) -> String {
        self.owners.join(".")
    }

    fn within(&mut self, name: &str, node: NodeRef<'_>) -> Result<Vec<Signature>, Infallible> {
        self.owners.push(name.to_string());
        let result = visit_children(self, node);
        self.owners.pop();
        result
    }

    fn signature(&self, kind: SignatureKind, text: String, span: Span) -> Result<Vec<Signature>, Infallible> {
        Ok(vec![Signature {
            kind,
            owner: self.owner(),
            text,
            span,
        }])
    }
}

impl Visitor for SignatureCollector {
    type Output = Vec<Signature>;
    type Error = Infallible;

    fn default_result(&mut self) -> Vec<Signature> {
        Vec::new()
    }

    fn aggregate_result(&mut self, mut aggregate: Vec<Signature>, next: Vec<Signature>) -> Vec<Signature> {
        aggregate.extend(next);
        aggregate
    }

    fn visit_class_decl(&mut self, node: &ClassDecl, span: Span) -> Result<Vec<Signature>, Infallible> {
        self.within(&node.name.node, NodeRef::new(Node::ClassDecl(node), span))
    }

    fn visit_interface_decl(&mut self, node: &InterfaceDecl, span: Span) -> Result<Vec<Signature>, Infallible> {
        self.within(&node.name.node, NodeRef::new(Node::InterfaceDecl(node), span))
    }

    fn visit_trigger_decl(&mut self, _node: &TriggerDecl, _span: Span) -> Result<Vec<Signature>, Infallible> {
        Ok(Vec::new())
    }

    fn visit_class_variable(&mut self, _node: &ClassVariable, _span: Span) -> Result<Vec<Signature>, Infallible> {
        Ok(Vec::new())
    }

    fn visit_initializer_block(&mut self, _node: &InitializerBlock, _span: Span) -> Result<Vec<Signature>, Infallible> {
        Ok(Vec::new())
    }

    fn visit_class_method(&mut self, node: &ClassMethod, span: Span) -> Result<Vec<Signature>, Infallible> {
        self.signature(SignatureKind::Method, method_signature(node), span)
    }

    fn visit_class_constructor(&mut self, node: &ClassConstructor, span: Span) -> Result<Vec<Signature>, Infallible> {
        self.signature(SignatureKind::Constructor, constructor_signature(node), span)
    }

    fn visit_class_property(&mut self, node: &ClassProperty, span: Span) -> Result<Vec<Signature>, Infallible> {
        self.signature(SignatureKind::Property, property_signature(node), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_syntax::parser::parse_source;
    use apex_syntax::walk::visit;

    #[test]
    fn test_collects_signatures_with_owners() {
        let source = r#"
            public class Outer {
                public Outer(String name) { }
                public static Integer add(Integer a, final Integer b) { return a + b; }
                public String label { get; private set; }
                class Inner {
                    void ping() { }
                }
            }
        "#;
        let unit = parse_source(source).unwrap();
        let sigs = visit(&unit, &mut SignatureCollector::new()).unwrap();
        let summary: Vec<(SignatureKind, &str, &str)> = sigs
            .iter()
            .map(|s| (s.kind, s.owner.as_str(), s.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (SignatureKind::Constructor, "Outer", "Outer(String name)"),
                (SignatureKind::Method, "Outer", "Integer add(Integer a, final Integer b)"),
                (SignatureKind::Property, "Outer", "String label { get; private set; }"),
                (SignatureKind::Method, "Outer.Inner", "void ping()"),
            ]
        );
    }

    #[test]
    fn test_interface_methods() {
        let unit = parse_source("public interface Shape { Decimal area(); }").unwrap();
        let sigs = visit(&unit, &mut SignatureCollector::new()).unwrap();
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].owner, "Shape");
        assert_eq!(sigs[0].text, "Decimal area()");
    }

    #[test]
    fn test_triggers_have_no_signatures() {
        let unit = parse_source("trigger T on Account (before insert) { Integer x = 1; }").unwrap();
        assert!(visit(&unit, &mut SignatureCollector::new()).unwrap().is_empty());
    }
}
