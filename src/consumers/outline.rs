use super::{constructor_signature, method_signature, modifier_prefix, property_signature};
use apex_core::lang::trigger_events;
use apex_syntax::ast::*;
use apex_syntax::walk::Listener;
use std::convert::Infallible;

/// Builds an indented outline of declarations and their members.
///
/// ```text
/// public class Account_Service
///   private static field Integer count
///   public method void run(List<Account> accounts)
/// ```
#[derive(Debug, Default)]
pub struct OutlineListener {
    lines: Vec<String>,
    depth: usize,
}

impl OutlineListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn line(&mut self, text: String) {
        self.lines.push(format!("{}{}", "  ".repeat(self.depth), text));
    }

    fn open(&mut self, text: String) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Listener for OutlineListener {
    type Error = Infallible;

    fn enter_class_decl(&mut self, node: &ClassDecl, _span: Span) -> Result<(), Infallible> {
        let mut text = format!("{}class {}", modifier_prefix(&node.modifiers), node.name.node);
        if let Some(base) = &node.extends {
            text.push_str(&format!(" extends {}", base.node));
        }
        if !node.implements.is_empty() {
            let names: Vec<String> = node.implements.iter().map(|t| t.node.to_string()).collect();
            text.push_str(&format!(" implements {}", names.join(", ")));
        }
        self.open(text);
        Ok(())
    }

    fn exit_class_decl(&mut self, _node: &ClassDecl, _span: Span) -> Result<(), Infallible> {
        self.close();
        Ok(())
    }

    fn enter_interface_decl(&mut self, node: &InterfaceDecl, _span: Span) -> Result<(), Infallible> {
        let mut text = format!("{}interface {}", modifier_prefix(&node.modifiers), node.name.node);
        if !node.extends.is_empty() {
            let names: Vec<String> = node.extends.iter().map(|t| t.node.to_string()).collect();
            text.push_str(&format!(" extends {}", names.join(", ")));
        }
        self.open(text);
        Ok(())
    }

    fn exit_interface_decl(&mut self, _node: &InterfaceDecl, _span: Span) -> Result<(), Infallible> {
        self.close();
        Ok(())
    }

    fn enter_enum_decl(&mut self, node: &EnumDecl, _span: Span) -> Result<(), Infallible> {
        let constants: Vec<&str> = node.constants.iter().map(|c| c.node.as_str()).collect();
        self.line(format!(
            "{}enum {} {{ {} }}",
            modifier_prefix(&node.modifiers),
            node.name.node,
            constants.join(", ")
        ));
        Ok(())
    }

    fn enter_trigger_decl(&mut self, node: &TriggerDecl, _span: Span) -> Result<(), Infallible> {
        let events: Vec<&str> = node.events.iter().map(|e| trigger_events::as_str(e.node)).collect();
        self.line(format!("trigger {} on {} ({})", node.name.node, node.object.node, events.join(", ")));
        Ok(())
    }

    fn enter_class_variable(&mut self, node: &ClassVariable, _span: Span) -> Result<(), Infallible> {
        let names: Vec<&str> = node.declarators.iter().map(|d| d.node.name.node.as_str()).collect();
        self.line(format!("{}field {} {}", modifier_prefix(&node.modifiers), node.ty.node, names.join(", ")));
        Ok(())
    }

    fn enter_class_method(&mut self, node: &ClassMethod, _span: Span) -> Result<(), Infallible> {
        self.line(format!("{}method {}", modifier_prefix(&node.modifiers), method_signature(node)));
        Ok(())
    }

    fn enter_class_constructor(&mut self, node: &ClassConstructor, _span: Span) -> Result<(), Infallible> {
        self.line(format!("{}constructor {}", modifier_prefix(&node.modifiers), constructor_signature(node)));
        Ok(())
    }

    fn enter_class_property(&mut self, node: &ClassProperty, _span: Span) -> Result<(), Infallible> {
        self.line(format!("{}property {}", modifier_prefix(&node.modifiers), property_signature(node)));
        Ok(())
    }

    fn enter_initializer_block(&mut self, node: &InitializerBlock, _span: Span) -> Result<(), Infallible> {
        self.line(if node.is_static { "static initializer" } else { "initializer" }.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_syntax::parser::parse_source;
    use apex_syntax::walk::walk;

    fn outline(source: &str) -> String {
        let unit = parse_source(source).unwrap();
        let mut listener = OutlineListener::new();
        walk(&unit, &mut listener).unwrap();
        listener.render()
    }

    #[test]
    fn test_nested_types_are_indented() {
        let out = outline(
            "public class Outer implements Comparable { class Inner { Integer x; } enum Color { RED, GREEN } void f() {} }",
        );
        assert_eq!(
            out,
            "public class Outer implements Comparable\n  class Inner\n    field Integer x\n  enum Color { RED, GREEN }\n  method void f()\n"
        );
    }

    #[test]
    fn test_trigger_outline_lists_events() {
        let out = outline("trigger AccountTrigger on Account (before insert, after update) { }");
        assert_eq!(out, "trigger AccountTrigger on Account (before insert, after update)\n");
    }
}
