//! Core printing logic for Apex source
//!
//! Walks a [`CompilationUnit`] and emits source that lexes to the same tokens as the parsed
//! input. Three things are not carried over: comments, the letter case of reserved words, and the
//! spelling of contextual words (`with sharing`, `get`, `on`, `before insert`, `System.runAs`),
//! which print in their canonical lowercase or camel form. Apex reads all of them
//! case-insensitively. Member names after `.` keep their source spelling (`Trigger.New`).
//!
//! Expressions print from an explicit work stack, so operator and call chains of any length
//! print without recursion; `else if` chains are printed in a loop.

use apex_core::lang::modifiers::{self, ModifierId};
use apex_core::lang::operators;
use apex_core::lang::trigger_events;
use apex_syntax::ast::*;

use super::config::FormatConfig;
use super::writer::FormatWriter;

/// Pending output of an expression being printed.
enum Piece<'a> {
    Expr(&'a Spanned<Expr>),
    Text(&'a str),
    Owned(String),
}

/// Annotations and modifiers of one declaration header, in source order.
enum HeaderItem<'a> {
    Annotation(&'a Annotation),
    Modifier(ModifierId),
}

/// Formatter that transforms a syntax tree back into source code
pub struct Formatter {
    writer: FormatWriter,
}

impl Formatter {
    /// Create a new formatter with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config),
        }
    }

    /// Format a compilation unit and return the formatted source
    pub fn format(mut self, unit: &CompilationUnit) -> String {
        self.format_type_declaration(&unit.declaration.node);
        for _ in 0..unit.trailing_semicolons {
            self.writer.write(";");
        }
        self.writer.finish()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn format_type_declaration(&mut self, decl: &TypeDeclaration) {
        match decl {
            TypeDeclaration::Class(class) => self.format_class(class),
            TypeDeclaration::Interface(interface) => self.format_interface(interface),
            TypeDeclaration::Enum(en) => self.format_enum(en),
            TypeDeclaration::Trigger(trigger) => self.format_trigger(trigger),
            TypeDeclaration::Empty => {}
        }
    }

    /// Annotations written before the first modifier go on their own lines; the rest stay inline.
    fn format_header(&mut self, annotations: &[Spanned<Annotation>], mods: &[Spanned<ModifierId>]) {
        let mut items: Vec<(usize, HeaderItem<'_>)> = annotations
            .iter()
            .map(|a| (a.span.start, HeaderItem::Annotation(&a.node)))
            .chain(mods.iter().map(|m| (m.span.start, HeaderItem::Modifier(m.node))))
            .collect();
        items.sort_by_key(|(start, _)| *start);

        let mut after_modifier = false;
        for (_, item) in items {
            match item {
                HeaderItem::Annotation(annotation) if after_modifier => {
                    self.writer.write(&annotation_text(annotation));
                    self.writer.write(" ");
                }
                HeaderItem::Annotation(annotation) => self.writer.writeln(&annotation_text(annotation)),
                HeaderItem::Modifier(id) => {
                    after_modifier = true;
                    self.writer.write(modifiers::as_str(id));
                    self.writer.write(" ");
                }
            }
        }
    }

    fn format_modifiers(&mut self, mods: &[Spanned<ModifierId>]) {
        for m in mods {
            self.writer.write(modifiers::as_str(m.node));
            self.writer.write(" ");
        }
    }

    fn format_class(&mut self, class: &ClassDecl) {
        self.format_header(&class.annotations, &class.modifiers);
        self.writer.write("class ");
        self.writer.write(&class.name.node);
        if let Some(extends) = &class.extends {
            self.writer.write(" extends ");
            self.writer.write(&extends.node.to_string());
        }
        if !class.implements.is_empty() {
            self.writer.write(" implements ");
            self.writer.write(&type_list(&class.implements));
        }
        self.format_members(&class.members);
    }

    fn format_interface(&mut self, interface: &InterfaceDecl) {
        self.format_header(&interface.annotations, &interface.modifiers);
        self.writer.write("interface ");
        self.writer.write(&interface.name.node);
        if !interface.extends.is_empty() {
            self.writer.write(" extends ");
            self.writer.write(&type_list(&interface.extends));
        }
        self.format_members(&interface.members);
    }

    fn format_enum(&mut self, en: &EnumDecl) {
        self.format_header(&en.annotations, &en.modifiers);
        self.writer.write("enum ");
        self.writer.write(&en.name.node);
        if en.constants.is_empty() {
            self.writer.write(" {}");
            return;
        }
        let constants: Vec<&str> = en.constants.iter().map(|c| c.node.as_str()).collect();
        self.writer.write(" { ");
        self.writer.write(&constants.join(", "));
        if en.trailing_comma {
            self.writer.write(",");
        }
        self.writer.write(" }");
    }

    fn format_trigger(&mut self, trigger: &TriggerDecl) {
        let events: Vec<&str> = trigger.events.iter().map(|e| trigger_events::as_str(e.node)).collect();
        self.writer.write("trigger ");
        self.writer.write(&trigger.name.node);
        self.writer.write(" on ");
        self.writer.write(&trigger.object.node);
        self.writer.write(" (");
        self.writer.write(&events.join(", "));
        self.writer.write(") ");
        self.format_block(&trigger.body.node);
    }

    // ========================================================================
    // Class members
    // ========================================================================

    fn format_members(&mut self, members: &[Spanned<ClassMember>]) {
        if members.is_empty() {
            self.writer.write(" {}");
            return;
        }
        self.writer.write(" {");
        self.writer.newline();
        self.writer.indent();

        let blank_lines = self.writer.config().blank_lines_members;
        let mut previous: Option<&ClassMember> = None;
        for member in members {
            if let Some(prev) = previous {
                // Consecutive fields stay together
                if matches!((prev, &member.node), (ClassMember::Field(_), ClassMember::Field(_))) {
                    self.writer.newline();
                } else {
                    self.writer.blank_lines(blank_lines);
                }
            }
            self.format_member(&member.node);
            previous = Some(&member.node);
        }

        self.writer.newline();
        self.writer.dedent();
        self.writer.write("}");
    }

    fn format_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(field) => {
                self.format_header(&field.annotations, &field.modifiers);
                self.writer.write(&field.ty.node.to_string());
                self.writer.write(" ");
                self.format_declarators(&field.declarators);
                self.writer.write(";");
            }
            ClassMember::Method(method) => self.format_method(method),
            ClassMember::Constructor(ctor) => {
                self.format_header(&ctor.annotations, &ctor.modifiers);
                self.writer.write(&ctor.name.node);
                self.format_params(&ctor.params);
                self.writer.write(" ");
                self.format_block(&ctor.body.node);
            }
            ClassMember::Property(property) => self.format_property(property),
            ClassMember::Initializer(init) => {
                if init.is_static {
                    self.writer.write("static ");
                }
                self.format_block(&init.body.node);
            }
            ClassMember::Type(TypeDeclaration::Empty) => self.writer.write(";"),
            ClassMember::Type(decl) => self.format_type_declaration(decl),
        }
    }

    fn format_method(&mut self, method: &ClassMethod) {
        self.format_header(&method.annotations, &method.modifiers);
        match &method.return_type {
            Some(ty) => self.writer.write(&ty.node.to_string()),
            None => self.writer.write("void"),
        }
        self.writer.write(" ");
        self.writer.write(&method.name.node);
        self.format_params(&method.params);
        match &method.body {
            Some(body) => {
                self.writer.write(" ");
                self.format_block(&body.node);
            }
            None => self.writer.write(";"),
        }
    }

    fn format_params(&mut self, params: &[Spanned<MethodParameter>]) {
        self.writer.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.format_modifiers(&param.node.modifiers);
            self.writer.write(&param.node.ty.node.to_string());
            self.writer.write(" ");
            self.writer.write(&param.node.name.node);
        }
        self.writer.write(")");
    }

    fn format_property(&mut self, property: &ClassProperty) {
        self.format_header(&property.annotations, &property.modifiers);
        self.writer.write(&property.ty.node.to_string());
        self.writer.write(" ");
        self.writer.write(&property.name.node);
        self.writer.write(" {");
        self.writer.newline();
        self.writer.indent();
        for accessor in &property.accessors {
            self.format_modifiers(&accessor.node.modifiers);
            self.writer.write(match accessor.node.kind {
                AccessorKind::Get => "get",
                AccessorKind::Set => "set",
            });
            match &accessor.node.body {
                Some(body) => {
                    self.writer.write(" ");
                    self.format_block(&body.node);
                }
                None => self.writer.write(";"),
            }
            self.writer.newline();
        }
        self.writer.dedent();
        self.writer.write("}");
    }

    fn format_declarators(&mut self, declarators: &[Spanned<VariableDeclarator>]) {
        for (i, declarator) in declarators.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.writer.write(&declarator.node.name.node);
            if let Some(init) = &declarator.node.init {
                self.writer.write(" = ");
                self.format_expr(init);
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn format_block(&mut self, block: &Block) {
        if block.statements.is_empty() {
            self.writer.write("{}");
            return;
        }
        self.writer.write("{");
        self.writer.newline();
        self.writer.indent();
        for stmt in &block.statements {
            self.format_statement(&stmt.node);
            self.writer.newline();
        }
        self.writer.dedent();
        self.writer.write("}");
    }

    /// A block body stays on the header line; any other statement goes on its own indented line.
    fn format_body(&mut self, body: &Statement) {
        if let Statement::Block(block) = body {
            self.writer.write(" ");
            self.format_block(block);
        } else {
            self.writer.newline();
            self.writer.indent();
            self.format_statement(body);
            self.writer.dedent();
        }
    }

    fn format_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(block) => self.format_block(block),
            Statement::LocalVariable(decl) => {
                self.format_local(decl);
                self.writer.write(";");
            }
            Statement::If(if_stmt) => self.format_if(if_stmt),
            Statement::While(while_stmt) => {
                self.writer.write("while (");
                self.format_expr(&while_stmt.condition);
                self.writer.write(")");
                self.format_body(&while_stmt.body.node);
            }
            Statement::DoWhile(do_while) => {
                self.writer.write("do ");
                self.format_block(&do_while.body.node);
                self.writer.write(" while (");
                self.format_expr(&do_while.condition);
                self.writer.write(");");
            }
            Statement::For(for_stmt) => self.format_for(for_stmt),
            Statement::ForEach(each) => {
                self.writer.write("for (");
                self.format_modifiers(&each.modifiers);
                self.writer.write(&each.ty.node.to_string());
                self.writer.write(" ");
                self.writer.write(&each.name.node);
                self.writer.write(" : ");
                self.format_expr(&each.iterable);
                self.writer.write(")");
                self.format_body(&each.body.node);
            }
            Statement::Try(try_stmt) => self.format_try(try_stmt),
            Statement::Return(None) => self.writer.write("return;"),
            Statement::Return(Some(value)) => {
                self.writer.write("return ");
                self.format_expr(value);
                self.writer.write(";");
            }
            Statement::Throw(value) => {
                self.writer.write("throw ");
                self.format_expr(value);
                self.writer.write(";");
            }
            Statement::Break => self.writer.write("break;"),
            Statement::Continue => self.writer.write("continue;"),
            Statement::Empty => self.writer.write(";"),
            Statement::Expr(expr) => {
                self.format_expr(expr);
                self.writer.write(";");
            }
            Statement::RunAs(run_as) => {
                self.writer.write("System.runAs(");
                self.format_expr(&run_as.context);
                self.writer.write(") ");
                self.format_block(&run_as.body.node);
            }
            Statement::Dml(dml) => self.format_dml(dml),
        }
    }

    fn format_local(&mut self, decl: &LocalVariableDecl) {
        self.format_modifiers(&decl.modifiers);
        self.writer.write(&decl.ty.node.to_string());
        self.writer.write(" ");
        self.format_declarators(&decl.declarators);
    }

    fn format_if(&mut self, stmt: &IfStmt) {
        let mut current = stmt;
        loop {
            self.writer.write("if (");
            self.format_expr(&current.condition);
            self.writer.write(")");
            self.format_body(&current.then_branch.node);

            let Some(else_branch) = &current.else_branch else {
                return;
            };
            if matches!(current.then_branch.node, Statement::Block(_)) {
                self.writer.write(" else");
            } else {
                self.writer.newline();
                self.writer.write("else");
            }
            match &else_branch.node {
                Statement::If(next) => {
                    self.writer.write(" ");
                    current = next;
                }
                other => {
                    self.format_body(other);
                    return;
                }
            }
        }
    }

    fn format_for(&mut self, stmt: &ForStmt) {
        self.writer.write("for (");
        match &stmt.init {
            Some(ForInit::Declaration(decl)) => self.format_local(&decl.node),
            Some(ForInit::Expressions(exprs)) => self.format_expr_list(exprs),
            None => {}
        }
        self.writer.write(";");
        if let Some(condition) = &stmt.condition {
            self.writer.write(" ");
            self.format_expr(condition);
        }
        self.writer.write(";");
        if !stmt.update.is_empty() {
            self.writer.write(" ");
            self.format_expr_list(&stmt.update);
        }
        self.writer.write(")");
        self.format_body(&stmt.body.node);
    }

    fn format_try(&mut self, stmt: &TryStmt) {
        self.writer.write("try ");
        self.format_block(&stmt.body.node);
        for catch in &stmt.catches {
            self.writer.write(" catch (");
            self.format_modifiers(&catch.node.modifiers);
            self.writer.write(&catch.node.ty.node.to_string());
            self.writer.write(" ");
            self.writer.write(&catch.node.name.node);
            self.writer.write(") ");
            self.format_block(&catch.node.body.node);
        }
        if let Some(finally) = &stmt.finally {
            self.writer.write(" finally ");
            self.format_block(&finally.node);
        }
    }

    fn format_dml(&mut self, dml: &DmlStmt) {
        match dml {
            DmlStmt::Operation(operation) => {
                self.writer.write(operation.op.as_str());
                self.writer.write(" ");
                self.format_expr(&operation.target);
            }
            DmlStmt::Upsert(upsert) => {
                self.writer.write("upsert ");
                self.format_expr(&upsert.target);
                if let Some(field) = &upsert.external_id {
                    self.writer.write(" ");
                    self.writer.write(&field.node.to_string());
                }
            }
            DmlStmt::Merge(merge) => {
                self.writer.write("merge ");
                self.format_expr(&merge.master);
                self.writer.write(" ");
                self.format_expr(&merge.duplicate);
            }
        }
        self.writer.write(";");
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn format_expr_list(&mut self, exprs: &[Spanned<Expr>]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.format_expr(expr);
        }
    }

    fn format_expr(&mut self, root: &Spanned<Expr>) {
        let mut stack = vec![Piece::Expr(root)];
        let mut pieces = Vec::new();
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => self.writer.write(text),
                Piece::Owned(text) => self.writer.write(&text),
                Piece::Expr(expr) => {
                    expand(&expr.node, &mut pieces);
                    stack.extend(pieces.drain(..).rev());
                }
            }
        }
    }
}

/// Push the output of one expression node, children left as [`Piece::Expr`].
fn expand<'a>(expr: &'a Expr, out: &mut Vec<Piece<'a>>) {
    match expr {
        Expr::Literal(literal) => out.push(Piece::Owned(literal_text(literal))),
        Expr::Name(name) => out.push(Piece::Text(name)),
        Expr::This => out.push(Piece::Text("this")),
        Expr::Super => out.push(Piece::Text("super")),
        Expr::Paren(inner) => out.extend([Piece::Text("("), Piece::Expr(inner), Piece::Text(")")]),
        Expr::MemberAccess(access) => out.extend([
            Piece::Expr(&access.object),
            Piece::Text("."),
            Piece::Text(&access.member.node),
        ]),
        Expr::MethodCall(call) => {
            if let Some(receiver) = &call.receiver {
                out.extend([Piece::Expr(receiver), Piece::Text(".")]);
            }
            out.push(Piece::Text(&call.name.node));
            push_list("(", &call.args, ")", out);
        }
        Expr::Index(index) => out.extend([
            Piece::Expr(&index.object),
            Piece::Text("["),
            Piece::Expr(&index.index),
            Piece::Text("]"),
        ]),
        Expr::New(creator) => {
            out.push(Piece::Text("new "));
            out.push(Piece::Owned(creator.ty.node.to_string()));
            match &creator.rest {
                CreatorRest::Object(args) => push_list("(", args, ")", out),
                CreatorRest::Array { size: Some(size), .. } => {
                    out.extend([Piece::Text("["), Piece::Expr(size), Piece::Text("]")]);
                }
                CreatorRest::Array { size: None, elements } => {
                    out.push(Piece::Text("[]"));
                    if let Some(elements) = elements {
                        push_list("{", elements, "}", out);
                    }
                }
                CreatorRest::Collection(elements) => push_list("{", elements, "}", out),
                CreatorRest::Map(entries) => {
                    out.push(Piece::Text("{"));
                    for (i, entry) in entries.iter().enumerate() {
                        if i > 0 {
                            out.push(Piece::Text(", "));
                        }
                        out.extend([
                            Piece::Expr(&entry.node.key),
                            Piece::Text(" => "),
                            Piece::Expr(&entry.node.value),
                        ]);
                    }
                    out.push(Piece::Text("}"));
                }
            }
        }
        Expr::Cast(cast) => out.extend([
            Piece::Text("("),
            Piece::Owned(cast.ty.node.to_string()),
            Piece::Text(") "),
            Piece::Expr(&cast.expr),
        ]),
        Expr::Unary(unary) => {
            out.push(Piece::Text(operators::as_str(unary.op.operator())));
            push_operand(&unary.operand, out);
        }
        Expr::Increment(inc) => {
            let op = operators::as_str(inc.op.operator());
            if inc.prefix {
                out.push(Piece::Text(op));
                push_operand(&inc.operand, out);
            } else {
                out.extend([Piece::Expr(&inc.operand), Piece::Text(op)]);
            }
        }
        Expr::Binary(binary) => out.extend([
            Piece::Expr(&binary.left),
            Piece::Text(" "),
            Piece::Text(binary.op.as_str()),
            Piece::Text(" "),
            Piece::Expr(&binary.right),
        ]),
        Expr::InstanceOf(instance_of) => out.extend([
            Piece::Expr(&instance_of.expr),
            Piece::Text(" instanceof "),
            Piece::Owned(instance_of.ty.node.to_string()),
        ]),
        Expr::Ternary(ternary) => out.extend([
            Piece::Expr(&ternary.condition),
            Piece::Text(" ? "),
            Piece::Expr(&ternary.then_expr),
            Piece::Text(" : "),
            Piece::Expr(&ternary.else_expr),
        ]),
        Expr::Assignment(assignment) => out.extend([
            Piece::Expr(&assignment.target),
            Piece::Text(" "),
            Piece::Text(assignment.op.as_str()),
            Piece::Text(" "),
            Piece::Expr(&assignment.value),
        ]),
    }
}

fn push_list<'a>(open: &'static str, items: &'a [Spanned<Expr>], close: &'static str, out: &mut Vec<Piece<'a>>) {
    out.push(Piece::Text(open));
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(Piece::Text(", "));
        }
        out.push(Piece::Expr(item));
    }
    out.push(Piece::Text(close));
}

/// Operand of a prefix operator; `- -x` and `+ ++x` need the space to stay two tokens.
fn push_operand<'a>(operand: &'a Spanned<Expr>, out: &mut Vec<Piece<'a>>) {
    if starts_with_sign(&operand.node) {
        out.push(Piece::Text(" "));
    }
    out.push(Piece::Expr(operand));
}

/// Whether the first token printed for `expr` is `+`, `-`, `++` or `--`.
fn starts_with_sign(mut expr: &Expr) -> bool {
    loop {
        expr = match expr {
            Expr::Unary(unary) => return matches!(unary.op, UnaryOp::Plus | UnaryOp::Minus),
            Expr::Increment(inc) if inc.prefix => return true,
            Expr::Increment(inc) => &inc.operand.node,
            Expr::Binary(binary) => &binary.left.node,
            Expr::MemberAccess(access) => &access.object.node,
            Expr::MethodCall(call) => match &call.receiver {
                Some(receiver) => &receiver.node,
                None => return false,
            },
            Expr::Index(index) => &index.object.node,
            Expr::InstanceOf(instance_of) => &instance_of.expr.node,
            Expr::Ternary(ternary) => &ternary.condition.node,
            Expr::Assignment(assignment) => &assignment.target.node,
            Expr::Literal(Literal::Int(v) | Literal::Long(v)) => return *v < 0,
            Expr::Literal(Literal::Float(v)) => return v.is_sign_negative(),
            _ => return false,
        };
    }
}

fn type_list(types: &[Spanned<TypeRef>]) -> String {
    types.iter().map(|t| t.node.to_string()).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// Literals and annotations
// ============================================================================

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Int(v) => v.to_string(),
        Literal::Long(v) => format!("{v}L"),
        Literal::Float(v) => float_text(*v),
        Literal::String(value) => quote(value),
        Literal::Bool(true) => "true".to_string(),
        Literal::Bool(false) => "false".to_string(),
        Literal::Null => "null".to_string(),
        Literal::Soql(query) | Literal::Sosl(query) => format!("[{}]", query.text),
    }
}

/// Decimal text that lexes back to `value`. Literals too long for `f64` lex to infinity, so
/// infinity prints as one of those.
fn float_text(value: f64) -> String {
    if value.is_infinite() {
        let mut text = String::from(if value < 0.0 { "-1" } else { "1" });
        text.extend(std::iter::repeat_n('0', 309));
        text.push_str(".0");
        return text;
    }
    let text = value.to_string();
    if text.contains('.') { text } else { format!("{text}.0") }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn annotation_text(annotation: &Annotation) -> String {
    let mut out = format!("@{}", annotation.name.node);
    if !annotation.parenthesized {
        return out;
    }
    out.push('(');
    let last = annotation.elements.len().saturating_sub(1);
    for (i, element) in annotation.elements.iter().enumerate() {
        if let Some(key) = &element.node.key {
            out.push_str(&key.node);
            out.push_str(" = ");
        }
        out.push_str(&annotation_value_text(&element.node.value.node));
        if element.node.comma {
            out.push(',');
        }
        if i < last {
            out.push(' ');
        }
    }
    out.push(')');
    out
}

fn annotation_value_text(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Literal(literal) => literal_text(literal),
        AnnotationValue::Array(values) => {
            let values: Vec<String> = values.iter().map(|v| annotation_value_text(&v.node)).collect();
            format!("{{{}}}", values.join(", "))
        }
        AnnotationValue::Annotation(nested) => annotation_text(nested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_syntax::parser::parse_source;

    fn format(source: &str) -> String {
        let unit = parse_source(source).unwrap();
        Formatter::new(FormatConfig::default()).format(&unit)
    }

    fn field_value(source: &str) -> String {
        let formatted = format(&format!("class T {{ Object v = {source}; }}"));
        let start = formatted.find("v = ").unwrap() + 4;
        let end = formatted.rfind(';').unwrap();
        formatted[start..end].to_string()
    }

    #[test]
    fn test_class_layout() {
        let formatted = format("public   class A{Integer a;Integer b=1;void f(){if(a>b){return;}}}");
        assert_eq!(
            formatted,
            "public class A {\n    Integer a;\n    Integer b = 1;\n\n    void f() {\n        if (a > b) {\n            return;\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn test_signs_stay_separate_tokens() {
        assert_eq!(field_value("- -x"), "- -x");
        assert_eq!(field_value("+ ++x"), "+ ++x");
        assert_eq!(field_value("- --x.y"), "- --x.y");
        assert_eq!(field_value("-x++"), "-x++");
        assert_eq!(field_value("a - -b"), "a - -b");
    }

    #[test]
    fn test_shifts_print_adjacent() {
        assert_eq!(field_value("a>>b"), "a >> b");
        assert_eq!(field_value("a >>> b"), "a >>> b");
    }

    #[test]
    fn test_literals() {
        assert_eq!(field_value("42L"), "42L");
        assert_eq!(field_value("2.5d"), "2.5");
        assert_eq!(field_value("10D"), "10.0");
        assert_eq!(field_value(r"'it\'s\n\\'"), r"'it\'s\n\\'");
        assert_eq!(field_value("[ SELECT Id FROM Account ]"), "[ SELECT Id FROM Account ]");
        assert_eq!(float_text(f64::INFINITY).len(), 312);
        assert_eq!(float_text(f64::INFINITY).parse::<f64>().unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_else_if_chain_stays_flat() {
        let formatted = format("class A { void f() { if (a) x(); else if (b) { y(); } else z(); } }");
        assert!(formatted.contains("        if (a)\n            x();\n        else if (b) {\n"), "{formatted}");
        assert!(formatted.contains("        } else\n            z();\n"), "{formatted}");
    }

    #[test]
    fn test_header_keeps_annotation_placement() {
        let formatted = format("@IsTest private class A { public @Future static void f() {} }");
        assert!(formatted.starts_with("@IsTest\nprivate class A {\n"), "{formatted}");
        assert!(formatted.contains("    public @Future static void f() {}\n"), "{formatted}");
    }

    #[test]
    fn test_annotation_separators() {
        let formatted = format("@SuppressWarnings(a='x' b=1, c={1, 2},) class A { @Future() void f() {} }");
        assert!(formatted.starts_with("@SuppressWarnings(a = 'x' b = 1, c = {1, 2},)\n"), "{formatted}");
        assert!(formatted.contains("@Future()\n"), "{formatted}");
    }

    #[test]
    fn test_contextual_words_print_canonically() {
        let formatted = format("TRIGGER t ON Account (BEFORE INSERT, after Update) { SYSTEM.RUNAS(u) {} }");
        assert_eq!(formatted, "trigger t on Account (before insert, after update) {\n    System.runAs(u) {}\n}\n");
    }
}
