//! Value-returning traversal where the consumer drives recursion.
//!
//! [`accept`] invokes exactly one `visit_*` callback for the node it is given. Children are
//! visited only if that callback asks for it, through [`visit_children`] or by calling
//! [`accept`] on chosen children; the defaults do the former.

use super::node::{Node, NodeRef};
use crate::ast::*;
use apex_core::lang::modifiers::ModifierId;
use apex_core::lang::trigger_events::TriggerEventId;

pub trait Visitor {
    type Output;
    type Error;

    /// Starting value of the fold in [`visit_children`], and the result for leaves.
    fn default_result(&mut self) -> Self::Output;

    /// Combines the fold so far with the result of the next child. Defaults to keeping `next`.
    fn aggregate_result(&mut self, _aggregate: Self::Output, next: Self::Output) -> Self::Output {
        next
    }

    /// Checked before each child in [`visit_children`]; `false` stops the fold early.
    fn should_visit_next_child(&mut self, _node: NodeRef<'_>, _current: &Self::Output) -> bool {
        true
    }

    /// Fallback for every `visit_*` callback.
    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<Self::Output, Self::Error> {
        visit_children(self, node)
    }

    // Declarations
    fn visit_compilation_unit(&mut self, node: &CompilationUnit, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::CompilationUnit(node), span))
    }

    fn visit_class_decl(&mut self, node: &ClassDecl, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ClassDecl(node), span))
    }

    fn visit_interface_decl(&mut self, node: &InterfaceDecl, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::InterfaceDecl(node), span))
    }

    fn visit_enum_decl(&mut self, node: &EnumDecl, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::EnumDecl(node), span))
    }

    fn visit_trigger_decl(&mut self, node: &TriggerDecl, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::TriggerDecl(node), span))
    }

    fn visit_empty_decl(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::EmptyDecl, span))
    }

    fn visit_annotation(&mut self, node: &Annotation, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Annotation(node), span))
    }

    fn visit_annotation_element(&mut self, node: &AnnotationElement, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::AnnotationElement(node), span))
    }

    fn visit_annotation_array(&mut self, values: &[Spanned<AnnotationValue>], span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::AnnotationArray(values), span))
    }

    fn visit_modifier(&mut self, modifier: ModifierId, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Modifier(modifier), span))
    }

    fn visit_trigger_event(&mut self, event: TriggerEventId, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::TriggerEvent(event), span))
    }

    fn visit_identifier(&mut self, name: &str, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Identifier(name), span))
    }

    fn visit_type_ref(&mut self, node: &TypeRef, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::TypeRef(node), span))
    }

    fn visit_qualified_name(&mut self, node: &QualifiedName, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::QualifiedName(node), span))
    }

    // Members
    fn visit_class_variable(&mut self, node: &ClassVariable, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ClassVariable(node), span))
    }

    fn visit_variable_declarator(&mut self, node: &VariableDeclarator, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::VariableDeclarator(node), span))
    }

    fn visit_class_method(&mut self, node: &ClassMethod, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ClassMethod(node), span))
    }

    fn visit_class_constructor(&mut self, node: &ClassConstructor, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ClassConstructor(node), span))
    }

    fn visit_method_parameter(&mut self, node: &MethodParameter, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::MethodParameter(node), span))
    }

    fn visit_class_property(&mut self, node: &ClassProperty, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ClassProperty(node), span))
    }

    fn visit_property_get(&mut self, node: &PropertyAccessor, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::PropertyGet(node), span))
    }

    fn visit_property_set(&mut self, node: &PropertyAccessor, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::PropertySet(node), span))
    }

    fn visit_initializer_block(&mut self, node: &InitializerBlock, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::InitializerBlock(node), span))
    }

    // Statements
    fn visit_block(&mut self, node: &Block, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Block(node), span))
    }

    fn visit_local_variable_decl(&mut self, node: &LocalVariableDecl, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::LocalVariableDecl(node), span))
    }

    fn visit_if_stmt(&mut self, node: &IfStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::IfStmt(node), span))
    }

    fn visit_while_stmt(&mut self, node: &WhileStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::WhileStmt(node), span))
    }

    fn visit_do_while_stmt(&mut self, node: &DoWhileStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::DoWhileStmt(node), span))
    }

    fn visit_for_stmt(&mut self, node: &ForStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ForStmt(node), span))
    }

    fn visit_for_each_stmt(&mut self, node: &ForEachStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ForEachStmt(node), span))
    }

    fn visit_try_stmt(&mut self, node: &TryStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::TryStmt(node), span))
    }

    fn visit_catch_clause(&mut self, node: &CatchClause, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::CatchClause(node), span))
    }

    fn visit_return_stmt(&mut self, value: Option<&Spanned<Expr>>, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ReturnStmt(value), span))
    }

    fn visit_throw_stmt(&mut self, value: &Spanned<Expr>, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ThrowStmt(value), span))
    }

    fn visit_break_stmt(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::BreakStmt, span))
    }

    fn visit_continue_stmt(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ContinueStmt, span))
    }

    fn visit_empty_stmt(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::EmptyStmt, span))
    }

    fn visit_expression_stmt(&mut self, expr: &Spanned<Expr>, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::ExpressionStmt(expr), span))
    }

    fn visit_run_as_stmt(&mut self, node: &RunAsStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::RunAsStmt(node), span))
    }

    fn visit_dml_operation(&mut self, node: &DmlOperation, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::DmlOperation(node), span))
    }

    fn visit_dml_upsert(&mut self, node: &UpsertStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::DmlUpsert(node), span))
    }

    fn visit_dml_merge(&mut self, node: &MergeStmt, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::DmlMerge(node), span))
    }

    // Literals
    fn visit_int_literal(&mut self, value: i64, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::IntLiteral(value), span))
    }

    fn visit_long_literal(&mut self, value: i64, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::LongLiteral(value), span))
    }

    fn visit_float_literal(&mut self, value: f64, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::FloatLiteral(value), span))
    }

    fn visit_string_literal(&mut self, value: &str, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::StringLiteral(value), span))
    }

    fn visit_boolean_literal(&mut self, value: bool, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::BooleanLiteral(value), span))
    }

    fn visit_null_literal(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::NullLiteral, span))
    }

    fn visit_soql_literal(&mut self, query: &QueryLiteral, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::SoqlLiteral(query), span))
    }

    fn visit_sosl_literal(&mut self, query: &QueryLiteral, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::SoslLiteral(query), span))
    }

    // Expressions
    fn visit_name(&mut self, name: &str, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Name(name), span))
    }

    fn visit_this(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::This, span))
    }

    fn visit_super(&mut self, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Super, span))
    }

    fn visit_paren(&mut self, inner: &Spanned<Expr>, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Paren(inner), span))
    }

    fn visit_member_access(&mut self, node: &MemberAccessExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::MemberAccess(node), span))
    }

    fn visit_method_call(&mut self, node: &MethodCallExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::MethodCall(node), span))
    }

    fn visit_index(&mut self, node: &IndexExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Index(node), span))
    }

    fn visit_new_object(&mut self, node: &Creator, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::NewObject(node), span))
    }

    fn visit_new_array(&mut self, node: &Creator, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::NewArray(node), span))
    }

    fn visit_new_collection(&mut self, node: &Creator, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::NewCollection(node), span))
    }

    fn visit_new_map(&mut self, node: &Creator, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::NewMap(node), span))
    }

    fn visit_map_entry(&mut self, node: &MapEntry, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::MapEntry(node), span))
    }

    fn visit_cast(&mut self, node: &CastExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Cast(node), span))
    }

    fn visit_unary(&mut self, node: &UnaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Unary(node), span))
    }

    fn visit_negation(&mut self, node: &UnaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Negation(node), span))
    }

    fn visit_pre_increment(&mut self, node: &IncrementExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::PreIncrement(node), span))
    }

    fn visit_post_increment(&mut self, node: &IncrementExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::PostIncrement(node), span))
    }

    fn visit_logical_or(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::LogicalOr(node), span))
    }

    fn visit_logical_and(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::LogicalAnd(node), span))
    }

    fn visit_bitwise_or(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::BitwiseOr(node), span))
    }

    fn visit_bitwise_xor(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::BitwiseXor(node), span))
    }

    fn visit_bitwise_and(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::BitwiseAnd(node), span))
    }

    fn visit_equality(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Equality(node), span))
    }

    fn visit_comparison(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Comparison(node), span))
    }

    fn visit_shift(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Shift(node), span))
    }

    fn visit_additive(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Additive(node), span))
    }

    fn visit_multiplicative(&mut self, node: &BinaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Multiplicative(node), span))
    }

    fn visit_instance_of(&mut self, node: &InstanceOfExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::InstanceOf(node), span))
    }

    fn visit_ternary(&mut self, node: &TernaryExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Ternary(node), span))
    }

    fn visit_assignment(&mut self, node: &AssignmentExpr, span: Span) -> Result<Self::Output, Self::Error> {
        self.visit_node(NodeRef::new(Node::Assignment(node), span))
    }
}

/// Dispatch `node` to the one `visit_*` callback matching its kind.
pub fn accept<V: Visitor + ?Sized>(node: NodeRef<'_>, visitor: &mut V) -> Result<V::Output, V::Error> {
    let span = node.span;
    match node.node {
        Node::CompilationUnit(v) => visitor.visit_compilation_unit(v, span),
        Node::ClassDecl(v) => visitor.visit_class_decl(v, span),
        Node::InterfaceDecl(v) => visitor.visit_interface_decl(v, span),
        Node::EnumDecl(v) => visitor.visit_enum_decl(v, span),
        Node::TriggerDecl(v) => visitor.visit_trigger_decl(v, span),
        Node::EmptyDecl => visitor.visit_empty_decl(span),
        Node::Annotation(v) => visitor.visit_annotation(v, span),
        Node::AnnotationElement(v) => visitor.visit_annotation_element(v, span),
        Node::AnnotationArray(v) => visitor.visit_annotation_array(v, span),
        Node::Modifier(v) => visitor.visit_modifier(v, span),
        Node::TriggerEvent(v) => visitor.visit_trigger_event(v, span),
        Node::Identifier(v) => visitor.visit_identifier(v, span),
        Node::TypeRef(v) => visitor.visit_type_ref(v, span),
        Node::QualifiedName(v) => visitor.visit_qualified_name(v, span),
        Node::ClassVariable(v) => visitor.visit_class_variable(v, span),
        Node::VariableDeclarator(v) => visitor.visit_variable_declarator(v, span),
        Node::ClassMethod(v) => visitor.visit_class_method(v, span),
        Node::ClassConstructor(v) => visitor.visit_class_constructor(v, span),
        Node::MethodParameter(v) => visitor.visit_method_parameter(v, span),
        Node::ClassProperty(v) => visitor.visit_class_property(v, span),
        Node::PropertyGet(v) => visitor.visit_property_get(v, span),
        Node::PropertySet(v) => visitor.visit_property_set(v, span),
        Node::InitializerBlock(v) => visitor.visit_initializer_block(v, span),
        Node::Block(v) => visitor.visit_block(v, span),
        Node::LocalVariableDecl(v) => visitor.visit_local_variable_decl(v, span),
        Node::IfStmt(v) => visitor.visit_if_stmt(v, span),
        Node::WhileStmt(v) => visitor.visit_while_stmt(v, span),
        Node::DoWhileStmt(v) => visitor.visit_do_while_stmt(v, span),
        Node::ForStmt(v) => visitor.visit_for_stmt(v, span),
        Node::ForEachStmt(v) => visitor.visit_for_each_stmt(v, span),
        Node::TryStmt(v) => visitor.visit_try_stmt(v, span),
        Node::CatchClause(v) => visitor.visit_catch_clause(v, span),
        Node::ReturnStmt(v) => visitor.visit_return_stmt(v, span),
        Node::ThrowStmt(v) => visitor.visit_throw_stmt(v, span),
        Node::BreakStmt => visitor.visit_break_stmt(span),
        Node::ContinueStmt => visitor.visit_continue_stmt(span),
        Node::EmptyStmt => visitor.visit_empty_stmt(span),
        Node::ExpressionStmt(v) => visitor.visit_expression_stmt(v, span),
        Node::RunAsStmt(v) => visitor.visit_run_as_stmt(v, span),
        Node::DmlOperation(v) => visitor.visit_dml_operation(v, span),
        Node::DmlUpsert(v) => visitor.visit_dml_upsert(v, span),
        Node::DmlMerge(v) => visitor.visit_dml_merge(v, span),
        Node::IntLiteral(v) => visitor.visit_int_literal(v, span),
        Node::LongLiteral(v) => visitor.visit_long_literal(v, span),
        Node::FloatLiteral(v) => visitor.visit_float_literal(v, span),
        Node::StringLiteral(v) => visitor.visit_string_literal(v, span),
        Node::BooleanLiteral(v) => visitor.visit_boolean_literal(v, span),
        Node::NullLiteral => visitor.visit_null_literal(span),
        Node::SoqlLiteral(v) => visitor.visit_soql_literal(v, span),
        Node::SoslLiteral(v) => visitor.visit_sosl_literal(v, span),
        Node::Name(v) => visitor.visit_name(v, span),
        Node::This => visitor.visit_this(span),
        Node::Super => visitor.visit_super(span),
        Node::Paren(v) => visitor.visit_paren(v, span),
        Node::MemberAccess(v) => visitor.visit_member_access(v, span),
        Node::MethodCall(v) => visitor.visit_method_call(v, span),
        Node::Index(v) => visitor.visit_index(v, span),
        Node::NewObject(v) => visitor.visit_new_object(v, span),
        Node::NewArray(v) => visitor.visit_new_array(v, span),
        Node::NewCollection(v) => visitor.visit_new_collection(v, span),
        Node::NewMap(v) => visitor.visit_new_map(v, span),
        Node::MapEntry(v) => visitor.visit_map_entry(v, span),
        Node::Cast(v) => visitor.visit_cast(v, span),
        Node::Unary(v) => visitor.visit_unary(v, span),
        Node::Negation(v) => visitor.visit_negation(v, span),
        Node::PreIncrement(v) => visitor.visit_pre_increment(v, span),
        Node::PostIncrement(v) => visitor.visit_post_increment(v, span),
        Node::LogicalOr(v) => visitor.visit_logical_or(v, span),
        Node::LogicalAnd(v) => visitor.visit_logical_and(v, span),
        Node::BitwiseOr(v) => visitor.visit_bitwise_or(v, span),
        Node::BitwiseXor(v) => visitor.visit_bitwise_xor(v, span),
        Node::BitwiseAnd(v) => visitor.visit_bitwise_and(v, span),
        Node::Equality(v) => visitor.visit_equality(v, span),
        Node::Comparison(v) => visitor.visit_comparison(v, span),
        Node::Shift(v) => visitor.visit_shift(v, span),
        Node::Additive(v) => visitor.visit_additive(v, span),
        Node::Multiplicative(v) => visitor.visit_multiplicative(v, span),
        Node::InstanceOf(v) => visitor.visit_instance_of(v, span),
        Node::Ternary(v) => visitor.visit_ternary(v, span),
        Node::Assignment(v) => visitor.visit_assignment(v, span),
    }
}

/// Visit every child of `node` in source order, folding the results with
/// [`Visitor::aggregate_result`].
pub fn visit_children<V: Visitor + ?Sized>(visitor: &mut V, node: NodeRef<'_>) -> Result<V::Output, V::Error> {
    let mut result = visitor.default_result();
    for child in node.children() {
        if !visitor.should_visit_next_child(node, &result) {
            break;
        }
        let next = accept(child, visitor)?;
        result = visitor.aggregate_result(result, next);
    }
    Ok(result)
}

/// Visit a whole compilation unit, starting at its root.
#[tracing::instrument(skip_all)]
pub fn visit<V: Visitor + ?Sized>(unit: &CompilationUnit, visitor: &mut V) -> Result<V::Output, V::Error> {
    accept(NodeRef::root(unit), visitor)
}
