//! Enter/exit notifications over the whole tree.
//!
//! The walk is driven by an explicit stack rather than recursion, so deeply nested expression
//! chains cannot exhaust the call stack.

use super::node::{Node, NodeRef};
use crate::ast::*;
use apex_core::lang::modifiers::ModifierId;
use apex_core::lang::trigger_events::TriggerEventId;

/// Receives an `enter_*` call before a node's children are walked and the matching `exit_*`
/// call after them.
///
/// Every callback defaults to `Ok(())`. Returning `Err` stops the walk at once; the error is
/// handed back to the caller of [`walk`] unchanged and no further callbacks run.
pub trait Listener {
    type Error;

    /// Runs before the kind-specific `enter_*` callback of every node.
    fn enter_every_node(&mut self, _node: NodeRef<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs after the kind-specific `exit_*` callback of every node.
    fn exit_every_node(&mut self, _node: NodeRef<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    // Declarations
    fn enter_compilation_unit(&mut self, _node: &CompilationUnit, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_compilation_unit(&mut self, _node: &CompilationUnit, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_class_decl(&mut self, _node: &ClassDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_class_decl(&mut self, _node: &ClassDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_interface_decl(&mut self, _node: &InterfaceDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_interface_decl(&mut self, _node: &InterfaceDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_enum_decl(&mut self, _node: &EnumDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_enum_decl(&mut self, _node: &EnumDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_trigger_decl(&mut self, _node: &TriggerDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_trigger_decl(&mut self, _node: &TriggerDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_empty_decl(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_empty_decl(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_annotation(&mut self, _node: &Annotation, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_annotation(&mut self, _node: &Annotation, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_annotation_element(&mut self, _node: &AnnotationElement, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_annotation_element(&mut self, _node: &AnnotationElement, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_annotation_array(&mut self, _values: &[Spanned<AnnotationValue>], _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_annotation_array(&mut self, _values: &[Spanned<AnnotationValue>], _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_modifier(&mut self, _modifier: ModifierId, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_modifier(&mut self, _modifier: ModifierId, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_trigger_event(&mut self, _event: TriggerEventId, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_trigger_event(&mut self, _event: TriggerEventId, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_identifier(&mut self, _name: &str, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_identifier(&mut self, _name: &str, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_type_ref(&mut self, _node: &TypeRef, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_type_ref(&mut self, _node: &TypeRef, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_qualified_name(&mut self, _node: &QualifiedName, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_qualified_name(&mut self, _node: &QualifiedName, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    // Members
    fn enter_class_variable(&mut self, _node: &ClassVariable, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_class_variable(&mut self, _node: &ClassVariable, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_variable_declarator(&mut self, _node: &VariableDeclarator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_variable_declarator(&mut self, _node: &VariableDeclarator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_class_method(&mut self, _node: &ClassMethod, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_class_method(&mut self, _node: &ClassMethod, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_class_constructor(&mut self, _node: &ClassConstructor, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_class_constructor(&mut self, _node: &ClassConstructor, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_method_parameter(&mut self, _node: &MethodParameter, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_method_parameter(&mut self, _node: &MethodParameter, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_class_property(&mut self, _node: &ClassProperty, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_class_property(&mut self, _node: &ClassProperty, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_property_get(&mut self, _node: &PropertyAccessor, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_property_get(&mut self, _node: &PropertyAccessor, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_property_set(&mut self, _node: &PropertyAccessor, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_property_set(&mut self, _node: &PropertyAccessor, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_initializer_block(&mut self, _node: &InitializerBlock, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_initializer_block(&mut self, _node: &InitializerBlock, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    // Statements
    fn enter_block(&mut self, _node: &Block, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_block(&mut self, _node: &Block, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_local_variable_decl(&mut self, _node: &LocalVariableDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_local_variable_decl(&mut self, _node: &LocalVariableDecl, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_if_stmt(&mut self, _node: &IfStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_if_stmt(&mut self, _node: &IfStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_while_stmt(&mut self, _node: &WhileStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_while_stmt(&mut self, _node: &WhileStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_do_while_stmt(&mut self, _node: &DoWhileStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_do_while_stmt(&mut self, _node: &DoWhileStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_for_stmt(&mut self, _node: &ForStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_for_stmt(&mut self, _node: &ForStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_for_each_stmt(&mut self, _node: &ForEachStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_for_each_stmt(&mut self, _node: &ForEachStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_try_stmt(&mut self, _node: &TryStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_try_stmt(&mut self, _node: &TryStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_catch_clause(&mut self, _node: &CatchClause, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_catch_clause(&mut self, _node: &CatchClause, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_return_stmt(&mut self, _value: Option<&Spanned<Expr>>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_return_stmt(&mut self, _value: Option<&Spanned<Expr>>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_throw_stmt(&mut self, _value: &Spanned<Expr>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_throw_stmt(&mut self, _value: &Spanned<Expr>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_break_stmt(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_break_stmt(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_continue_stmt(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_continue_stmt(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_empty_stmt(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_empty_stmt(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_expression_stmt(&mut self, _expr: &Spanned<Expr>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_expression_stmt(&mut self, _expr: &Spanned<Expr>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_run_as_stmt(&mut self, _node: &RunAsStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_run_as_stmt(&mut self, _node: &RunAsStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_dml_operation(&mut self, _node: &DmlOperation, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_dml_operation(&mut self, _node: &DmlOperation, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_dml_upsert(&mut self, _node: &UpsertStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_dml_upsert(&mut self, _node: &UpsertStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_dml_merge(&mut self, _node: &MergeStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_dml_merge(&mut self, _node: &MergeStmt, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    // Literals
    fn enter_int_literal(&mut self, _value: i64, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_int_literal(&mut self, _value: i64, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_long_literal(&mut self, _value: i64, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_long_literal(&mut self, _value: i64, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_float_literal(&mut self, _value: f64, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_float_literal(&mut self, _value: f64, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_string_literal(&mut self, _value: &str, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_string_literal(&mut self, _value: &str, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_boolean_literal(&mut self, _value: bool, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_boolean_literal(&mut self, _value: bool, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_null_literal(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_null_literal(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_soql_literal(&mut self, _query: &QueryLiteral, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_soql_literal(&mut self, _query: &QueryLiteral, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_sosl_literal(&mut self, _query: &QueryLiteral, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_sosl_literal(&mut self, _query: &QueryLiteral, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    // Expressions
    fn enter_name(&mut self, _name: &str, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_name(&mut self, _name: &str, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_this(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_this(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_super(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_super(&mut self, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_paren(&mut self, _inner: &Spanned<Expr>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_paren(&mut self, _inner: &Spanned<Expr>, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_member_access(&mut self, _node: &MemberAccessExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_member_access(&mut self, _node: &MemberAccessExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_method_call(&mut self, _node: &MethodCallExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_method_call(&mut self, _node: &MethodCallExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_index(&mut self, _node: &IndexExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_index(&mut self, _node: &IndexExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_new_object(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_new_object(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_new_array(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_new_array(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_new_collection(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_new_collection(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_new_map(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_new_map(&mut self, _node: &Creator, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_map_entry(&mut self, _node: &MapEntry, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_map_entry(&mut self, _node: &MapEntry, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_cast(&mut self, _node: &CastExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_cast(&mut self, _node: &CastExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_unary(&mut self, _node: &UnaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_unary(&mut self, _node: &UnaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_negation(&mut self, _node: &UnaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_negation(&mut self, _node: &UnaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_pre_increment(&mut self, _node: &IncrementExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_pre_increment(&mut self, _node: &IncrementExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_post_increment(&mut self, _node: &IncrementExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_post_increment(&mut self, _node: &IncrementExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_logical_or(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_logical_or(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_logical_and(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_logical_and(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_bitwise_or(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_bitwise_or(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_bitwise_xor(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_bitwise_xor(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_bitwise_and(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_bitwise_and(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_equality(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_equality(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_comparison(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_comparison(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_shift(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_shift(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_additive(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_additive(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_multiplicative(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_multiplicative(&mut self, _node: &BinaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_instance_of(&mut self, _node: &InstanceOfExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_instance_of(&mut self, _node: &InstanceOfExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_ternary(&mut self, _node: &TernaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_ternary(&mut self, _node: &TernaryExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_assignment(&mut self, _node: &AssignmentExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_assignment(&mut self, _node: &AssignmentExpr, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk a whole compilation unit in source order.
#[tracing::instrument(skip_all)]
pub fn walk<L: Listener + ?Sized>(unit: &CompilationUnit, listener: &mut L) -> Result<(), L::Error> {
    walk_node(NodeRef::root(unit), listener)
}

/// Walk the subtree rooted at `root`.
pub fn walk_node<L: Listener + ?Sized>(root: NodeRef<'_>, listener: &mut L) -> Result<(), L::Error> {
    enum Step<'a> {
        Enter(NodeRef<'a>),
        Exit(NodeRef<'a>),
    }

    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                listener.enter_every_node(node)?;
                enter(listener, node)?;
                stack.push(Step::Exit(node));
                stack.extend(node.children().into_iter().rev().map(Step::Enter));
            }
            Step::Exit(node) => {
                exit(listener, node)?;
                listener.exit_every_node(node)?;
            }
        }
    }
    Ok(())
}

fn enter<L: Listener + ?Sized>(listener: &mut L, node: NodeRef<'_>) -> Result<(), L::Error> {
    let span = node.span;
    match node.node {
        Node::CompilationUnit(v) => listener.enter_compilation_unit(v, span),
        Node::ClassDecl(v) => listener.enter_class_decl(v, span),
        Node::InterfaceDecl(v) => listener.enter_interface_decl(v, span),
        Node::EnumDecl(v) => listener.enter_enum_decl(v, span),
        Node::TriggerDecl(v) => listener.enter_trigger_decl(v, span),
        Node::EmptyDecl => listener.enter_empty_decl(span),
        Node::Annotation(v) => listener.enter_annotation(v, span),
        Node::AnnotationElement(v) => listener.enter_annotation_element(v, span),
        Node::AnnotationArray(v) => listener.enter_annotation_array(v, span),
        Node::Modifier(v) => listener.enter_modifier(v, span),
        Node::TriggerEvent(v) => listener.enter_trigger_event(v, span),
        Node::Identifier(v) => listener.enter_identifier(v, span),
        Node::TypeRef(v) => listener.enter_type_ref(v, span),
        Node::QualifiedName(v) => listener.enter_qualified_name(v, span),
        Node::ClassVariable(v) => listener.enter_class_variable(v, span),
        Node::VariableDeclarator(v) => listener.enter_variable_declarator(v, span),
        Node::ClassMethod(v) => listener.enter_class_method(v, span),
        Node::ClassConstructor(v) => listener.enter_class_constructor(v, span),
        Node::MethodParameter(v) => listener.enter_method_parameter(v, span),
        Node::ClassProperty(v) => listener.enter_class_property(v, span),
        Node::PropertyGet(v) => listener.enter_property_get(v, span),
        Node::PropertySet(v) => listener.enter_property_set(v, span),
        Node::InitializerBlock(v) => listener.enter_initializer_block(v, span),
        Node::Block(v) => listener.enter_block(v, span),
        Node::LocalVariableDecl(v) => listener.enter_local_variable_decl(v, span),
        Node::IfStmt(v) => listener.enter_if_stmt(v, span),
        Node::WhileStmt(v) => listener.enter_while_stmt(v, span),
        Node::DoWhileStmt(v) => listener.enter_do_while_stmt(v, span),
        Node::ForStmt(v) => listener.enter_for_stmt(v, span),
        Node::ForEachStmt(v) => listener.enter_for_each_stmt(v, span),
        Node::TryStmt(v) => listener.enter_try_stmt(v, span),
        Node::CatchClause(v) => listener.enter_catch_clause(v, span),
        Node::ReturnStmt(v) => listener.enter_return_stmt(v, span),
        Node::ThrowStmt(v) => listener.enter_throw_stmt(v, span),
        Node::BreakStmt => listener.enter_break_stmt(span),
        Node::ContinueStmt => listener.enter_continue_stmt(span),
        Node::EmptyStmt => listener.enter_empty_stmt(span),
        Node::ExpressionStmt(v) => listener.enter_expression_stmt(v, span),
        Node::RunAsStmt(v) => listener.enter_run_as_stmt(v, span),
        Node::DmlOperation(v) => listener.enter_dml_operation(v, span),
        Node::DmlUpsert(v) => listener.enter_dml_upsert(v, span),
        Node::DmlMerge(v) => listener.enter_dml_merge(v, span),
        Node::IntLiteral(v) => listener.enter_int_literal(v, span),
        Node::LongLiteral(v) => listener.enter_long_literal(v, span),
        Node::FloatLiteral(v) => listener.enter_float_literal(v, span),
        Node::StringLiteral(v) => listener.enter_string_literal(v, span),
        Node::BooleanLiteral(v) => listener.enter_boolean_literal(v, span),
        Node::NullLiteral => listener.enter_null_literal(span),
        Node::SoqlLiteral(v) => listener.enter_soql_literal(v, span),
        Node::SoslLiteral(v) => listener.enter_sosl_literal(v, span),
        Node::Name(v) => listener.enter_name(v, span),
        Node::This => listener.enter_this(span),
        Node::Super => listener.enter_super(span),
        Node::Paren(v) => listener.enter_paren(v, span),
        Node::MemberAccess(v) => listener.enter_member_access(v, span),
        Node::MethodCall(v) => listener.enter_method_call(v, span),
        Node::Index(v) => listener.enter_index(v, span),
        Node::NewObject(v) => listener.enter_new_object(v, span),
        Node::NewArray(v) => listener.enter_new_array(v, span),
        Node::NewCollection(v) => listener.enter_new_collection(v, span),
        Node::NewMap(v) => listener.enter_new_map(v, span),
        Node::MapEntry(v) => listener.enter_map_entry(v, span),
        Node::Cast(v) => listener.enter_cast(v, span),
        Node::Unary(v) => listener.enter_unary(v, span),
        Node::Negation(v) => listener.enter_negation(v, span),
        Node::PreIncrement(v) => listener.enter_pre_increment(v, span),
        Node::PostIncrement(v) => listener.enter_post_increment(v, span),
        Node::LogicalOr(v) => listener.enter_logical_or(v, span),
        Node::LogicalAnd(v) => listener.enter_logical_and(v, span),
        Node::BitwiseOr(v) => listener.enter_bitwise_or(v, span),
        Node::BitwiseXor(v) => listener.enter_bitwise_xor(v, span),
        Node::BitwiseAnd(v) => listener.enter_bitwise_and(v, span),
        Node::Equality(v) => listener.enter_equality(v, span),
        Node::Comparison(v) => listener.enter_comparison(v, span),
        Node::Shift(v) => listener.enter_shift(v, span),
        Node::Additive(v) => listener.enter_additive(v, span),
        Node::Multiplicative(v) => listener.enter_multiplicative(v, span),
        Node::InstanceOf(v) => listener.enter_instance_of(v, span),
        Node::Ternary(v) => listener.enter_ternary(v, span),
        Node::Assignment(v) => listener.enter_assignment(v, span),
    }
}

fn exit<L: Listener + ?Sized>(listener: &mut L, node: NodeRef<'_>) -> Result<(), L::Error> {
    let span = node.span;
    match node.node {
        Node::CompilationUnit(v) => listener.exit_compilation_unit(v, span),
        Node::ClassDecl(v) => listener.exit_class_decl(v, span),
        Node::InterfaceDecl(v) => listener.exit_interface_decl(v, span),
        Node::EnumDecl(v) => listener.exit_enum_decl(v, span),
        Node::TriggerDecl(v) => listener.exit_trigger_decl(v, span),
        Node::EmptyDecl => listener.exit_empty_decl(span),
        Node::Annotation(v) => listener.exit_annotation(v, span),
        Node::AnnotationElement(v) => listener.exit_annotation_element(v, span),
        Node::AnnotationArray(v) => listener.exit_annotation_array(v, span),
        Node::Modifier(v) => listener.exit_modifier(v, span),
        Node::TriggerEvent(v) => listener.exit_trigger_event(v, span),
        Node::Identifier(v) => listener.exit_identifier(v, span),
        Node::TypeRef(v) => listener.exit_type_ref(v, span),
        Node::QualifiedName(v) => listener.exit_qualified_name(v, span),
        Node::ClassVariable(v) => listener.exit_class_variable(v, span),
        Node::VariableDeclarator(v) => listener.exit_variable_declarator(v, span),
        Node::ClassMethod(v) => listener.exit_class_method(v, span),
        Node::ClassConstructor(v) => listener.exit_class_constructor(v, span),
        Node::MethodParameter(v) => listener.exit_method_parameter(v, span),
        Node::ClassProperty(v) => listener.exit_class_property(v, span),
        Node::PropertyGet(v) => listener.exit_property_get(v, span),
        Node::PropertySet(v) => listener.exit_property_set(v, span),
        Node::InitializerBlock(v) => listener.exit_initializer_block(v, span),
        Node::Block(v) => listener.exit_block(v, span),
        Node::LocalVariableDecl(v) => listener.exit_local_variable_decl(v, span),
        Node::IfStmt(v) => listener.exit_if_stmt(v, span),
        Node::WhileStmt(v) => listener.exit_while_stmt(v, span),
        Node::DoWhileStmt(v) => listener.exit_do_while_stmt(v, span),
        Node::ForStmt(v) => listener.exit_for_stmt(v, span),
        Node::ForEachStmt(v) => listener.exit_for_each_stmt(v, span),
        Node::TryStmt(v) => listener.exit_try_stmt(v, span),
        Node::CatchClause(v) => listener.exit_catch_clause(v, span),
        Node::ReturnStmt(v) => listener.exit_return_stmt(v, span),
        Node::ThrowStmt(v) => listener.exit_throw_stmt(v, span),
        Node::BreakStmt => listener.exit_break_stmt(span),
        Node::ContinueStmt => listener.exit_continue_stmt(span),
        Node::EmptyStmt => listener.exit_empty_stmt(span),
        Node::ExpressionStmt(v) => listener.exit_expression_stmt(v, span),
        Node::RunAsStmt(v) => listener.exit_run_as_stmt(v, span),
        Node::DmlOperation(v) => listener.exit_dml_operation(v, span),
        Node::DmlUpsert(v) => listener.exit_dml_upsert(v, span),
        Node::DmlMerge(v) => listener.exit_dml_merge(v, span),
        Node::IntLiteral(v) => listener.exit_int_literal(v, span),
        Node::LongLiteral(v) => listener.exit_long_literal(v, span),
        Node::FloatLiteral(v) => listener.exit_float_literal(v, span),
        Node::StringLiteral(v) => listener.exit_string_literal(v, span),
        Node::BooleanLiteral(v) => listener.exit_boolean_literal(v, span),
        Node::NullLiteral => listener.exit_null_literal(span),
        Node::SoqlLiteral(v) => listener.exit_soql_literal(v, span),
        Node::SoslLiteral(v) => listener.exit_sosl_literal(v, span),
        Node::Name(v) => listener.exit_name(v, span),
        Node::This => listener.exit_this(span),
        Node::Super => listener.exit_super(span),
        Node::Paren(v) => listener.exit_paren(v, span),
        Node::MemberAccess(v) => listener.exit_member_access(v, span),
        Node::MethodCall(v) => listener.exit_method_call(v, span),
        Node::Index(v) => listener.exit_index(v, span),
        Node::NewObject(v) => listener.exit_new_object(v, span),
        Node::NewArray(v) => listener.exit_new_array(v, span),
        Node::NewCollection(v) => listener.exit_new_collection(v, span),
        Node::NewMap(v) => listener.exit_new_map(v, span),
        Node::MapEntry(v) => listener.exit_map_entry(v, span),
        Node::Cast(v) => listener.exit_cast(v, span),
        Node::Unary(v) => listener.exit_unary(v, span),
        Node::Negation(v) => listener.exit_negation(v, span),
        Node::PreIncrement(v) => listener.exit_pre_increment(v, span),
        Node::PostIncrement(v) => listener.exit_post_increment(v, span),
        Node::LogicalOr(v) => listener.exit_logical_or(v, span),
        Node::LogicalAnd(v) => listener.exit_logical_and(v, span),
        Node::BitwiseOr(v) => listener.exit_bitwise_or(v, span),
        Node::BitwiseXor(v) => listener.exit_bitwise_xor(v, span),
        Node::BitwiseAnd(v) => listener.exit_bitwise_and(v, span),
        Node::Equality(v) => listener.exit_equality(v, span),
        Node::Comparison(v) => listener.exit_comparison(v, span),
        Node::Shift(v) => listener.exit_shift(v, span),
        Node::Additive(v) => listener.exit_additive(v, span),
        Node::Multiplicative(v) => listener.exit_multiplicative(v, span),
        Node::InstanceOf(v) => listener.exit_instance_of(v, span),
        Node::Ternary(v) => listener.exit_ternary(v, span),
        Node::Assignment(v) => listener.exit_assignment(v, span),
    }
}
