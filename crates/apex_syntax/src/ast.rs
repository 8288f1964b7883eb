//! Abstract Syntax Tree definitions for Apex.
//!
//! The tree is plain owned data: every node is reachable from exactly one parent, nothing points
//! back up, and nothing is mutated after the parser returns. That makes a [`CompilationUnit`]
//! `Send + Sync` and safe to walk from several threads at once.
//!
//! Grammar alternatives are closed enums, so traversal code in [`crate::walk`] matches them
//! exhaustively.

use apex_core::lang::modifiers::ModifierId;
use apex_core::lang::operators::{self, OperatorId};
use apex_core::lang::trigger_events::TriggerEventId;
use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier as written in source (Apex is case-insensitive; the original spelling is kept).
pub type Ident = String;

// ============================================================================
// Compilation unit and type declarations
// ============================================================================

/// The parsed result of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub declaration: Spanned<TypeDeclaration>,
    /// `;` tokens after the declaration, or all of them in a file without one.
    pub trailing_semicolons: usize,
    /// Covers the whole token stream, including a trailing `;` after the declaration.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDeclaration {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Trigger(TriggerDecl),
    /// The file holds no declaration (empty, or only a `;`). As a class member, a stray `;`.
    Empty,
}

impl TypeDeclaration {
    /// Declared name, if any.
    pub fn name(&self) -> Option<&Spanned<Ident>> {
        match self {
            TypeDeclaration::Class(c) => Some(&c.name),
            TypeDeclaration::Interface(i) => Some(&i.name),
            TypeDeclaration::Enum(e) => Some(&e.name),
            TypeDeclaration::Trigger(t) => Some(&t.name),
            TypeDeclaration::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub name: Spanned<Ident>,
    pub extends: Option<Spanned<TypeRef>>,
    pub implements: Vec<Spanned<TypeRef>>,
    pub members: Vec<Spanned<ClassMember>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub name: Spanned<Ident>,
    pub extends: Vec<Spanned<TypeRef>>,
    /// Only [`ClassMember::Method`] entries without a body.
    pub members: Vec<Spanned<ClassMember>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub name: Spanned<Ident>,
    pub constants: Vec<Spanned<Ident>>,
    /// `enum E { A, B, }`
    pub trailing_comma: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDecl {
    pub name: Spanned<Ident>,
    /// The SObject type the trigger is bound to (`on Account`).
    pub object: Spanned<Ident>,
    /// Timing/event pairs in source order.
    pub events: Vec<Spanned<TriggerEventId>>,
    pub body: Spanned<Block>,
}

// ============================================================================
// Annotations
// ============================================================================

/// `@Name` or `@Name(key = value ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Spanned<Ident>,
    pub elements: Vec<Spanned<AnnotationElement>>,
    /// Written with an argument list, possibly empty (`@Future()`).
    pub parenthesized: bool,
}

/// One `key = value` pair; `key` is `None` for a single positional value (`@Deprecated('x')`).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationElement {
    pub key: Option<Spanned<Ident>>,
    pub value: Spanned<AnnotationValue>,
    /// A `,` follows this pair; pairs may also be separated by whitespace alone.
    pub comma: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Literal(Literal),
    Array(Vec<Spanned<AnnotationValue>>),
    Annotation(Box<Annotation>),
}

// ============================================================================
// Class members
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(ClassVariable),
    Method(ClassMethod),
    Constructor(ClassConstructor),
    Property(ClassProperty),
    Initializer(InitializerBlock),
    Type(TypeDeclaration),
}

/// `private Integer a = 1, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassVariable {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub ty: Spanned<TypeRef>,
    pub declarators: Vec<Spanned<VariableDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: Spanned<Ident>,
    pub init: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    /// `None` for `void`.
    pub return_type: Option<Spanned<TypeRef>>,
    pub name: Spanned<Ident>,
    pub params: Vec<Spanned<MethodParameter>>,
    /// `None` for abstract and interface methods.
    pub body: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassConstructor {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub name: Spanned<Ident>,
    pub params: Vec<Spanned<MethodParameter>>,
    pub body: Spanned<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameter {
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub ty: Spanned<TypeRef>,
    pub name: Spanned<Ident>,
}

/// `public String name { get; private set { ... } }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProperty {
    pub annotations: Vec<Spanned<Annotation>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub ty: Spanned<TypeRef>,
    pub name: Spanned<Ident>,
    /// One or two accessors in source order, never two of the same kind.
    pub accessors: Vec<Spanned<PropertyAccessor>>,
}

impl ClassProperty {
    pub fn getter(&self) -> Option<&Spanned<PropertyAccessor>> {
        self.accessors.iter().find(|a| a.node.kind == AccessorKind::Get)
    }

    pub fn setter(&self) -> Option<&Spanned<PropertyAccessor>> {
        self.accessors.iter().find(|a| a.node.kind == AccessorKind::Set)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccessor {
    pub kind: AccessorKind,
    pub modifiers: Vec<Spanned<ModifierId>>,
    /// `None` for the automatic form (`get;`).
    pub body: Option<Spanned<Block>>,
}

/// `static { ... }` or an instance initializer `{ ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerBlock {
    pub is_static: bool,
    pub body: Spanned<Block>,
}

// ============================================================================
// Types
// ============================================================================

/// A type reference: `Integer`, `Schema.SObjectType`, `Map<Id, List<Account>>`, `String[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub segments: Vec<Spanned<Ident>>,
    /// Type arguments of the last segment.
    pub arguments: Vec<Spanned<TypeRef>>,
    pub array_dims: usize,
}

impl TypeRef {
    /// The last path segment (`SObjectType` for `Schema.SObjectType`).
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(|s| s.node.as_str()).unwrap_or_default()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", seg.node)?;
        }
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg.node)?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// Dotted name such as `Account.Fields.External_Id__c`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub parts: Vec<Spanned<Ident>>,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.parts.iter().map(|p| p.node.as_str()).collect();
        write!(f, "{}", parts.join("."))
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    LocalVariable(LocalVariableDecl),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    ForEach(ForEachStmt),
    Try(TryStmt),
    Return(Option<Spanned<Expr>>),
    Throw(Spanned<Expr>),
    Break,
    Continue,
    Empty,
    Expr(Spanned<Expr>),
    RunAs(RunAsStmt),
    Dml(DmlStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDecl {
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub ty: Spanned<TypeRef>,
    pub declarators: Vec<Spanned<VariableDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_branch: Box<Spanned<Statement>>,
    pub else_branch: Option<Box<Spanned<Statement>>>,
}

// `else if` links nest one level per branch; unlink them so a long chain drops in a loop.
impl Drop for IfStmt {
    fn drop(&mut self) {
        let mut next = self.else_branch.take();
        while let Some(mut link) = next {
            next = match &mut link.node {
                Statement::If(inner) => inner.else_branch.take(),
                _ => None,
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStmt {
    pub body: Spanned<Block>,
    pub condition: Spanned<Expr>,
}

/// Classic three-part `for (init; condition; update)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub condition: Option<Spanned<Expr>>,
    pub update: Vec<Spanned<Expr>>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(Spanned<LocalVariableDecl>),
    Expressions(Vec<Spanned<Expr>>),
}

/// Enhanced `for (Type name : iterable)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub ty: Spanned<TypeRef>,
    pub name: Spanned<Ident>,
    pub iterable: Spanned<Expr>,
    pub body: Box<Spanned<Statement>>,
}

/// At least one of `catches` / `finally` is present.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub body: Spanned<Block>,
    pub catches: Vec<Spanned<CatchClause>>,
    pub finally: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub ty: Spanned<TypeRef>,
    pub name: Spanned<Ident>,
    pub body: Spanned<Block>,
}

/// `System.runAs(user) { ... }`: a statement, not a method call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunAsStmt {
    pub context: Spanned<Expr>,
    pub body: Spanned<Block>,
}

// ============================================================================
// DML shortcut statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DmlStmt {
    /// `insert`, `update`, `delete`, `undelete`.
    Operation(DmlOperation),
    Upsert(UpsertStmt),
    Merge(MergeStmt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmlOp {
    Insert,
    Update,
    Delete,
    Undelete,
}

impl DmlOp {
    pub fn as_str(self) -> &'static str {
        match self {
            DmlOp::Insert => "insert",
            DmlOp::Update => "update",
            DmlOp::Delete => "delete",
            DmlOp::Undelete => "undelete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DmlOperation {
    pub op: DmlOp,
    pub target: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpsertStmt {
    pub target: Spanned<Expr>,
    /// External-ID field reference (`upsert records Account.Ext_Id__c;`).
    pub external_id: Option<Spanned<QualifiedName>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeStmt {
    pub master: Spanned<Expr>,
    pub duplicate: Spanned<Expr>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Name(Ident),
    This,
    Super,
    Paren(Box<Spanned<Expr>>),
    MemberAccess(MemberAccessExpr),
    MethodCall(MethodCallExpr),
    Index(IndexExpr),
    New(Creator),
    Cast(CastExpr),
    Unary(UnaryExpr),
    Increment(IncrementExpr),
    Binary(BinaryExpr),
    InstanceOf(InstanceOfExpr),
    Ternary(TernaryExpr),
    Assignment(AssignmentExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccessExpr {
    pub object: Box<Spanned<Expr>>,
    pub member: Spanned<Ident>,
}

/// `name(args)` or `receiver.name(args)`. Constructor chaining (`this(...)`, `super(...)`) is a
/// call named `this` / `super` without a receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCallExpr {
    pub receiver: Option<Box<Spanned<Expr>>>,
    pub name: Spanned<Ident>,
    pub args: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: Box<Spanned<Expr>>,
    pub index: Box<Spanned<Expr>>,
}

/// The operand of `new`.
#[derive(Debug, Clone, PartialEq)]
pub struct Creator {
    pub ty: Spanned<TypeRef>,
    pub rest: CreatorRest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreatorRest {
    /// `new Account(Name = 'x')`
    Object(Vec<Spanned<Expr>>),
    /// `new Integer[5]` or `new Integer[]{1, 2}`
    Array {
        size: Option<Box<Spanned<Expr>>>,
        elements: Option<Vec<Spanned<Expr>>>,
    },
    /// `new List<Id>{a, b}` / `new Set<String>{}`
    Collection(Vec<Spanned<Expr>>),
    /// `new Map<String, Integer>{'a' => 1}`
    Map(Vec<Spanned<MapEntry>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub ty: Spanned<TypeRef>,
    pub expr: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    /// `~`
    BitNot,
    /// `!`
    Not,
}

impl UnaryOp {
    pub fn operator(self) -> OperatorId {
        match self {
            UnaryOp::Plus => OperatorId::Plus,
            UnaryOp::Minus => OperatorId::Minus,
            UnaryOp::BitNot => OperatorId::Tilde,
            UnaryOp::Not => OperatorId::Bang,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncrementOp {
    Increment,
    Decrement,
}

impl IncrementOp {
    pub fn operator(self) -> OperatorId {
        match self {
            IncrementOp::Increment => OperatorId::PlusPlus,
            IncrementOp::Decrement => OperatorId::MinusMinus,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncrementExpr {
    pub op: IncrementOp,
    pub prefix: bool,
    pub operand: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    /// `<>`
    LtGt,
    /// `===`
    ExactEq,
    /// `!==`
    ExactNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
}

/// Precedence level of a binary operator, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinaryLevel {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Comparison,
    Shift,
    Additive,
    Multiplicative,
}

impl BinaryOp {
    pub fn level(self) -> BinaryLevel {
        match self {
            BinaryOp::Or => BinaryLevel::LogicalOr,
            BinaryOp::And => BinaryLevel::LogicalAnd,
            BinaryOp::BitOr => BinaryLevel::BitwiseOr,
            BinaryOp::BitXor => BinaryLevel::BitwiseXor,
            BinaryOp::BitAnd => BinaryLevel::BitwiseAnd,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::LtGt | BinaryOp::ExactEq | BinaryOp::ExactNotEq => {
                BinaryLevel::Equality
            }
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => BinaryLevel::Comparison,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => BinaryLevel::Shift,
            BinaryOp::Add | BinaryOp::Sub => BinaryLevel::Additive,
            BinaryOp::Mul | BinaryOp::Div => BinaryLevel::Multiplicative,
        }
    }

    /// Registry entry this operator is spelled with.
    pub fn operator(self) -> OperatorId {
        match self {
            BinaryOp::Or => OperatorId::OrOr,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::BitOr => OperatorId::Pipe,
            BinaryOp::BitXor => OperatorId::Caret,
            BinaryOp::BitAnd => OperatorId::Amp,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::LtGt => OperatorId::LtGt,
            BinaryOp::ExactEq => OperatorId::EqEqEq,
            BinaryOp::ExactNotEq => OperatorId::NotEqEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::Shl => OperatorId::Shl,
            BinaryOp::Shr => OperatorId::Shr,
            BinaryOp::UShr => OperatorId::UShr,
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
        }
    }

    pub fn as_str(self) -> &'static str {
        operators::as_str(self.operator())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Spanned<Expr>>,
    pub op: BinaryOp,
    pub right: Box<Spanned<Expr>>,
}

// Operator and postfix chains nest one level per operand, so the derived drop would recurse once
// per term. These impls move chained operands onto a heap stack before they are dropped.

impl Drop for BinaryExpr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        unlink_chain(&mut self.left, &mut pending);
        unlink_chain(&mut self.right, &mut pending);
        drain_chains(pending);
    }
}

impl Drop for MemberAccessExpr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        unlink_chain(&mut self.object, &mut pending);
        drain_chains(pending);
    }
}

impl Drop for MethodCallExpr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Some(receiver) = &mut self.receiver {
            unlink_chain(receiver, &mut pending);
        }
        drain_chains(pending);
    }
}

impl Drop for IndexExpr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        unlink_chain(&mut self.object, &mut pending);
        drain_chains(pending);
    }
}

fn is_chain(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Binary(_) | Expr::MemberAccess(_) | Expr::MethodCall(_) | Expr::Index(_)
    )
}

/// Swaps a chained operand for a `null` placeholder and queues it.
fn unlink_chain(slot: &mut Box<Spanned<Expr>>, pending: &mut Vec<Box<Spanned<Expr>>>) {
    if is_chain(&slot.node) {
        let placeholder = Box::new(Spanned::new(Expr::Literal(Literal::Null), slot.span));
        pending.push(std::mem::replace(slot, placeholder));
    }
}

fn drain_chains(mut pending: Vec<Box<Spanned<Expr>>>) {
    while let Some(mut expr) = pending.pop() {
        match &mut expr.node {
            Expr::Binary(b) => {
                unlink_chain(&mut b.left, &mut pending);
                unlink_chain(&mut b.right, &mut pending);
            }
            Expr::MemberAccess(m) => unlink_chain(&mut m.object, &mut pending),
            Expr::MethodCall(c) => {
                if let Some(receiver) = &mut c.receiver {
                    unlink_chain(receiver, &mut pending);
                }
            }
            Expr::Index(i) => unlink_chain(&mut i.object, &mut pending),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOfExpr {
    pub expr: Box<Spanned<Expr>>,
    pub ty: Spanned<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Box<Spanned<Expr>>,
    pub then_expr: Box<Spanned<Expr>>,
    pub else_expr: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
}

impl AssignOp {
    pub fn operator(self) -> OperatorId {
        match self {
            AssignOp::Assign => OperatorId::Eq,
            AssignOp::AddAssign => OperatorId::PlusEq,
            AssignOp::SubAssign => OperatorId::MinusEq,
            AssignOp::MulAssign => OperatorId::StarEq,
            AssignOp::DivAssign => OperatorId::SlashEq,
            AssignOp::AndAssign => OperatorId::AmpEq,
            AssignOp::OrAssign => OperatorId::PipeEq,
            AssignOp::XorAssign => OperatorId::CaretEq,
            AssignOp::ShlAssign => OperatorId::ShlEq,
            AssignOp::ShrAssign => OperatorId::ShrEq,
            AssignOp::UShrAssign => OperatorId::UShrEq,
        }
    }

    pub fn as_str(self) -> &'static str {
        operators::as_str(self.operator())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Box<Spanned<Expr>>,
    pub op: AssignOp,
    pub value: Box<Spanned<Expr>>,
}

// ============================================================================
// Literals
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// `42L`
    Long(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
    /// `[SELECT ...]`
    Soql(QueryLiteral),
    /// `[FIND ...]`
    Sosl(QueryLiteral),
}

/// Opaque embedded query: the raw text between the brackets, byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLiteral {
    pub text: String,
    /// Bind expressions (`:name`, `:acct.Id`) with absolute source spans, colon included.
    pub binds: Vec<Spanned<String>>,
}
