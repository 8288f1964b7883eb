//! Borrowed, uniform view over every tree node.
//!
//! [`NodeRef`] is the one place that knows how each node variant decomposes into children. The
//! listener walk and the visitor dispatch both go through it, so the source order of children is
//! defined exactly once.

use crate::ast::*;
use apex_core::lang::modifiers::ModifierId;
use apex_core::lang::trigger_events::TriggerEventId;

/// Flat discriminant of a node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // Declarations
    CompilationUnit,
    ClassDecl,
    InterfaceDecl,
    EnumDecl,
    TriggerDecl,
    EmptyDecl,
    Annotation,
    AnnotationElement,
    AnnotationArray,
    Modifier,
    TriggerEvent,
    Identifier,
    TypeRef,
    QualifiedName,

    // Members
    ClassVariable,
    VariableDeclarator,
    ClassMethod,
    ClassConstructor,
    MethodParameter,
    ClassProperty,
    PropertyGet,
    PropertySet,
    InitializerBlock,

    // Statements
    Block,
    LocalVariableDecl,
    IfStmt,
    WhileStmt,
    DoWhileStmt,
    ForStmt,
    ForEachStmt,
    TryStmt,
    CatchClause,
    ReturnStmt,
    ThrowStmt,
    BreakStmt,
    ContinueStmt,
    EmptyStmt,
    ExpressionStmt,
    RunAsStmt,
    DmlOperation,
    DmlUpsert,
    DmlMerge,

    // Literals
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    SoqlLiteral,
    SoslLiteral,

    // Expressions
    Name,
    This,
    Super,
    Paren,
    MemberAccess,
    MethodCall,
    Index,
    NewObject,
    NewArray,
    NewCollection,
    NewMap,
    MapEntry,
    Cast,
    Unary,
    Negation,
    PreIncrement,
    PostIncrement,
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
    InstanceOf,
    Ternary,
    Assignment,
}

impl NodeKind {
    /// Stable snake_case name, used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "compilation_unit",
            NodeKind::ClassDecl => "class_decl",
            NodeKind::InterfaceDecl => "interface_decl",
            NodeKind::EnumDecl => "enum_decl",
            NodeKind::TriggerDecl => "trigger_decl",
            NodeKind::EmptyDecl => "empty_decl",
            NodeKind::Annotation => "annotation",
            NodeKind::AnnotationElement => "annotation_element",
            NodeKind::AnnotationArray => "annotation_array",
            NodeKind::Modifier => "modifier",
            NodeKind::TriggerEvent => "trigger_event",
            NodeKind::Identifier => "identifier",
            NodeKind::TypeRef => "type_ref",
            NodeKind::QualifiedName => "qualified_name",
            NodeKind::ClassVariable => "class_variable",
            NodeKind::VariableDeclarator => "variable_declarator",
            NodeKind::ClassMethod => "class_method",
            NodeKind::ClassConstructor => "class_constructor",
            NodeKind::MethodParameter => "method_parameter",
            NodeKind::ClassProperty => "class_property",
            NodeKind::PropertyGet => "property_get",
            NodeKind::PropertySet => "property_set",
            NodeKind::InitializerBlock => "initializer_block",
            NodeKind::Block => "block",
            NodeKind::LocalVariableDecl => "local_variable_decl",
            NodeKind::IfStmt => "if_stmt",
            NodeKind::WhileStmt => "while_stmt",
            NodeKind::DoWhileStmt => "do_while_stmt",
            NodeKind::ForStmt => "for_stmt",
            NodeKind::ForEachStmt => "for_each_stmt",
            NodeKind::TryStmt => "try_stmt",
            NodeKind::CatchClause => "catch_clause",
            NodeKind::ReturnStmt => "return_stmt",
            NodeKind::ThrowStmt => "throw_stmt",
            NodeKind::BreakStmt => "break_stmt",
            NodeKind::ContinueStmt => "continue_stmt",
            NodeKind::EmptyStmt => "empty_stmt",
            NodeKind::ExpressionStmt => "expression_stmt",
            NodeKind::RunAsStmt => "run_as_stmt",
            NodeKind::DmlOperation => "dml_operation",
            NodeKind::DmlUpsert => "dml_upsert",
            NodeKind::DmlMerge => "dml_merge",
            NodeKind::IntLiteral => "int_literal",
            NodeKind::LongLiteral => "long_literal",
            NodeKind::FloatLiteral => "float_literal",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::BooleanLiteral => "boolean_literal",
            NodeKind::NullLiteral => "null_literal",
            NodeKind::SoqlLiteral => "soql_literal",
            NodeKind::SoslLiteral => "sosl_literal",
            NodeKind::Name => "name",
            NodeKind::This => "this",
            NodeKind::Super => "super",
            NodeKind::Paren => "paren",
            NodeKind::MemberAccess => "member_access",
            NodeKind::MethodCall => "method_call",
            NodeKind::Index => "index",
            NodeKind::NewObject => "new_object",
            NodeKind::NewArray => "new_array",
            NodeKind::NewCollection => "new_collection",
            NodeKind::NewMap => "new_map",
            NodeKind::MapEntry => "map_entry",
            NodeKind::Cast => "cast",
            NodeKind::Unary => "unary",
            NodeKind::Negation => "negation",
            NodeKind::PreIncrement => "pre_increment",
            NodeKind::PostIncrement => "post_increment",
            NodeKind::LogicalOr => "logical_or",
            NodeKind::LogicalAnd => "logical_and",
            NodeKind::BitwiseOr => "bitwise_or",
            NodeKind::BitwiseXor => "bitwise_xor",
            NodeKind::BitwiseAnd => "bitwise_and",
            NodeKind::Equality => "equality",
            NodeKind::Comparison => "comparison",
            NodeKind::Shift => "shift",
            NodeKind::Additive => "additive",
            NodeKind::Multiplicative => "multiplicative",
            NodeKind::InstanceOf => "instance_of",
            NodeKind::Ternary => "ternary",
            NodeKind::Assignment => "assignment",
        }
    }

    /// Kinds that never have children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier
                | NodeKind::Name
                | NodeKind::This
                | NodeKind::Super
                | NodeKind::Modifier
                | NodeKind::TriggerEvent
                | NodeKind::IntLiteral
                | NodeKind::LongLiteral
                | NodeKind::FloatLiteral
                | NodeKind::StringLiteral
                | NodeKind::BooleanLiteral
                | NodeKind::NullLiteral
                | NodeKind::SoqlLiteral
                | NodeKind::SoslLiteral
                | NodeKind::EmptyDecl
                | NodeKind::BreakStmt
                | NodeKind::ContinueStmt
                | NodeKind::EmptyStmt
        )
    }
}

/// A node variant together with its payload.
///
/// Binary expressions are split by precedence level, `!` is told apart from the other prefix
/// operators, and the `new` forms and accessor kinds get their own variants, so callbacks can be
/// selected by discriminant alone.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    CompilationUnit(&'a CompilationUnit),
    ClassDecl(&'a ClassDecl),
    InterfaceDecl(&'a InterfaceDecl),
    EnumDecl(&'a EnumDecl),
    TriggerDecl(&'a TriggerDecl),
    EmptyDecl,
    Annotation(&'a Annotation),
    AnnotationElement(&'a AnnotationElement),
    AnnotationArray(&'a [Spanned<AnnotationValue>]),
    Modifier(ModifierId),
    TriggerEvent(TriggerEventId),
    Identifier(&'a str),
    TypeRef(&'a TypeRef),
    QualifiedName(&'a QualifiedName),

    ClassVariable(&'a ClassVariable),
    VariableDeclarator(&'a VariableDeclarator),
    ClassMethod(&'a ClassMethod),
    ClassConstructor(&'a ClassConstructor),
    MethodParameter(&'a MethodParameter),
    ClassProperty(&'a ClassProperty),
    PropertyGet(&'a PropertyAccessor),
    PropertySet(&'a PropertyAccessor),
    InitializerBlock(&'a InitializerBlock),

    Block(&'a Block),
    LocalVariableDecl(&'a LocalVariableDecl),
    IfStmt(&'a IfStmt),
    WhileStmt(&'a WhileStmt),
    DoWhileStmt(&'a DoWhileStmt),
    ForStmt(&'a ForStmt),
    ForEachStmt(&'a ForEachStmt),
    TryStmt(&'a TryStmt),
    CatchClause(&'a CatchClause),
    ReturnStmt(Option<&'a Spanned<Expr>>),
    ThrowStmt(&'a Spanned<Expr>),
    BreakStmt,
    ContinueStmt,
    EmptyStmt,
    ExpressionStmt(&'a Spanned<Expr>),
    RunAsStmt(&'a RunAsStmt),
    DmlOperation(&'a DmlOperation),
    DmlUpsert(&'a UpsertStmt),
    DmlMerge(&'a MergeStmt),

    IntLiteral(i64),
    LongLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(&'a str),
    BooleanLiteral(bool),
    NullLiteral,
    SoqlLiteral(&'a QueryLiteral),
    SoslLiteral(&'a QueryLiteral),

    Name(&'a str),
    This,
    Super,
    Paren(&'a Spanned<Expr>),
    MemberAccess(&'a MemberAccessExpr),
    MethodCall(&'a MethodCallExpr),
    Index(&'a IndexExpr),
    NewObject(&'a Creator),
    NewArray(&'a Creator),
    NewCollection(&'a Creator),
    NewMap(&'a Creator),
    MapEntry(&'a MapEntry),
    Cast(&'a CastExpr),
    /// Prefix `+`, `-` and `~`.
    Unary(&'a UnaryExpr),
    /// Prefix `!`.
    Negation(&'a UnaryExpr),
    PreIncrement(&'a IncrementExpr),
    PostIncrement(&'a IncrementExpr),
    LogicalOr(&'a BinaryExpr),
    LogicalAnd(&'a BinaryExpr),
    BitwiseOr(&'a BinaryExpr),
    BitwiseXor(&'a BinaryExpr),
    BitwiseAnd(&'a BinaryExpr),
    Equality(&'a BinaryExpr),
    Comparison(&'a BinaryExpr),
    Shift(&'a BinaryExpr),
    Additive(&'a BinaryExpr),
    Multiplicative(&'a BinaryExpr),
    InstanceOf(&'a InstanceOfExpr),
    Ternary(&'a TernaryExpr),
    Assignment(&'a AssignmentExpr),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::CompilationUnit(_) => NodeKind::CompilationUnit,
            Node::ClassDecl(_) => NodeKind::ClassDecl,
            Node::InterfaceDecl(_) => NodeKind::InterfaceDecl,
            Node::EnumDecl(_) => NodeKind::EnumDecl,
            Node::TriggerDecl(_) => NodeKind::TriggerDecl,
            Node::EmptyDecl => NodeKind::EmptyDecl,
            Node::Annotation(_) => NodeKind::Annotation,
            Node::AnnotationElement(_) => NodeKind::AnnotationElement,
            Node::AnnotationArray(_) => NodeKind::AnnotationArray,
            Node::Modifier(_) => NodeKind::Modifier,
            Node::TriggerEvent(_) => NodeKind::TriggerEvent,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::TypeRef(_) => NodeKind::TypeRef,
            Node::QualifiedName(_) => NodeKind::QualifiedName,
            Node::ClassVariable(_) => NodeKind::ClassVariable,
            Node::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            Node::ClassMethod(_) => NodeKind::ClassMethod,
            Node::ClassConstructor(_) => NodeKind::ClassConstructor,
            Node::MethodParameter(_) => NodeKind::MethodParameter,
            Node::ClassProperty(_) => NodeKind::ClassProperty,
            Node::PropertyGet(_) => NodeKind::PropertyGet,
            Node::PropertySet(_) => NodeKind::PropertySet,
            Node::InitializerBlock(_) => NodeKind::InitializerBlock,
            Node::Block(_) => NodeKind::Block,
            Node::LocalVariableDecl(_) => NodeKind::LocalVariableDecl,
            Node::IfStmt(_) => NodeKind::IfStmt,
            Node::WhileStmt(_) => NodeKind::WhileStmt,
            Node::DoWhileStmt(_) => NodeKind::DoWhileStmt,
            Node::ForStmt(_) => NodeKind::ForStmt,
            Node::ForEachStmt(_) => NodeKind::ForEachStmt,
            Node::TryStmt(_) => NodeKind::TryStmt,
            Node::CatchClause(_) => NodeKind::CatchClause,
            Node::ReturnStmt(_) => NodeKind::ReturnStmt,
            Node::ThrowStmt(_) => NodeKind::ThrowStmt,
            Node::BreakStmt => NodeKind::BreakStmt,
            Node::ContinueStmt => NodeKind::ContinueStmt,
            Node::EmptyStmt => NodeKind::EmptyStmt,
            Node::ExpressionStmt(_) => NodeKind::ExpressionStmt,
            Node::RunAsStmt(_) => NodeKind::RunAsStmt,
            Node::DmlOperation(_) => NodeKind::DmlOperation,
            Node::DmlUpsert(_) => NodeKind::DmlUpsert,
            Node::DmlMerge(_) => NodeKind::DmlMerge,
            Node::IntLiteral(_) => NodeKind::IntLiteral,
            Node::LongLiteral(_) => NodeKind::LongLiteral,
            Node::FloatLiteral(_) => NodeKind::FloatLiteral,
            Node::StringLiteral(_) => NodeKind::StringLiteral,
            Node::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            Node::NullLiteral => NodeKind::NullLiteral,
            Node::SoqlLiteral(_) => NodeKind::SoqlLiteral,
            Node::SoslLiteral(_) => NodeKind::SoslLiteral,
            Node::Name(_) => NodeKind::Name,
            Node::This => NodeKind::This,
            Node::Super => NodeKind::Super,
            Node::Paren(_) => NodeKind::Paren,
            Node::MemberAccess(_) => NodeKind::MemberAccess,
            Node::MethodCall(_) => NodeKind::MethodCall,
            Node::Index(_) => NodeKind::Index,
            Node::NewObject(_) => NodeKind::NewObject,
            Node::NewArray(_) => NodeKind::NewArray,
            Node::NewCollection(_) => NodeKind::NewCollection,
            Node::NewMap(_) => NodeKind::NewMap,
            Node::MapEntry(_) => NodeKind::MapEntry,
            Node::Cast(_) => NodeKind::Cast,
            Node::Unary(_) => NodeKind::Unary,
            Node::Negation(_) => NodeKind::Negation,
            Node::PreIncrement(_) => NodeKind::PreIncrement,
            Node::PostIncrement(_) => NodeKind::PostIncrement,
            Node::LogicalOr(_) => NodeKind::LogicalOr,
            Node::LogicalAnd(_) => NodeKind::LogicalAnd,
            Node::BitwiseOr(_) => NodeKind::BitwiseOr,
            Node::BitwiseXor(_) => NodeKind::BitwiseXor,
            Node::BitwiseAnd(_) => NodeKind::BitwiseAnd,
            Node::Equality(_) => NodeKind::Equality,
            Node::Comparison(_) => NodeKind::Comparison,
            Node::Shift(_) => NodeKind::Shift,
            Node::Additive(_) => NodeKind::Additive,
            Node::Multiplicative(_) => NodeKind::Multiplicative,
            Node::InstanceOf(_) => NodeKind::InstanceOf,
            Node::Ternary(_) => NodeKind::Ternary,
            Node::Assignment(_) => NodeKind::Assignment,
        }
    }
}

/// A node and its source span.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: Node<'a>,
    pub span: Span,
}

impl<'a> NodeRef<'a> {
    pub fn new(node: Node<'a>, span: Span) -> Self {
        Self { node, span }
    }

    pub fn root(unit: &'a CompilationUnit) -> Self {
        Self::new(Node::CompilationUnit(unit), unit.span)
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_leaf(&self) -> bool {
        self.kind().is_leaf()
    }

    // ========================================================================
    // Constructors for recursing into a chosen child
    // ========================================================================

    /// View of a type declaration; nested types reuse this with the member's span.
    pub fn type_decl(decl: &'a TypeDeclaration, span: Span) -> Self {
        let node = match decl {
            TypeDeclaration::Class(c) => Node::ClassDecl(c),
            TypeDeclaration::Interface(i) => Node::InterfaceDecl(i),
            TypeDeclaration::Enum(e) => Node::EnumDecl(e),
            TypeDeclaration::Trigger(t) => Node::TriggerDecl(t),
            TypeDeclaration::Empty => Node::EmptyDecl,
        };
        Self::new(node, span)
    }

    pub fn member(member: &'a Spanned<ClassMember>) -> Self {
        let span = member.span;
        match &member.node {
            ClassMember::Field(f) => Self::new(Node::ClassVariable(f), span),
            ClassMember::Method(m) => Self::new(Node::ClassMethod(m), span),
            ClassMember::Constructor(c) => Self::new(Node::ClassConstructor(c), span),
            ClassMember::Property(p) => Self::new(Node::ClassProperty(p), span),
            ClassMember::Initializer(i) => Self::new(Node::InitializerBlock(i), span),
            ClassMember::Type(t) => Self::type_decl(t, span),
        }
    }

    pub fn block(block: &'a Spanned<Block>) -> Self {
        Self::new(Node::Block(&block.node), block.span)
    }

    pub fn statement(stmt: &'a Spanned<Statement>) -> Self {
        let span = stmt.span;
        let node = match &stmt.node {
            Statement::Block(b) => Node::Block(b),
            Statement::LocalVariable(d) => Node::LocalVariableDecl(d),
            Statement::If(s) => Node::IfStmt(s),
            Statement::While(s) => Node::WhileStmt(s),
            Statement::DoWhile(s) => Node::DoWhileStmt(s),
            Statement::For(s) => Node::ForStmt(s),
            Statement::ForEach(s) => Node::ForEachStmt(s),
            Statement::Try(s) => Node::TryStmt(s),
            Statement::Return(value) => Node::ReturnStmt(value.as_ref()),
            Statement::Throw(value) => Node::ThrowStmt(value),
            Statement::Break => Node::BreakStmt,
            Statement::Continue => Node::ContinueStmt,
            Statement::Empty => Node::EmptyStmt,
            Statement::Expr(e) => Node::ExpressionStmt(e),
            Statement::RunAs(r) => Node::RunAsStmt(r),
            Statement::Dml(DmlStmt::Operation(op)) => Node::DmlOperation(op),
            Statement::Dml(DmlStmt::Upsert(u)) => Node::DmlUpsert(u),
            Statement::Dml(DmlStmt::Merge(m)) => Node::DmlMerge(m),
        };
        Self::new(node, span)
    }

    pub fn expr(expr: &'a Spanned<Expr>) -> Self {
        let span = expr.span;
        let node = match &expr.node {
            Expr::Literal(lit) => return Self::literal(lit, span),
            Expr::Name(name) => Node::Name(name),
            Expr::This => Node::This,
            Expr::Super => Node::Super,
            Expr::Paren(inner) => Node::Paren(inner),
            Expr::MemberAccess(m) => Node::MemberAccess(m),
            Expr::MethodCall(c) => Node::MethodCall(c),
            Expr::Index(i) => Node::Index(i),
            Expr::New(creator) => match creator.rest {
                CreatorRest::Object(_) => Node::NewObject(creator),
                CreatorRest::Array { .. } => Node::NewArray(creator),
                CreatorRest::Collection(_) => Node::NewCollection(creator),
                CreatorRest::Map(_) => Node::NewMap(creator),
            },
            Expr::Cast(c) => Node::Cast(c),
            Expr::Unary(u) if u.op == UnaryOp::Not => Node::Negation(u),
            Expr::Unary(u) => Node::Unary(u),
            Expr::Increment(i) if i.prefix => Node::PreIncrement(i),
            Expr::Increment(i) => Node::PostIncrement(i),
            Expr::Binary(b) => match b.op.level() {
                BinaryLevel::LogicalOr => Node::LogicalOr(b),
                BinaryLevel::LogicalAnd => Node::LogicalAnd(b),
                BinaryLevel::BitwiseOr => Node::BitwiseOr(b),
                BinaryLevel::BitwiseXor => Node::BitwiseXor(b),
                BinaryLevel::BitwiseAnd => Node::BitwiseAnd(b),
                BinaryLevel::Equality => Node::Equality(b),
                BinaryLevel::Comparison => Node::Comparison(b),
                BinaryLevel::Shift => Node::Shift(b),
                BinaryLevel::Additive => Node::Additive(b),
                BinaryLevel::Multiplicative => Node::Multiplicative(b),
            },
            Expr::InstanceOf(i) => Node::InstanceOf(i),
            Expr::Ternary(t) => Node::Ternary(t),
            Expr::Assignment(a) => Node::Assignment(a),
        };
        Self::new(node, span)
    }

    pub fn literal(literal: &'a Literal, span: Span) -> Self {
        let node = match literal {
            Literal::Int(v) => Node::IntLiteral(*v),
            Literal::Long(v) => Node::LongLiteral(*v),
            Literal::Float(v) => Node::FloatLiteral(*v),
            Literal::String(s) => Node::StringLiteral(s),
            Literal::Bool(b) => Node::BooleanLiteral(*b),
            Literal::Null => Node::NullLiteral,
            Literal::Soql(q) => Node::SoqlLiteral(q),
            Literal::Sosl(q) => Node::SoslLiteral(q),
        };
        Self::new(node, span)
    }

    pub fn ident(ident: &'a Spanned<Ident>) -> Self {
        Self::new(Node::Identifier(&ident.node), ident.span)
    }

    pub fn type_ref(ty: &'a Spanned<TypeRef>) -> Self {
        Self::new(Node::TypeRef(&ty.node), ty.span)
    }

    fn annotation(annotation: &'a Spanned<Annotation>) -> Self {
        Self::new(Node::Annotation(&annotation.node), annotation.span)
    }

    fn annotation_value(value: &'a Spanned<AnnotationValue>) -> Self {
        match &value.node {
            AnnotationValue::Literal(lit) => Self::literal(lit, value.span),
            AnnotationValue::Array(values) => Self::new(Node::AnnotationArray(values), value.span),
            AnnotationValue::Annotation(a) => Self::new(Node::Annotation(a), value.span),
        }
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match self.node {
            Node::CompilationUnit(unit) => {
                out.push(Self::type_decl(&unit.declaration.node, unit.declaration.span));
            }
            Node::ClassDecl(c) => {
                header(&mut out, &c.annotations, &c.modifiers);
                out.push(Self::ident(&c.name));
                out.extend(c.extends.iter().map(Self::type_ref));
                out.extend(c.implements.iter().map(Self::type_ref));
                out.extend(c.members.iter().map(Self::member));
            }
            Node::InterfaceDecl(i) => {
                header(&mut out, &i.annotations, &i.modifiers);
                out.push(Self::ident(&i.name));
                out.extend(i.extends.iter().map(Self::type_ref));
                out.extend(i.members.iter().map(Self::member));
            }
            Node::EnumDecl(e) => {
                header(&mut out, &e.annotations, &e.modifiers);
                out.push(Self::ident(&e.name));
                out.extend(e.constants.iter().map(Self::ident));
            }
            Node::TriggerDecl(t) => {
                out.push(Self::ident(&t.name));
                out.push(Self::ident(&t.object));
                out.extend(t.events.iter().map(|e| Self::new(Node::TriggerEvent(e.node), e.span)));
                out.push(Self::block(&t.body));
            }
            Node::Annotation(a) => {
                out.push(Self::ident(&a.name));
                out.extend(
                    a.elements
                        .iter()
                        .map(|e| Self::new(Node::AnnotationElement(&e.node), e.span)),
                );
            }
            Node::AnnotationElement(e) => {
                out.extend(e.key.iter().map(Self::ident));
                out.push(Self::annotation_value(&e.value));
            }
            Node::AnnotationArray(values) => {
                out.extend(values.iter().map(Self::annotation_value));
            }
            Node::TypeRef(t) => {
                out.extend(t.segments.iter().map(Self::ident));
                out.extend(t.arguments.iter().map(Self::type_ref));
            }
            Node::QualifiedName(q) => {
                out.extend(q.parts.iter().map(Self::ident));
            }

            Node::ClassVariable(f) => {
                header(&mut out, &f.annotations, &f.modifiers);
                out.push(Self::type_ref(&f.ty));
                out.extend(f.declarators.iter().map(declarator));
            }
            Node::VariableDeclarator(d) => {
                out.push(Self::ident(&d.name));
                out.extend(d.init.iter().map(Self::expr));
            }
            Node::ClassMethod(m) => {
                header(&mut out, &m.annotations, &m.modifiers);
                out.extend(m.return_type.iter().map(Self::type_ref));
                out.push(Self::ident(&m.name));
                out.extend(m.params.iter().map(parameter));
                out.extend(m.body.iter().map(Self::block));
            }
            Node::ClassConstructor(c) => {
                header(&mut out, &c.annotations, &c.modifiers);
                out.push(Self::ident(&c.name));
                out.extend(c.params.iter().map(parameter));
                out.push(Self::block(&c.body));
            }
            Node::MethodParameter(p) => {
                out.extend(p.modifiers.iter().map(modifier));
                out.push(Self::type_ref(&p.ty));
                out.push(Self::ident(&p.name));
            }
            Node::ClassProperty(p) => {
                header(&mut out, &p.annotations, &p.modifiers);
                out.push(Self::type_ref(&p.ty));
                out.push(Self::ident(&p.name));
                out.extend(p.accessors.iter().map(|a| {
                    let node = match a.node.kind {
                        AccessorKind::Get => Node::PropertyGet(&a.node),
                        AccessorKind::Set => Node::PropertySet(&a.node),
                    };
                    Self::new(node, a.span)
                }));
            }
            Node::PropertyGet(a) | Node::PropertySet(a) => {
                out.extend(a.modifiers.iter().map(modifier));
                out.extend(a.body.iter().map(Self::block));
            }
            Node::InitializerBlock(i) => {
                out.push(Self::block(&i.body));
            }

            Node::Block(b) => {
                out.extend(b.statements.iter().map(Self::statement));
            }
            Node::LocalVariableDecl(d) => {
                out.extend(d.modifiers.iter().map(modifier));
                out.push(Self::type_ref(&d.ty));
                out.extend(d.declarators.iter().map(declarator));
            }
            Node::IfStmt(s) => {
                out.push(Self::expr(&s.condition));
                out.push(Self::statement(&s.then_branch));
                out.extend(s.else_branch.iter().map(|e| Self::statement(e)));
            }
            Node::WhileStmt(s) => {
                out.push(Self::expr(&s.condition));
                out.push(Self::statement(&s.body));
            }
            Node::DoWhileStmt(s) => {
                out.push(Self::block(&s.body));
                out.push(Self::expr(&s.condition));
            }
            Node::ForStmt(s) => {
                match &s.init {
                    Some(ForInit::Declaration(d)) => out.push(Self::new(Node::LocalVariableDecl(&d.node), d.span)),
                    Some(ForInit::Expressions(exprs)) => out.extend(exprs.iter().map(Self::expr)),
                    None => {}
                }
                out.extend(s.condition.iter().map(Self::expr));
                out.extend(s.update.iter().map(Self::expr));
                out.push(Self::statement(&s.body));
            }
            Node::ForEachStmt(s) => {
                out.extend(s.modifiers.iter().map(modifier));
                out.push(Self::type_ref(&s.ty));
                out.push(Self::ident(&s.name));
                out.push(Self::expr(&s.iterable));
                out.push(Self::statement(&s.body));
            }
            Node::TryStmt(s) => {
                out.push(Self::block(&s.body));
                out.extend(s.catches.iter().map(|c| Self::new(Node::CatchClause(&c.node), c.span)));
                out.extend(s.finally.iter().map(Self::block));
            }
            Node::CatchClause(c) => {
                out.extend(c.modifiers.iter().map(modifier));
                out.push(Self::type_ref(&c.ty));
                out.push(Self::ident(&c.name));
                out.push(Self::block(&c.body));
            }
            Node::ReturnStmt(value) => {
                out.extend(value.map(Self::expr));
            }
            Node::ThrowStmt(value) | Node::ExpressionStmt(value) | Node::Paren(value) => {
                out.push(Self::expr(value));
            }
            Node::RunAsStmt(r) => {
                out.push(Self::expr(&r.context));
                out.push(Self::block(&r.body));
            }
            Node::DmlOperation(op) => {
                out.push(Self::expr(&op.target));
            }
            Node::DmlUpsert(u) => {
                out.push(Self::expr(&u.target));
                out.extend(
                    u.external_id
                        .iter()
                        .map(|q| Self::new(Node::QualifiedName(&q.node), q.span)),
                );
            }
            Node::DmlMerge(m) => {
                out.push(Self::expr(&m.master));
                out.push(Self::expr(&m.duplicate));
            }

            Node::MemberAccess(m) => {
                out.push(Self::expr(&m.object));
                out.push(Self::ident(&m.member));
            }
            Node::MethodCall(c) => {
                out.extend(c.receiver.iter().map(|r| Self::expr(r)));
                out.push(Self::ident(&c.name));
                out.extend(c.args.iter().map(Self::expr));
            }
            Node::Index(i) => {
                out.push(Self::expr(&i.object));
                out.push(Self::expr(&i.index));
            }
            Node::NewObject(c) | Node::NewArray(c) | Node::NewCollection(c) | Node::NewMap(c) => {
                out.push(Self::type_ref(&c.ty));
                match &c.rest {
                    CreatorRest::Object(args) | CreatorRest::Collection(args) => {
                        out.extend(args.iter().map(Self::expr));
                    }
                    CreatorRest::Array { size, elements } => {
                        out.extend(size.iter().map(|s| Self::expr(s)));
                        out.extend(elements.iter().flatten().map(Self::expr));
                    }
                    CreatorRest::Map(entries) => {
                        out.extend(entries.iter().map(|e| Self::new(Node::MapEntry(&e.node), e.span)));
                    }
                }
            }
            Node::MapEntry(e) => {
                out.push(Self::expr(&e.key));
                out.push(Self::expr(&e.value));
            }
            Node::Cast(c) => {
                out.push(Self::type_ref(&c.ty));
                out.push(Self::expr(&c.expr));
            }
            Node::Unary(u) | Node::Negation(u) => {
                out.push(Self::expr(&u.operand));
            }
            Node::PreIncrement(i) | Node::PostIncrement(i) => {
                out.push(Self::expr(&i.operand));
            }
            Node::LogicalOr(b)
            | Node::LogicalAnd(b)
            | Node::BitwiseOr(b)
            | Node::BitwiseXor(b)
            | Node::BitwiseAnd(b)
            | Node::Equality(b)
            | Node::Comparison(b)
            | Node::Shift(b)
            | Node::Additive(b)
            | Node::Multiplicative(b) => {
                out.push(Self::expr(&b.left));
                out.push(Self::expr(&b.right));
            }
            Node::InstanceOf(i) => {
                out.push(Self::expr(&i.expr));
                out.push(Self::type_ref(&i.ty));
            }
            Node::Ternary(t) => {
                out.push(Self::expr(&t.condition));
                out.push(Self::expr(&t.then_expr));
                out.push(Self::expr(&t.else_expr));
            }
            Node::Assignment(a) => {
                out.push(Self::expr(&a.target));
                out.push(Self::expr(&a.value));
            }

            Node::EmptyDecl
            | Node::Modifier(_)
            | Node::TriggerEvent(_)
            | Node::Identifier(_)
            | Node::BreakStmt
            | Node::ContinueStmt
            | Node::EmptyStmt
            | Node::IntLiteral(_)
            | Node::LongLiteral(_)
            | Node::FloatLiteral(_)
            | Node::StringLiteral(_)
            | Node::BooleanLiteral(_)
            | Node::NullLiteral
            | Node::SoqlLiteral(_)
            | Node::SoslLiteral(_)
            | Node::Name(_)
            | Node::This
            | Node::Super => {}
        }
        out
    }
}

/// Annotations and modifiers may interleave in source, so they are merged by position.
fn header<'a>(out: &mut Vec<NodeRef<'a>>, annotations: &'a [Spanned<Annotation>], modifiers: &'a [Spanned<ModifierId>]) {
    let start = out.len();
    out.extend(annotations.iter().map(NodeRef::annotation));
    out.extend(modifiers.iter().map(modifier));
    out[start..].sort_by_key(|n| n.span.start);
}

fn modifier<'a>(m: &Spanned<ModifierId>) -> NodeRef<'a> {
    NodeRef::new(Node::Modifier(m.node), m.span)
}

fn declarator(d: &Spanned<VariableDeclarator>) -> NodeRef<'_> {
    NodeRef::new(Node::VariableDeclarator(&d.node), d.span)
}

fn parameter(p: &Spanned<MethodParameter>) -> NodeRef<'_> {
    NodeRef::new(Node::MethodParameter(&p.node), p.span)
}
