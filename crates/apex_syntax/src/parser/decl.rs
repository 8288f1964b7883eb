/// Declaration parsing.
///
/// Covers the top-level type declaration (class, interface, enum, trigger), class members,
/// annotations and modifiers.
impl<'a> Parser<'a> {
    // ========================================================================
    // Type declarations
    // ========================================================================

    fn type_declaration(&mut self) -> Result<Spanned<TypeDeclaration>, ParseError> {
        if self.check_keyword(KeywordId::Trigger) {
            return self.trigger_declaration();
        }
        let header = self.decl_header()?;
        self.type_declaration_with(header)
    }

    /// Parse `class` / `interface` / `enum` after an already-consumed header.
    fn type_declaration_with(&mut self, header: DeclHeader) -> Result<Spanned<TypeDeclaration>, ParseError> {
        let start = header.start.unwrap_or_else(|| self.current_span());
        let decl = if self.match_keyword(KeywordId::Class) {
            TypeDeclaration::Class(self.class_declaration(header)?)
        } else if self.match_keyword(KeywordId::Interface) {
            TypeDeclaration::Interface(self.interface_declaration(header)?)
        } else if self.match_keyword(KeywordId::Enum) {
            TypeDeclaration::Enum(self.enum_declaration(header)?)
        } else {
            return Err(self.error_expected(["'class'", "'interface'", "'enum'", "'trigger'"]));
        };
        Ok(Spanned::new(decl, self.span_from(start)))
    }

    fn class_declaration(&mut self, header: DeclHeader) -> Result<ClassDecl, ParseError> {
        let name = self.identifier()?;

        let extends = if self.match_keyword(KeywordId::Extends) {
            Some(self.type_ref()?)
        } else {
            None
        };

        let mut implements = Vec::new();
        if self.match_keyword(KeywordId::Implements) {
            implements.push(self.type_ref()?);
            while self.match_punct(PunctuationId::Comma) {
                implements.push(self.type_ref()?);
            }
        }

        self.expect_punct(PunctuationId::LBrace)?;
        let mut members = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            if self.check_punct(PunctuationId::Semicolon) {
                let span = self.advance().span;
                members.push(Spanned::new(ClassMember::Type(TypeDeclaration::Empty), span));
                continue;
            }
            members.push(self.class_member(&name.node)?);
        }
        self.expect_punct(PunctuationId::RBrace)?;

        Ok(ClassDecl {
            annotations: header.annotations,
            modifiers: header.modifiers,
            name,
            extends,
            implements,
            members,
        })
    }

    fn interface_declaration(&mut self, header: DeclHeader) -> Result<InterfaceDecl, ParseError> {
        let name = self.identifier()?;

        let mut extends = Vec::new();
        if self.match_keyword(KeywordId::Extends) {
            extends.push(self.type_ref()?);
            while self.match_punct(PunctuationId::Comma) {
                extends.push(self.type_ref()?);
            }
        }

        self.expect_punct(PunctuationId::LBrace)?;
        let mut members = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            let member_header = self.decl_header()?;
            let start = member_header.start.unwrap_or_else(|| self.current_span());
            let return_type = self.return_type()?;
            let method = self.method_rest(member_header, return_type, false)?;
            members.push(Spanned::new(ClassMember::Method(method), self.span_from(start)));
        }
        self.expect_punct(PunctuationId::RBrace)?;

        Ok(InterfaceDecl {
            annotations: header.annotations,
            modifiers: header.modifiers,
            name,
            extends,
            members,
        })
    }

    fn enum_declaration(&mut self, header: DeclHeader) -> Result<EnumDecl, ParseError> {
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::LBrace)?;
        // A trailing comma after the last constant is accepted.
        let mut constants = Vec::new();
        let mut trailing_comma = false;
        while !self.check_punct(PunctuationId::RBrace) {
            constants.push(self.identifier()?);
            trailing_comma = self.match_punct(PunctuationId::Comma);
            if !trailing_comma {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace)?;

        Ok(EnumDecl {
            annotations: header.annotations,
            modifiers: header.modifiers,
            name,
            constants,
            trailing_comma,
        })
    }

    /// `trigger Name on SObject (event, ...) { ... }`
    fn trigger_declaration(&mut self) -> Result<Spanned<TypeDeclaration>, ParseError> {
        let start = self.expect_keyword(KeywordId::Trigger)?;
        let name = self.identifier()?;
        self.expect_contextual(KeywordId::On)?;
        let object = self.identifier()?;

        self.expect_punct(PunctuationId::LParen)?;
        let mut events = vec![self.trigger_event()?];
        while self.match_punct(PunctuationId::Comma) {
            events.push(self.trigger_event()?);
        }
        self.expect_punct(PunctuationId::RParen)?;

        let body = self.block()?;
        let decl = TriggerDecl {
            name,
            object,
            events,
            body,
        };
        Ok(Spanned::new(TypeDeclaration::Trigger(decl), self.span_from(start)))
    }

    /// One `timing operation` pair, validated against the fixed event set.
    fn trigger_event(&mut self) -> Result<Spanned<TriggerEventId>, ParseError> {
        let start = self.current_span();
        let Some(timing) = self.peek().kind.word().map(str::to_string) else {
            return Err(self.error_expected(["'before'", "'after'"]));
        };
        self.advance();

        if trigger_events::timing_from_str(&timing).is_none() {
            return Err(ParseError::UnknownTriggerEvent { span: start, found: timing });
        }

        let Some(operation) = self.peek().kind.word().map(str::to_string) else {
            return Err(self.error_expected(["'insert'", "'update'", "'delete'", "'undelete'"]));
        };
        self.advance();
        let span = self.span_from(start);

        match trigger_events::from_parts(&timing, &operation) {
            Some(event) => Ok(Spanned::new(event, span)),
            None => Err(ParseError::UnknownTriggerEvent {
                span,
                found: format!("{timing} {operation}"),
            }),
        }
    }

    // ========================================================================
    // Class members
    // ========================================================================

    fn class_member(&mut self, class_name: &str) -> Result<Spanned<ClassMember>, ParseError> {
        let header = self.decl_header()?;
        let start = header.start.unwrap_or_else(|| self.current_span());

        // Initializer blocks: `static { ... }` or `{ ... }`.
        if self.check_punct(PunctuationId::LBrace) {
            let only_static = header.annotations.is_empty()
                && header.modifiers.iter().all(|m| m.node == ModifierId::Static);
            if !only_static {
                return Err(self.error_expected(["type"]));
            }
            let body = self.block()?;
            let init = InitializerBlock {
                is_static: header.has(ModifierId::Static),
                body,
            };
            return Ok(Spanned::new(ClassMember::Initializer(init), self.span_from(start)));
        }

        if self.check_keyword(KeywordId::Class)
            || self.check_keyword(KeywordId::Interface)
            || self.check_keyword(KeywordId::Enum)
        {
            let nested = self.nested(|p| p.type_declaration_with(header))?;
            return Ok(Spanned::new(ClassMember::Type(nested.node), self.span_from(start)));
        }

        // Constructor: the class name directly followed by `(`.
        let names_class = match &self.peek().kind {
            TokenKind::Ident(name) => name.eq_ignore_ascii_case(class_name),
            _ => false,
        };
        if names_class && self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) {
            let ctor = self.constructor_rest(header)?;
            return Ok(Spanned::new(ClassMember::Constructor(ctor), self.span_from(start)));
        }

        if self.check_keyword(KeywordId::Void) {
            let method = self.method_rest(header, None, true)?;
            return Ok(Spanned::new(ClassMember::Method(method), self.span_from(start)));
        }

        let ty = self.type_ref()?;
        if self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) {
            let method = self.method_rest(header, Some(ty), true)?;
            return Ok(Spanned::new(ClassMember::Method(method), self.span_from(start)));
        }

        let name = self.identifier()?;
        let member = if self.check_punct(PunctuationId::LBrace) {
            ClassMember::Property(self.property_rest(header, ty, name)?)
        } else if self.check_op(OperatorId::Eq)
            || self.check_punct(PunctuationId::Comma)
            || self.check_punct(PunctuationId::Semicolon)
        {
            let declarators = self.variable_declarators(name)?;
            self.expect_punct(PunctuationId::Semicolon)?;
            ClassMember::Field(ClassVariable {
                annotations: header.annotations,
                modifiers: header.modifiers,
                ty,
                declarators,
            })
        } else {
            return Err(self.error_expected(["'('", "'{'", "'='", "';'"]));
        };
        Ok(Spanned::new(member, self.span_from(start)))
    }

    /// `void` or a type.
    fn return_type(&mut self) -> Result<Option<Spanned<TypeRef>>, ParseError> {
        if self.check_keyword(KeywordId::Void) {
            Ok(None)
        } else {
            Ok(Some(self.type_ref()?))
        }
    }

    /// Parse `name(params)` and a body (or `;`) after the return type.
    ///
    /// `allow_body` is false for interface members, which must end in `;`.
    fn method_rest(
        &mut self,
        header: DeclHeader,
        return_type: Option<Spanned<TypeRef>>,
        allow_body: bool,
    ) -> Result<ClassMethod, ParseError> {
        if return_type.is_none() {
            self.expect_keyword(KeywordId::Void)?;
        }
        let name = self.identifier()?;
        let params = self.parameters()?;

        let body = if allow_body && self.check_punct(PunctuationId::LBrace) {
            Some(self.block()?)
        } else if self.match_punct(PunctuationId::Semicolon) {
            None
        } else if allow_body {
            return Err(self.error_expected(["'{'", "';'"]));
        } else {
            return Err(self.error_expected(["';'"]));
        };

        Ok(ClassMethod {
            annotations: header.annotations,
            modifiers: header.modifiers,
            return_type,
            name,
            params,
            body,
        })
    }

    fn constructor_rest(&mut self, header: DeclHeader) -> Result<ClassConstructor, ParseError> {
        let name = self.identifier()?;
        let params = self.parameters()?;
        let body = self.block()?;
        Ok(ClassConstructor {
            annotations: header.annotations,
            modifiers: header.modifiers,
            name,
            params,
            body,
        })
    }

    /// `'(' (param (',' param)*)? ')'`
    fn parameters(&mut self) -> Result<Vec<Spanned<MethodParameter>>, ParseError> {
        self.expect_punct(PunctuationId::LParen)?;
        let mut params = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let start = self.current_span();
                let modifiers = self.modifiers_only()?;
                let ty = self.type_ref()?;
                let name = self.identifier()?;
                params.push(Spanned::new(MethodParameter { modifiers, ty, name }, self.span_from(start)));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen)?;
        Ok(params)
    }

    /// `'{' accessor accessor? '}'` after the property name.
    fn property_rest(
        &mut self,
        header: DeclHeader,
        ty: Spanned<TypeRef>,
        name: Spanned<Ident>,
    ) -> Result<ClassProperty, ParseError> {
        self.expect_punct(PunctuationId::LBrace)?;
        let mut accessors: Vec<Spanned<PropertyAccessor>> = Vec::new();

        while !self.check_punct(PunctuationId::RBrace) {
            let start = self.current_span();
            let modifiers = self.modifiers_only()?;
            let kind = if self.check_contextual(KeywordId::Get) {
                AccessorKind::Get
            } else if self.check_contextual(KeywordId::Set) {
                AccessorKind::Set
            } else {
                return Err(self.error_expected(["'get'", "'set'"]));
            };
            if accessors.iter().any(|a| a.node.kind == kind) {
                return Err(self.error_expected(["'}'"]));
            }
            self.advance();

            let body = if self.match_punct(PunctuationId::Semicolon) {
                None
            } else if self.check_punct(PunctuationId::LBrace) {
                Some(self.block()?)
            } else {
                return Err(self.error_expected(["';'", "'{'"]));
            };
            accessors.push(Spanned::new(
                PropertyAccessor { kind, modifiers, body },
                self.span_from(start),
            ));
        }

        if accessors.is_empty() {
            return Err(self.error_expected(["'get'", "'set'"]));
        }
        self.expect_punct(PunctuationId::RBrace)?;

        Ok(ClassProperty {
            annotations: header.annotations,
            modifiers: header.modifiers,
            ty,
            name,
            accessors,
        })
    }

    /// `name ('=' expr)? (',' name ('=' expr)?)*` with the first name already consumed.
    fn variable_declarators(&mut self, first: Spanned<Ident>) -> Result<Vec<Spanned<VariableDeclarator>>, ParseError> {
        let mut declarators = vec![self.variable_declarator_rest(first)?];
        while self.match_punct(PunctuationId::Comma) {
            let name = self.identifier()?;
            declarators.push(self.variable_declarator_rest(name)?);
        }
        Ok(declarators)
    }

    fn variable_declarator_rest(&mut self, name: Spanned<Ident>) -> Result<Spanned<VariableDeclarator>, ParseError> {
        let start = name.span;
        let init = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(Spanned::new(VariableDeclarator { name, init }, self.span_from(start)))
    }

    // ========================================================================
    // Modifiers and annotations
    // ========================================================================

    /// Annotations and modifiers in any order. Duplicated modifiers are rejected.
    fn decl_header(&mut self) -> Result<DeclHeader, ParseError> {
        let mut header = DeclHeader::default();
        loop {
            if self.check_punct(PunctuationId::At) {
                let annotation = self.annotation()?;
                header.start.get_or_insert(annotation.span);
                header.annotations.push(annotation);
            } else if let Some(modifier) = self.modifier()? {
                header.start.get_or_insert(modifier.span);
                push_modifier(&mut header.modifiers, modifier)?;
            } else {
                break;
            }
        }
        Ok(header)
    }

    /// Modifiers without annotations (parameters, locals, accessors, catch clauses).
    fn modifiers_only(&mut self) -> Result<Vec<Spanned<ModifierId>>, ParseError> {
        let mut mods = Vec::new();
        while let Some(modifier) = self.modifier()? {
            push_modifier(&mut mods, modifier)?;
        }
        Ok(mods)
    }

    /// Try to parse one modifier at the cursor.
    fn modifier(&mut self) -> Result<Option<Spanned<ModifierId>>, ParseError> {
        let start = self.current_span();
        let sharing_next = self.peek_at(1).kind.is_contextual(KeywordId::Sharing);

        let id = match &self.peek().kind {
            TokenKind::Keyword(KeywordId::With) => {
                if !sharing_next {
                    self.advance();
                    return Err(self.error_expected(["'sharing'"]));
                }
                ModifierId::WithSharing
            }
            TokenKind::Keyword(kw) => match modifiers::from_keyword(*kw) {
                Some(id) => {
                    self.advance();
                    return Ok(Some(Spanned::new(id, start)));
                }
                None => return Ok(None),
            },
            kind if sharing_next && kind.is_contextual(KeywordId::Without) => ModifierId::WithoutSharing,
            kind if sharing_next && kind.is_contextual(KeywordId::Inherited) => ModifierId::InheritedSharing,
            _ => return Ok(None),
        };

        // Two-word sharing modifier.
        self.advance();
        self.advance();
        Ok(Some(Spanned::new(id, self.span_from(start))))
    }

    /// `'@' Name ('(' elements? ')')?`
    fn annotation(&mut self) -> Result<Spanned<Annotation>, ParseError> {
        let start = self.expect_punct(PunctuationId::At)?;
        let name = self.identifier()?;
        let mut elements = Vec::new();

        let parenthesized = self.match_punct(PunctuationId::LParen);
        if parenthesized {
            let keyed = matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_at(1).kind.is_operator(OperatorId::Eq);
            if keyed {
                // Pairs may be separated by commas or just whitespace.
                while !self.check_punct(PunctuationId::RParen) {
                    let mut pair = self.annotation_pair()?;
                    pair.node.comma = self.match_punct(PunctuationId::Comma);
                    elements.push(pair);
                }
            } else if !self.check_punct(PunctuationId::RParen) {
                let value = self.annotation_value()?;
                self.ensure_value_ends(&value, &[PunctuationId::RParen])?;
                let span = value.span;
                let element = AnnotationElement {
                    key: None,
                    value,
                    comma: false,
                };
                elements.push(Spanned::new(element, span));
            }
            self.expect_punct(PunctuationId::RParen)?;
        }

        let annotation = Annotation {
            name,
            elements,
            parenthesized,
        };
        Ok(Spanned::new(annotation, self.span_from(start)))
    }

    fn annotation_pair(&mut self) -> Result<Spanned<AnnotationElement>, ParseError> {
        let key = self.identifier()?;
        self.expect_op(OperatorId::Eq)?;
        let value = self.annotation_value()?;

        // A pair ends at `,`, `)` or the start of the next `key =`.
        let next_is_key =
            matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_at(1).kind.is_operator(OperatorId::Eq);
        if !next_is_key {
            self.ensure_value_ends(&value, &[PunctuationId::Comma, PunctuationId::RParen])?;
        }

        let span = key.span.merge(value.span);
        let element = AnnotationElement {
            key: Some(key),
            value,
            comma: false,
        };
        Ok(Spanned::new(element, span))
    }

    /// Literal, `{...}` array, or nested annotation.
    fn annotation_value(&mut self) -> Result<Spanned<AnnotationValue>, ParseError> {
        let start = self.current_span();

        if self.check_punct(PunctuationId::At) {
            let nested = self.nested(Self::annotation)?;
            return Ok(Spanned::new(AnnotationValue::Annotation(Box::new(nested.node)), nested.span));
        }

        if self.match_punct(PunctuationId::LBrace) {
            let mut values = Vec::new();
            if !self.check_punct(PunctuationId::RBrace) {
                loop {
                    let value = self.nested(Self::annotation_value)?;
                    self.ensure_value_ends(&value, &[PunctuationId::Comma, PunctuationId::RBrace])?;
                    values.push(value);
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
            }
            self.expect_punct(PunctuationId::RBrace)?;
            return Ok(Spanned::new(AnnotationValue::Array(values), self.span_from(start)));
        }

        let negative = self.check_op(OperatorId::Minus);
        let offset = usize::from(negative);
        let literal = match &self.peek_at(offset).kind {
            TokenKind::Int(v) if negative => Some(Literal::Int(-v)),
            TokenKind::Long(v) if negative => Some(Literal::Long(-v)),
            TokenKind::Float(v) if negative => Some(Literal::Float(-v)),
            _ if negative => None,
            TokenKind::Int(v) => Some(Literal::Int(*v)),
            TokenKind::Long(v) => Some(Literal::Long(*v)),
            TokenKind::Float(v) => Some(Literal::Float(*v)),
            TokenKind::String(s) => Some(Literal::String(s.clone())),
            TokenKind::Keyword(KeywordId::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Some(Literal::Bool(false)),
            TokenKind::Keyword(KeywordId::Null) => Some(Literal::Null),
            _ => None,
        };

        match literal {
            Some(literal) => {
                for _ in 0..=offset {
                    self.advance();
                }
                Ok(Spanned::new(AnnotationValue::Literal(literal), self.span_from(start)))
            }
            None => Err(ParseError::MalformedAnnotationValue {
                span: self.peek_at(offset).span.merge(start),
                reason: format!("{} is not a literal, array or annotation", self.peek_at(offset).kind),
            }),
        }
    }

    /// After a complete value, the next token must be one of `followers`; anything else means the
    /// value was a larger expression than annotations allow.
    fn ensure_value_ends(
        &self,
        value: &Spanned<AnnotationValue>,
        followers: &[PunctuationId],
    ) -> Result<(), ParseError> {
        let next = self.peek();
        if followers.iter().any(|p| next.kind.is_punctuation(*p)) {
            return Ok(());
        }
        Err(ParseError::MalformedAnnotationValue {
            span: value.span.merge(next.span),
            reason: format!("unexpected {} after value", next.kind),
        })
    }
}

fn push_modifier(mods: &mut Vec<Spanned<ModifierId>>, modifier: Spanned<ModifierId>) -> Result<(), ParseError> {
    if mods.iter().any(|m| m.node == modifier.node) {
        return Err(ParseError::DuplicateModifier {
            span: modifier.span,
            modifier: modifiers::as_str(modifier.node).to_string(),
        });
    }
    mods.push(modifier);
    Ok(())
}
