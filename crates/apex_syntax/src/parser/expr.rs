/// Expression parsing methods.
///
/// This chunk implements the expression grammar using a precedence ladder, loosest first:
/// assignment → ternary → `||` → `&&` → `|` → `^` → `&` → equality → comparison → shift →
/// additive → multiplicative → unary → postfix → primary.
///
/// ## Notes
/// - Every binary level is an iterative left fold, so `a - b - c` groups as `(a - b) - c`.
/// - Assignment and the ternary are right-associative.
/// - `>>`, `>>>`, `>>=` and `>>>=` are assembled here from adjacent `>` / `>=` tokens.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, ParseError> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let target = self.ternary()?;

        let op = match self.composed_gt() {
            Some(ComposedGt::ShrEq) => {
                self.consume_composed(ComposedGt::ShrEq);
                Some(AssignOp::ShrAssign)
            }
            Some(ComposedGt::UShrEq) => {
                self.consume_composed(ComposedGt::UShrEq);
                Some(AssignOp::UShrAssign)
            }
            _ => {
                let op = self.peek().kind.operator_id().and_then(assign_op);
                if op.is_some() {
                    self.advance();
                }
                op
            }
        };

        let Some(op) = op else {
            return Ok(target);
        };
        let value = self.nested(Self::assignment)?;
        let span = target.span.merge(value.span);
        Ok(Spanned::new(
            Expr::Assignment(AssignmentExpr {
                target: Box::new(target),
                op,
                value: Box::new(value),
            }),
            span,
        ))
    }

    fn ternary(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let condition = self.logical_or()?;
        if !self.match_punct(PunctuationId::Question) {
            return Ok(condition);
        }
        let then_expr = self.expression()?;
        self.expect_punct(PunctuationId::Colon)?;
        let else_expr = self.nested(Self::ternary)?;
        let span = condition.span.merge(else_expr.span);
        Ok(Spanned::new(
            Expr::Ternary(TernaryExpr {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            }),
            span,
        ))
    }

    fn logical_or(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.logical_and()?;
        while self.match_op(OperatorId::OrOr) {
            let right = self.logical_and()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn logical_and(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.bitwise_or()?;
        while self.match_op(OperatorId::AndAnd) {
            let right = self.bitwise_or()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn bitwise_or(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.bitwise_xor()?;
        while self.match_op(OperatorId::Pipe) {
            let right = self.bitwise_xor()?;
            left = binary(left, BinaryOp::BitOr, right);
        }
        Ok(left)
    }

    fn bitwise_xor(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.bitwise_and()?;
        while self.match_op(OperatorId::Caret) {
            let right = self.bitwise_and()?;
            left = binary(left, BinaryOp::BitXor, right);
        }
        Ok(left)
    }

    fn bitwise_and(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.equality()?;
        while self.match_op(OperatorId::Amp) {
            let right = self.equality()?;
            left = binary(left, BinaryOp::BitAnd, right);
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.comparison()?;

        loop {
            let op = if self.match_op(OperatorId::EqEq) {
                BinaryOp::Eq
            } else if self.match_op(OperatorId::NotEq) {
                BinaryOp::NotEq
            } else if self.match_op(OperatorId::LtGt) {
                BinaryOp::LtGt
            } else if self.match_op(OperatorId::EqEqEq) {
                BinaryOp::ExactEq
            } else if self.match_op(OperatorId::NotEqEq) {
                BinaryOp::ExactNotEq
            } else {
                break;
            };

            let right = self.comparison()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// Relational operators and `instanceof`, which share a level.
    fn comparison(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.shift()?;

        loop {
            if self.match_keyword(KeywordId::InstanceOf) {
                let ty = self.type_ref()?;
                let span = left.span.merge(ty.span);
                left = Spanned::new(
                    Expr::InstanceOf(InstanceOfExpr {
                        expr: Box::new(left),
                        ty,
                    }),
                    span,
                );
                continue;
            }

            let op = if self.match_op(OperatorId::Lt) {
                BinaryOp::Lt
            } else if self.match_op(OperatorId::LtEq) {
                BinaryOp::LtEq
            } else if self.match_op(OperatorId::GtEq) {
                BinaryOp::GtEq
            } else if self.composed_gt().is_none() && self.match_op(OperatorId::Gt) {
                BinaryOp::Gt
            } else {
                break;
            };

            let right = self.shift()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn shift(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.additive()?;

        loop {
            let op = if self.match_op(OperatorId::Shl) {
                BinaryOp::Shl
            } else {
                match self.composed_gt() {
                    Some(ComposedGt::Shr) => {
                        self.consume_composed(ComposedGt::Shr);
                        BinaryOp::Shr
                    }
                    Some(ComposedGt::UShr) => {
                        self.consume_composed(ComposedGt::UShr);
                        BinaryOp::UShr
                    }
                    _ => break,
                }
            };

            let right = self.additive()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.multiplicative()?;

        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };

            let right = self.multiplicative()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut left = self.unary()?;

        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else {
                break;
            };

            let right = self.unary()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.current_span();

        let op = match self.peek().kind.operator_id() {
            Some(OperatorId::Bang) => Some(UnaryOp::Not),
            Some(OperatorId::Tilde) => Some(UnaryOp::BitNot),
            Some(OperatorId::Plus) => Some(UnaryOp::Plus),
            Some(OperatorId::Minus) => Some(UnaryOp::Minus),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.nested(Self::unary)?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(
                Expr::Unary(UnaryExpr {
                    op,
                    operand: Box::new(operand),
                }),
                span,
            ));
        }

        let inc = match self.peek().kind.operator_id() {
            Some(OperatorId::PlusPlus) => Some(IncrementOp::Increment),
            Some(OperatorId::MinusMinus) => Some(IncrementOp::Decrement),
            _ => None,
        };
        if let Some(op) = inc {
            self.advance();
            let operand = self.nested(Self::unary)?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(
                Expr::Increment(IncrementExpr {
                    op,
                    prefix: true,
                    operand: Box::new(operand),
                }),
                span,
            ));
        }

        if self.is_cast_ahead() {
            self.expect_punct(PunctuationId::LParen)?;
            let ty = self.type_ref()?;
            self.expect_punct(PunctuationId::RParen)?;
            let expr = self.nested(Self::unary)?;
            let span = start.merge(expr.span);
            return Ok(Spanned::new(
                Expr::Cast(CastExpr {
                    ty,
                    expr: Box::new(expr),
                }),
                span,
            ));
        }

        self.postfix()
    }

    /// Member access, calls, indexing and postfix `++` / `--`.
    fn postfix(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let mut expr = self.primary()?;

        loop {
            if self.match_punct(PunctuationId::Dot) {
                let member = self.member_name()?;
                if self.check_punct(PunctuationId::LParen) {
                    let args = self.arguments()?;
                    let span = self.span_from(expr.span);
                    expr = Spanned::new(
                        Expr::MethodCall(MethodCallExpr {
                            receiver: Some(Box::new(expr)),
                            name: member,
                            args,
                        }),
                        span,
                    );
                } else {
                    let span = expr.span.merge(member.span);
                    expr = Spanned::new(
                        Expr::MemberAccess(MemberAccessExpr {
                            object: Box::new(expr),
                            member,
                        }),
                        span,
                    );
                }
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket)?;
                let span = self.span_from(expr.span);
                expr = Spanned::new(
                    Expr::Index(IndexExpr {
                        object: Box::new(expr),
                        index: Box::new(index),
                    }),
                    span,
                );
            } else {
                let op = match self.peek().kind.operator_id() {
                    Some(OperatorId::PlusPlus) => IncrementOp::Increment,
                    Some(OperatorId::MinusMinus) => IncrementOp::Decrement,
                    _ => break,
                };
                self.advance();
                let span = self.span_from(expr.span);
                expr = Spanned::new(
                    Expr::Increment(IncrementExpr {
                        op,
                        prefix: false,
                        operand: Box::new(expr),
                    }),
                    span,
                );
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let start = self.current_span();

        if let Some(literal) = self.try_literal() {
            self.advance();
            return Ok(Spanned::new(Expr::Literal(literal), start));
        }

        match self.peek().kind.keyword_id() {
            Some(KeywordId::This) => return self.this_or_super(Expr::This, "this"),
            Some(KeywordId::Super) => return self.this_or_super(Expr::Super, "super"),
            Some(KeywordId::New) => {
                self.advance();
                let creator = self.creator()?;
                return Ok(Spanned::new(Expr::New(creator), self.span_from(start)));
            }
            // `Trigger.new`, `Trigger.isBefore`: the context variable shares the keyword.
            Some(KeywordId::Trigger) => {
                let name = self.advance().written_word().unwrap_or("trigger").to_string();
                return Ok(Spanned::new(Expr::Name(name), start));
            }
            _ => {}
        }

        if self.match_punct(PunctuationId::LParen) {
            let inner = self.expression()?;
            self.expect_punct(PunctuationId::RParen)?;
            return Ok(Spanned::new(Expr::Paren(Box::new(inner)), self.span_from(start)));
        }

        if matches!(self.peek().kind, TokenKind::Ident(_)) {
            let name = self.identifier()?;
            if self.check_punct(PunctuationId::LParen) {
                let args = self.arguments()?;
                return Ok(Spanned::new(
                    Expr::MethodCall(MethodCallExpr {
                        receiver: None,
                        name,
                        args,
                    }),
                    self.span_from(start),
                ));
            }
            return Ok(Spanned::new(Expr::Name(name.node), name.span));
        }

        Err(self.error_expected(["expression"]))
    }

    /// Literal under the cursor, without consuming it.
    fn try_literal(&self) -> Option<Literal> {
        let literal = match &self.peek().kind {
            TokenKind::Int(v) => Literal::Int(*v),
            TokenKind::Long(v) => Literal::Long(*v),
            TokenKind::Float(v) => Literal::Float(*v),
            TokenKind::String(s) => Literal::String(s.clone()),
            TokenKind::Soql(q) => Literal::Soql(q.clone()),
            TokenKind::Sosl(q) => Literal::Sosl(q.clone()),
            TokenKind::Keyword(KeywordId::True) => Literal::Bool(true),
            TokenKind::Keyword(KeywordId::False) => Literal::Bool(false),
            TokenKind::Keyword(KeywordId::Null) => Literal::Null,
            _ => return None,
        };
        Some(literal)
    }

    /// `this` / `super`, or a constructor chain call `this(...)` / `super(...)`.
    fn this_or_super(&mut self, expr: Expr, name: &str) -> Result<Spanned<Expr>, ParseError> {
        let span = self.advance().span;
        if !self.check_punct(PunctuationId::LParen) {
            return Ok(Spanned::new(expr, span));
        }
        let args = self.arguments()?;
        Ok(Spanned::new(
            Expr::MethodCall(MethodCallExpr {
                receiver: None,
                name: Spanned::new(name.to_string(), span),
                args,
            }),
            self.span_from(span),
        ))
    }

    /// `'(' (expr (',' expr)*)? ')'`
    fn arguments(&mut self) -> Result<Vec<Spanned<Expr>>, ParseError> {
        self.expect_punct(PunctuationId::LParen)?;
        let args = if self.check_punct(PunctuationId::RParen) {
            Vec::new()
        } else {
            self.expression_list()?
        };
        self.expect_punct(PunctuationId::RParen)?;
        Ok(args)
    }

    // ========================================================================
    // Creators (`new ...`)
    // ========================================================================

    fn creator(&mut self) -> Result<Creator, ParseError> {
        let ty = self.type_ref_no_dims()?;

        let rest = if self.check_punct(PunctuationId::LParen) {
            CreatorRest::Object(self.arguments()?)
        } else if self.match_punct(PunctuationId::LBracket) {
            if self.match_punct(PunctuationId::RBracket) {
                self.expect_punct(PunctuationId::LBrace)?;
                let elements = if self.check_punct(PunctuationId::RBrace) {
                    Vec::new()
                } else {
                    self.expression_list()?
                };
                self.expect_punct(PunctuationId::RBrace)?;
                CreatorRest::Array {
                    size: None,
                    elements: Some(elements),
                }
            } else {
                let size = self.expression()?;
                self.expect_punct(PunctuationId::RBracket)?;
                CreatorRest::Array {
                    size: Some(Box::new(size)),
                    elements: None,
                }
            }
        } else if self.match_punct(PunctuationId::LBrace) {
            self.collection_or_map(&ty.node)?
        } else {
            return Err(self.error_expected(["'('", "'['", "'{'"]));
        };

        Ok(Creator { ty, rest })
    }

    /// Body of `new T{...}` after the `{`. `=>` after the first element makes it a map; empty
    /// braces are a map only when the type is spelled `Map`.
    fn collection_or_map(&mut self, ty: &TypeRef) -> Result<CreatorRest, ParseError> {
        if self.match_punct(PunctuationId::RBrace) {
            return Ok(if ty.simple_name().eq_ignore_ascii_case("map") {
                CreatorRest::Map(Vec::new())
            } else {
                CreatorRest::Collection(Vec::new())
            });
        }

        let first = self.expression()?;
        if !self.check_punct(PunctuationId::FatArrow) {
            let mut elements = vec![first];
            while self.match_punct(PunctuationId::Comma) {
                elements.push(self.expression()?);
            }
            self.expect_punct(PunctuationId::RBrace)?;
            return Ok(CreatorRest::Collection(elements));
        }

        let mut entries = vec![self.map_entry_rest(first)?];
        while self.match_punct(PunctuationId::Comma) {
            let key = self.expression()?;
            entries.push(self.map_entry_rest(key)?);
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(CreatorRest::Map(entries))
    }

    fn map_entry_rest(&mut self, key: Spanned<Expr>) -> Result<Spanned<MapEntry>, ParseError> {
        self.expect_punct(PunctuationId::FatArrow)?;
        let value = self.expression()?;
        let span = key.span.merge(value.span);
        Ok(Spanned::new(MapEntry { key, value }, span))
    }
}

fn binary(left: Spanned<Expr>, op: BinaryOp, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.merge(right.span);
    Spanned::new(
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }),
        span,
    )
}

/// Compound assignment operators that arrive as a single token.
fn assign_op(id: OperatorId) -> Option<AssignOp> {
    match id {
        OperatorId::Eq => Some(AssignOp::Assign),
        OperatorId::PlusEq => Some(AssignOp::AddAssign),
        OperatorId::MinusEq => Some(AssignOp::SubAssign),
        OperatorId::StarEq => Some(AssignOp::MulAssign),
        OperatorId::SlashEq => Some(AssignOp::DivAssign),
        OperatorId::AmpEq => Some(AssignOp::AndAssign),
        OperatorId::PipeEq => Some(AssignOp::OrAssign),
        OperatorId::CaretEq => Some(AssignOp::XorAssign),
        OperatorId::ShlEq => Some(AssignOp::ShlAssign),
        _ => None,
    }
}
