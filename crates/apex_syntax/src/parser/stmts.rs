/// Statement parsing methods.
///
/// This chunk parses blocks and every statement form: control flow, local declarations,
/// expression statements, the DML shortcuts and `System.runAs`.
///
/// ## Notes
/// - Local declarations and expression statements share a prefix (`a.b c;` vs `a.b = c;`); a
///   speculative `type identifier` parse decides between them.
/// - Statement spans include the terminating `;`.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn block(&mut self) -> Result<Spanned<Block>, ParseError> {
        let start = self.expect_punct(PunctuationId::LBrace)?;
        let mut statements = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) {
            if self.is_at_end() {
                return Err(self.error_expected(["'}'"]));
            }
            statements.push(self.statement()?);
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Spanned::new(Block { statements }, self.span_from(start)))
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, ParseError> {
        self.nested(Self::unguarded_statement)
    }

    fn unguarded_statement(&mut self) -> Result<Spanned<Statement>, ParseError> {
        let start = self.current_span();

        let stmt = match self.peek().kind.keyword_id() {
            Some(KeywordId::If) => self.if_stmt()?,
            Some(KeywordId::While) => self.while_stmt()?,
            Some(KeywordId::Do) => self.do_while_stmt()?,
            Some(KeywordId::For) => self.for_stmt()?,
            Some(KeywordId::Try) => self.try_stmt()?,
            Some(KeywordId::Return) => {
                self.advance();
                let value = if self.check_punct(PunctuationId::Semicolon) {
                    None
                } else {
                    Some(self.expression()?)
                };
                self.expect_punct(PunctuationId::Semicolon)?;
                Statement::Return(value)
            }
            Some(KeywordId::Throw) => {
                self.advance();
                let value = self.expression()?;
                self.expect_punct(PunctuationId::Semicolon)?;
                Statement::Throw(value)
            }
            Some(KeywordId::Break) => {
                self.advance();
                self.expect_punct(PunctuationId::Semicolon)?;
                Statement::Break
            }
            Some(KeywordId::Continue) => {
                self.advance();
                self.expect_punct(PunctuationId::Semicolon)?;
                Statement::Continue
            }
            Some(
                KeywordId::Insert
                | KeywordId::Update
                | KeywordId::Upsert
                | KeywordId::Delete
                | KeywordId::Undelete
                | KeywordId::Merge,
            ) => Statement::Dml(self.dml_stmt()?),
            _ => self.simple_statement()?,
        };

        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    /// Blocks, empty statements, `System.runAs`, local declarations and expression statements.
    fn simple_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check_punct(PunctuationId::LBrace) {
            return Ok(Statement::Block(self.block()?.node));
        }
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(Statement::Empty);
        }
        if self.is_run_as_ahead() {
            return Ok(Statement::RunAs(self.run_as_stmt()?));
        }
        if self.is_local_decl_ahead() {
            let decl = self.local_variable_decl()?;
            self.expect_punct(PunctuationId::Semicolon)?;
            return Ok(Statement::LocalVariable(decl.node));
        }
        let expr = self.expression()?;
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(Statement::Expr(expr))
    }

    /// `if (c) s (else if (c) s)* (else s)?`
    ///
    /// The `else if` links are read in a loop and linked up afterwards, so a long dispatch chain
    /// costs one nesting level rather than one per branch.
    fn if_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::If)?;
        let condition = self.paren_expression()?;
        let then_branch = Box::new(self.statement()?);

        let mut links = Vec::new();
        let mut else_branch = None;
        while self.match_keyword(KeywordId::Else) {
            if !self.check_keyword(KeywordId::If) {
                else_branch = Some(Box::new(self.statement()?));
                break;
            }
            let start = self.advance().span;
            let link_condition = self.paren_expression()?;
            let link_then = Box::new(self.statement()?);
            links.push((start, link_condition, link_then));
        }

        while let Some((start, condition, then_branch)) = links.pop() {
            let link = IfStmt {
                condition,
                then_branch,
                else_branch,
            };
            else_branch = Some(Box::new(Spanned::new(Statement::If(link), self.span_from(start))));
        }

        Ok(Statement::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn while_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::While)?;
        let condition = self.paren_expression()?;
        let body = Box::new(self.statement()?);
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    fn do_while_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::Do)?;
        let body = self.block()?;
        self.expect_keyword(KeywordId::While)?;
        let condition = self.paren_expression()?;
        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(Statement::DoWhile(DoWhileStmt { body, condition }))
    }

    /// `for (Type x : items)` or `for (init; condition; update)`.
    fn for_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::For)?;
        self.expect_punct(PunctuationId::LParen)?;

        let is_foreach = self.speculate(|p| {
            p.modifiers_only()?;
            p.type_ref()?;
            p.identifier()?;
            p.expect_punct(PunctuationId::Colon)?;
            Ok(())
        });

        if is_foreach {
            let modifiers = self.modifiers_only()?;
            let ty = self.type_ref()?;
            let name = self.identifier()?;
            self.expect_punct(PunctuationId::Colon)?;
            let iterable = self.expression()?;
            self.expect_punct(PunctuationId::RParen)?;
            let body = Box::new(self.statement()?);
            return Ok(Statement::ForEach(ForEachStmt {
                modifiers,
                ty,
                name,
                iterable,
                body,
            }));
        }

        let init = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else if self.is_local_decl_ahead() {
            Some(ForInit::Declaration(self.local_variable_decl()?))
        } else {
            Some(ForInit::Expressions(self.expression_list()?))
        };
        self.expect_punct(PunctuationId::Semicolon)?;

        let condition = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon)?;

        let update = if self.check_punct(PunctuationId::RParen) {
            Vec::new()
        } else {
            self.expression_list()?
        };
        self.expect_punct(PunctuationId::RParen)?;

        let body = Box::new(self.statement()?);
        Ok(Statement::For(ForStmt {
            init,
            condition,
            update,
            body,
        }))
    }

    fn try_stmt(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(KeywordId::Try)?;
        let body = self.block()?;

        let mut catches = Vec::new();
        while self.check_keyword(KeywordId::Catch) {
            let start = self.current_span();
            self.advance();
            self.expect_punct(PunctuationId::LParen)?;
            let modifiers = self.modifiers_only()?;
            let ty = self.type_ref()?;
            let name = self.identifier()?;
            self.expect_punct(PunctuationId::RParen)?;
            let body = self.block()?;
            catches.push(Spanned::new(
                CatchClause {
                    modifiers,
                    ty,
                    name,
                    body,
                },
                self.span_from(start),
            ));
        }

        let finally = if self.match_keyword(KeywordId::Finally) {
            Some(self.block()?)
        } else {
            None
        };

        if catches.is_empty() && finally.is_none() {
            return Err(self.error_expected(["'catch'", "'finally'"]));
        }
        Ok(Statement::Try(TryStmt { body, catches, finally }))
    }

    // ========================================================================
    // DML and runAs
    // ========================================================================

    fn dml_stmt(&mut self) -> Result<DmlStmt, ParseError> {
        let keyword = self.peek().kind.keyword_id();
        self.advance();

        let stmt = match keyword {
            Some(KeywordId::Upsert) => {
                let target = self.expression()?;
                let external_id = if self.check_punct(PunctuationId::Semicolon) {
                    None
                } else {
                    Some(self.qualified_name()?)
                };
                DmlStmt::Upsert(UpsertStmt { target, external_id })
            }
            Some(KeywordId::Merge) => {
                let master = self.expression()?;
                let duplicate = self.expression()?;
                DmlStmt::Merge(MergeStmt { master, duplicate })
            }
            other => {
                let op = match other {
                    Some(KeywordId::Insert) => DmlOp::Insert,
                    Some(KeywordId::Update) => DmlOp::Update,
                    Some(KeywordId::Delete) => DmlOp::Delete,
                    _ => DmlOp::Undelete,
                };
                let target = self.expression()?;
                DmlStmt::Operation(DmlOperation { op, target })
            }
        };

        self.expect_punct(PunctuationId::Semicolon)?;
        Ok(stmt)
    }

    /// `System.runAs(` with both words matched case-insensitively.
    fn is_run_as_ahead(&self) -> bool {
        self.check_contextual(KeywordId::System)
            && self.peek_at(1).kind.is_punctuation(PunctuationId::Dot)
            && self.peek_at(2).kind.is_contextual(KeywordId::RunAs)
            && self.peek_at(3).kind.is_punctuation(PunctuationId::LParen)
    }

    fn run_as_stmt(&mut self) -> Result<RunAsStmt, ParseError> {
        self.expect_contextual(KeywordId::System)?;
        self.expect_punct(PunctuationId::Dot)?;
        self.expect_contextual(KeywordId::RunAs)?;
        let context = self.paren_expression()?;
        let body = self.block()?;
        Ok(RunAsStmt { context, body })
    }

    // ========================================================================
    // Local declarations
    // ========================================================================

    /// A statement-level modifier, or a `Type name` prefix, announces a local declaration.
    fn is_local_decl_ahead(&mut self) -> bool {
        if self.peek().kind.keyword_id().and_then(modifiers::from_keyword).is_some() {
            return true;
        }
        if !matches!(self.peek().kind, TokenKind::Ident(_)) {
            return false;
        }
        self.speculate(|p| {
            p.type_ref()?;
            p.identifier()?;
            Ok(())
        })
    }

    fn local_variable_decl(&mut self) -> Result<Spanned<LocalVariableDecl>, ParseError> {
        let start = self.current_span();
        let modifiers = self.modifiers_only()?;
        let ty = self.type_ref()?;
        let name = self.identifier()?;
        let declarators = self.variable_declarators(name)?;
        Ok(Spanned::new(
            LocalVariableDecl {
                modifiers,
                ty,
                declarators,
            },
            self.span_from(start),
        ))
    }

    // ========================================================================
    // Shared pieces
    // ========================================================================

    /// `'(' expression ')'`
    fn paren_expression(&mut self) -> Result<Spanned<Expr>, ParseError> {
        self.expect_punct(PunctuationId::LParen)?;
        let expr = self.expression()?;
        self.expect_punct(PunctuationId::RParen)?;
        Ok(expr)
    }

    fn expression_list(&mut self) -> Result<Vec<Spanned<Expr>>, ParseError> {
        let mut exprs = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }
}
