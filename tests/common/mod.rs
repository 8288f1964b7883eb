//! Helpers shared by the integration tests.
#![allow(dead_code)]

use apex_core::lang::keywords;
use apexscan::ast::{CompilationUnit, Span};
use apexscan::format::format_unit;
use apexscan::lexer::{self, Token, TokenKind};
use apexscan::parser;
use apexscan::walk::{self, Listener, NodeKind, NodeRef, Visitor, visit_children};
use std::convert::Infallible;

/// Listener that records the shape of a walk.
#[derive(Debug, Default)]
pub struct Trace {
    pub entered: usize,
    pub exited: usize,
    pub max_depth: usize,
    /// Set when an exit did not match the innermost open enter.
    pub mismatched: bool,
    pub leaves: Vec<(NodeKind, Span)>,
    pub kinds: Vec<NodeKind>,
    open: Vec<(NodeKind, Span)>,
}

impl Trace {
    pub fn is_balanced(&self) -> bool {
        !self.mismatched && self.open.is_empty() && self.entered == self.exited
    }
}

impl Listener for Trace {
    type Error = Infallible;

    fn enter_every_node(&mut self, node: NodeRef<'_>) -> Result<(), Infallible> {
        self.entered += 1;
        self.open.push((node.kind(), node.span));
        self.max_depth = self.max_depth.max(self.open.len());
        self.kinds.push(node.kind());
        if node.is_leaf() {
            self.leaves.push((node.kind(), node.span));
        }
        Ok(())
    }

    fn exit_every_node(&mut self, node: NodeRef<'_>) -> Result<(), Infallible> {
        self.exited += 1;
        if self.open.pop() != Some((node.kind(), node.span)) {
            self.mismatched = true;
        }
        Ok(())
    }
}

pub fn trace(unit: &CompilationUnit) -> Trace {
    let mut trace = Trace::default();
    match walk::walk(unit, &mut trace) {
        Ok(()) => trace,
        Err(never) => match never {},
    }
}

/// Visitor that counts every node through explicit `visit_children` recursion.
pub struct CountingVisitor;

impl Visitor for CountingVisitor {
    type Output = usize;
    type Error = Infallible;

    fn default_result(&mut self) -> usize {
        0
    }

    fn aggregate_result(&mut self, aggregate: usize, next: usize) -> usize {
        aggregate + next
    }

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<usize, Infallible> {
        Ok(1 + visit_children(self, node)?)
    }
}

pub fn visitor_count(unit: &CompilationUnit) -> usize {
    match walk::visit(unit, &mut CountingVisitor) {
        Ok(n) => n,
        Err(never) => match never {},
    }
}

/// Identifiers the grammar consumes as syntax rather than storing in a leaf.
fn is_structural_word(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Ident(name) => ["get", "set", "on", "system", "runas"]
            .iter()
            .any(|w| name.eq_ignore_ascii_case(w)),
        _ => false,
    }
}

/// Check that the leaves of the parsed tree line up with the identifier and literal tokens.
///
/// Leaves must be token-aligned, in increasing order and disjoint, and every identifier or
/// literal token must sit inside exactly one leaf.
pub fn check_leaf_round_trip(source: &str) -> Result<(), String> {
    let tokens = lexer::lex(source).map_err(|e| format!("lex failed: {e:?}"))?;
    let unit = parser::parse(&tokens).map_err(|e| format!("parse failed: {e}"))?;
    let leaves = trace(&unit).leaves;

    for pair in leaves.windows(2) {
        if pair[0].1.end > pair[1].1.start {
            return Err(format!("leaves overlap or are out of order: {:?} then {:?}", pair[0], pair[1]));
        }
    }

    for (kind, span) in &leaves {
        let starts = tokens.iter().any(|t| t.span.start == span.start);
        let ends = tokens.iter().any(|t| t.span.end == span.end);
        if !(starts && ends) {
            return Err(format!("{kind:?} leaf at {span:?} is not token-aligned"));
        }
    }

    for token in tokens.iter().filter(|t| t.is_leaf_bearing()) {
        if is_structural_word(token) {
            continue;
        }
        let covering = leaves.iter().filter(|(_, span)| span.contains(token.span)).count();
        if covering != 1 {
            return Err(format!(
                "token {:?} '{}' is covered by {covering} leaves",
                token.kind,
                &source[token.span.start..token.span.end]
            ));
        }
    }
    Ok(())
}

/// Token kinds of `source` with the differences printing is allowed to make taken out.
///
/// Reserved words compare by kind alone and contextual words (`Sharing`, `GET`) compare in
/// lowercase, since both are case-insensitive. Query bind spans move with the surrounding layout
/// and are cleared.
pub fn token_shapes(source: &str) -> Result<Vec<TokenKind>, String> {
    let tokens = lexer::lex(source).map_err(|e| format!("lex failed: {e:?}"))?;
    let shapes = tokens
        .into_iter()
        .map(|token| match token.kind {
            TokenKind::Ident(name) if keywords::from_str(&name).is_some() => TokenKind::Ident(name.to_ascii_lowercase()),
            TokenKind::Soql(mut query) => {
                query.binds.iter_mut().for_each(|b| b.span = Span::default());
                TokenKind::Soql(query)
            }
            TokenKind::Sosl(mut query) => {
                query.binds.iter_mut().for_each(|b| b.span = Span::default());
                TokenKind::Sosl(query)
            }
            kind => kind,
        })
        .filter(|kind| !matches!(kind, TokenKind::Eof))
        .collect();
    Ok(shapes)
}

/// Print the parsed tree of `source` and check that the printed text lexes to the same tokens,
/// keywords and operators included, and that member names keep their spelling.
pub fn check_token_round_trip(source: &str) -> Result<(), String> {
    let tokens = lexer::lex(source).map_err(|e| format!("lex failed: {e:?}"))?;
    let unit = parser::parse(&tokens).map_err(|e| format!("parse failed: {e}"))?;
    let printed = format_unit(&unit);

    let expected = token_shapes(source)?;
    let actual = token_shapes(&printed).map_err(|e| format!("{e} in printed source:\n{printed}"))?;
    if let Some(i) = (0..expected.len().max(actual.len())).find(|&i| expected.get(i) != actual.get(i)) {
        return Err(format!(
            "token {i} differs: source has {:?}, printed has {:?}\nprinted source:\n{printed}",
            expected.get(i),
            actual.get(i)
        ));
    }

    let reparsed = parser::parse_source(&printed).map_err(|e| format!("printed source does not parse: {e}"))?;
    if format_unit(&reparsed) != printed {
        return Err(format!("printing is not stable:\n{printed}"));
    }

    let spelled: Vec<&str> = tokens.iter().filter(|t| t.spelling.is_some()).filter_map(Token::written_word).collect();
    let printed_tokens = lexer::lex(&printed).map_err(|e| format!("lex failed: {e:?}"))?;
    for word in spelled {
        let in_member_position = source.contains(&format!(".{word}"));
        if in_member_position && !printed_tokens.iter().any(|t| t.written_word() == Some(word)) {
            return Err(format!("member name '{word}' lost its spelling:\n{printed}"));
        }
    }
    Ok(())
}
