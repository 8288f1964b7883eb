use apex_syntax::ast::*;
use apex_syntax::walk::Listener;
use miette::Diagnostic;
use std::convert::Infallible;
use thiserror::Error;

/// A DML statement that runs once per loop iteration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("'{operation}' statement inside a loop")]
#[diagnostic(
    code(apexscan::dml_in_loop),
    severity(Warning),
    help("collect the records in a list and issue one DML statement after the loop")
)]
pub struct DmlInLoop {
    pub operation: &'static str,
    #[label("runs on every iteration")]
    pub span: Span,
}

/// Reports DML statements nested inside `for`, `while` and `do` loops.
#[derive(Debug, Default)]
pub struct DmlInLoopListener {
    loop_depth: usize,
    findings: Vec<DmlInLoop>,
}

impl DmlInLoopListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings(&self) -> &[DmlInLoop] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<DmlInLoop> {
        self.findings
    }

    fn enter_loop(&mut self) -> Result<(), Infallible> {
        self.loop_depth += 1;
        Ok(())
    }

    fn exit_loop(&mut self) -> Result<(), Infallible> {
        self.loop_depth = self.loop_depth.saturating_sub(1);
        Ok(())
    }

    fn record(&mut self, operation: &'static str, span: Span) -> Result<(), Infallible> {
        if self.loop_depth > 0 {
            self.findings.push(DmlInLoop { operation, span });
        }
        Ok(())
    }
}

impl Listener for DmlInLoopListener {
    type Error = Infallible;

    fn enter_for_stmt(&mut self, _node: &ForStmt, _span: Span) -> Result<(), Infallible> {
        self.enter_loop()
    }

    fn exit_for_stmt(&mut self, _node: &ForStmt, _span: Span) -> Result<(), Infallible> {
        self.exit_loop()
    }

    fn enter_for_each_stmt(&mut self, _node: &ForEachStmt, _span: Span) -> Result<(), Infallible> {
        self.enter_loop()
    }

    fn exit_for_each_stmt(&mut self, _node: &ForEachStmt, _span: Span) -> Result<(), Infallible> {
        self.exit_loop()
    }

    fn enter_while_stmt(&mut self, _node: &WhileStmt, _span: Span) -> Result<(), Infallible> {
        self.enter_loop()
    }

    fn exit_while_stmt(&mut self, _node: &WhileStmt, _span: Span) -> Result<(), Infallible> {
        self.exit_loop()
    }

    fn enter_do_while_stmt(&mut self, _node: &DoWhileStmt, _span: Span) -> Result<(), Infallible> {
        self.enter_loop()
    }

    fn exit_do_while_stmt(&mut self, _node: &DoWhileStmt, _span: Span) -> Result<(), Infallible> {
        self.exit_loop()
    }

    fn enter_dml_operation(&mut self, node: &DmlOperation, span: Span) -> Result<(), Infallible> {
        self.record(node.op.as_str(), span)
    }

    fn enter_dml_upsert(&mut self, _node: &UpsertStmt, span: Span) -> Result<(), Infallible> {
        self.record("upsert", span)
    }

    fn enter_dml_merge(&mut self, _node: &MergeStmt, span: Span) -> Result<(), Infallible> {
        self.record("merge", span)
    }
}
