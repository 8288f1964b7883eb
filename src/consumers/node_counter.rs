use apex_syntax::walk::{Listener, NodeKind, NodeRef};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Counts nodes by kind.
///
/// With `skip_method_bodies`, the body block of methods, constructors, property accessors and
/// initializers is not counted; everything else is.
#[derive(Debug, Default, Clone)]
pub struct NodeCounter {
    skip_method_bodies: bool,
    counts: BTreeMap<NodeKind, usize>,
    /// Kinds of the nodes between the root and the current one.
    open: Vec<NodeKind>,
    /// Nonzero while inside a skipped body; counts the open nodes within it.
    skipping: usize,
}

impl NodeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipping_method_bodies(skip: bool) -> Self {
        Self {
            skip_method_bodies: skip,
            ..Self::default()
        }
    }

    pub fn counts(&self) -> &BTreeMap<NodeKind, usize> {
        &self.counts
    }

    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `{"total": n, "kinds": {"class_decl": 1, ...}}`
    pub fn to_json(&self) -> serde_json::Value {
        let kinds: serde_json::Map<String, serde_json::Value> = self
            .counts
            .iter()
            .map(|(kind, count)| (kind.as_str().to_string(), serde_json::Value::from(*count)))
            .collect();
        serde_json::json!({
            "total": self.total(),
            "kinds": kinds,
        })
    }
}

fn owns_body(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ClassMethod
            | NodeKind::ClassConstructor
            | NodeKind::PropertyGet
            | NodeKind::PropertySet
            | NodeKind::InitializerBlock
    )
}

impl Listener for NodeCounter {
    type Error = Infallible;

    fn enter_every_node(&mut self, node: NodeRef<'_>) -> Result<(), Infallible> {
        let kind = node.kind();
        if self.skipping > 0 {
            self.skipping += 1;
        } else if self.skip_method_bodies
            && kind == NodeKind::Block
            && self.open.last().is_some_and(|parent| owns_body(*parent))
        {
            self.skipping = 1;
        } else {
            *self.counts.entry(kind).or_default() += 1;
        }
        self.open.push(kind);
        Ok(())
    }

    fn exit_every_node(&mut self, _node: NodeRef<'_>) -> Result<(), Infallible> {
        self.open.pop();
        self.skipping = self.skipping.saturating_sub(1);
        Ok(())
    }
}
