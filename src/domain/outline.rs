use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NodeId, NodeKind, NodeTree};
use crate::domain::error::DomainResult;

impl NodeTree {
    /// Structural view of the subtree at `id` for logs and debugging.
    ///
    /// Composites show as `name/`, leaves as `name` or `name = value`.
    #[instrument(level = "debug", skip(self))]
    pub fn outline(&self, id: NodeId) -> DomainResult<Tree<String>> {
        let node = self.get_node(id)?;
        let label = match &node.kind {
            NodeKind::Composite { .. } => format!("{}/", node.name),
            NodeKind::Leaf {
                value: Some(value), ..
            } => format!("{} = {}", node.name, value),
            NodeKind::Leaf { value: None, .. } => node.name.clone(),
        };

        let leaves = node
            .children()
            .iter()
            .map(|&child| self.outline(child))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Tree::new(label).with_leaves(leaves))
    }
}
