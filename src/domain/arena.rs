use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::data::Scalar;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flavor::{CompositeFlavor, LeafFlavor};
use crate::domain::policy::{BindingPolicy, DuplicateNamePolicy};

/// Handle to a node in a [`NodeTree`].
///
/// Handles are generational: after a node is discarded its handle no longer
/// resolves, even if the slot is reused.
pub type NodeId = Index;

/// Leaf or composite payload of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Leaf {
        flavor: LeafFlavor,
        /// None until data is bound
        value: Option<Scalar>,
    },
    Composite {
        flavor: CompositeFlavor,
        /// Ordered by insertion; names are unique among these
        children: Vec<NodeId>,
    },
}

/// Tree node in the arena.
#[derive(Debug)]
pub struct TreeNode {
    pub(crate) name: String,
    /// Back reference only. The parent's `children` is the owning edge.
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite { .. })
    }

    /// Children in insertion order; always empty for a leaf.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Composite { children, .. } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }
}

/// Arena holding any number of independent trees.
///
/// Nodes are created detached and become part of a tree through [`NodeTree::add`].
/// Every parentless node is a root. Reads take `&self` and mutations take
/// `&mut self`, so a tree shared across threads needs an outer lock.
#[derive(Debug)]
pub struct NodeTree {
    arena: Arena<TreeNode>,
    policy: BindingPolicy,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    pub fn new() -> Self {
        Self::with_policy(BindingPolicy::default())
    }

    pub fn with_policy(policy: BindingPolicy) -> Self {
        Self {
            arena: Arena::new(),
            policy,
        }
    }

    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: BindingPolicy) {
        self.policy = policy;
    }

    /// Creates a detached leaf without a value.
    #[instrument(level = "trace", skip(self))]
    pub fn leaf(&mut self, name: &str, flavor: LeafFlavor) -> NodeId {
        self.insert(
            name,
            NodeKind::Leaf {
                flavor,
                value: None,
            },
        )
    }

    /// Creates a detached composite without children.
    #[instrument(level = "trace", skip(self))]
    pub fn composite(&mut self, name: &str, flavor: CompositeFlavor) -> NodeId {
        self.insert(
            name,
            NodeKind::Composite {
                flavor,
                children: Vec::new(),
            },
        )
    }

    fn insert(&mut self, name: &str, kind: NodeKind) -> NodeId {
        self.arena.insert(TreeNode {
            name: name.to_string(),
            parent: None,
            kind,
        })
    }

    pub fn get_node(&self, id: NodeId) -> DomainResult<&TreeNode> {
        self.arena.get(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> DomainResult<&mut TreeNode> {
        self.arena.get_mut(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Number of live nodes across all trees.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn is_composite(&self, id: NodeId) -> DomainResult<bool> {
        Ok(self.get_node(id)?.is_composite())
    }

    pub fn name(&self, id: NodeId) -> DomainResult<&str> {
        Ok(self.get_node(id)?.name())
    }

    pub fn parent(&self, id: NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self.get_node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> DomainResult<&[NodeId]> {
        Ok(self.get_node(id)?.children())
    }

    /// Child of `id` called `name`, if any. A leaf has none.
    pub fn child(&self, id: NodeId, name: &str) -> DomainResult<Option<NodeId>> {
        let node = self.get_node(id)?;
        Ok(node
            .children()
            .iter()
            .copied()
            .find(|&c| self.arena.get(c).is_some_and(|n| n.name == name)))
    }

    /// Walks from the parent of `id` up to its root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.arena.get(id).and_then(|n| n.parent),
        }
    }

    /// True when `candidate` lies on the parent chain of `of`.
    pub fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        self.ancestors(of).any(|a| a == candidate)
    }

    /// Resolves a slash-separated path of child names below `id`.
    ///
    /// `find(form, "photo/caption")` returns the `caption` leaf of the `photo`
    /// fieldset. Returns `Ok(None)` if some segment names no child.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: NodeId, path: &str) -> DomainResult<Option<NodeId>> {
        if path.is_empty() || path.split('/').any(str::is_empty) {
            return Err(DomainError::InvalidPath(path.to_string()));
        }
        let mut current = id;
        for segment in path.split('/') {
            match self.child(current, segment)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// All parentless nodes, in arena slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Pre-order walk of the subtree at `id`, children left to right.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, id)
    }

    /// Post-order walk of the subtree at `id`: every node after all its children.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self, id: NodeId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, id)
    }

    /// Number of levels in the subtree at `id`; a lone node has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> DomainResult<usize> {
        self.get_node(id)?;
        Ok(self.calculate_depth(id))
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.arena.get(node_idx) {
            1 + node
                .children()
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Attaches `child` under `parent`, keyed by the child's name.
    ///
    /// A same-named child already present is replaced in place and left
    /// detached, unless the policy rejects duplicates. A child attached
    /// elsewhere is moved. Everything is validated before the first write,
    /// so a failed call leaves the tree untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_node = self.get_node(parent)?;
        if !parent_node.is_composite() {
            return Err(DomainError::NotComposite(parent_node.name.clone()));
        }
        let child_node = self.get_node(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomainError::Cycle {
                child: child_node.name.clone(),
                parent: parent_node.name.clone(),
            });
        }
        if child_node.parent == Some(parent) {
            trace!(child = %child_node.name, "already attached");
            return Ok(());
        }

        let displaced = self.child(parent, &child_node.name)?;
        if displaced.is_some() && self.policy.duplicate_names == DuplicateNamePolicy::Reject {
            return Err(DomainError::DuplicateName {
                parent: parent_node.name.clone(),
                name: child_node.name.clone(),
            });
        }

        self.unlink(child);
        if let NodeKind::Composite { children, .. } = &mut self.get_node_mut(parent)?.kind {
            match displaced.and_then(|d| children.iter().position(|&c| c == d)) {
                Some(pos) => children[pos] = child,
                None => children.push(child),
            }
        }
        if let Some(old) = displaced {
            self.get_node_mut(old)?.parent = None;
            debug!(?old, "replaced same-named child");
        }
        self.get_node_mut(child)?.parent = Some(parent);
        debug!(?child, ?parent, "attached");
        Ok(())
    }

    /// Detaches `child` from `parent`. A no-op if it isn't a child of `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_node = self.get_node(parent)?;
        if !parent_node.is_composite() {
            return Err(DomainError::NotComposite(parent_node.name.clone()));
        }
        if self.arena.get(child).and_then(|c| c.parent) != Some(parent) {
            trace!(?child, "not a child, nothing to remove");
            return Ok(());
        }
        self.unlink(child);
        debug!(?child, ?parent, "detached");
        Ok(())
    }

    /// Detaches `id` from whatever parent it has.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, id: NodeId) -> DomainResult<()> {
        self.get_node(id)?;
        self.unlink(id);
        Ok(())
    }

    /// Drops `id` and its whole subtree from the arena, detaching it first.
    /// Handles into the subtree stop resolving.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: NodeId) -> DomainResult<usize> {
        self.get_node(id)?;
        self.unlink(id);
        let doomed: Vec<NodeId> = self.iter_postorder(id).map(|(idx, _)| idx).collect();
        for idx in &doomed {
            self.arena.remove(*idx);
        }
        debug!(count = doomed.len(), "discarded subtree");
        Ok(doomed.len())
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.arena.get(child).and_then(|c| c.parent) else {
            return;
        };
        if let Some(TreeNode {
            kind: NodeKind::Composite { children, .. },
            ..
        }) = self.arena.get_mut(parent)
        {
            children.retain(|&c| c != child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
        }
    }
}

/// Iterator over the parent chain of a node.
pub struct Ancestors<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.arena.get(current).and_then(|n| n.parent);
        Some(current)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a NodeTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a NodeTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children().iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
