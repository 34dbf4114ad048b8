//! Fluent assembly of trees, bottom-up, through the public `add` operation.

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, NodeTree};
use crate::domain::error::DomainResult;
use crate::domain::flavor::{CompositeFlavor, LeafFlavor};

#[derive(Debug, Clone)]
enum Blueprint {
    Leaf { name: String, flavor: LeafFlavor },
    Composite(TreeBuilder),
}

/// Describes a composite and its children; `build` materializes it.
///
/// ```ignore
/// let form = TreeBuilder::form("product", "Add product", "/product/add")
///     .input("name", "Name", "text")
///     .child(TreeBuilder::fieldset("photo", "Product photo").input("image", "Image", "file"))
///     .build(&mut tree)?;
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    name: String,
    flavor: CompositeFlavor,
    children: Vec<Blueprint>,
}

impl TreeBuilder {
    pub fn new(name: impl Into<String>, flavor: CompositeFlavor) -> Self {
        Self {
            name: name.into(),
            flavor,
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self::new(name, CompositeFlavor::Branch)
    }

    pub fn fieldset(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(name, CompositeFlavor::fieldset(title))
    }

    pub fn form(
        name: impl Into<String>,
        title: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self::new(name, CompositeFlavor::form(title, action))
    }

    pub fn leaf(mut self, name: impl Into<String>, flavor: LeafFlavor) -> Self {
        self.children.push(Blueprint::Leaf {
            name: name.into(),
            flavor,
        });
        self
    }

    pub fn item(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafFlavor::Item)
    }

    pub fn input(
        self,
        name: impl Into<String>,
        title: impl Into<String>,
        input_type: impl Into<String>,
    ) -> Self {
        self.leaf(name, LeafFlavor::input(title, input_type))
    }

    pub fn child(mut self, composite: TreeBuilder) -> Self {
        self.children.push(Blueprint::Composite(composite));
        self
    }

    /// Creates the described nodes in `tree` and returns the detached root.
    ///
    /// If an `add` fails (a duplicate name under the reject policy) the
    /// partially built subtree is discarded before the error is returned.
    #[instrument(level = "debug", skip(self, tree), fields(root = %self.name))]
    pub fn build(self, tree: &mut NodeTree) -> DomainResult<NodeId> {
        let root = tree.composite(&self.name, self.flavor.clone());
        if let Err(e) = self.attach_children(tree, root) {
            tree.discard(root).ok();
            return Err(e);
        }
        debug!(nodes = tree.iter(root).count(), "built tree");
        Ok(root)
    }

    fn attach_children(self, tree: &mut NodeTree, parent: NodeId) -> DomainResult<()> {
        for blueprint in self.children {
            let child = match blueprint {
                Blueprint::Leaf { name, flavor } => tree.leaf(&name, flavor),
                Blueprint::Composite(builder) => {
                    let node = tree.composite(&builder.name, builder.flavor.clone());
                    if let Err(e) = builder.attach_children(tree, node) {
                        tree.discard(node).ok();
                        return Err(e);
                    }
                    node
                }
            };
            let displaced = tree.child(parent, tree.name(child)?)?;
            if let Err(e) = tree.add(parent, child) {
                tree.discard(child).ok();
                return Err(e);
            }
            // Replaced blueprints have no handle outside the builder.
            if let Some(old) = displaced {
                tree.discard(old)?;
            }
        }
        Ok(())
    }
}
