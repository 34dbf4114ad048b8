//! Rendering: a post-order walk where leaves produce text and composites
//! wrap the joined output of their children.

use std::collections::HashMap;

use tracing::instrument;

use crate::domain::arena::{NodeId, NodeKind, NodeTree};
use crate::domain::data::Scalar;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flavor::{CompositeFlavor, LeafFlavor};

/// What a renderer sees of a leaf.
#[derive(Debug, Clone, Copy)]
pub struct LeafView<'a> {
    pub name: &'a str,
    pub flavor: &'a LeafFlavor,
    pub value: Option<&'a Scalar>,
}

/// What a renderer sees of a composite.
#[derive(Debug, Clone, Copy)]
pub struct CompositeView<'a> {
    pub name: &'a str,
    pub flavor: &'a CompositeFlavor,
}

/// Turns node descriptions into text.
///
/// `render_composite` receives the already rendered children in insertion
/// order and decides how to join and wrap them.
pub trait Renderer {
    fn render_leaf(&self, leaf: LeafView<'_>) -> String;

    fn render_composite(&self, composite: CompositeView<'_>, children: Vec<String>) -> String;
}

/// Form markup: labelled inputs, fieldsets with a legend, forms with a heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupRenderer;

impl Renderer for MarkupRenderer {
    fn render_leaf(&self, leaf: LeafView<'_>) -> String {
        let value = leaf.value.map(Scalar::to_string).unwrap_or_default();
        match leaf.flavor {
            LeafFlavor::Input { title, input_type } => format!(
                "<label for=\"{name}\">{title}</label>\n\
                 <input name=\"{name}\" type=\"{input_type}\" value=\"{value}\">\n",
                name = leaf.name,
            ),
            LeafFlavor::Item => format!("<output name=\"{}\">{}</output>\n", leaf.name, value),
        }
    }

    fn render_composite(&self, composite: CompositeView<'_>, children: Vec<String>) -> String {
        let output = children.concat();
        match composite.flavor {
            CompositeFlavor::Branch => output,
            CompositeFlavor::Fieldset { title } => {
                format!("<fieldset><legend>{title}</legend>\n{output}</fieldset>\n")
            }
            CompositeFlavor::Form { title, action } => {
                format!("<form action=\"{action}\">\n<h3>{title}</h3>\n{output}</form>\n")
            }
        }
    }
}

/// Structure-only notation: every leaf is `Leaf`, every composite `Branch(a+b)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchRenderer;

impl Renderer for BranchRenderer {
    fn render_leaf(&self, _leaf: LeafView<'_>) -> String {
        "Leaf".to_string()
    }

    fn render_composite(&self, _composite: CompositeView<'_>, children: Vec<String>) -> String {
        format!("Branch({})", children.join("+"))
    }
}

impl NodeTree {
    /// Renders the subtree at `id` as form markup.
    pub fn render(&self, id: NodeId) -> DomainResult<String> {
        self.render_with(id, &MarkupRenderer)
    }

    /// Renders the subtree at `id` with `renderer`.
    ///
    /// Each node is visited once, after all of its children.
    #[instrument(level = "debug", skip(self, renderer))]
    pub fn render_with<R: Renderer + ?Sized>(&self, id: NodeId, renderer: &R) -> DomainResult<String> {
        self.get_node(id)?;
        let mut rendered: HashMap<NodeId, String> = HashMap::new();

        for (idx, node) in self.iter_postorder(id) {
            let output = match &node.kind {
                NodeKind::Leaf { flavor, value } => renderer.render_leaf(LeafView {
                    name: &node.name,
                    flavor,
                    value: value.as_ref(),
                }),
                NodeKind::Composite { flavor, children } => {
                    let parts = children
                        .iter()
                        .filter_map(|child| rendered.remove(child))
                        .collect();
                    renderer.render_composite(
                        CompositeView {
                            name: &node.name,
                            flavor,
                        },
                        parts,
                    )
                }
            };
            rendered.insert(idx, output);
        }

        rendered.remove(&id).ok_or(DomainError::NodeNotFound(id))
    }
}
