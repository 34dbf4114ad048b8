//! Node flavors: what a leaf or composite *is*, as seen by a renderer.

/// Kind of terminal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafFlavor {
    /// Generic leaf without any presentation attributes
    Item,
    /// Form input with a visible title and an input type (`text`, `file`, ...)
    Input { title: String, input_type: String },
}

impl LeafFlavor {
    pub fn input(title: impl Into<String>, input_type: impl Into<String>) -> Self {
        LeafFlavor::Input {
            title: title.into(),
            input_type: input_type.into(),
        }
    }
}

/// Kind of internal node. Decides how the joined child output is wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeFlavor {
    /// Plain grouping, children are joined without a wrapper
    Branch,
    /// Grouping wrapper with a legend
    Fieldset { title: String },
    /// Top-level container with a heading and a submit target
    Form { title: String, action: String },
}

impl CompositeFlavor {
    pub fn fieldset(title: impl Into<String>) -> Self {
        CompositeFlavor::Fieldset {
            title: title.into(),
        }
    }

    pub fn form(title: impl Into<String>, action: impl Into<String>) -> Self {
        CompositeFlavor::Form {
            title: title.into(),
            action: action.into(),
        }
    }
}
