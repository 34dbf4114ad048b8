//! Domain layer: the node tree, data binding and rendering
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod binding;
pub mod builder;
pub mod data;
pub mod error;
pub mod flavor;
pub mod outline;
pub mod policy;
pub mod render;

pub use arena::{Ancestors, NodeId, NodeKind, NodeTree, PostOrderIterator, TreeIterator, TreeNode};
pub use builder::TreeBuilder;
pub use data::{Data, Scalar};
pub use error::{DomainError, DomainResult};
pub use flavor::{CompositeFlavor, LeafFlavor};
pub use policy::{BindingPolicy, DuplicateNamePolicy, ParsePolicyError, UnknownKeyPolicy};
pub use render::{BranchRenderer, CompositeView, LeafView, MarkupRenderer, Renderer};
