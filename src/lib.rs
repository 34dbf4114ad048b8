//! Composite component trees.
//!
//! A [`NodeTree`] stores leaves and composites in an arena. Composites own an
//! ordered, name-keyed set of children; every node keeps a non-owning handle
//! to its parent. Two recursive operations run on any subtree: rendering
//! (post-order, children in insertion order) and data binding (a keyed
//! [`Data`] structure scattered into, or gathered from, the named children).
//!
//! ```ignore
//! let mut tree = NodeTree::new();
//! let form = TreeBuilder::form("product", "Add product", "/product/add")
//!     .input("name", "Name", "text")
//!     .child(TreeBuilder::fieldset("photo", "Product photo").input("caption", "Caption", "text"))
//!     .build(&mut tree)?;
//! tree.set_data(form, &Data::mapping().with("name", "Apple MacBook"))?;
//! println!("{}", tree.render(form)?);
//! ```

pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod util;

pub use domain::{
    BindingPolicy, BranchRenderer, CompositeFlavor, Data, DomainError, DomainResult,
    DuplicateNamePolicy, LeafFlavor, MarkupRenderer, NodeId, NodeKind, NodeTree, Renderer, Scalar,
    TreeBuilder, UnknownKeyPolicy,
};
pub use error::{FormtreeError, FormtreeResult};
