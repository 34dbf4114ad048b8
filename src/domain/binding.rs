//! Data binding: scatter a keyed `Data` structure into the tree and gather
//! it back out.

use indexmap::IndexMap;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, NodeKind, NodeTree};
use crate::domain::data::{Data, Scalar};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::policy::UnknownKeyPolicy;

impl NodeTree {
    /// Current value of a leaf. Composites have no value of their own.
    pub fn value(&self, id: NodeId) -> DomainResult<Option<&Scalar>> {
        let node = self.get_node(id)?;
        match &node.kind {
            NodeKind::Leaf { value, .. } => Ok(value.as_ref()),
            NodeKind::Composite { .. } => Err(DomainError::TypeMismatch {
                node: node.name.clone(),
                expected: "scalar",
                found: "mapping",
            }),
        }
    }

    /// Snapshot of the data held by the subtree at `id`.
    ///
    /// A leaf yields its value, or `None` if it was never assigned one. A
    /// composite always yields a mapping keyed by child name in insertion
    /// order; children holding no data (unset leaves, composites with
    /// nothing set below them) are left out.
    #[instrument(level = "debug", skip(self))]
    pub fn get_data(&self, id: NodeId) -> DomainResult<Option<Data>> {
        let node = self.get_node(id)?;
        match &node.kind {
            NodeKind::Leaf { value, .. } => Ok(value.clone().map(Data::Scalar)),
            NodeKind::Composite { children, .. } => {
                let mut map = IndexMap::new();
                for &child in children {
                    let child_name = self.name(child)?;
                    match self.get_data(child)? {
                        Some(Data::Mapping(m)) if m.is_empty() => {}
                        Some(data) => {
                            map.insert(child_name.to_string(), data);
                        }
                        None => {}
                    }
                }
                Ok(Some(Data::Mapping(map)))
            }
        }
    }

    /// Binds `input` into the subtree at `id`.
    ///
    /// A leaf takes a scalar. A composite takes a mapping and recurses only
    /// into the children named by its keys; unnamed children keep their
    /// values. Keys naming no child are skipped, or rejected under
    /// [`UnknownKeyPolicy::Reject`]. The input is checked against the whole
    /// subtree first, so on error nothing has been written.
    #[instrument(level = "debug", skip(self, input))]
    pub fn set_data(&mut self, id: NodeId, input: &Data) -> DomainResult<()> {
        self.validate_data(id, input)?;
        self.apply_data(id, input)?;
        debug!(?id, "data bound");
        Ok(())
    }

    fn validate_data(&self, id: NodeId, input: &Data) -> DomainResult<()> {
        let node = self.get_node(id)?;
        match (&node.kind, input) {
            (NodeKind::Leaf { .. }, Data::Scalar(_)) => Ok(()),
            (NodeKind::Leaf { .. }, Data::Mapping(_)) => Err(DomainError::TypeMismatch {
                node: node.name.clone(),
                expected: "scalar",
                found: input.kind_name(),
            }),
            (NodeKind::Composite { .. }, Data::Scalar(_)) => Err(DomainError::TypeMismatch {
                node: node.name.clone(),
                expected: "mapping",
                found: input.kind_name(),
            }),
            (NodeKind::Composite { .. }, Data::Mapping(entries)) => {
                for (key, value) in entries {
                    match self.child(id, key)? {
                        Some(child) => self.validate_data(child, value)?,
                        None if self.policy().unknown_keys == UnknownKeyPolicy::Reject => {
                            return Err(DomainError::UnknownKey {
                                node: node.name.clone(),
                                key: key.clone(),
                            });
                        }
                        None => {}
                    }
                }
                Ok(())
            }
        }
    }

    fn apply_data(&mut self, id: NodeId, input: &Data) -> DomainResult<()> {
        match input {
            Data::Scalar(scalar) => {
                if let NodeKind::Leaf { value, .. } = &mut self.get_node_mut(id)?.kind {
                    trace!(?id, %scalar, "set leaf value");
                    *value = Some(scalar.clone());
                }
            }
            Data::Mapping(entries) => {
                for (key, value) in entries {
                    match self.child(id, key)? {
                        Some(child) => self.apply_data(child, value)?,
                        None => debug!(?id, %key, "ignoring unknown key"),
                    }
                }
            }
        }
        Ok(())
    }
}
