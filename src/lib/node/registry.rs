//! Registry mapping stable [NodeTypeId]s to node types and their frozen [Declaration]s.

use super::declaration::{self, check_identifier, Declaration, IdentifierKind, NodeBuilder};

use std::{borrow::Borrow, collections::HashMap, fmt::Debug};

use dyn_clone::DynClone;
use log::{error, info};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
/// Wrapper around [String], the stable key of a node type.
pub struct NodeTypeId(String);

impl From<&str> for NodeTypeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&NodeTypeId> for String {
    fn from(id: &NodeTypeId) -> Self {
        id.0.clone()
    }
}

impl Borrow<str> for NodeTypeId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for NodeTypeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
/// [NodeTypeRegistry] error
pub enum Error {
    #[error("Unknown node type `{0}`")]
    /// No node type is registered under this identifier.
    UnknownNodeType(NodeTypeId),

    #[error("Node type `{0}` is already registered")]
    /// Identifier already taken by a previous registration.
    DuplicateNodeType(NodeTypeId),

    #[error("Could not declare node type `{id}`: {source}")]
    /// The node type's declaration failed; it was not registered.
    Declaration {
        /// Node type being registered.
        id: NodeTypeId,
        /// Underlying declaration error.
        source: declaration::Error,
    },
}

impl Error {
    /// Identifier of the node type this error is about.
    pub fn id(&self) -> &NodeTypeId {
        match self {
            Error::UnknownNodeType(id)
            | Error::DuplicateNodeType(id)
            | Error::Declaration { id, .. } => id,
        }
    }
}

/// A kind of node with a fixed socket shape.
///
/// Implementors only describe their sockets; evaluation lives elsewhere and reads the resulting
/// [Declaration].
pub trait NodeType: DynClone + Send + Sync {
    /// Stable identifier, unique within a registry.
    fn id(&self) -> &str;

    /// Human-readable label shown in menus.
    fn label(&self) -> &str;

    /// Declare sockets on a fresh builder.
    fn declare(&self, builder: &mut NodeBuilder) -> Result<(), declaration::Error>;
}

dyn_clone::clone_trait_object!(NodeType);

#[derive(Clone)]
/// A registered node type along with its declaration.
pub struct NodeTypeDescriptor {
    id: NodeTypeId,
    label: String,
    node_type: Box<dyn NodeType>,
    declaration: Declaration,
}

impl NodeTypeDescriptor {
    /// Stable identifier.
    pub fn id(&self) -> &NodeTypeId {
        &self.id
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Socket list built at registration.
    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    /// Node type this descriptor was built from.
    pub fn node_type(&self) -> &dyn NodeType {
        self.node_type.as_ref()
    }
}

impl Debug for NodeTypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTypeDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// [NodeTypeRegistry] settings.
pub struct RegistryConfig {
    /// Reject node type identifiers and socket names that are empty or contain characters other
    /// than ASCII alphanumerics and `_`.
    pub validate_identifiers: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validate_identifiers: true,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
/// Outcome of [NodeTypeRegistry::register_all].
pub struct RegistrationReport {
    /// Node types registered successfully, in order.
    pub registered: Vec<NodeTypeId>,
    /// Node types that failed, with the reason.
    pub failed: Vec<Error>,
}

impl RegistrationReport {
    /// No registration failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
/// Node types keyed by identifier, enumerable in registration order.
///
/// Built once during initialization, then only read.
pub struct NodeTypeRegistry {
    config: RegistryConfig,
    descriptors: Vec<NodeTypeDescriptor>,
    index: HashMap<NodeTypeId, usize>,
}

impl NodeTypeRegistry {
    /// Creates an empty registry with the default [RegistryConfig].
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            descriptors: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Current settings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a node type, running its declaration exactly once.
    ///
    /// Nothing is stored if the declaration fails.
    pub fn register<T: NodeType + 'static>(
        &mut self,
        node_type: T,
    ) -> Result<&NodeTypeDescriptor, Error> {
        self.register_boxed(Box::new(node_type))
    }

    /// Register an already boxed node type, see [register](Self::register).
    pub fn register_boxed(
        &mut self,
        node_type: Box<dyn NodeType>,
    ) -> Result<&NodeTypeDescriptor, Error> {
        let id = NodeTypeId::from(node_type.id());

        if self.config.validate_identifiers {
            check_identifier(IdentifierKind::NodeType, node_type.id()).map_err(|source| {
                Error::Declaration {
                    id: id.clone(),
                    source,
                }
            })?;
        }

        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNodeType(id));
        }

        let mut builder = NodeBuilder::with_validation(self.config.validate_identifiers);
        node_type
            .declare(&mut builder)
            .map_err(|source| Error::Declaration {
                id: id.clone(),
                source,
            })?;
        let declaration = builder.finish();

        info!(
            "Registered node type `{id}` ({} inputs, {} outputs)",
            declaration.inputs().len(),
            declaration.outputs().len()
        );

        let position = self.descriptors.len();
        self.index.insert(id.clone(), position);
        self.descriptors.push(NodeTypeDescriptor {
            label: node_type.label().to_string(),
            id,
            node_type,
            declaration,
        });

        Ok(&self.descriptors[position])
    }

    /// Register every node type independently; a failure is logged and reported without
    /// affecting the others.
    pub fn register_all<I>(&mut self, node_types: I) -> RegistrationReport
    where
        I: IntoIterator<Item = Box<dyn NodeType>>,
    {
        let mut report = RegistrationReport::default();

        for node_type in node_types {
            match self.register_boxed(node_type) {
                Ok(descriptor) => report.registered.push(descriptor.id().clone()),
                Err(err) => {
                    error!("Skipping node type: {err}");
                    report.failed.push(err);
                }
            }
        }

        report
    }

    /// Get the ordered socket list of a registered node type.
    ///
    /// Always returns the declaration built at registration.
    pub fn declare(&self, id: &str) -> Result<&Declaration, Error> {
        self.get(id).map(NodeTypeDescriptor::declaration)
    }

    /// Get a registered node type's descriptor.
    pub fn get(&self, id: &str) -> Result<&NodeTypeDescriptor, Error> {
        self.index
            .get(id)
            .map(|&position| &self.descriptors[position])
            .ok_or_else(|| Error::UnknownNodeType(id.into()))
    }

    /// Check if a node type is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered node types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if no node type is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registered node types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeDescriptor> {
        self.descriptors.iter()
    }
}
