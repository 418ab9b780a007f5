//! Node type declarations: typed sockets, the declaration builder and the node type registry.

pub mod declaration;
pub mod registry;
pub mod sockets;

pub use declaration::{Declaration, NodeBuilder, Side, Signature, SocketDescriptor};
pub use registry::{NodeType, NodeTypeDescriptor, NodeTypeId, NodeTypeRegistry, RegistryConfig};
pub use sockets::{Literal, Name, ObjectRef, SocketType, SocketValue};
