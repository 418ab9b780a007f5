#![warn(missing_docs)]

//! Node type declarations for a node-graph editor. Provides typed socket declaration, a node type
//! registry and the falloff node library.

pub mod falloffs;
pub mod node;
pub mod vector;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        falloffs::FALLOFF_NODES,
        node::{
            declaration::{self, Declaration, NodeBuilder, Side, Signature, SocketDescriptor},
            registry::{
                self, NodeType, NodeTypeDescriptor, NodeTypeId, NodeTypeRegistry, RegistryConfig,
            },
            sockets::{Literal, Name, ObjectRef, SocketType, SocketValue},
        },
        vector::Vector,
    };
}
