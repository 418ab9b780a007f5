//! Falloff driven by the distance to an object's mesh.
//!
//! Mandatory inputs:
//! - object: Object
//! - inner_distance: Float
//!
//! Optional inputs:
//! - outer_distance: Float, defaults to 1.0
//!
//! Output:
//! - falloff: Falloff

use crate::node::{
    declaration::{Error, NodeBuilder},
    registry::NodeType,
    sockets::{Literal, SocketType},
};

#[derive(Clone, Copy, Debug, Default)]
/// Mesh distance falloff node type.
pub struct MeshDistanceFalloffNode;

impl NodeType for MeshDistanceFalloffNode {
    fn id(&self) -> &str {
        "fn_MeshDistanceFalloffNode"
    }

    fn label(&self) -> &str {
        "Mesh Distance Falloff"
    }

    fn declare(&self, builder: &mut NodeBuilder) -> Result<(), Error> {
        builder
            .fixed_input("object", "Object", SocketType::Object)?
            .fixed_input("inner_distance", "Inner Distance", SocketType::Float)?
            .fixed_input_with_default(
                "outer_distance",
                "Outer Distance",
                SocketType::Float,
                Literal::Float(1.0),
            )?
            .fixed_output("falloff", "Falloff", SocketType::Falloff)?;

        Ok(())
    }
}
