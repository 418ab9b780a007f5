//! Falloff driven by the distance to a point.
//!
//! Mandatory inputs:
//! - point: Vector
//! - min_distance: Float
//!
//! Optional inputs:
//! - max_distance: Float, defaults to 1
//!
//! Output:
//! - falloff: Falloff

use crate::node::{
    declaration::{Error, NodeBuilder},
    registry::NodeType,
    sockets::{Literal, SocketType},
};

#[derive(Clone, Copy, Debug, Default)]
/// Point distance falloff node type.
pub struct PointDistanceFalloffNode;

impl NodeType for PointDistanceFalloffNode {
    fn id(&self) -> &str {
        "fn_PointDistanceFalloffNode"
    }

    fn label(&self) -> &str {
        "Point Distance Falloff"
    }

    fn declare(&self, builder: &mut NodeBuilder) -> Result<(), Error> {
        builder
            .fixed_input("point", "Point", SocketType::Vector)?
            .fixed_input("min_distance", "Min Distance", SocketType::Float)?
            .fixed_input_with_default(
                "max_distance",
                "Max Distance",
                SocketType::Float,
                Literal::Integer(1),
            )?
            .fixed_output("falloff", "Falloff", SocketType::Falloff)?;

        Ok(())
    }
}
