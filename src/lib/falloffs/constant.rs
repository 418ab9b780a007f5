//! Falloff with the same weight everywhere.
//!
//! Inputs:
//! - weight: Float, defaults to 1.0
//!
//! Output:
//! - falloff: Falloff

use crate::node::{
    declaration::{Error, NodeBuilder},
    registry::NodeType,
    sockets::{Literal, SocketType},
};

#[derive(Clone, Copy, Debug, Default)]
/// Constant falloff node type.
pub struct ConstantFalloffNode;

impl NodeType for ConstantFalloffNode {
    fn id(&self) -> &str {
        "fn_ConstantFalloffNode"
    }

    fn label(&self) -> &str {
        "Constant Falloff"
    }

    fn declare(&self, builder: &mut NodeBuilder) -> Result<(), Error> {
        builder
            .fixed_input_with_default("weight", "Weight", SocketType::Float, Literal::Float(1.0))?
            .fixed_output("falloff", "Falloff", SocketType::Falloff)?;

        Ok(())
    }
}
