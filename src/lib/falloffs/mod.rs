//! Falloff node library: node types producing a [Falloff](crate::node::SocketType::Falloff).

pub mod constant;
pub mod mesh_distance;
pub mod point_distance;

use crate::node::registry::{NodeType, NodeTypeRegistry, RegistrationReport, RegistryConfig};

use lazy_static::lazy_static;

macro_rules! create_library {
    ($($module:ident :: $node:ident),+ $(,)?) => {
        /// Every falloff node type, in menu order.
        pub fn library() -> Vec<Box<dyn NodeType>> {
            vec![
                $(
                    Box::new($module::$node)
                ),+
            ]
        }
    };
}

create_library! {
    constant::ConstantFalloffNode,
    point_distance::PointDistanceFalloffNode,
    mesh_distance::MeshDistanceFalloffNode,
}

/// Build a registry holding the falloff [library], along with the registration outcome.
pub fn registry(config: RegistryConfig) -> (NodeTypeRegistry, RegistrationReport) {
    let mut registry = NodeTypeRegistry::with_config(config);
    let report = registry.register_all(library());

    (registry, report)
}

lazy_static! {
    /// Shared, read-only registry of the falloff node types.
    pub static ref FALLOFF_NODES: NodeTypeRegistry = {
        let (registry, report) = registry(RegistryConfig::default());
        debug_assert!(report.is_complete(), "Built-in falloff nodes failed: {report:?}");
        registry
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::{SocketType, SocketValue};

    #[test]
    fn library_registers_cleanly() {
        let (registry, report) = registry(RegistryConfig::default());

        assert!(report.is_complete(), "{report:?}");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn every_node_outputs_a_falloff() {
        for descriptor in FALLOFF_NODES.iter() {
            let outputs = descriptor.declaration().outputs();

            assert_eq!(outputs.len(), 1, "{}", descriptor.id());
            assert_eq!(outputs[0].name, "falloff");
            assert_eq!(outputs[0].r#type, SocketType::Falloff);
            assert_eq!(outputs[0].default, None);
        }
    }

    #[test]
    fn defaults_match_their_type() {
        for descriptor in FALLOFF_NODES.iter() {
            for socket in descriptor.declaration().inputs() {
                if let Some(default) = &socket.default {
                    assert_eq!(default.r#type(), socket.r#type, "{socket}");
                }
            }
        }

        let constant = FALLOFF_NODES.declare("fn_ConstantFalloffNode").unwrap();
        assert_eq!(
            constant.input("weight").unwrap().default,
            Some(SocketValue::Float(1.))
        );
    }
}
