//! Socket declaration for a single node type.
//!
//! A [NodeBuilder] is created fresh for every node type, handed to its
//! [declare](super::registry::NodeType::declare) procedure, then consumed into an immutable
//! [Declaration].

use super::sockets::{Literal, Name, SocketType, SocketValue};

use std::fmt::{self, Display};

use log::debug;

#[derive(Debug, PartialEq, thiserror::Error)]
/// Errors raised while declaring a node type's sockets.
pub enum Error {
    #[error("Duplicate {side} socket `{name}`")]
    /// A socket with this name already exists on the same side of the node.
    DuplicateSocket {
        /// Side the collision happened on.
        side: Side,
        /// Colliding socket name.
        name: Name,
    },

    #[error("Default {} {got} of input `{name}` is not representable as {expected}", .got.kind())]
    /// A default literal does not fit the socket's declared type.
    TypeMismatch {
        /// [Name] of the socket.
        name: Name,
        /// Declared [SocketType].
        expected: SocketType,
        /// Offending literal.
        got: Literal,
    },

    #[error("Invalid {kind} identifier `{text}`")]
    /// Identifier is empty or contains characters other than ASCII alphanumerics and `_`.
    InvalidIdentifier {
        /// What the identifier names.
        kind: IdentifierKind,
        /// The rejected identifier.
        text: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
/// Socket side.
pub enum Side {
    #[allow(missing_docs)]
    #[display(fmt = "input")]
    Input,
    #[allow(missing_docs)]
    #[display(fmt = "output")]
    Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
/// What an identifier names.
pub enum IdentifierKind {
    #[allow(missing_docs)]
    #[display(fmt = "socket")]
    Socket,
    #[allow(missing_docs)]
    #[display(fmt = "node type")]
    NodeType,
}

/// Check that `text` is usable as a serialization key.
pub(crate) fn check_identifier(kind: IdentifierKind, text: &str) -> Result<(), Error> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind,
            text: text.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One input or output of a node type.
pub struct SocketDescriptor {
    /// Stable name, used for connection matching and serialization.
    pub name: Name,
    /// Display label.
    pub label: String,
    /// Declared type.
    pub r#type: SocketType,
    /// Resolved default, only ever set on inputs.
    pub default: Option<SocketValue>,
}

impl SocketDescriptor {
    /// Value used when the socket is left unconnected: the declared default if any, the type's
    /// fallback otherwise.
    pub fn effective_default(&self) -> Option<SocketValue> {
        self.default
            .clone()
            .or_else(|| self.r#type.default_value())
    }
}

impl Display for SocketDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.label, self.r#type)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Ordered socket list of a node type, inputs then outputs.
pub struct Declaration {
    inputs: Vec<SocketDescriptor>,
    outputs: Vec<SocketDescriptor>,
}

#[derive(Clone, Debug, PartialEq)]
/// Names and types of a [Declaration]'s sockets, in declared order.
pub struct Signature {
    /// Input sockets.
    pub input: Vec<(Name, SocketType)>,
    /// Output sockets.
    pub output: Vec<(Name, SocketType)>,
}

impl Declaration {
    /// Input sockets in declared order.
    pub fn inputs(&self) -> &[SocketDescriptor] {
        &self.inputs
    }

    /// Output sockets in declared order.
    pub fn outputs(&self) -> &[SocketDescriptor] {
        &self.outputs
    }

    /// All sockets with their side, inputs first.
    pub fn sockets(&self) -> impl Iterator<Item = (Side, &SocketDescriptor)> {
        self.inputs
            .iter()
            .map(|socket| (Side::Input, socket))
            .chain(self.outputs.iter().map(|socket| (Side::Output, socket)))
    }

    /// Find an input by name.
    pub fn input(&self, name: &str) -> Option<&SocketDescriptor> {
        self.inputs.iter().find(|socket| socket.name == name)
    }

    /// Find an output by name.
    pub fn output(&self, name: &str) -> Option<&SocketDescriptor> {
        self.outputs.iter().find(|socket| socket.name == name)
    }

    /// Get the node's type signature.
    pub fn signature(&self) -> Signature {
        let strip = |sockets: &[SocketDescriptor]| -> Vec<(Name, SocketType)> {
            sockets
                .iter()
                .map(|socket| (socket.name.clone(), socket.r#type))
                .collect()
        };

        Signature {
            input: strip(&self.inputs),
            output: strip(&self.outputs),
        }
    }

    /// Check whether `output` of this node may be linked into `input` of `target`.
    ///
    /// Missing sockets on either side are never linkable.
    pub fn can_link(&self, output: &str, target: &Declaration, input: &str) -> bool {
        match (self.output(output), target.input(input)) {
            (Some(from), Some(to)) => from.r#type.can_link_to(to.r#type),
            _ => false,
        }
    }
}

/// Single-use accumulator for a node type's sockets.
///
/// # Example
///
/// ```
/// use falloff_nodes::node::{declaration::NodeBuilder, sockets::{Literal, SocketType}};
///
/// let mut builder = NodeBuilder::new();
/// builder
///     .fixed_input_with_default("weight", "Weight", SocketType::Float, Literal::Float(1.0))?
///     .fixed_output("falloff", "Falloff", SocketType::Falloff)?;
///
/// let declaration = builder.finish();
/// assert_eq!(declaration.inputs().len(), 1);
/// # Ok::<(), falloff_nodes::node::declaration::Error>(())
/// ```
#[derive(Debug)]
pub struct NodeBuilder {
    declaration: Declaration,
    validate_identifiers: bool,
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder {
    /// Creates an empty builder that validates socket names.
    pub fn new() -> Self {
        Self::with_validation(true)
    }

    /// Creates an empty builder, optionally skipping socket name validation.
    pub fn with_validation(validate_identifiers: bool) -> Self {
        Self {
            declaration: Declaration::default(),
            validate_identifiers,
        }
    }

    /// Append an input socket without a default value.
    pub fn fixed_input(
        &mut self,
        name: &str,
        label: &str,
        r#type: SocketType,
    ) -> Result<&mut Self, Error> {
        self.push(Side::Input, name, label, r#type, None)
    }

    /// Append an input socket with a default value, checked against `type`.
    pub fn fixed_input_with_default(
        &mut self,
        name: &str,
        label: &str,
        r#type: SocketType,
        default: impl Into<Literal>,
    ) -> Result<&mut Self, Error> {
        let literal = default.into();
        let value = r#type.resolve(&literal).ok_or_else(|| Error::TypeMismatch {
            name: name.into(),
            expected: r#type,
            got: literal,
        })?;

        self.push(Side::Input, name, label, r#type, Some(value))
    }

    /// Append an output socket.
    pub fn fixed_output(
        &mut self,
        name: &str,
        label: &str,
        r#type: SocketType,
    ) -> Result<&mut Self, Error> {
        self.push(Side::Output, name, label, r#type, None)
    }

    /// Consume the builder into its [Declaration].
    pub fn finish(self) -> Declaration {
        self.declaration
    }

    fn push(
        &mut self,
        side: Side,
        name: &str,
        label: &str,
        r#type: SocketType,
        default: Option<SocketValue>,
    ) -> Result<&mut Self, Error> {
        if self.validate_identifiers {
            check_identifier(IdentifierKind::Socket, name)?;
        }

        let sockets = match side {
            Side::Input => &mut self.declaration.inputs,
            Side::Output => &mut self.declaration.outputs,
        };

        if sockets.iter().any(|socket| socket.name == name) {
            return Err(Error::DuplicateSocket {
                side,
                name: name.into(),
            });
        }

        let socket = SocketDescriptor {
            name: name.into(),
            label: label.to_string(),
            r#type,
            default,
        };
        debug!("Declared {side} socket {socket}");
        sockets.push(socket);

        Ok(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::vector::Vector;

    #[test]
    fn keeps_declared_order() {
        let mut builder = NodeBuilder::new();
        builder
            .fixed_input("b", "B", SocketType::Float)
            .unwrap()
            .fixed_output("out", "Out", SocketType::Falloff)
            .unwrap()
            .fixed_input("a", "A", SocketType::Vector)
            .unwrap();

        let declaration = builder.finish();
        let names: Vec<_> = declaration
            .sockets()
            .map(|(side, socket)| (side, socket.name.to_string()))
            .collect();

        assert_eq!(
            names,
            vec![
                (Side::Input, "b".to_string()),
                (Side::Input, "a".to_string()),
                (Side::Output, "out".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_input() {
        let mut builder = NodeBuilder::new();
        builder.fixed_input("value", "Value", SocketType::Float).unwrap();

        let result = builder.fixed_input("value", "Other", SocketType::Vector).map(|_| ());
        assert_eq!(
            result,
            Err(Error::DuplicateSocket {
                side: Side::Input,
                name: "value".into(),
            })
        );
    }

    #[test]
    fn duplicate_output() {
        let mut builder = NodeBuilder::new();
        builder.fixed_output("value", "Value", SocketType::Float).unwrap();

        let result = builder.fixed_output("value", "Value", SocketType::Float).map(|_| ());
        assert_eq!(
            result,
            Err(Error::DuplicateSocket {
                side: Side::Output,
                name: "value".into(),
            })
        );
    }

    #[test]
    fn same_name_on_both_sides() {
        let mut builder = NodeBuilder::new();
        assert!(builder
            .fixed_input("value", "Value", SocketType::Float)
            .and_then(|b| b.fixed_output("value", "Value", SocketType::Float))
            .is_ok());
    }

    #[test]
    fn mismatched_default() {
        let mut builder = NodeBuilder::new();
        let result = builder
            .fixed_input_with_default("point", "Point", SocketType::Vector, Literal::Float(1.))
            .map(|_| ());

        assert_eq!(
            result,
            Err(Error::TypeMismatch {
                name: "point".into(),
                expected: SocketType::Vector,
                got: Literal::Float(1.),
            })
        );
        assert!(builder.finish().inputs().is_empty());
    }

    #[test]
    fn mismatch_message_names_literal_kind() {
        let err = Error::TypeMismatch {
            name: "weight".into(),
            expected: SocketType::Float,
            got: Literal::Text("heavy".into()),
        };

        assert_eq!(
            err.to_string(),
            "Default text \"heavy\" of input `weight` is not representable as Float"
        );
    }

    #[test]
    fn invalid_socket_names() {
        for name in ["", "min distance", "é"] {
            let mut builder = NodeBuilder::new();
            assert!(
                matches!(
                    builder.fixed_input(name, "Label", SocketType::Float),
                    Err(Error::InvalidIdentifier {
                        kind: IdentifierKind::Socket,
                        ..
                    })
                ),
                "`{name}` should be rejected"
            );
        }

        let mut builder = NodeBuilder::with_validation(false);
        assert!(builder.fixed_input("min distance", "Label", SocketType::Float).is_ok());
    }

    #[test]
    fn effective_default() {
        let mut builder = NodeBuilder::new();
        builder
            .fixed_input("point", "Point", SocketType::Vector)
            .unwrap()
            .fixed_input_with_default("max", "Max", SocketType::Float, Literal::Integer(2))
            .unwrap()
            .fixed_input("object", "Object", SocketType::Object)
            .unwrap();
        let declaration = builder.finish();

        assert_eq!(
            declaration.input("point").unwrap().effective_default(),
            Some(SocketValue::Vector(Vector::default()))
        );
        assert_eq!(
            declaration.input("max").unwrap().effective_default(),
            Some(SocketValue::Float(2.))
        );
        assert_eq!(declaration.input("object").unwrap().effective_default(), None);
    }

    #[test]
    fn linking() {
        let mut producer = NodeBuilder::new();
        producer.fixed_output("falloff", "Falloff", SocketType::Falloff).unwrap();
        let producer = producer.finish();

        let mut consumer = NodeBuilder::new();
        consumer
            .fixed_input("falloff", "Falloff", SocketType::Falloff)
            .unwrap()
            .fixed_input("weight", "Weight", SocketType::Float)
            .unwrap();
        let consumer = consumer.finish();

        assert!(producer.can_link("falloff", &consumer, "falloff"));
        assert!(!producer.can_link("falloff", &consumer, "weight"));
        assert!(!producer.can_link("missing", &consumer, "falloff"));
        assert!(!producer.can_link("falloff", &consumer, "missing"));
    }
}
