//! Closed set of socket types, default-value literals and their resolution.

use crate::vector::Vector;

use std::{
    collections::HashMap,
    fmt::{self, Display},
    str::FromStr,
};

use lazy_static::lazy_static;
use map_macro::hash_map;
use paste::paste;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
/// Wrapper around [String], used for socket names.
pub struct Name(String);

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Name> for String {
    fn from(name: &Name) -> Self {
        name.0.clone()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, derive_more::Display)]
/// Reference to a scene object by name.
pub struct ObjectRef(String);

impl ObjectRef {
    /// Name of the referenced object.
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ObjectRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ObjectRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! socket_types {
    {
        valued: $($(#[$vattr:meta])* $name:ident : $type:ty = $default:expr),+ $(,)?;
        opaque: $($(#[$oattr:meta])* $opaque:ident),+ $(,)?
    } => {
        paste! {
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            /// Possible socket types.
            pub enum SocketType {
                $(
                    $(#[$vattr])*
                    $name,
                )+
                $(
                    $(#[$oattr])*
                    $opaque,
                )+
            }

            #[derive(Clone, Debug, PartialEq)]
            /// Resolved value of a socket whose type has a literal form.
            pub enum SocketValue {
                $(
                    $(#[$vattr])*
                    $name($type),
                )+
            }

            impl From<&SocketValue> for SocketType {
                fn from(value: &SocketValue) -> Self {
                    match value {
                        $(
                            SocketValue::$name(_) => Self::$name,
                        )+
                    }
                }
            }

            impl SocketValue {
                /// Get the [SocketType] this value belongs to.
                pub fn r#type(&self) -> SocketType {
                    SocketType::from(self)
                }

                $(
                    #[doc = concat!("Get the contained value if this is a [", stringify!($name), "](SocketValue::", stringify!($name), ").")]
                    pub fn [<as_ $name:snake>](&self) -> Option<&$type> {
                        match self {
                            SocketValue::$name(value) => Some(value),
                            #[allow(unreachable_patterns)]
                            _ => None,
                        }
                    }
                )+
            }

            impl SocketType {
                /// Every socket type, in declaration order.
                pub const ALL: &'static [SocketType] = &[
                    $(SocketType::$name,)+
                    $(SocketType::$opaque,)+
                ];

                /// Stable textual name of the type.
                pub fn name(&self) -> &'static str {
                    match self {
                        $(SocketType::$name => stringify!($name),)+
                        $(SocketType::$opaque => stringify!($opaque),)+
                    }
                }

                /// Whether a default value can be written for sockets of this type.
                pub fn has_literal_form(&self) -> bool {
                    match self {
                        $(SocketType::$name => true,)+
                        $(SocketType::$opaque => false,)+
                    }
                }

                /// Value the host falls back to for an unconnected socket without a declared
                /// default.
                pub fn default_value(&self) -> Option<SocketValue> {
                    match self {
                        $(SocketType::$name => $default,)+
                        $(SocketType::$opaque => None,)+
                    }
                }
            }

            impl FromStr for SocketType {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(match s {
                        $(stringify!($name) => Self::$name,)+
                        $(stringify!($opaque) => Self::$opaque,)+
                        other => Err(format!("Unrecognized socket type `{other}`."))?,
                    })
                }
            }
        }
    };
}

socket_types! {
    valued:
        /// Single floating point value
        Float: f32 = Some(SocketValue::Float(0.)),
        /// Whole number
        Integer: i32 = Some(SocketValue::Integer(0)),
        /// Boolean flag
        Boolean: bool = Some(SocketValue::Boolean(false)),
        /// 3D vector
        Vector: Vector<3, f32> = Some(SocketValue::Vector(Vector::default())),
        /// Reference to a scene object
        Object: ObjectRef = None;
    opaque:
        /// Spatial weighting function, only produced by nodes
        Falloff,
}

impl Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for SocketValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketValue::Float(v) => write!(f, "{v:?}"),
            SocketValue::Integer(v) => write!(f, "{v}"),
            SocketValue::Boolean(v) => write!(f, "{v}"),
            SocketValue::Vector(v) => write!(f, "{v}"),
            SocketValue::Object(v) => write!(f, "\"{v}\""),
        }
    }
}

/// Largest integer magnitude an f32 holds exactly.
const F32_EXACT_INTEGER: u64 = 1 << f32::MANTISSA_DIGITS;

lazy_static! {
    static ref CONVERSIONS: HashMap<SocketType, Vec<SocketType>> = hash_map! {
        SocketType::Integer => vec![SocketType::Float],
        SocketType::Boolean => vec![SocketType::Float, SocketType::Integer],
        SocketType::Float => vec![SocketType::Integer, SocketType::Vector],
    };
}

impl SocketType {
    /// Check whether an output of this type may be linked to an input of type `target`, either
    /// directly or through an implicit conversion.
    pub fn can_link_to(&self, target: SocketType) -> bool {
        *self == target
            || CONVERSIONS
                .get(self)
                .is_some_and(|targets| targets.contains(&target))
    }

    /// Resolve a default [Literal] into a value of this type.
    ///
    /// Returns [None] if the literal is not representable by the type.
    pub fn resolve(&self, literal: &Literal) -> Option<SocketValue> {
        Some(match (self, literal) {
            (SocketType::Float, Literal::Float(v)) => {
                let narrowed = *v as f32;
                if v.is_finite() && !narrowed.is_finite() {
                    return None;
                }
                SocketValue::Float(narrowed)
            }
            (SocketType::Float, Literal::Integer(v)) => {
                // Integers past 2^24 lose precision in f32.
                if v.unsigned_abs() > F32_EXACT_INTEGER {
                    return None;
                }
                SocketValue::Float(*v as f32)
            }
            (SocketType::Integer, Literal::Integer(v)) => {
                SocketValue::Integer(i32::try_from(*v).ok()?)
            }
            (SocketType::Boolean, Literal::Boolean(v)) => SocketValue::Boolean(*v),
            (SocketType::Vector, Literal::Vector(v)) => SocketValue::Vector(Vector::from(*v)),
            (SocketType::Object, Literal::Text(v)) => SocketValue::Object(v.as_str().into()),
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, derive_more::From)]
/// Untyped literal form of a default value, as written in a node declaration.
pub enum Literal {
    #[allow(missing_docs)]
    Boolean(bool),
    #[allow(missing_docs)]
    Integer(i64),
    #[allow(missing_docs)]
    Float(f64),
    /// Three components.
    Vector([f32; 3]),
    #[allow(missing_docs)]
    Text(String),
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Literal {
    /// Short description of the literal's form, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Boolean(_) => "boolean",
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Vector(_) => "vector",
            Literal::Text(_) => "text",
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(v) => write!(f, "{v}"),
            Literal::Integer(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::Vector([x, y, z]) => write!(f, "({x}, {y}, {z})"),
            Literal::Text(v) => write!(f, "\"{v}\""),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use float_eq::assert_float_eq;

    #[test]
    fn type_names_round_trip() {
        for ty in SocketType::ALL {
            assert_eq!(SocketType::from_str(&ty.to_string()), Ok(*ty));
        }

        assert!(SocketType::from_str("Color").is_err());
    }

    #[test]
    fn float_accepts_integer_literal() {
        let value = SocketType::Float.resolve(&Literal::Integer(1)).unwrap();
        assert_float_eq!(*value.as_float().unwrap(), 1., abs <= f32::EPSILON);
    }

    #[test]
    fn vector_needs_three_components() {
        assert_eq!(SocketType::Vector.resolve(&Literal::Float(1.)), None);
        assert_eq!(
            SocketType::Vector.resolve(&Literal::Vector([1., 2., 3.])),
            Some(SocketValue::Vector(Vector::new([1., 2., 3.])))
        );
    }

    #[test]
    fn integer_overflow_is_a_mismatch() {
        assert_eq!(SocketType::Integer.resolve(&Literal::Integer(i64::MAX)), None);
        assert_eq!(
            SocketType::Integer.resolve(&Literal::Integer(-4)),
            Some(SocketValue::Integer(-4))
        );
    }

    #[test]
    fn float_out_of_range_is_a_mismatch() {
        assert_eq!(SocketType::Float.resolve(&Literal::Float(1e300)), None);
        assert_eq!(SocketType::Float.resolve(&Literal::Integer(i64::MAX)), None);
        assert_eq!(SocketType::Float.resolve(&Literal::Integer(16_777_217)), None);
        assert_eq!(SocketType::Float.resolve(&Literal::Integer(i64::MIN)), None);

        assert_eq!(
            SocketType::Float.resolve(&Literal::Integer(-16_777_216)),
            Some(SocketValue::Float(-16_777_216.))
        );
        assert_eq!(
            SocketType::Float.resolve(&Literal::Float(f64::INFINITY)),
            Some(SocketValue::Float(f32::INFINITY))
        );
    }

    #[test]
    fn object_from_text() {
        let value = SocketType::Object.resolve(&"Cube".into()).unwrap();
        assert_eq!(value.as_object().map(ObjectRef::name), Some("Cube"));
        assert_eq!(value.r#type(), SocketType::Object);
    }

    #[test]
    fn falloff_has_no_literal_form() {
        assert!(!SocketType::Falloff.has_literal_form());
        assert_eq!(SocketType::Falloff.default_value(), None);

        for literal in [
            Literal::Boolean(true),
            Literal::Integer(1),
            Literal::Float(1.),
            Literal::Vector([0.; 3]),
            Literal::Text("x".into()),
        ] {
            assert_eq!(SocketType::Falloff.resolve(&literal), None, "{literal}");
        }
    }

    #[test]
    fn links() {
        assert!(SocketType::Falloff.can_link_to(SocketType::Falloff));
        assert!(SocketType::Integer.can_link_to(SocketType::Float));
        assert!(SocketType::Float.can_link_to(SocketType::Vector));
        assert!(!SocketType::Vector.can_link_to(SocketType::Float));
        assert!(!SocketType::Float.can_link_to(SocketType::Falloff));
        assert!(!SocketType::Object.can_link_to(SocketType::Falloff));
    }

    #[test]
    fn fallback_defaults() {
        assert_eq!(SocketType::Float.default_value(), Some(SocketValue::Float(0.)));
        assert_eq!(SocketType::Object.default_value(), None);
    }
}
