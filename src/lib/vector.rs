//! Fixed-size vector used as the literal form of [Vector](crate::node::sockets::SocketType::Vector)
//! socket defaults.

use std::fmt::{self, Display};

/// Default vector dimension.
pub const DEFAULT_DIM: usize = 3;

#[derive(PartialEq, Clone, Copy, Debug)]
/// DIM-dimensional vector of TYPE values.
pub struct Vector<const DIM: usize = DEFAULT_DIM, TYPE = f32> {
    /// Coordinate vector.
    pub inner: [TYPE; DIM],
}

impl<const DIM: usize, TYPE> Vector<DIM, TYPE> {
    /// Creates a vector from its coordinates.
    pub const fn new(inner: [TYPE; DIM]) -> Self {
        Self { inner }
    }
}

impl<const DIM: usize, TYPE: Default + Copy> Default for Vector<DIM, TYPE> {
    fn default() -> Self {
        Self {
            inner: [TYPE::default(); DIM],
        }
    }
}

impl<const DIM: usize, TYPE: Display> Display for Vector<DIM, TYPE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.inner.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

macro_rules! into_primitive_array {
    ($($target:ty),+ $(,)?) => {
        $(
            impl<const DIM: usize> From<Vector<DIM, $target>> for [$target; DIM] {
                fn from(value: Vector<DIM, $target>) -> Self {
                    value.inner
                }
            }

            impl<const DIM: usize> From<[$target; DIM]> for Vector<DIM, $target> {
                fn from(value: [$target; DIM]) -> Self {
                    Self {
                        inner: value
                    }
                }
            }
        )+
    };
}

into_primitive_array!(i32, f32);

impl<const DIM: usize> From<f32> for Vector<DIM, f32> {
    /// Broadcast a single value to every coordinate.
    fn from(value: f32) -> Self {
        Self { inner: [value; DIM] }
    }
}
