use std::fmt;

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Declared type of a uniform in a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    /// Any type this crate has no float setter for (samplers, ints, other matrices).
    Other(u32),
}

impl UniformKind {
    /// Number of floats a value for this uniform carries, if it is settable as floats.
    pub fn components(self) -> Option<usize> {
        match self {
            UniformKind::Float => Some(1),
            UniformKind::Vec2 => Some(2),
            UniformKind::Vec3 => Some(3),
            UniformKind::Vec4 => Some(4),
            UniformKind::Mat4 => Some(16),
            UniformKind::Other(_) => None,
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformKind::Float => f.write_str("float"),
            UniformKind::Vec2 => f.write_str("vec2"),
            UniformKind::Vec3 => f.write_str("vec3"),
            UniformKind::Vec4 => f.write_str("vec4"),
            UniformKind::Mat4 => f.write_str("mat4"),
            UniformKind::Other(gl_type) => write!(f, "GL type {gl_type:#06x}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major.
    Mat4([f32; 16]),
}

impl UniformValue {
    pub fn arity(&self) -> usize {
        match self {
            UniformValue::Float(_) => 1,
            UniformValue::Vec2(_) => 2,
            UniformValue::Vec3(_) => 3,
            UniformValue::Vec4(_) => 4,
            UniformValue::Mat4(_) => 16,
        }
    }

    /// Builds a value from a tuple-like slice. Only lengths 1, 2, 3, 4 and 16 are valid.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        Some(match *values {
            [x] => UniformValue::Float(x),
            [x, y] => UniformValue::Vec2([x, y]),
            [x, y, z] => UniformValue::Vec3([x, y, z]),
            [x, y, z, w] => UniformValue::Vec4([x, y, z, w]),
            _ => UniformValue::Mat4(values.try_into().ok()?),
        })
    }
}

impl From<f32> for UniformValue {
    fn from(x: f32) -> Self {
        UniformValue::Float(x)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v.to_array())
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v.to_array())
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v.to_array())
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        UniformValue::Mat4(m.to_cols_array())
    }
}

/// Strips a trailing array index: `lights[2]` and `lights[0]` both become `lights`.
pub(crate) fn array_base(name: &str) -> &str {
    match name.strip_suffix(']').and_then(|rest| rest.rsplit_once('[')) {
        Some((base, index)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => name,
    }
}

/// Uniform values for one frame, in the order they will be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformValues {
    values: Vec<(String, UniformValue)>,
}

impl UniformValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an earlier value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => *old = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
