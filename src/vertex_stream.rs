use bytemuck::Pod;
use log::debug;

use crate::draw::DrawSpec;
use crate::driver::{BufferTarget, GraphicsDriver};
use crate::error::SessionError;

const FLOAT_SIZE: i32 = std::mem::size_of::<f32>() as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    pub fn size(self) -> usize {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indices {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    pub fn index_type(&self) -> IndexType {
        match self {
            Indices::U8(_) => IndexType::U8,
            Indices::U16(_) => IndexType::U16,
            Indices::U32(_) => IndexType::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Indices::U8(indices) => indices.len(),
            Indices::U16(indices) => indices.len(),
            Indices::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Indices::U8(indices) => indices,
            Indices::U16(indices) => bytemuck::cast_slice(indices),
            Indices::U32(indices) => bytemuck::cast_slice(indices),
        }
    }
}

impl From<Vec<u8>> for Indices {
    fn from(indices: Vec<u8>) -> Self {
        Indices::U8(indices)
    }
}

impl From<Vec<u16>> for Indices {
    fn from(indices: Vec<u16>) -> Self {
        Indices::U16(indices)
    }
}

impl From<Vec<u32>> for Indices {
    fn from(indices: Vec<u32>) -> Self {
        Indices::U32(indices)
    }
}

/// One float attribute inside an interleaved vertex. Offset in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: String,
    pub components: i32,
    pub offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    stride: i32,
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Empty layout with a stride in bytes.
    pub fn new(stride: i32) -> Self {
        VertexLayout {
            stride,
            attributes: Vec::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, components: i32, offset: i32) -> Self {
        self.attributes.push(VertexAttribute {
            name: name.into(),
            components,
            offset,
        });
        self
    }

    /// Tightly packed `f32` attributes in the given order.
    pub fn interleaved(attributes: &[(&str, i32)]) -> Self {
        let stride = attributes.iter().map(|(_, c)| c * FLOAT_SIZE).sum();
        let mut offset = 0;
        attributes
            .iter()
            .fold(Self::new(stride), |layout, &(name, components)| {
                let layout = layout.attribute(name, components, offset);
                offset += components * FLOAT_SIZE;
                layout
            })
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    fn validate(&self) -> Result<(), SessionError> {
        if self.stride <= 0 {
            return Err(SessionError::InvalidStream(format!(
                "stride must be positive, got {}",
                self.stride
            )));
        }
        for attribute in &self.attributes {
            if !(1..=4).contains(&attribute.components) {
                return Err(SessionError::InvalidStream(format!(
                    "attribute `{}` has {} components",
                    attribute.name, attribute.components
                )));
            }
            let end = attribute
                .components
                .checked_mul(FLOAT_SIZE)
                .and_then(|size| attribute.offset.checked_add(size));
            if attribute.offset < 0 || end.map_or(true, |end| end > self.stride) {
                return Err(SessionError::InvalidStream(format!(
                    "attribute `{}` does not fit in a {} byte stride",
                    attribute.name, self.stride
                )));
            }
        }
        Ok(())
    }
}

/// Handle to a stream uploaded into a session. Only valid with that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId {
    pub(crate) session: u64,
    pub(crate) index: usize,
}

#[derive(Debug)]
struct IndexBuffer<B> {
    buffer: B,
    index_type: IndexType,
    count: usize,
}

/// Vertex (and optional index) data living in driver buffers.
#[derive(Debug)]
pub struct VertexStream<D: GraphicsDriver> {
    vertex_array: D::VertexArray,
    vertex_buffer: D::Buffer,
    index_buffer: Option<IndexBuffer<D::Buffer>>,
    layout: VertexLayout,
    vertex_count: usize,
}

impl<D: GraphicsDriver> VertexStream<D> {
    pub(crate) fn upload<T: Pod>(
        driver: &D,
        layout: VertexLayout,
        vertices: &[T],
        indices: Option<Indices>,
    ) -> Result<Self, SessionError> {
        layout.validate()?;
        let data: &[u8] = bytemuck::cast_slice(vertices);
        let stride = layout.stride as usize;
        if data.len() % stride != 0 {
            return Err(SessionError::InvalidStream(format!(
                "{} bytes of vertex data is not a multiple of the {stride} byte stride",
                data.len()
            )));
        }

        let vertex_array = driver.create_vertex_array().map_err(SessionError::Driver)?;
        driver.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = match driver.create_buffer(BufferTarget::Array, data) {
            Ok(buffer) => buffer,
            Err(message) => {
                driver.bind_vertex_array(None);
                driver.delete_vertex_array(vertex_array);
                return Err(SessionError::Driver(message));
            }
        };

        let index_buffer = match indices {
            Some(indices) => {
                match driver.create_buffer(BufferTarget::ElementArray, indices.as_bytes()) {
                    Ok(buffer) => Some(IndexBuffer {
                        buffer,
                        index_type: indices.index_type(),
                        count: indices.len(),
                    }),
                    Err(message) => {
                        driver.bind_vertex_array(None);
                        driver.bind_buffer(BufferTarget::Array, None);
                        driver.delete_buffer(vertex_buffer);
                        driver.delete_vertex_array(vertex_array);
                        return Err(SessionError::Driver(message));
                    }
                }
            }
            None => None,
        };

        driver.bind_vertex_array(None);
        driver.bind_buffer(BufferTarget::Array, None);
        if index_buffer.is_some() {
            driver.bind_buffer(BufferTarget::ElementArray, None);
        }

        let vertex_count = data.len() / stride;
        debug!(
            "uploaded {vertex_count} vertices ({} indices)",
            index_buffer.as_ref().map_or(0, |ib| ib.count)
        );

        Ok(VertexStream {
            vertex_array,
            vertex_buffer,
            index_buffer,
            layout,
            vertex_count,
        })
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> Option<usize> {
        self.index_buffer.as_ref().map(|ib| ib.count)
    }

    pub(crate) fn bind(&self, driver: &D) {
        driver.bind_vertex_array(Some(self.vertex_array));
        driver.bind_buffer(BufferTarget::Array, Some(self.vertex_buffer));
        if let Some(index_buffer) = &self.index_buffer {
            driver.bind_buffer(BufferTarget::ElementArray, Some(index_buffer.buffer));
        }
    }

    pub(crate) fn unbind(&self, driver: &D) {
        if self.index_buffer.is_some() {
            driver.bind_buffer(BufferTarget::ElementArray, None);
        }
        driver.bind_buffer(BufferTarget::Array, None);
        driver.bind_vertex_array(None);
    }

    /// Issues `draw` against this stream, which must be bound.
    pub(crate) fn draw(&self, driver: &D, draw: &DrawSpec) -> Result<(), SessionError> {
        let end = draw
            .first
            .checked_add(draw.count)
            .ok_or_else(|| SessionError::InvalidDraw("draw range overflows".into()))?;
        let to_i32 = |value: usize| {
            i32::try_from(value)
                .map_err(|_| SessionError::InvalidDraw(format!("{value} does not fit in i32")))
        };

        if draw.indexed {
            let Some(index_buffer) = &self.index_buffer else {
                return Err(SessionError::InvalidDraw(
                    "indexed draw on a stream without indices".into(),
                ));
            };
            if end > index_buffer.count {
                return Err(SessionError::InvalidDraw(format!(
                    "indices {}..{end} out of range, stream has {}",
                    draw.first, index_buffer.count
                )));
            }
            let offset = to_i32(draw.first * index_buffer.index_type.size())?;
            driver.draw_elements(
                draw.topology,
                to_i32(draw.count)?,
                index_buffer.index_type,
                offset,
            );
        } else {
            if end > self.vertex_count {
                return Err(SessionError::InvalidDraw(format!(
                    "vertices {}..{end} out of range, stream has {}",
                    draw.first, self.vertex_count
                )));
            }
            driver.draw_arrays(draw.topology, to_i32(draw.first)?, to_i32(draw.count)?);
        }
        Ok(())
    }

    pub(crate) fn release(self, driver: &D) {
        driver.delete_vertex_array(self.vertex_array);
        driver.delete_buffer(self.vertex_buffer);
        if let Some(index_buffer) = self.index_buffer {
            driver.delete_buffer(index_buffer.buffer);
        }
    }
}
