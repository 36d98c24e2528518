use std::fmt::Debug;

use crate::draw::Topology;
use crate::load_shaders::Stage;
use crate::uniform::UniformKind;
use crate::vertex_stream::IndexType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// The subset of a GL-style graphics API a [`ShaderProgramSession`] drives.
///
/// Every method assumes the implementor's context is current on the calling
/// thread. Object-creating methods report failure with the driver's message;
/// everything else is fire-and-forget, with errors surfacing through
/// [`GraphicsDriver::take_error`].
///
/// [`ShaderProgramSession`]: crate::ShaderProgramSession
pub trait GraphicsDriver {
    type Shader: Copy + Debug;
    type Program: Copy + Debug + PartialEq;
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;
    type UniformLocation: Clone + Debug;

    /// Returns the compiled stage, or the compiler's info log.
    fn compile_shader(&self, stage: Stage, source: &str) -> Result<Self::Shader, String>;
    fn delete_shader(&self, shader: Self::Shader);
    /// Returns the linked program, or the linker's info log.
    fn link_program(&self, shaders: &[Self::Shader]) -> Result<Self::Program, String>;
    fn delete_program(&self, program: Self::Program);

    /// Pops the oldest pending error code, if any.
    fn take_error(&self) -> Option<u32>;

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    /// Declared type of an active uniform, when the driver can introspect it.
    fn uniform_kind(&self, program: Self::Program, name: &str) -> Option<UniformKind>;

    fn use_program(&self, program: Option<Self::Program>);
    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32);
    /// Column-major, not transposed.
    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, matrix: &[f32; 16]);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    /// Creates a buffer, binds it to `target` and uploads `data` for static drawing.
    fn create_buffer(&self, target: BufferTarget, data: &[u8]) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn enable_attribute(&self, slot: u32);
    fn disable_attribute(&self, slot: u32);
    /// Describes float attribute data in the bound array buffer. Stride and offset in bytes.
    fn describe_attribute(&self, slot: u32, components: i32, stride: i32, offset: i32);

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
    fn draw_elements(&self, topology: Topology, count: i32, index_type: IndexType, offset: i32);
}

/// Drains all pending driver errors, logging each one. Returns the first.
pub fn drain_errors<D: GraphicsDriver + ?Sized>(driver: &D, what: &str) -> Result<(), u32> {
    let mut result = Ok(());
    while let Some(error) = driver.take_error() {
        log::error!("{what}: error: {error:#06x}");
        if result.is_ok() {
            result = Err(error);
        }
    }
    result
}
