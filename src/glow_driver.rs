use glow::{
    Context, HasContext as _, ARRAY_BUFFER, ELEMENT_ARRAY_BUFFER, FLOAT, FLOAT_MAT4, FLOAT_VEC2,
    FLOAT_VEC3, FLOAT_VEC4, FRAGMENT_SHADER, LINES, LINE_STRIP, NO_ERROR, POINTS, STATIC_DRAW,
    TRIANGLES, TRIANGLE_FAN, TRIANGLE_STRIP, UNSIGNED_BYTE, UNSIGNED_INT, UNSIGNED_SHORT,
    VERTEX_SHADER,
};

use crate::driver::{BufferTarget, GraphicsDriver};
use crate::draw::Topology;
use crate::load_shaders::Stage;
use crate::uniform::{array_base, UniformKind};
use crate::vertex_stream::IndexType;

fn stage_enum(stage: Stage) -> u32 {
    match stage {
        Stage::Vertex => VERTEX_SHADER,
        Stage::Fragment => FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => ARRAY_BUFFER,
        BufferTarget::ElementArray => ELEMENT_ARRAY_BUFFER,
    }
}

fn topology_enum(topology: Topology) -> u32 {
    match topology {
        Topology::Points => POINTS,
        Topology::Lines => LINES,
        Topology::LineStrip => LINE_STRIP,
        Topology::Triangles => TRIANGLES,
        Topology::TriangleStrip => TRIANGLE_STRIP,
        Topology::TriangleFan => TRIANGLE_FAN,
    }
}

fn index_enum(index_type: IndexType) -> u32 {
    match index_type {
        IndexType::U8 => UNSIGNED_BYTE,
        IndexType::U16 => UNSIGNED_SHORT,
        IndexType::U32 => UNSIGNED_INT,
    }
}

impl UniformKind {
    pub fn from_gl(utype: u32) -> Self {
        match utype {
            FLOAT => UniformKind::Float,
            FLOAT_VEC2 => UniformKind::Vec2,
            FLOAT_VEC3 => UniformKind::Vec3,
            FLOAT_VEC4 => UniformKind::Vec4,
            FLOAT_MAT4 => UniformKind::Mat4,
            other => UniformKind::Other(other),
        }
    }
}

impl GraphicsDriver for Context {
    type Shader = <Context as glow::HasContext>::Shader;
    type Program = <Context as glow::HasContext>::Program;
    type Buffer = <Context as glow::HasContext>::Buffer;
    type VertexArray = <Context as glow::HasContext>::VertexArray;
    type UniformLocation = <Context as glow::HasContext>::UniformLocation;

    fn compile_shader(&self, stage: Stage, source: &str) -> Result<Self::Shader, String> {
        unsafe {
            let shader = self.create_shader(stage_enum(stage))?;
            self.shader_source(shader, source);
            glow::HasContext::compile_shader(self, shader);
            if self.get_shader_compile_status(shader) {
                Ok(shader)
            } else {
                let log = self.get_shader_info_log(shader);
                glow::HasContext::delete_shader(self, shader);
                Err(log)
            }
        }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { glow::HasContext::delete_shader(self, shader) }
    }

    fn link_program(&self, shaders: &[Self::Shader]) -> Result<Self::Program, String> {
        unsafe {
            let program = self.create_program()?;
            for &shader in shaders {
                self.attach_shader(program, shader);
            }
            glow::HasContext::link_program(self, program);
            for &shader in shaders {
                self.detach_shader(program, shader);
            }
            if self.get_program_link_status(program) {
                Ok(program)
            } else {
                let log = self.get_program_info_log(program);
                glow::HasContext::delete_program(self, program);
                Err(log)
            }
        }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { glow::HasContext::delete_program(self, program) }
    }

    fn take_error(&self) -> Option<u32> {
        let error = unsafe { self.get_error() };
        (error != NO_ERROR).then_some(error)
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_kind(&self, program: Self::Program, name: &str) -> Option<UniformKind> {
        unsafe {
            (0..self.get_active_uniforms(program))
                .filter_map(|index| self.get_active_uniform(program, index))
                .find(|uniform| {
                    uniform.name == name || array_base(&uniform.name) == array_base(name)
                })
                .map(|uniform| UniformKind::from_gl(uniform.utype))
        }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { glow::HasContext::use_program(self, program) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { glow::HasContext::uniform_1_f32(self, Some(location), x) }
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { glow::HasContext::uniform_2_f32(self, Some(location), x, y) }
    }

    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { glow::HasContext::uniform_3_f32(self, Some(location), x, y, z) }
    }

    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        unsafe { glow::HasContext::uniform_4_f32(self, Some(location), x, y, z, w) }
    }

    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, matrix: &[f32; 16]) {
        unsafe { self.uniform_matrix_4_f32_slice(Some(location), false, matrix) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { glow::HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { glow::HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { glow::HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_buffer(&self, target: BufferTarget, data: &[u8]) -> Result<Self::Buffer, String> {
        unsafe {
            let buffer = glow::HasContext::create_buffer(self)?;
            glow::HasContext::bind_buffer(self, target_enum(target), Some(buffer));
            self.buffer_data_u8_slice(target_enum(target), data, STATIC_DRAW);
            Ok(buffer)
        }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { glow::HasContext::bind_buffer(self, target_enum(target), buffer) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { glow::HasContext::delete_buffer(self, buffer) }
    }

    fn enable_attribute(&self, slot: u32) {
        unsafe { self.enable_vertex_attrib_array(slot) }
    }

    fn disable_attribute(&self, slot: u32) {
        unsafe { self.disable_vertex_attrib_array(slot) }
    }

    fn describe_attribute(&self, slot: u32, components: i32, stride: i32, offset: i32) {
        unsafe { self.vertex_attrib_pointer_f32(slot, components, FLOAT, false, stride, offset) }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe { glow::HasContext::draw_arrays(self, topology_enum(topology), first, count) }
    }

    fn draw_elements(&self, topology: Topology, count: i32, index_type: IndexType, offset: i32) {
        unsafe {
            glow::HasContext::draw_elements(
                self,
                topology_enum(topology),
                count,
                index_enum(index_type),
                offset,
            )
        }
    }
}
