#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use glsession::{
    BufferTarget, GraphicsDriver, IndexType, Stage, Topology, UniformKind,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileShader(Stage),
    DeleteShader(u32),
    LinkProgram(Vec<u32>),
    DeleteProgram(u32),
    AttributeLocation(String),
    UniformLocation(String),
    UseProgram(Option<u32>),
    Uniform1(u32, f32),
    Uniform2(u32, [f32; 2]),
    Uniform3(u32, [f32; 3]),
    Uniform4(u32, [f32; 4]),
    UniformMatrix4(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(BufferTarget, u32, usize),
    BindBuffer(BufferTarget, Option<u32>),
    DeleteBuffer(u32),
    EnableAttribute(u32),
    DisableAttribute(u32),
    DescribeAttribute {
        slot: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    DrawArrays(Topology, i32, i32),
    DrawElements(Topology, i32, IndexType, i32),
}

/// Records every call and answers lookups from a scripted "compiled program".
#[derive(Default)]
pub struct RecordingDriver {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    compile_failures: HashMap<Stage, String>,
    link_failure: Option<String>,
    link_error: Option<u32>,
    errors: RefCell<VecDeque<u32>>,
    attributes: HashMap<String, u32>,
    uniforms: HashMap<String, (u32, UniformKind)>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, slot: u32) -> Self {
        self.attributes.insert(name.to_string(), slot);
        self
    }

    pub fn with_uniform(mut self, name: &str, location: u32, kind: UniformKind) -> Self {
        self.uniforms.insert(name.to_string(), (location, kind));
        self
    }

    pub fn failing_compile(mut self, stage: Stage, log: &str) -> Self {
        self.compile_failures.insert(stage, log.to_string());
        self
    }

    pub fn failing_link(mut self, log: &str) -> Self {
        self.link_failure = Some(log.to_string());
        self
    }

    /// Links successfully but leaves `code` in the error queue.
    pub fn raising_on_link(mut self, code: u32) -> Self {
        self.link_error = Some(code);
        self
    }

    pub fn push_error(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GraphicsDriver for RecordingDriver {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = u32;

    fn compile_shader(&self, stage: Stage, _source: &str) -> Result<u32, String> {
        self.record(Call::CompileShader(stage));
        match self.compile_failures.get(&stage) {
            Some(log) => Err(log.clone()),
            None => Ok(self.next()),
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn link_program(&self, shaders: &[u32]) -> Result<u32, String> {
        self.record(Call::LinkProgram(shaders.to_vec()));
        if let Some(log) = &self.link_failure {
            return Err(log.clone());
        }
        if let Some(code) = self.link_error {
            self.push_error(code);
        }
        Ok(self.next())
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn take_error(&self) -> Option<u32> {
        self.errors.borrow_mut().pop_front()
    }

    fn attribute_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.record(Call::AttributeLocation(name.to_string()));
        self.attributes.get(name).copied()
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.record(Call::UniformLocation(name.to_string()));
        self.uniforms.get(name).map(|&(location, _)| location)
    }

    fn uniform_kind(&self, _program: u32, name: &str) -> Option<UniformKind> {
        self.uniforms.get(name).map(|&(_, kind)| kind)
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_1_f32(&self, location: &u32, x: f32) {
        self.record(Call::Uniform1(*location, x));
    }

    fn uniform_2_f32(&self, location: &u32, x: f32, y: f32) {
        self.record(Call::Uniform2(*location, [x, y]));
    }

    fn uniform_3_f32(&self, location: &u32, x: f32, y: f32, z: f32) {
        self.record(Call::Uniform3(*location, [x, y, z]));
    }

    fn uniform_4_f32(&self, location: &u32, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::Uniform4(*location, [x, y, z, w]));
    }

    fn uniform_matrix_4_f32(&self, location: &u32, _matrix: &[f32; 16]) {
        self.record(Call::UniformMatrix4(*location));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self, target: BufferTarget, data: &[u8]) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateBuffer(target, id, data.len()));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn enable_attribute(&self, slot: u32) {
        self.record(Call::EnableAttribute(slot));
    }

    fn disable_attribute(&self, slot: u32) {
        self.record(Call::DisableAttribute(slot));
    }

    fn describe_attribute(&self, slot: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::DescribeAttribute {
            slot,
            components,
            stride,
            offset,
        });
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(Call::DrawArrays(topology, first, count));
    }

    fn draw_elements(&self, topology: Topology, count: i32, index_type: IndexType, offset: i32) {
        self.record(Call::DrawElements(topology, count, index_type, offset));
    }
}

pub const VERTEX_SHADER: &str = "
attribute vec2 position;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

pub const FRAGMENT_SHADER: &str = "
uniform float fade_factor;
void main() {
    gl_FragColor = vec4(fade_factor);
}
";
