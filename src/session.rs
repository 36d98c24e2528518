use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::Pod;
use log::{debug, warn};

use crate::bindings::{AttributeSlot, BindingNames, LocationTable, UniformSlot};
use crate::draw::DrawSpec;
use crate::driver::{drain_errors, GraphicsDriver};
use crate::error::SessionError;
use crate::load_shaders::{compile_stages, link_stages, ShaderSource};
use crate::uniform::{UniformValue, UniformValues};
use crate::vertex_stream::{Indices, StreamId, VertexLayout, VertexStream};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Uninitialized,
    Compiling,
    Linked,
    Ready,
    Destroyed,
    Failed,
}

/// One linked shader program plus the buffers drawn with it.
///
/// The session shares the driver with whoever owns the graphics context and
/// assumes that context stays current on this thread. Using another program
/// on the same context in between frames is allowed; each frame activates its
/// own program.
pub struct ShaderProgramSession<D: GraphicsDriver> {
    id: u64,
    driver: Rc<D>,
    state: SessionState,
    program: Option<D::Program>,
    bindings: LocationTable<D::UniformLocation>,
    streams: Vec<Option<VertexStream<D>>>,
}

impl<D: GraphicsDriver> ShaderProgramSession<D> {
    pub fn new(driver: Rc<D>) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        let mut bindings = LocationTable::default();
        bindings.session = id;
        ShaderProgramSession {
            id,
            driver,
            state: SessionState::Uninitialized,
            program: None,
            bindings,
            streams: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn program(&self) -> Option<D::Program> {
        self.program
    }

    pub fn bindings(&self) -> &LocationTable<D::UniformLocation> {
        &self.bindings
    }

    pub fn driver(&self) -> &Rc<D> {
        &self.driver
    }

    fn expect_state(
        &self,
        operation: &'static str,
        valid: &[SessionState],
    ) -> Result<(), SessionError> {
        if valid.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        debug!("session {:?} -> Failed", self.state);
        self.state = SessionState::Failed;
        err
    }

    /// Compiles and links `source`. Any failure leaves the session `Failed`.
    pub fn initialize(&mut self, source: &ShaderSource) -> Result<D::Program, SessionError> {
        self.expect_state("initialize", &[SessionState::Uninitialized])?;
        let driver = Rc::clone(&self.driver);

        // Errors queued by earlier users of the context are not ours to report.
        if let Err(code) = drain_errors(&*driver, "before initialize") {
            warn!("discarding stale driver error {code:#06x}");
        }

        self.state = SessionState::Compiling;
        let shaders = compile_stages(&*driver, source).map_err(|err| self.fail(err))?;
        let program = link_stages(&*driver, shaders).map_err(|err| self.fail(err))?;

        self.state = SessionState::Linked;
        if let Err(code) = drain_errors(&*driver, "link") {
            driver.delete_program(program);
            return Err(self.fail(SessionError::Link {
                log: format!("driver reported error {code:#06x} after linking"),
            }));
        }

        debug!("program {program:?} linked");
        self.program = Some(program);
        Ok(program)
    }

    /// Uploads interleaved vertex data (and optional indices) owned by this session.
    pub fn upload_stream<T: Pod>(
        &mut self,
        layout: VertexLayout,
        vertices: &[T],
        indices: Option<Indices>,
    ) -> Result<StreamId, SessionError> {
        self.expect_state("upload_stream", &[SessionState::Linked, SessionState::Ready])?;
        let stream = VertexStream::upload(&*self.driver, layout, vertices, indices)?;
        self.streams.push(Some(stream));
        Ok(StreamId {
            session: self.id,
            index: self.streams.len() - 1,
        })
    }

    /// `None` for streams of other sessions and for released streams.
    pub fn stream(&self, id: StreamId) -> Option<&VertexStream<D>> {
        if id.session != self.id {
            return None;
        }
        self.streams.get(id.index).and_then(Option::as_ref)
    }

    /// Resolves `names` once and returns the session's table. Names resolved by
    /// an earlier call are not looked up again.
    pub fn resolve_bindings(
        &mut self,
        names: &BindingNames,
    ) -> Result<LocationTable<D::UniformLocation>, SessionError> {
        self.expect_state(
            "resolve_bindings",
            &[SessionState::Linked, SessionState::Ready],
        )?;
        let Some(program) = self.program else {
            return Err(SessionError::InvalidState {
                operation: "resolve_bindings",
                state: self.state,
            });
        };
        self.bindings.resolve(&*self.driver, program, names);
        self.state = SessionState::Ready;
        Ok(self.bindings.clone())
    }

    /// Draws one frame: use program, set uniforms, bind the stream, enable
    /// attributes, draw, then undo all of it in reverse.
    pub fn render_frame(
        &self,
        bindings: &LocationTable<D::UniformLocation>,
        uniforms: &UniformValues,
        stream: StreamId,
        draw: &DrawSpec,
    ) -> Result<(), SessionError> {
        self.expect_state("render_frame", &[SessionState::Ready])?;
        let Some(program) = self.program else {
            return Err(SessionError::InvalidState {
                operation: "render_frame",
                state: self.state,
            });
        };
        if bindings.session != self.id {
            return Err(SessionError::ForeignHandle("location table"));
        }
        if stream.session != self.id {
            return Err(SessionError::ForeignHandle("stream"));
        }
        let stream = self
            .stream(stream)
            .ok_or_else(|| SessionError::InvalidStream(format!("no stream {}", stream.index)))?;
        check_frame(bindings, uniforms, stream.layout())?;

        let driver = &*self.driver;
        let mut frame = FrameBracket::open(driver, program);

        for (name, value) in uniforms.iter() {
            if let Some(UniformSlot::Resolved { location, .. }) = bindings.uniform(name) {
                set_uniform(driver, location, value);
            }
        }

        frame.bind_stream(stream);
        let stride = stream.layout().stride();
        for attribute in stream.layout().attributes() {
            if let Some(AttributeSlot::Resolved(slot)) = bindings.attribute(&attribute.name) {
                frame.enable_attribute(slot);
                driver.describe_attribute(slot, attribute.components, stride, attribute.offset);
            }
        }

        stream.draw(driver, draw)?;
        drop(frame);

        if let Err(code) = drain_errors(driver, "render_frame") {
            warn!("frame finished with driver error {code:#06x}");
        }
        Ok(())
    }

    /// Releases the program and every uploaded stream. Safe to call repeatedly
    /// and in any state.
    pub fn teardown(&mut self) {
        let driver = Rc::clone(&self.driver);
        if let Some(program) = self.program.take() {
            debug!("deleting program {program:?}");
            driver.delete_program(program);
        }
        for stream in self.streams.iter_mut().filter_map(Option::take) {
            stream.release(&*driver);
        }
        if self.state != SessionState::Failed {
            self.state = SessionState::Destroyed;
        }
    }
}

impl<D: GraphicsDriver> Drop for ShaderProgramSession<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Checks everything a frame needs before the driver is touched.
fn check_frame<L>(
    bindings: &LocationTable<L>,
    uniforms: &UniformValues,
    layout: &VertexLayout,
) -> Result<(), SessionError> {
    for (name, value) in uniforms.iter() {
        match bindings.uniform(name) {
            None => return Err(SessionError::UnknownBinding(name.to_string())),
            Some(UniformSlot::Resolved {
                kind: Some(kind), ..
            }) if kind.components() != Some(value.arity()) => {
                return Err(SessionError::UniformArityMismatch {
                    name: name.to_string(),
                    declared: *kind,
                    supplied: value.arity(),
                });
            }
            Some(_) => {}
        }
    }
    for attribute in layout.attributes() {
        if bindings.attribute(&attribute.name).is_none() {
            return Err(SessionError::UnknownBinding(attribute.name.clone()));
        }
    }
    Ok(())
}

fn set_uniform<D: GraphicsDriver>(driver: &D, location: &D::UniformLocation, value: &UniformValue) {
    match *value {
        UniformValue::Float(x) => driver.uniform_1_f32(location, x),
        UniformValue::Vec2([x, y]) => driver.uniform_2_f32(location, x, y),
        UniformValue::Vec3([x, y, z]) => driver.uniform_3_f32(location, x, y, z),
        UniformValue::Vec4([x, y, z, w]) => driver.uniform_4_f32(location, x, y, z, w),
        UniformValue::Mat4(ref m) => driver.uniform_matrix_4_f32(location, m),
    }
}

/// Program/stream/attribute state of one frame. Dropping it disables every
/// enabled attribute, unbinds the stream and unuses the program.
struct FrameBracket<'a, D: GraphicsDriver> {
    driver: &'a D,
    stream: Option<&'a VertexStream<D>>,
    enabled: Vec<u32>,
}

impl<'a, D: GraphicsDriver> FrameBracket<'a, D> {
    fn open(driver: &'a D, program: D::Program) -> Self {
        driver.use_program(Some(program));
        FrameBracket {
            driver,
            stream: None,
            enabled: Vec::new(),
        }
    }

    fn bind_stream(&mut self, stream: &'a VertexStream<D>) {
        stream.bind(self.driver);
        self.stream = Some(stream);
    }

    fn enable_attribute(&mut self, slot: u32) {
        self.driver.enable_attribute(slot);
        self.enabled.push(slot);
    }
}

impl<D: GraphicsDriver> Drop for FrameBracket<'_, D> {
    fn drop(&mut self) {
        for &slot in self.enabled.iter().rev() {
            self.driver.disable_attribute(slot);
        }
        if let Some(stream) = self.stream {
            stream.unbind(self.driver);
        }
        self.driver.use_program(None);
    }
}
