//! Shader program lifecycle over a GL-style driver: compile and link once,
//! resolve attribute/uniform locations once, then draw each frame inside a
//! use → bind → draw → unbind bracket.

pub use glam;
pub use glow;
#[cfg(feature = "window")]
pub use sdl2::{self, video::Window};

mod bindings;
mod draw;
pub mod driver;
pub mod error;
mod glow_driver;
#[cfg(feature = "window")]
pub mod host;
mod load_shaders;
mod session;
pub mod time;
mod uniform;
mod vertex_stream;

pub use bindings::{AttributeSlot, BindingNames, LocationTable, UniformSlot};
pub use draw::{DrawSpec, Topology};
pub use driver::{drain_errors, BufferTarget, GraphicsDriver};
pub use error::{HostError, SessionError, SourceLocation};
#[cfg(feature = "window")]
pub use host::{FrameSignal, Host, StartBuilder};
pub use load_shaders::{ShaderSource, Stage};
pub use session::{SessionState, ShaderProgramSession};
pub use time::{delta_time, elapsed_time, ping_pong};
pub use uniform::{UniformKind, UniformValue, UniformValues};
pub use vertex_stream::{IndexType, Indices, StreamId, VertexAttribute, VertexLayout, VertexStream};
