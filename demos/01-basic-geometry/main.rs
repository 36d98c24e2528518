use std::rc::Rc;

use glsession::glam::Mat4;
use glsession::glow::{Context, NativeUniformLocation};
use glsession::{
    BindingNames, DrawSpec, FrameSignal, Host, HostError, LocationTable, ShaderProgramSession,
    ShaderSource, StreamId, Topology, UniformValues, VertexLayout, Window,
};

const VERTICES: [[f32; 3]; 9] = [
    [0.0, 1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [2.0, -1.0, 0.0],
    [4.0, -1.0, 0.0],
    [4.0, 1.0, 0.0],
    [2.0, -1.0, 0.0],
    [4.0, 1.0, 0.0],
    [2.0, 1.0, 0.0],
];

struct Demo {
    session: ShaderProgramSession<Context>,
    bindings: LocationTable<NativeUniformLocation>,
    uniforms: UniformValues,
    stream: StreamId,
}

impl Host for Demo {
    fn init(gl: &Rc<Context>, _window: &Window) -> Result<Self, HostError> {
        let mut session = ShaderProgramSession::new(Rc::clone(gl));
        session.initialize(&ShaderSource::new(
            include_str!("basic.vert"),
            include_str!("basic.frag"),
        ))?;

        let stream = session.upload_stream(
            VertexLayout::interleaved(&[("position", 3)]),
            &VERTICES,
            None,
        )?;
        let bindings = session.resolve_bindings(
            &BindingNames::new()
                .attribute("position")
                .uniform("projection"),
        )?;
        let uniforms = UniformValues::new().with(
            "projection",
            Mat4::orthographic_rh_gl(-1.5, 4.5, -3.0, 3.0, -1.0, 1.0),
        );

        Ok(Demo {
            session,
            bindings,
            uniforms,
            stream,
        })
    }

    fn display(&mut self, _gl: &Context, _window: &Window) -> FrameSignal {
        self.session
            .render_frame(
                &self.bindings,
                &self.uniforms,
                self.stream,
                &DrawSpec::arrays(Topology::Triangles, 0, VERTICES.len()),
            )
            .into()
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = Demo::sdl2_window("Basic geometry").start() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
