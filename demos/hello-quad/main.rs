use std::rc::Rc;

use glsession::glow::{Context, NativeUniformLocation};
use glsession::{
    elapsed_time, BindingNames, DrawSpec, FrameSignal, Host, HostError, LocationTable,
    ShaderProgramSession, ShaderSource, StreamId, Topology, UniformValues, VertexLayout, Window,
};

const SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/hello-quad");

const VERTICES: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
const ELEMENTS: [u16; 4] = [0, 1, 2, 3];

struct Demo {
    session: ShaderProgramSession<Context>,
    bindings: LocationTable<NativeUniformLocation>,
    uniforms: UniformValues,
    stream: StreamId,
}

impl Host for Demo {
    fn init(gl: &Rc<Context>, _window: &Window) -> Result<Self, HostError> {
        let source = ShaderSource::from_paths(
            format!("{SHADER_DIR}/hello-gl.v.glsl"),
            format!("{SHADER_DIR}/hello-gl.f.glsl"),
        )?;

        let mut session = ShaderProgramSession::new(Rc::clone(gl));
        session.initialize(&source)?;
        let stream = session.upload_stream(
            VertexLayout::interleaved(&[("position", 2)]),
            &VERTICES,
            Some(ELEMENTS.to_vec().into()),
        )?;
        let bindings = session.resolve_bindings(
            &BindingNames::new()
                .attribute("position")
                .uniform("fade_factor"),
        )?;

        Ok(Demo {
            session,
            bindings,
            uniforms: UniformValues::new().with("fade_factor", 0.5_f32),
            stream,
        })
    }

    fn update(&mut self, _dt: f32) {
        self.uniforms
            .set("fade_factor", 0.5 * elapsed_time().sin() + 0.5);
    }

    fn display(&mut self, _gl: &Context, _window: &Window) -> FrameSignal {
        self.session
            .render_frame(
                &self.bindings,
                &self.uniforms,
                self.stream,
                &DrawSpec::elements(Topology::TriangleStrip, ELEMENTS.len()),
            )
            .into()
    }
}

fn main() {
    env_logger::init();
    let start = Demo::sdl2_window("Hello quad")
        .window_size(400, 300)
        .clear_color(0.6, 0.5, 0.7, 1.0)
        .depth_test(false)
        .log_debug_messages()
        .start();
    if let Err(err) = start {
        log::error!("{err}");
        std::process::exit(1);
    }
}
