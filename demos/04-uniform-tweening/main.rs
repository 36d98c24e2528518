use std::rc::Rc;

use glsession::glam::Mat4;
use glsession::glow::{Context, NativeUniformLocation};
use glsession::{
    elapsed_time, ping_pong, BindingNames, DrawSpec, FrameSignal, Host, HostError, LocationTable,
    ShaderProgramSession, ShaderSource, StreamId, Topology, UniformValues, VertexLayout, Window,
};

/// Seconds for one full there-and-back tween.
const TWEEN_PERIOD: f32 = 2.0;

#[rustfmt::skip]
const VERTICES: [[f32; 9]; 9] = [
    // position        tweened           color
    [ 0.0,  1.0, 0.0,  1.0,  3.0, 0.0,  0.0, 1.0, 0.0],
    [-1.0, -1.0, 0.0, -1.0, -1.0, 0.0,  1.0, 1.0, 0.0],
    [ 1.0, -1.0, 0.0,  1.0, -1.0, 0.0,  0.0, 1.0, 1.0],
    [ 2.0, -1.0, 0.0,  2.0, -1.0, 0.0,  1.0, 0.0, 0.0],
    [ 4.0, -1.0, 0.0,  4.0, -1.0, 0.0,  0.0, 1.0, 0.0],
    [ 4.0,  1.0, 0.0,  4.0,  9.0, 0.0,  0.0, 0.0, 1.0],
    [ 2.0, -1.0, 0.0,  2.0, -1.0, 0.0,  1.0, 0.0, 0.0],
    [ 4.0,  1.0, 0.0,  1.0,  3.0, 0.0,  0.0, 0.0, 1.0],
    [ 2.0,  1.0, 0.0,  1.0, -1.0, 0.0,  0.0, 1.0, 1.0],
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
            include_str!("tween.vert"),
            include_str!("tween.frag"),
        ))?;

        let stream = session.upload_stream(
            VertexLayout::interleaved(&[("position", 3), ("tweened", 3), ("color", 3)]),
            &VERTICES,
            None,
        )?;
        let bindings = session.resolve_bindings(
            &BindingNames::new()
                .attributes(["position", "tweened", "color"])
                .uniforms(["tween", "projection"]),
        )?;
        let uniforms = UniformValues::new()
            .with("tween", 0.0_f32)
            .with(
                "projection",
                Mat4::orthographic_rh_gl(-2.0, 6.0, -2.0, 10.0, -1.0, 1.0),
            );

        Ok(Demo {
            session,
            bindings,
            uniforms,
            stream,
        })
    }

    fn update(&mut self, _dt: f32) {
        self.uniforms
            .set("tween", ping_pong(elapsed_time(), TWEEN_PERIOD));
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
    if let Err(err) = Demo::sdl2_window("Uniform tweening").start() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
