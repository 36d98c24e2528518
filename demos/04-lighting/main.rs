use std::rc::Rc;

use glsession::glam::{Mat4, Vec3};
use glsession::glow::{Context, NativeUniformLocation};
use glsession::{
    BindingNames, DrawSpec, FrameSignal, Host, HostError, LocationTable, ShaderProgramSession,
    ShaderSource, StreamId, Topology, UniformValues, VertexLayout, Window,
};

#[rustfmt::skip]
const VERTICES: [[f32; 6]; 18] = [
    // position         normal
    [-1.0, 0.0, 0.0,  -1.0, 0.0, 1.0],
    [ 0.0, 0.0, 1.0,  -1.0, 0.0, 2.0],
    [ 0.0, 1.0, 1.0,  -1.0, 0.0, 2.0],
    [-1.0, 0.0, 0.0,  -1.0, 0.0, 1.0],
    [ 0.0, 1.0, 1.0,  -1.0, 0.0, 2.0],
    [-1.0, 1.0, 0.0,  -1.0, 0.0, 1.0],
    [ 0.0, 0.0, 1.0,  -1.0, 0.0, 2.0],
    [ 1.0, 0.0, 1.0,   1.0, 0.0, 2.0],
    [ 1.0, 1.0, 1.0,   1.0, 0.0, 2.0],
    [ 0.0, 0.0, 1.0,  -1.0, 0.0, 2.0],
    [ 1.0, 1.0, 1.0,   1.0, 0.0, 2.0],
    [ 0.0, 1.0, 1.0,  -1.0, 0.0, 2.0],
    [ 1.0, 0.0, 1.0,   1.0, 0.0, 2.0],
    [ 2.0, 0.0, 0.0,   1.0, 0.0, 1.0],
    [ 2.0, 1.0, 0.0,   1.0, 0.0, 1.0],
    [ 1.0, 0.0, 1.0,   1.0, 0.0, 2.0],
    [ 2.0, 1.0, 0.0,   1.0, 0.0, 1.0],
    [ 1.0, 1.0, 1.0,   1.0, 0.0, 2.0],
];

struct Demo {
    session: ShaderProgramSession<Context>,
    bindings: LocationTable<NativeUniformLocation>,
    uniforms: UniformValues,
    stream: StreamId,
}

impl Host for Demo {
    fn init(gl: &Rc<Context>, window: &Window) -> Result<Self, HostError> {
        let mut session = ShaderProgramSession::new(Rc::clone(gl));
        session.initialize(&ShaderSource::new(
            include_str!("lighting.vert"),
            include_str!("lighting.frag"),
        ))?;

        let layout = VertexLayout::interleaved(&[("Vertex_position", 3), ("Vertex_normal", 3)]);
        let stream = session.upload_stream(layout, &VERTICES, None)?;

        let (width, height) = window.size();
        let uniforms = UniformValues::new()
            .with("Global_ambient", [0.9_f32, 0.05, 0.05, 0.1])
            .with("Light_ambient", [0.2_f32, 0.2, 0.2, 1.0])
            .with("Light_diffuse", [1.0_f32, 1.0, 1.0, 1.0])
            .with("Light_location", [2.0_f32, 2.0, 10.0])
            .with("Material_ambient", [0.2_f32, 0.2, 0.2, 1.0])
            .with("Material_diffuse", [1.0_f32, 1.0, 1.0, 1.0])
            .with(
                "projection",
                Mat4::perspective_rh_gl(
                    45f32.to_radians(),
                    width as f32 / height.max(1) as f32,
                    0.1,
                    100.0,
                ),
            )
            .with(
                "model_view",
                Mat4::look_at_rh(Vec3::new(0.5, 1.5, 4.0), Vec3::new(0.5, 0.5, 0.0), Vec3::Y),
            );

        let bindings = session.resolve_bindings(
            &BindingNames::new()
                .attributes(["Vertex_position", "Vertex_normal"])
                .uniforms(uniforms.iter().map(|(name, _)| name)),
        )?;

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
    let start = Demo::sdl2_window("Diffuse lighting")
        .gl_version(3, 3)
        .start();
    if let Err(err) = start {
        log::error!("{err}");
        std::process::exit(1);
    }
}
