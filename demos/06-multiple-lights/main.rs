use std::rc::Rc;

use glsession::glow::{Context, NativeUniformLocation};
use glsession::{
    BindingNames, DrawSpec, FrameSignal, Host, HostError, LocationTable, ShaderProgramSession,
    ShaderSource, StreamId, Topology, UniformValues, Window,
};

#[path = "../common/scene.rs"]
mod scene;

const ATTRIBUTES: [&str; 2] = ["Vertex_position", "Vertex_normal"];

#[rustfmt::skip]
const UNIFORM_VALUES: &[(&str, &[f32])] = &[
    ("Global_ambient", &[0.05, 0.05, 0.05, 1.0]),

    ("material.ambient", &[0.2, 0.2, 0.2, 1.0]),
    ("material.diffuse", &[0.5, 0.5, 0.5, 1.0]),
    ("material.specular", &[0.9, 0.9, 0.9, 1.0]),
    ("material.shininess", &[0.995]),

    ("light0_pos", &[4.0, 2.0, 10.0, 0.0]),
    ("light0_amb", &[0.05, 0.05, 0.05, 1.0]),
    ("light0_diff", &[0.3, 0.3, 0.3, 1.0]),
    ("light0_spec", &[1.0, 0.0, 0.0, 1.0]),

    ("light1_pos", &[-4.0, 2.0, 10.0, 0.0]),
    ("light1_amb", &[0.05, 0.05, 0.05, 1.0]),
    ("light1_diff", &[0.3, 0.3, 0.3, 1.0]),
    ("light1_spec", &[1.0, 1.0, 1.0, 1.0]),

    ("light2_pos", &[-4.0, 2.0, -10.0, 0.0]),
    ("light2_amb", &[0.05, 0.05, 0.05, 1.0]),
    ("light2_diff", &[0.3, 0.3, 0.3, 1.0]),
    ("light2_spec", &[0.0, 0.0, 1.0, 1.0]),
];

struct Demo {
    session: ShaderProgramSession<Context>,
    bindings: LocationTable<NativeUniformLocation>,
    uniforms: UniformValues,
    stream: StreamId,
    index_count: usize,
}

impl Host for Demo {
    fn init(gl: &Rc<Context>, window: &Window) -> Result<Self, HostError> {
        let mut session = ShaderProgramSession::new(Rc::clone(gl));
        session.initialize(&ShaderSource::new(
            include_str!("multiple_lights.vert"),
            include_str!("multiple_lights.frag"),
        ))?;

        let (vertices, indices) = scene::sphere(1.0, 24, 48);
        let index_count = indices.len();
        let stream = session.upload_stream(
            scene::layout(ATTRIBUTES[0], ATTRIBUTES[1]),
            &vertices,
            Some(indices.into()),
        )?;

        let mut uniforms = scene::uniform_table(UNIFORM_VALUES);
        uniforms.set("projection", scene::projection(window));
        uniforms.set("model_view", scene::view(4.0));

        let bindings = session.resolve_bindings(
            &BindingNames::new()
                .attributes(ATTRIBUTES)
                .uniforms(uniforms.iter().map(|(name, _)| name)),
        )?;

        Ok(Demo {
            session,
            bindings,
            uniforms,
            stream,
            index_count,
        })
    }

    fn display(&mut self, _gl: &Context, _window: &Window) -> FrameSignal {
        self.session
            .render_frame(
                &self.bindings,
                &self.uniforms,
                self.stream,
                &DrawSpec::elements(Topology::Triangles, self.index_count),
            )
            .into()
    }
}

fn main() {
    env_logger::init();
    // Uncapped frame rate.
    let start = Demo::sdl2_window("Multiple lights").vsync(false).start();
    if let Err(err) = start {
        log::error!("{err}");
        std::process::exit(1);
    }
}
