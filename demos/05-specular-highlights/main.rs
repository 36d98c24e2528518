use std::rc::Rc;

use glsession::glow::{Context, NativeUniformLocation};
use glsession::{
    BindingNames, DrawSpec, FrameSignal, Host, HostError, LocationTable, ShaderProgramSession,
    ShaderSource, StreamId, Topology, UniformValues, Window,
};

#[path = "../common/scene.rs"]
mod scene;

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
            include_str!("specular.vert"),
            include_str!("specular.frag"),
        ))?;

        let (vertices, indices) = scene::sphere(1.0, 24, 48);
        let index_count = indices.len();
        let stream = session.upload_stream(
            scene::layout("Vertex_position", "Vertex_normal"),
            &vertices,
            Some(indices.into()),
        )?;

        let uniforms = UniformValues::new()
            .with("Global_ambient", [0.05_f32, 0.05, 0.05, 0.1])
            .with("Light_ambient", [0.1_f32, 0.1, 0.1, 1.0])
            .with("Light_diffuse", [0.25_f32, 0.25, 0.25, 1.0])
            .with("Light_specular", [0.0_f32, 1.0, 0.0, 1.0])
            .with("Light_location", [6.0_f32, 2.0, 4.0])
            .with("Material_ambient", [0.1_f32, 0.1, 0.1, 1.0])
            .with("Material_diffuse", [0.15_f32, 0.15, 0.15, 1.0])
            .with("Material_specular", [1.0_f32, 1.0, 1.0, 1.0])
            .with("Material_shininess", 0.95_f32)
            .with("projection", scene::projection(window))
            .with("model_view", scene::view(4.0));

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
    if let Err(err) = Demo::sdl2_window("Specular highlights").start() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
