mod common;

use std::rc::Rc;

use common::{Call, RecordingDriver, FRAGMENT_SHADER, VERTEX_SHADER};
use glsession::{
    AttributeSlot, BindingNames, DrawSpec, SessionError, SessionState, ShaderProgramSession,
    ShaderSource, SourceLocation, Stage, Topology, UniformKind, UniformSlot, UniformValues,
    VertexLayout,
};

fn source() -> ShaderSource {
    ShaderSource::new(VERTEX_SHADER, FRAGMENT_SHADER)
}

fn quad_driver() -> RecordingDriver {
    RecordingDriver::new()
        .with_attribute("position", 0)
        .with_uniform("fade_factor", 3, UniformKind::Float)
}

#[test]
fn initialize_then_resolve_reaches_ready() {
    let driver = Rc::new(quad_driver());
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));
    assert_eq!(session.state(), SessionState::Uninitialized);

    let program = session.initialize(&source()).unwrap();
    assert_eq!(session.state(), SessionState::Linked);
    assert_eq!(session.program(), Some(program));

    session
        .resolve_bindings(&BindingNames::new().attribute("position").uniform("fade_factor"))
        .unwrap();
    assert_eq!(session.state(), SessionState::Ready);

    // Both stages compiled, linked, then deleted.
    let calls = driver.calls();
    assert_eq!(calls[0], Call::CompileShader(Stage::Vertex));
    assert_eq!(calls[1], Call::CompileShader(Stage::Fragment));
    assert!(matches!(calls[2], Call::LinkProgram(ref shaders) if shaders.len() == 2));
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteShader(_))), 2);
}

#[test]
fn malformed_fragment_stage_fails_and_names_stage() {
    let driver = Rc::new(
        quad_driver().failing_compile(Stage::Fragment, "0:3(12): error: syntax error, unexpected '}'"),
    );
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));

    let err = session.initialize(&source()).unwrap_err();
    assert_eq!(session.state(), SessionState::Failed);
    match &err {
        SessionError::Compile {
            stage,
            location,
            log,
        } => {
            assert_eq!(*stage, Stage::Fragment);
            assert_eq!(
                *location,
                Some(SourceLocation {
                    line: 3,
                    column: Some(12)
                })
            );
            assert!(!log.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("fragment"));

    // The vertex stage that did compile is released again, nothing was linked.
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteShader(_))), 1);
    assert_eq!(driver.count(|c| matches!(c, Call::LinkProgram(_))), 0);
}

#[test]
fn empty_compiler_log_still_yields_diagnostic() {
    let driver = Rc::new(quad_driver().failing_compile(Stage::Vertex, ""));
    let mut session = ShaderProgramSession::new(driver);

    let err = session.initialize(&source()).unwrap_err();
    let SessionError::Compile {
        stage,
        location,
        log,
    } = err
    else {
        panic!("expected a compile error");
    };
    assert_eq!(stage, Stage::Vertex);
    assert_eq!(location, None);
    assert!(log.contains("vertex"));
}

#[test]
fn link_failure_is_reported_and_stages_released() {
    let driver = Rc::new(quad_driver().failing_link("Validation Failure(0)"));
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));

    let err = session.initialize(&source()).unwrap_err();
    assert_eq!(
        err,
        SessionError::Link {
            log: "Validation Failure(0)".into()
        }
    );
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(session.program(), None);
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteShader(_))), 2);
}

#[test]
fn driver_error_after_link_fails_session() {
    let driver = Rc::new(quad_driver().raising_on_link(0x0502));
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));

    let err = session.initialize(&source()).unwrap_err();
    assert!(matches!(err, SessionError::Link { ref log } if log.contains("0x0502")));
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteProgram(_))), 1);

    // Nothing else may happen on a failed session.
    assert!(matches!(
        session.resolve_bindings(&BindingNames::new()),
        Err(SessionError::InvalidState { .. })
    ));
}

#[test]
fn stale_driver_error_is_not_blamed_on_link() {
    let driver = Rc::new(quad_driver());
    driver.push_error(0x0500);
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));

    assert!(session.initialize(&source()).is_ok());
    assert_eq!(session.state(), SessionState::Linked);
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteProgram(_))), 0);
}

#[test]
fn initialize_twice_is_invalid() {
    let mut session = ShaderProgramSession::new(Rc::new(quad_driver()));
    session.initialize(&source()).unwrap();
    assert_eq!(
        session.initialize(&source()),
        Err(SessionError::InvalidState {
            operation: "initialize",
            state: SessionState::Linked
        })
    );
}

#[test]
fn resolve_bindings_is_idempotent_and_queries_once() {
    let driver = Rc::new(quad_driver());
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));
    session.initialize(&source()).unwrap();
    let names = BindingNames::new()
        .attribute("position")
        .uniforms(["fade_factor", "textures[0]"]);

    let first = session.resolve_bindings(&names).unwrap();
    let second = session.resolve_bindings(&names).unwrap();
    assert_eq!(first, second);

    assert_eq!(driver.count(|c| matches!(c, Call::AttributeLocation(_))), 1);
    assert_eq!(driver.count(|c| matches!(c, Call::UniformLocation(_))), 2);
}

#[test]
fn present_names_resolve_and_missing_names_are_absent() {
    let driver = Rc::new(quad_driver());
    let mut session = ShaderProgramSession::new(driver);
    session.initialize(&source()).unwrap();

    let table = session
        .resolve_bindings(
            &BindingNames::new()
                .attributes(["position", "Vertex_normal"])
                .uniforms(["fade_factor", "light2_pos"]),
        )
        .unwrap();

    assert_eq!(table.attribute("position"), Some(AttributeSlot::Resolved(0)));
    assert_eq!(table.attribute("Vertex_normal"), Some(AttributeSlot::Absent));
    assert_eq!(
        table.uniform("fade_factor"),
        Some(&UniformSlot::Resolved {
            location: 3,
            kind: Some(UniformKind::Float)
        })
    );
    assert_eq!(table.uniform("light2_pos"), Some(&UniformSlot::Absent));
    assert_eq!(table.len(), 4);
}

#[test]
fn render_before_ready_is_invalid_state() {
    let driver = Rc::new(quad_driver());
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));
    session.initialize(&source()).unwrap();
    let stream = session
        .upload_stream(VertexLayout::interleaved(&[("position", 2)]), &[[0.0f32; 2]; 3], None)
        .unwrap();
    driver.clear_calls();

    let err = session
        .render_frame(
            session.bindings(),
            &UniformValues::new(),
            stream,
            &DrawSpec::arrays(Topology::Triangles, 0, 3),
        )
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidState {
            operation: "render_frame",
            state: SessionState::Linked
        }
    );
    assert!(driver.calls().is_empty());
}

#[test]
fn upload_before_initialize_is_invalid_state() {
    let mut session = ShaderProgramSession::new(Rc::new(quad_driver()));
    assert!(matches!(
        session.upload_stream(VertexLayout::interleaved(&[("position", 2)]), &[[0.0f32; 2]; 3], None),
        Err(SessionError::InvalidState { .. })
    ));
}

#[test]
fn teardown_twice_releases_once() {
    let driver = Rc::new(quad_driver());
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));
    let program = session.initialize(&source()).unwrap();
    session
        .upload_stream(
            VertexLayout::interleaved(&[("position", 2)]),
            &[[-1.0f32, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]],
            Some(vec![0u16, 1, 2, 3].into()),
        )
        .unwrap();

    session.teardown();
    session.teardown();
    drop(session);

    assert_eq!(
        driver.count(|c| *c == Call::DeleteProgram(program)),
        1
    );
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteVertexArray(_))), 1);
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteBuffer(_))), 2);
}

#[test]
fn teardown_moves_to_destroyed() {
    let mut session = ShaderProgramSession::new(Rc::new(quad_driver()));
    session.initialize(&source()).unwrap();
    session.teardown();
    assert_eq!(session.state(), SessionState::Destroyed);
    assert_eq!(session.program(), None);
}

#[test]
fn teardown_on_failed_session_is_harmless() {
    let driver = Rc::new(quad_driver().failing_compile(Stage::Vertex, "0(1) : error C0000"));
    let mut session = ShaderProgramSession::new(Rc::clone(&driver));
    assert!(session.initialize(&source()).is_err());

    session.teardown();
    session.teardown();
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(driver.count(|c| matches!(c, Call::DeleteProgram(_))), 0);
}

#[test]
fn dropping_session_releases_program() {
    let driver = Rc::new(quad_driver());
    let program = {
        let mut session = ShaderProgramSession::new(Rc::clone(&driver));
        session.initialize(&source()).unwrap()
    };
    assert_eq!(driver.count(|c| *c == Call::DeleteProgram(program)), 1);
}

#[test]
fn shader_source_from_paths_reads_both_stages() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/hello-quad");
    let source = ShaderSource::from_paths(
        format!("{dir}/hello-gl.v.glsl"),
        format!("{dir}/hello-gl.f.glsl"),
    )
    .unwrap();
    assert!(source.vertex().contains("position"));
    assert!(source.fragment().contains("fade_factor"));

    assert!(ShaderSource::from_paths(format!("{dir}/missing.glsl"), format!("{dir}/missing.glsl")).is_err());
}
