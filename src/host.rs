use std::marker::PhantomData;
use std::rc::Rc;

use glow::{Context, HasContext as _, COLOR_BUFFER_BIT, DEPTH_BUFFER_BIT, DEPTH_TEST};
use log::{error, info};
use sdl2::keyboard::Keycode;
use sdl2::video::Window;

use crate::error::{HostError, SessionError};
use crate::time;

/// Whether `display` drew something that should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSignal {
    Handled,
    Unhandled,
}

impl From<Result<(), SessionError>> for FrameSignal {
    fn from(result: Result<(), SessionError>) -> Self {
        match result {
            Ok(()) => FrameSignal::Handled,
            Err(err) => {
                error!("frame skipped: {err}");
                FrameSignal::Unhandled
            }
        }
    }
}

#[allow(unused)]
pub trait Host: Sized {
    fn init(gl: &Rc<Context>, window: &Window) -> Result<Self, HostError>;

    /// Called once per loop iteration before `display`, with the last frame time.
    fn update(&mut self, _dt: f32) {}

    fn display(&mut self, gl: &Context, window: &Window) -> FrameSignal;

    fn sdl2_window(window_title: impl Into<String>) -> StartBuilder<Self> {
        StartBuilder::new(window_title.into())
    }
}

pub type DebugMessageCallback = dyn Fn(u32, u32, u32, u32, String) + Send + Sync;

pub struct StartBuilder<T: Host> {
    window_title: String,
    window_width: Option<u32>,
    window_height: Option<u32>,
    gl_version: Option<(u8, u8)>,
    vsync: bool,
    clear_color: [f32; 4],
    depth_test: bool,
    host: PhantomData<T>,
    debug_message_callback: Option<Box<DebugMessageCallback>>,
}

impl<T: Host> StartBuilder<T> {
    pub fn new(window_title: String) -> Self {
        StartBuilder {
            window_title,
            window_width: None,
            window_height: None,
            gl_version: None,
            vsync: true,
            clear_color: [0.2, 0.2, 0.5, 0.0],
            depth_test: true,
            host: PhantomData,
            debug_message_callback: None,
        }
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = Some(width);
        self.window_height = Some(height);
        self
    }

    pub fn gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = Some((major, minor));
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn clear_color(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.clear_color = [r, g, b, a];
        self
    }

    pub fn depth_test(mut self, enabled: bool) -> Self {
        self.depth_test = enabled;
        self
    }

    pub fn debug_message_callback(
        mut self,
        callback: impl Fn(u32, u32, u32, u32, String) + Send + Sync + 'static,
    ) -> Self {
        self.debug_message_callback = Some(Box::new(callback));
        self
    }

    /// Forwards GL debug messages to the `log` facade.
    pub fn log_debug_messages(self) -> Self {
        self.debug_message_callback(|source, typ, id, severity, message| {
            info!("gl debug [{source:#x} {typ:#x} {id} {severity:#x}] {message}")
        })
    }

    pub fn start(mut self) -> Result<(), HostError> {
        time::start_clock();

        let (gl_major_version, gl_minor_version) = self.gl_version.unwrap_or((3, 2));

        let sdl = sdl2::init()?;
        let video = sdl.video()?;
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(gl_major_version, gl_minor_version);
        let window = video
            .window(
                &self.window_title,
                self.window_width.unwrap_or(800),
                self.window_height.unwrap_or(800),
            )
            .allow_highdpi()
            .opengl()
            .resizable()
            .build()
            .map_err(|err| HostError::Platform(err.to_string()))?;
        let gl_context = window.gl_create_context()?;
        window.gl_make_current(&gl_context)?;
        window
            .subsystem()
            .gl_set_swap_interval(if self.vsync { 1 } else { 0 })?;

        let mut gl =
            unsafe { Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _) };

        if let Some(callback) = self.debug_message_callback.take() {
            unsafe {
                gl.debug_message_callback(move |source, typ, id, severity, message| {
                    callback(source, typ, id, severity, message.to_string())
                });
            }
        }

        unsafe {
            let [r, g, b, a] = self.clear_color;
            gl.clear_color(r, g, b, a);
            if self.depth_test {
                gl.enable(DEPTH_TEST);
            }
        }

        let gl = Rc::new(gl);
        let mut app = T::init(&gl, &window).inspect_err(|err| error!("init: {err}"))?;

        let mut running = true;
        let mut event_loop = sdl.event_pump()?;
        while running {
            for event in event_loop.poll_iter() {
                use sdl2::event::Event;

                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => running = false,
                    _ => {}
                }
            }

            app.update(time::delta_time());

            unsafe { gl.clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT) };
            if app.display(&gl, &window) == FrameSignal::Handled {
                window.gl_swap_window();
            }

            time::finish_frame();
        }

        Ok(())
    }
}
