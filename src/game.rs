use std::convert::Infallible;
use std::time::Instant;

use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::app::{Application, Color, Graphics};
use crate::config::RuntimeConfiguration;
use crate::error::RuntimeError;
use crate::fps::{FpsCounter, FramePacer, Pace};
use crate::renderer::Renderer;

/// ウィンドウと描画コンテキストを Graphics としてアプリケーションに見せる
struct WindowGraphics<'a> {
    window: &'a Window,
    renderer: &'a mut Renderer,
    fps: u32,
}

impl Graphics for WindowGraphics<'_> {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn width(&self) -> u32 {
        self.renderer.width()
    }

    fn height(&self) -> u32 {
        self.renderer.height()
    }

    fn frames_per_second(&self) -> u32 {
        self.fps
    }

    fn clear(&mut self, color: Color) {
        self.renderer.set_clear_color(color);
    }
}

/// run_app 関数
///
/// 設定(RuntimeConfiguration)からウィンドウと描画コンテキストを作り、`app.create` を一度呼んでから
/// FPS 制御付きイベントループに入る。ループ開始後は戻らず、ウィンドウが閉じられるとプロセスが終了する。
/// 閉じる要求の後はフレームを描画しない。
/// ウィンドウやグラフィックスの初期化に失敗した場合のみ `Err` を返す。
pub fn run_app<A: Application + 'static>(
    mut app: A,
    config: RuntimeConfiguration,
) -> Result<Infallible, RuntimeError> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title())
        .with_inner_size(LogicalSize::new(config.window_width(), config.window_height()))
        .with_resizable(config.resizable())
        .build(&event_loop)?;

    let mut renderer = pollster::block_on(Renderer::new(&window))?;
    log::info!(
        target: "graphics",
        "graphics context ready ({}x{}, {:?})",
        renderer.width(),
        renderer.height(),
        renderer.surface_format
    );

    let now = Instant::now();
    let mut pacer = FramePacer::new(config.foreground_fps(), config.background_fps(), now);
    let mut fps = FpsCounter::new(now);

    {
        let mut gfx = WindowGraphics {
            window: &window,
            renderer: &mut renderer,
            fps: 0,
        };
        app.create(&mut gfx);
    }
    app.resize(renderer.width(), renderer.height());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    log::info!("window closed; shutting down");
                    pacer.stop();
                    app.dispose();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    renderer.resize(new_size);
                    app.resize(renderer.width(), renderer.height());
                }
                WindowEvent::Focused(focused) => {
                    log::debug!("window focus: {focused}");
                    pacer.set_focused(focused);
                    if focused {
                        app.resume();
                    } else {
                        app.pause();
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => match pacer.poll(Instant::now()) {
                Pace::WaitUntil(deadline) => *control_flow = ControlFlow::WaitUntil(deadline),
                Pace::Stopped => *control_flow = ControlFlow::Exit,
                Pace::Frame(delta) => {
                    fps.tick(Instant::now());
                    let mut gfx = WindowGraphics {
                        window: &window,
                        renderer: &mut renderer,
                        fps: fps.current(),
                    };
                    app.render(&mut gfx, delta);
                    renderer.present();
                }
            },
            _ => {}
        }
    })
}
