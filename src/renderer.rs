// src/renderer.rs

use winit::window::Window;

use crate::app::Color;
use crate::error::RuntimeError;

/// 描画コンテキスト。WGPU のサーフェス・デバイスを保持し、フレームごとのクリアと表示を行う。
pub struct Renderer {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface,
    pub config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
    clear_color: Color,
}

impl Renderer {
    /// ウィンドウと連携し、WGPU を初期化してサーフェスを構成する。
    pub async fn new(window: &Window) -> Result<Self, RuntimeError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        // SAFETY: サーフェスは Renderer と共に破棄され、Renderer はウィンドウより長生きしない
        let surface = unsafe { instance.create_surface(window) }?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or(RuntimeError::NoAdapter)?;
        log::info!(target: "graphics", "adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await?;

        let surface_format = pick_surface_format(&surface.get_capabilities(&adapter).formats)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![surface_format],
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            surface_format,
            clear_color: Color::BLACK,
        })
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// 新しい物理サイズでサーフェスを再構成する。
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// 現在のクリア色でフレームを描画して表示する。
    pub fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                match self.surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(e) => {
                        log::warn!(target: "graphics", "skipping frame: {e}");
                        return;
                    }
                }
            }
            Err(e) => {
                log::warn!(target: "graphics", "skipping frame: {e}");
                return;
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        {
            let Color { r, g, b, a } = self.clear_color;
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
    }
}

/// サーフェスが対応する先頭のフォーマット。対応フォーマットがなければエラー
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat, RuntimeError> {
    formats.first().copied().ok_or(RuntimeError::NoSurfaceFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_supported_format_is_used() {
        let formats = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(
            pick_surface_format(&formats).unwrap(),
            wgpu::TextureFormat::Bgra8UnormSrgb
        );
    }

    #[test]
    fn no_supported_format_is_an_error() {
        assert!(matches!(
            pick_surface_format(&[]),
            Err(RuntimeError::NoSurfaceFormat)
        ));
    }
}
