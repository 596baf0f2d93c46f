//! SDL2 window backend.
//!
//! The window opens at 800x600 and can be resized freely; the renderer keeps a
//! fixed 960x720 logical size, so HUD code never sees the real window size.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::image::LoadTexture;
use sdl2::keyboard::Keycode;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Texture as SdlRawTexture, TextureCreator, WindowCanvas};
use sdl2::surface::Surface;
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{FullscreenType, WindowContext};
use sdl2::EventPump;
use tracing::info;

use crate::context::{GfxError, GraphicsContext, Texture};
use crate::types::{Rect, Rgb, Rgba, LOGICAL_HEIGHT, LOGICAL_WIDTH};

const TITLE: &str = "Blok";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

/// Window-level input the runner cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    ToggleFullscreen,
    Screenshot,
    Resized,
}

pub struct SdlFont {
    font: Font<'static, 'static>,
}

/// GPU texture freed on drop.
///
/// Holds its creator, so the renderer stays alive until the last texture is
/// gone even if the `SdlContext` is dropped first.
pub struct SdlTexture {
    raw: Option<SdlRawTexture>,
    width: i32,
    height: i32,
    _creator: Rc<TextureCreator<WindowContext>>,
}

impl Texture for SdlTexture {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }
}

impl Drop for SdlTexture {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            // SAFETY: `self._creator` is still alive here, and it keeps a
            // reference to the renderer that created `raw`.
            unsafe { raw.destroy() };
        }
    }
}

pub struct SdlContext {
    events: EventPump,
    canvas: WindowCanvas,
    texture_creator: Rc<TextureCreator<WindowContext>>,
    ttf: &'static Sdl2TtfContext,
    pending_screenshot: Option<PathBuf>,
    _sdl: sdl2::Sdl,
}

impl SdlContext {
    pub fn new() -> Result<Self, GfxError> {
        let sdl = sdl2::init().map_err(GfxError::Init)?;
        let video = sdl.video().map_err(GfxError::Init)?;
        let ttf = sdl2::ttf::init().map_err(|e| GfxError::Init(e.to_string()))?;
        // Fonts borrow the TTF context; it lives for the whole process.
        let ttf: &'static Sdl2TtfContext = Box::leak(Box::new(ttf));

        let window = video
            .window(TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| GfxError::Init(e.to_string()))?;

        sdl2::hint::set("SDL_RENDER_SCALE_QUALITY", "1");
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GfxError::Init(e.to_string()))?;
        canvas
            .set_logical_size(LOGICAL_WIDTH as u32, LOGICAL_HEIGHT as u32)
            .map_err(|e| GfxError::Init(e.to_string()))?;
        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 255));
        canvas.clear();
        canvas.present();

        let texture_creator = Rc::new(canvas.texture_creator());
        let events = sdl.event_pump().map_err(GfxError::Init)?;

        let ctx = Self {
            events,
            canvas,
            texture_creator,
            ttf,
            pending_screenshot: None,
            _sdl: sdl,
        };
        info!(target: "video", "{}x{} window created", ctx.screen_width(), ctx.screen_height());
        Ok(ctx)
    }

    /// Show the finished frame and start a new one.
    ///
    /// A requested screenshot is taken from this frame first.
    pub fn present(&mut self) -> Result<(), GfxError> {
        if let Some(path) = self.pending_screenshot.take() {
            self.save_screenshot_bmp(&path)?;
        }
        self.canvas.present();
        self.canvas.set_draw_color(Color::RGBA(0, 0, 0, 255));
        self.canvas.clear();
        Ok(())
    }

    /// Save the next presented frame to `path` as BMP.
    pub fn request_screenshot(&mut self, path: impl Into<PathBuf>) {
        self.pending_screenshot = Some(path.into());
    }

    fn save_screenshot_bmp(&self, path: &Path) -> Result<(), GfxError> {
        let format = PixelFormatEnum::ARGB8888;
        let (width, height) = self.canvas.output_size().map_err(GfxError::Draw)?;
        let mut pixels = self.canvas.read_pixels(None, format).map_err(GfxError::Draw)?;
        let surface = Surface::from_data(&mut pixels, width, height, width * 4, format)
            .map_err(GfxError::Draw)?;
        surface.save_bmp(path).map_err(GfxError::Draw)?;
        info!(target: "video", "Screenshot saved to {}", path.display());
        Ok(())
    }

    pub fn toggle_fullscreen(&mut self) -> Result<(), GfxError> {
        let window = self.canvas.window_mut();
        let next = match window.fullscreen_state() {
            FullscreenType::Off => FullscreenType::Desktop,
            _ => FullscreenType::Off,
        };
        window.set_fullscreen(next).map_err(GfxError::Init)
    }

    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.events
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(Keycode::F11),
                    ..
                } => Some(WindowEvent::ToggleFullscreen),
                Event::KeyDown {
                    keycode: Some(Keycode::F12),
                    ..
                } => Some(WindowEvent::Screenshot),
                Event::Window {
                    win_event: SdlWindowEvent::SizeChanged(..),
                    ..
                } => Some(WindowEvent::Resized),
                _ => None,
            })
            .collect()
    }

    fn wrap_texture(&self, surface: &Surface) -> Result<SdlTexture, GfxError> {
        let raw = self
            .texture_creator
            .create_texture_from_surface(surface)
            .map_err(|e| GfxError::TextRender(e.to_string()))?;
        Ok(self.own_texture(raw))
    }

    fn own_texture(&self, raw: SdlRawTexture) -> SdlTexture {
        let query = raw.query();
        SdlTexture {
            raw: Some(raw),
            width: query.width as i32,
            height: query.height as i32,
            _creator: Rc::clone(&self.texture_creator),
        }
    }
}

impl GraphicsContext for SdlContext {
    type Font = SdlFont;
    type Texture = SdlTexture;

    fn screen_width(&self) -> i32 {
        self.canvas.logical_size().0 as i32
    }

    fn screen_height(&self) -> i32 {
        self.canvas.logical_size().1 as i32
    }

    fn load_font(&mut self, path: &Path, size_pt: u16) -> Result<SdlFont, GfxError> {
        info!(target: "video", "Loading {}", path.display());
        let font = self
            .ttf
            .load_font(path, size_pt)
            .map_err(|reason| GfxError::FontLoad {
                path: path.to_path_buf(),
                reason,
            })?;
        Ok(SdlFont { font })
    }

    fn render_text(&mut self, font: &SdlFont, text: &str, color: Rgb) -> Result<SdlTexture, GfxError> {
        let color = Color::RGBA(color.r, color.g, color.b, 255);
        let lines: Vec<&str> = text.lines().collect();

        if lines.len() <= 1 {
            // SDL_ttf refuses empty strings.
            let line = lines.first().copied().filter(|l| !l.is_empty()).unwrap_or(" ");
            let surface = font
                .font
                .render(line)
                .blended(color)
                .map_err(|e| GfxError::TextRender(e.to_string()))?;
            return self.wrap_texture(&surface);
        }

        let line_height = font.font.recommended_line_spacing().max(1) as u32;
        let mut width = 2u32;
        for line in &lines {
            let (w, _) = font
                .font
                .size_of(line)
                .map_err(|e| GfxError::TextRender(e.to_string()))?;
            width = width.max(w);
        }

        let mut base = Surface::new(width, line_height * lines.len() as u32, PixelFormatEnum::ARGB8888)
            .map_err(GfxError::TextRender)?;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let surf = font
                .font
                .render(line)
                .blended(color)
                .map_err(|e| GfxError::TextRender(e.to_string()))?;
            let dst = SdlRect::new(0, (i as u32 * line_height) as i32, surf.width(), surf.height());
            surf.blit(None::<SdlRect>, &mut base, dst).map_err(GfxError::TextRender)?;
        }
        self.wrap_texture(&base)
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), GfxError> {
        if rect.w <= 0 || rect.h <= 0 {
            return Ok(());
        }
        self.canvas.set_draw_color(Color::RGBA(color.r, color.g, color.b, color.a));
        self.canvas
            .fill_rect(SdlRect::new(rect.x, rect.y, rect.w as u32, rect.h as u32))
            .map_err(GfxError::Draw)
    }

    fn load_texture(&mut self, path: &Path, tint: Option<Rgb>) -> Result<SdlTexture, GfxError> {
        info!(target: "video", "Loading {}", path.display());
        let mut raw = self
            .texture_creator
            .load_texture(path)
            .map_err(|e| GfxError::Draw(format!("{}: {e}", path.display())))?;
        if let Some(tint) = tint {
            raw.set_color_mod(tint.r, tint.g, tint.b);
        }
        Ok(self.own_texture(raw))
    }

    fn draw_texture(&mut self, texture: &SdlTexture, x: i32, y: i32) -> Result<(), GfxError> {
        let Some(raw) = texture.raw.as_ref() else {
            return Ok(());
        };
        let dst = SdlRect::new(x, y, texture.width.max(1) as u32, texture.height.max(1) as u32);
        self.canvas.copy(raw, None, dst).map_err(GfxError::Draw)
    }

    fn draw_texture_scaled(&mut self, texture: &SdlTexture, rect: Rect) -> Result<(), GfxError> {
        let Some(raw) = texture.raw.as_ref() else {
            return Ok(());
        };
        if rect.w <= 0 || rect.h <= 0 {
            return Ok(());
        }
        let dst = SdlRect::new(rect.x, rect.y, rect.w as u32, rect.h as u32);
        self.canvas.copy(raw, None, dst).map_err(GfxError::Draw)
    }
}
