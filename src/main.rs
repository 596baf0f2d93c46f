//! Blok client runner (default binary).
//!
//! Builds one or two player areas and feeds them synthetic values. Draws to
//! the terminal by default; `--sdl` opens a window when built with the `sdl`
//! feature.

mod demo;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use blok::core::{ClientConfig, SimpleRng, ThemeConfig};
use blok::gfx::{GraphicsContext, TermContext, TerminalRenderer};
use blok::layout::{arrange, column_width, HudStyle, PlayerArea};
use blok::types::Rect;

use demo::DemoFeed;

const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    let _guard = setup_logging(&config.log_dir)?;

    let (theme, warnings) = ThemeConfig::load(config.paths.clone(), &config.theme);
    if !warnings.is_empty() {
        warn!("theme '{}' loaded with {} warning(s)", config.theme, warnings.len());
    }
    let mut rng = SimpleRng::new(config.seed);
    info!("game music: {}", theme.random_game_music(&mut rng).display());
    let background = theme.random_game_background(&mut rng);
    if let Some(background) = &background {
        info!("game background: {}", background.display());
    }
    let style = HudStyle::from_theme(&theme);

    if std::env::args().any(|arg| arg == "--sdl") {
        return run_sdl(&config, style, background.as_deref());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run_terminal(&mut term, &config, style, background.as_deref());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `<log_dir>/client.log`; the terminal is taken by the HUD.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "client.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    info!("Log file: {}", log_dir.join("client.log").display());
    Ok(guard)
}

fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

struct Session<G: GraphicsContext> {
    background: Option<G::Texture>,
    areas: Vec<PlayerArea<G>>,
    feeds: Vec<DemoFeed>,
    started: Instant,
}

impl<G: GraphicsContext> Session<G> {
    fn new(
        gcx: &mut G,
        config: &ClientConfig,
        style: &HudStyle,
        background: Option<&Path>,
    ) -> Result<Self> {
        // A missing background is not fatal; the screen stays black.
        let background = background.and_then(|path| match gcx.load_texture(path, None) {
            Ok(texture) => Some(texture),
            Err(e) => {
                warn!("game background {} not loaded: {}", path.display(), e);
                None
            }
        });

        let mut areas = Vec::with_capacity(config.players);
        let mut feeds = Vec::with_capacity(config.players);
        for player in 0..config.players {
            let mut area = PlayerArea::new(gcx, style.clone(), config.draw_gauge)?;
            let feed = DemoFeed::new(config.seed.wrapping_add(player as u32));
            feed.attach(gcx, &mut area)?;
            areas.push(area);
            feeds.push(feed);
        }

        let mut session = Self {
            background,
            areas,
            feeds,
            started: Instant::now(),
        };
        session.arrange(gcx)?;
        Ok(session)
    }

    /// Fit every area into its column after a screen size change.
    fn arrange(&mut self, gcx: &mut G) -> Result<()> {
        let (screen_w, screen_h) = (gcx.screen_width(), gcx.screen_height());
        let count = self.areas.len();
        for (slot, area) in self.areas.iter_mut().enumerate() {
            area.set_max_width(gcx, column_width(screen_w, count))?;
            let (x, y) = arrange(slot, count, screen_w, screen_h, area.width(), area.height());
            area.set_position(x, y);
            info!(
                target: "video",
                "player {} at {},{} ({}x{}, {})",
                slot + 1,
                x,
                y,
                area.width(),
                area.height(),
                area.mode().as_str()
            );
        }
        Ok(())
    }

    fn tick(&mut self, gcx: &mut G) -> Result<()> {
        let gametime = self.started.elapsed();
        for (feed, area) in self.feeds.iter_mut().zip(self.areas.iter_mut()) {
            feed.tick(gcx, area, gametime)?;
        }
        Ok(())
    }

    fn draw(&self, gcx: &mut G) -> Result<()> {
        if let Some(background) = &self.background {
            let screen = Rect::new(0, 0, gcx.screen_width(), gcx.screen_height());
            gcx.draw_texture_scaled(background, screen)?;
        }
        for area in &self.areas {
            area.draw_passive(gcx)?;
            area.draw_active(gcx)?;
        }
        Ok(())
    }
}

fn run_terminal(
    term: &mut TerminalRenderer,
    config: &ClientConfig,
    style: HudStyle,
    background: Option<&Path>,
) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((120, 45));
    let mut gcx = TermContext::new(cols, rows);
    let mut session = Session::new(&mut gcx, config, &style, background)?;

    let mut last_tick = Instant::now();
    loop {
        gcx.clear();
        session.draw(&mut gcx)?;
        term.present(gcx.frame())?;

        let timeout = TICK.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(key) => {
                    return Ok(());
                }
                Event::Resize(cols, rows) => {
                    gcx.resize(cols, rows);
                    term.invalidate();
                    session.arrange(&mut gcx)?;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();
            session.tick(&mut gcx)?;
        }
    }
}

/// `<config dir>/screenshots/blok-<n>.bmp`, creating the directory.
#[cfg_attr(not(feature = "sdl"), allow(dead_code))]
fn screenshot_path(config: &ClientConfig, count: u32) -> Result<PathBuf> {
    let dir = config.paths.config.join("screenshots");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating screenshot directory {}", dir.display()))?;
    Ok(dir.join(format!("blok-{count}.bmp")))
}

#[cfg(feature = "sdl")]
fn run_sdl(config: &ClientConfig, style: HudStyle, background: Option<&Path>) -> Result<()> {
    use blok::gfx::{SdlContext, WindowEvent};

    let mut gcx = SdlContext::new()?;
    let mut session = Session::new(&mut gcx, config, &style, background)?;
    let mut screenshots = 0;

    loop {
        let frame_start = Instant::now();
        for event in gcx.poll_events() {
            match event {
                WindowEvent::Quit => return Ok(()),
                WindowEvent::ToggleFullscreen => gcx.toggle_fullscreen()?,
                WindowEvent::Screenshot => {
                    screenshots += 1;
                    gcx.request_screenshot(screenshot_path(config, screenshots)?);
                }
                // The logical size is fixed; the layout does not change.
                WindowEvent::Resized => {}
            }
        }

        session.tick(&mut gcx)?;
        session.draw(&mut gcx)?;
        gcx.present()?;

        if let Some(rest) = TICK.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

#[cfg(not(feature = "sdl"))]
fn run_sdl(_config: &ClientConfig, _style: HudStyle, _background: Option<&Path>) -> Result<()> {
    anyhow::bail!("this build has no SDL support; rebuild with `--features sdl`")
}
