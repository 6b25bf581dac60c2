use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::deck::{self, LoadedDeck};
use crate::input::{self, Action, Key, Role, TouchPhase, UiEvent};
use crate::loader::Loader;
use crate::nav::ScrollBehavior;
use crate::particles::{ParticleField, ParticleRanges};
use crate::render;
use crate::render::image_cache::ImageCache;
use crate::scroll::ScrollView;
use crate::theme::Theme;
use crate::watch::DeckWatcher;
use crate::widget::{DeckWidget, HostCommand, WidgetOptions};

/// Longest frame delta fed to the animations, so a stalled frame
/// does not teleport the scroller.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

const KEY_MAP: &[(egui::Key, Key)] = &[
    (egui::Key::ArrowLeft, Key::ArrowLeft),
    (egui::Key::ArrowRight, Key::ArrowRight),
    (egui::Key::Space, Key::Space),
    (egui::Key::Escape, Key::Escape),
    (egui::Key::Home, Key::Home),
    (egui::Key::End, Key::End),
    (egui::Key::Num1, Key::Digit(1)),
    (egui::Key::Num2, Key::Digit(2)),
    (egui::Key::Num3, Key::Digit(3)),
    (egui::Key::Num4, Key::Digit(4)),
    (egui::Key::Num5, Key::Digit(5)),
    (egui::Key::Num6, Key::Digit(6)),
    (egui::Key::Num7, Key::Digit(7)),
    (egui::Key::Num8, Key::Digit(8)),
    (egui::Key::Num9, Key::Digit(9)),
    (egui::Key::F, Key::F),
    (egui::Key::D, Key::D),
    (egui::Key::H, Key::H),
    (egui::Key::Q, Key::Q),
];

/// Command line switches for a presentation run.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// 1-indexed
    pub start_slide: Option<usize>,
    pub instant: bool,
    pub no_particles: bool,
    pub no_loader: bool,
    pub watch: bool,
}

/// Settings resolved from CLI flags, the deck file and the user config.
#[derive(Debug, Clone)]
struct Settings {
    theme: Theme,
    widget: WidgetOptions,
    particles: usize,
    loader: bool,
    start_slide: usize,
}

impl Settings {
    fn resolve(loaded: &LoadedDeck, config: &Config, options: &LaunchOptions) -> Self {
        let deck = &loaded.deck;
        let theme_name = deck
            .theme
            .as_deref()
            .or(config.theme())
            .unwrap_or("light");

        let behavior = if options.instant {
            ScrollBehavior::Instant
        } else {
            deck.scroll
                .as_deref()
                .and_then(ScrollBehavior::from_name)
                .or(config.scroll())
                .unwrap_or_default()
        };

        let particles = if options.no_particles {
            0
        } else {
            config.particles()
        };

        let start_slide = options
            .start_slide
            .map(|s| s.saturating_sub(1))
            .unwrap_or(0)
            .min(deck.len().saturating_sub(1));

        Self {
            theme: Theme::from_name(theme_name),
            widget: WidgetOptions {
                behavior,
                padding: config.page_padding(),
                settle_timeout: config.settle_timeout(),
            },
            particles,
            loader: !options.no_loader && config.loader_enabled(),
            start_slide,
        }
    }
}

struct DeckApp {
    loaded: LoadedDeck,
    widget: DeckWidget,
    scroll: ScrollView,
    particles: ParticleField,
    loader: Loader,
    image_cache: ImageCache,
    theme: Theme,
    show_help: bool,
    /// Slide to jump to once the viewport width is known.
    pending_start: Option<usize>,
    last_frame: Instant,
    watcher: Option<DeckWatcher>,
}

impl DeckApp {
    fn new(loaded: LoadedDeck, settings: Settings, watcher: Option<DeckWatcher>) -> Self {
        let now = Instant::now();
        let mut widget = DeckWidget::new(&loaded.deck, &settings.widget);
        widget.start_at(settings.start_slide);

        let mut image_cache = ImageCache::new(loaded.base_path.clone());
        image_cache.prefetch(&loaded.deck.image_paths());

        let mut particles = ParticleField::new(ParticleRanges::default(), StdRng::from_entropy());
        particles.initialize(settings.particles, now);

        let loader = if settings.loader {
            Loader::new(StdRng::from_entropy(), now)
        } else {
            Loader::finished(StdRng::from_entropy(), now)
        };

        Self {
            scroll: ScrollView::new(loaded.deck.len(), 0.0),
            loaded,
            widget,
            particles,
            loader,
            image_cache,
            theme: settings.theme,
            show_help: false,
            pending_start: Some(settings.start_slide),
            last_frame: now,
            watcher,
        }
    }

    fn apply(
        &mut self,
        action: Action,
        now: Instant,
        viewport_cmds: &mut Vec<egui::ViewportCommand>,
        fullscreen: bool,
    ) {
        // The loading screen covers the deck.
        let host_only = matches!(action, Action::Quit | Action::ToggleFullscreen);
        if self.loader.is_blocking() && !host_only {
            return;
        }
        for cmd in self.widget.apply(action, now) {
            match cmd {
                HostCommand::ScrollTo(req) => self.scroll.scroll_to(req.index, req.behavior),
                HostCommand::ToggleFullscreen => {
                    viewport_cmds.push(egui::ViewportCommand::Fullscreen(!fullscreen));
                }
                HostCommand::ToggleTheme => {
                    self.theme = self.theme.toggled();
                    log::info!("theme: {}", self.theme.name);
                }
                HostCommand::ToggleHelp => self.show_help = !self.show_help,
                HostCommand::Quit => viewport_cmds.push(egui::ViewportCommand::Close),
            }
        }
    }

    fn check_for_reload(&mut self) {
        let Some(watcher) = &self.watcher else {
            return;
        };
        if !watcher.poll() {
            return;
        }
        match deck::load(&self.loaded.path) {
            Ok((loaded, _)) => {
                log::info!(
                    "reloaded {} ({} slides)",
                    loaded.path.display(),
                    loaded.deck.len()
                );
                self.widget.reload(&loaded.deck);
                self.scroll.resize_count(loaded.deck.len());
                self.scroll
                    .scroll_to(self.widget.current(), ScrollBehavior::Instant);
                self.image_cache.prefetch(&loaded.deck.image_paths());
                self.loaded = loaded;
            }
            Err(e) => log::warn!("ignoring invalid edit: {e:#}"),
        }
    }

    fn needs_animation(&self) -> bool {
        self.scroll.is_moving()
            || !self.loader.is_done()
            || !self.particles.is_empty()
            || !self.image_cache.is_ready()
    }

    /// Paint everything and collect the roles clicked this frame.
    fn draw(&self, ui: &egui::Ui, rect: egui::Rect, now: Instant) -> Vec<Role> {
        let scale = render::compute_scale(rect);
        let covered = self.loader.is_blocking();
        let modal_open = self.widget.modals().any_visible();
        let mut clicked = Vec::new();

        let offset = self.scroll.offset();
        for (index, slide) in self.loaded.deck.slides.iter().enumerate() {
            let slide_rect = render::slide_rect(rect, index, offset);
            if !slide_rect.intersects(rect) {
                continue;
            }
            clicked.extend(render::draw_slide(
                ui,
                slide,
                index,
                slide_rect,
                &self.theme,
                &self.image_cache,
                self.widget.is_slide_active(index),
                !covered && !modal_open,
                scale,
            ));
        }

        render::overlay::draw_particles(ui, &self.particles, now, &self.theme, rect);

        clicked.extend(render::chrome::draw_chrome(
            ui,
            self.widget.view(),
            &self.theme,
            rect,
            !covered && !modal_open,
            scale,
        ));

        clicked.extend(render::overlay::draw_modals(
            ui,
            &self.loaded.deck,
            self.widget.modals(),
            &self.theme,
            rect,
            scale,
        ));

        if self.show_help {
            render::overlay::draw_help(ui, &self.theme, rect, scale);
        }

        render::overlay::draw_loader(ui, &self.loader, now, &self.theme, rect, scale);
        clicked
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).min(MAX_FRAME_DT);
        self.last_frame = now;

        self.check_for_reload();
        self.image_cache.poll(ctx);
        self.loader.tick(now, self.image_cache.is_ready());
        self.particles.tick(now);

        // Collect events inside the input closure, act on them after it
        // (sending viewport commands inside ctx.input() deadlocks)
        let mut events: Vec<UiEvent> = Vec::new();
        let mut scroll_dx = 0.0;
        let mut fullscreen = false;
        ctx.input(|i| {
            for (egui_key, key) in KEY_MAP {
                if i.key_pressed(*egui_key) {
                    events.push(UiEvent::Key(*key));
                }
            }

            if let Some(pos) = i.pointer.interact_pos() {
                if i.pointer.primary_pressed() {
                    events.push(UiEvent::Touch {
                        phase: TouchPhase::Start,
                        x: pos.x,
                        y: pos.y,
                    });
                }
                if i.pointer.primary_released() {
                    events.push(UiEvent::Touch {
                        phase: TouchPhase::End,
                        x: pos.x,
                        y: pos.y,
                    });
                }
            }
            if i.events.iter().any(|e| matches!(e, egui::Event::PointerGone)) {
                events.push(UiEvent::Touch {
                    phase: TouchPhase::Cancel,
                    x: 0.0,
                    y: 0.0,
                });
            }

            // Vertical wheels scroll the strip sideways too.
            let delta = i.smooth_scroll_delta;
            scroll_dx = if delta.x.abs() > delta.y.abs() {
                -delta.x
            } else {
                -delta.y
            };
            fullscreen = i.viewport().fullscreen.unwrap_or(false);
        });

        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        for event in &events {
            if let Some(action) = input::dispatch(event) {
                self.apply(action, now, &mut viewport_cmds, fullscreen);
            }
        }
        if scroll_dx != 0.0 && !self.loader.is_blocking() {
            self.scroll.scroll_by(scroll_dx);
        }

        let bg = self.theme.background;
        let mut clicked: Vec<Role> = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                self.scroll.resize(rect.width());
                if let Some(start) = self.pending_start.take() {
                    self.scroll.scroll_to(start, ScrollBehavior::Instant);
                }
                if let Some(settled) = self.scroll.step(dt) {
                    log::trace!("scroll settled on slide {}", settled.index + 1);
                    self.widget.on_settled();
                }
                self.widget.on_scroll(self.scroll.offset(), self.scroll.width());
                self.widget.tick(now);

                clicked = self.draw(ui, rect, now);
            });

        for role in clicked {
            if let Some(action) = input::dispatch(&UiEvent::Click(role)) {
                self.apply(action, now, &mut viewport_cmds, fullscreen);
            }
        }

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.needs_animation() || self.widget.is_transitioning() {
            ctx.request_repaint();
        }
    }
}

pub fn run(file: PathBuf, options: LaunchOptions) -> anyhow::Result<()> {
    let (loaded, _) = deck::load(&file)?;
    let config = Config::load_or_default();
    let settings = Settings::resolve(&loaded, &config, &options);

    log::info!(
        "presenting {} ({} slides, {} scroll, {} theme)",
        file.display(),
        loaded.deck.len(),
        settings.widget.behavior.name(),
        settings.theme.name
    );

    let title = loaded.deck.title.clone().unwrap_or_else(|| {
        format!(
            "scrolldeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let watcher = if options.watch {
        Some(DeckWatcher::new(&file)?)
    } else {
        None
    };

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(DeckApp::new(loaded, settings, watcher)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(yaml: &str) -> LoadedDeck {
        LoadedDeck {
            deck: deck::Deck::parse(yaml).unwrap(),
            path: PathBuf::from("deck.yaml"),
            base_path: PathBuf::from("."),
        }
    }

    #[test]
    fn test_cli_flag_beats_deck_and_config() {
        let l = loaded("scroll: smooth\nslides:\n  - title: A\n");
        let mut config = Config::default();
        config.set("defaults.scroll", "smooth").unwrap();
        let options = LaunchOptions {
            instant: true,
            ..Default::default()
        };
        let s = Settings::resolve(&l, &config, &options);
        assert_eq!(s.widget.behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn test_deck_beats_config() {
        let l = loaded("theme: dark\nscroll: instant\nslides:\n  - title: A\n");
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.scroll", "smooth").unwrap();
        let s = Settings::resolve(&l, &config, &LaunchOptions::default());
        assert_eq!(s.theme.name, "dark");
        assert_eq!(s.widget.behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn test_config_fills_gaps() {
        let l = loaded("slides:\n  - title: A\n");
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.loader", "off").unwrap();
        config.set("defaults.particles", "5").unwrap();
        let s = Settings::resolve(&l, &config, &LaunchOptions::default());
        assert_eq!(s.theme.name, "dark");
        assert!(!s.loader);
        assert_eq!(s.particles, 5);
        assert_eq!(s.widget.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_no_particles_flag_and_start_slide_clamp() {
        let l = loaded("slides:\n  - title: A\n  - title: B\n");
        let options = LaunchOptions {
            no_particles: true,
            no_loader: true,
            start_slide: Some(9),
            ..Default::default()
        };
        let s = Settings::resolve(&l, &Config::default(), &options);
        assert_eq!(s.particles, 0);
        assert!(!s.loader);
        assert_eq!(s.start_slide, 1);
    }
}
