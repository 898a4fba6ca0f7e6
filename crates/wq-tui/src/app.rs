//! Application state and main UI controller

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use tracing::{debug, info};

use wq_core::{
    CountryId, GuessEffects, GuessOutcome, GuessTracker, Progress, StyleOverride, style_overrides,
};
use wq_data::{Dataset, MapView};

use crate::audio::AudioCue;
use crate::input::{Action, TextField, event_to_action};
use crate::theme::Theme;
use crate::viewport::Viewport;
use crate::widgets::{Confetti, ConfettiWidget, GuessBarWidget, MapWidget, StatusWidget};

/// The front-end side of an accepted guess: the audio collaborator and the
/// text input surface
struct Surface<'a> {
    audio: &'a mut dyn AudioCue,
    field: &'a mut TextField,
}

impl GuessEffects for Surface<'_> {
    fn play_success_cue(&mut self) {
        self.audio.play_success();
    }

    fn clear_input(&mut self) {
        self.field.clear();
    }
}

/// Application state
pub struct App {
    /// Guess bookkeeping, the single source of truth for progress
    tracker: GuessTracker,

    /// Region outlines for drawing and hit testing
    map: MapView,

    /// Fills for regions that are out of play
    locked: Vec<StyleOverride>,

    field: TextField,

    viewport: Viewport,

    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,

    audio: Box<dyn AudioCue>,

    confetti: Confetti,

    /// Name of the last region clicked on the map
    clicked: Option<String>,

    /// Region under the mouse
    hovered: Option<CountryId>,

    /// Canvas area of the map from the last render, for click hit testing
    map_area: Rect,

    /// Whole frame from the last render
    screen: Rect,

    should_quit: bool,
}

impl App {
    /// Create a new game over every unlocked region of `dataset`
    pub fn new(dataset: &Dataset, theme: Theme, audio: Box<dyn AudioCue>) -> Self {
        Self::with_seed(dataset, theme, audio, rand::random())
    }

    /// Same as [`App::new`] with a fixed confetti seed
    pub fn with_seed(dataset: &Dataset, theme: Theme, audio: Box<dyn AudioCue>, seed: u64) -> Self {
        let tracker = GuessTracker::new(dataset.unlocked_records());
        let map = dataset.map_view();
        let mut field = TextField::default();
        if tracker.is_game_over() {
            field.disable();
        }

        Self {
            tracker,
            viewport: Viewport::new(map.view_box),
            map,
            locked: dataset.locked_overrides(),
            field,
            theme,
            audio,
            confetti: Confetti::new(seed),
            clicked: None,
            hovered: None,
            map_area: Rect::default(),
            screen: Rect::default(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tracker(&self) -> &GuessTracker {
        &self.tracker
    }

    pub fn progress(&self) -> Progress {
        self.tracker.progress()
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clicked(&self) -> Option<&str> {
        self.clicked.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_ref().map(CountryId::as_str)
    }

    pub fn map_area(&self) -> Rect {
        self.map_area
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Handle a terminal event
    pub fn handle_event(&mut self, event: Event) {
        let Some(action) = event_to_action(event) else {
            return;
        };

        match action {
            Action::Quit => self.should_quit = true,
            Action::Type(c) => {
                if self.field.push(c) {
                    self.submit_current();
                }
            }
            Action::Paste(text) => {
                if self.field.push_str(&text) {
                    self.submit_current();
                }
            }
            Action::Backspace => {
                if self.field.pop() {
                    self.submit_current();
                }
            }
            Action::ClearField => {
                if !self.field.is_disabled() {
                    self.field.clear();
                }
            }
            Action::ZoomIn => self.viewport.zoom_in(),
            Action::ZoomOut => self.viewport.zoom_out(),
            Action::ResetView => self.viewport.reset(),
            Action::Pan(direction) => self.viewport.pan(direction),
            Action::Click { column, row } => self.click(column, row),
            Action::Hover { column, row } => self.hover(column, row),
        }
    }

    /// Every edit of the field is a guess
    fn submit_current(&mut self) {
        let guess = self.field.value().to_string();
        let mut surface = Surface {
            audio: self.audio.as_mut(),
            field: &mut self.field,
        };
        let outcome = self.tracker.submit_and_apply(&guess, &mut surface);

        if let GuessOutcome::Accepted(accepted) = &outcome {
            info!(id = %accepted.id, progress = %self.tracker.progress(), "country found");
            if self.tracker.is_game_over() {
                info!("all countries found");
                self.field.disable();
                self.confetti.start();
            }
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some(point) = self.viewport.screen_to_map(self.map_area, column, row) else {
            return;
        };
        self.clicked = self
            .map
            .region_at(point)
            .map(|region| region.name.clone());
        debug!(x = point.x, y = point.y, clicked = ?self.clicked, "map click");
    }

    fn hover(&mut self, column: u16, row: u16) {
        self.hovered = self
            .viewport
            .screen_to_map(self.map_area, column, row)
            .and_then(|point| self.map.region_at(point))
            .map(|region| region.id.clone());
    }

    /// Advance animations by one frame
    pub fn tick(&mut self) {
        if self.confetti.is_active() {
            self.confetti.tick(self.screen);
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Layout: guess bar at top, map in the middle, status at bottom
        let screen = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Guess field + counter
                Constraint::Min(3),    // Map + border
                Constraint::Length(1), // Status line
            ])
            .split(screen);

        self.screen = screen;
        self.map_area = chunks[1].inner(Margin::new(1, 1));

        let progress = self.tracker.progress();
        frame.render_widget(
            GuessBarWidget::new(&self.field, progress, &self.theme),
            chunks[0],
        );

        let overrides = style_overrides(self.tracker.guessed());
        frame.render_widget(
            MapWidget::new(&self.map, &overrides, &self.viewport, &self.theme)
                .locked(&self.locked)
                .hovered(self.hovered()),
            chunks[1],
        );

        frame.render_widget(
            StatusWidget::new(self.clicked.as_deref(), progress.is_complete(), &self.theme),
            chunks[2],
        );

        if self.confetti.is_active() {
            frame.render_widget(ConfettiWidget::new(&self.confetti, &self.theme), screen);
        }
    }
}
