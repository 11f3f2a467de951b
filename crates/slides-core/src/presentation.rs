//! Presentation state: source document, compiled slides, and position.

use serde::{Deserialize, Serialize};

use crate::compiler::SlideCompiler;
use crate::slide::Slide;
use crate::style::{SlideStyle, resolve};

/// Color theme of the presenter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User-facing presentation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSettings {
    pub theme: Theme,
    pub auto_advance: bool,
    pub show_slide_numbers: bool,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            auto_advance: false,
            show_slide_numbers: true,
        }
    }
}

/// Navigation action issued by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Prev,
    Next,
    First,
    Last,
    ExitFullscreen,
}

impl NavCommand {
    /// Map a keyboard key name (as in `KeyboardEvent.key`) to a command.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "ArrowUp" => Some(Self::Prev),
            "ArrowRight" | "ArrowDown" | " " | "Space" | "Spacebar" => Some(Self::Next),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            "Escape" | "Esc" => Some(Self::ExitFullscreen),
            _ => None,
        }
    }
}

/// Application state owned by a single controller.
///
/// Every [`set_markdown`](Self::set_markdown) recompiles the whole document
/// and replaces the slide list.
pub struct Presentation {
    compiler: SlideCompiler,
    markdown: String,
    slides: Vec<Slide>,
    current: usize,
    fullscreen: bool,
    settings: PresentationSettings,
}

impl Presentation {
    /// Empty presentation showing the fallback slide.
    #[must_use]
    pub fn new(compiler: SlideCompiler) -> Self {
        let slides = compiler.compile("");
        Self {
            compiler,
            markdown: String::new(),
            slides,
            current: 0,
            fullscreen: false,
            settings: PresentationSettings::default(),
        }
    }

    /// Replace the presentation settings.
    #[must_use]
    pub fn with_settings(mut self, settings: PresentationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the source document and recompile.
    ///
    /// The current position is kept when still in range, otherwise reset to
    /// the first slide.
    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.markdown = markdown.into();
        self.slides = self.compiler.compile(&self.markdown);
        if self.current >= self.slides.len() {
            self.current = 0;
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Zero-based index of the current slide.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    /// Resolved background style of the current slide.
    pub fn current_style(&self) -> SlideStyle {
        resolve(self.current_slide().attributes.as_ref())
    }

    /// Advance one slide. Returns `false` at the last slide.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    /// Go back one slide. Returns `false` at the first slide.
    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.slides.len() - 1)
    }

    /// Jump to a zero-based index. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.slides.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Apply a presenter command. Commands are ignored outside fullscreen.
    ///
    /// Returns whether the state changed.
    pub fn handle(&mut self, command: NavCommand) -> bool {
        if !self.fullscreen {
            return false;
        }
        match command {
            NavCommand::Prev => self.prev(),
            NavCommand::Next => self.next(),
            NavCommand::First => self.first(),
            NavCommand::Last => self.last(),
            NavCommand::ExitFullscreen => {
                self.fullscreen = false;
                true
            }
        }
    }

    pub fn settings(&self) -> &PresentationSettings {
        &self.settings
    }

    /// Modify settings in place.
    pub fn update_settings(&mut self, update: impl FnOnce(&mut PresentationSettings)) {
        update(&mut self.settings);
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(SlideCompiler::new())
    }
}
