//! Application state owned by the event loop.
//!
//! The UI toolkit stays behind the [`Presenter`] trait. Only the loop that
//! owns an [`ApplicationState`] mutates it; signal handlers and input readers
//! send [`ControlMessage`]s and [`UiEvent`]s to that loop instead.

use crate::command::CommandInterpreter;
use crate::entry::DesktopEntry;
use crate::index::EntryIndex;
use crate::instance::ControlMessage;
use crate::launcher::{AfterLaunch, ProcessLauncher, RunMode};
use tracing::{debug, info, warn};

/// The presentation layer, as seen from the core.
pub trait Presenter {
    /// Replace the displayed result list.
    fn show_results(&mut self, results: &[&DesktopEntry]);

    /// Update the status line.
    fn set_status(&mut self, status: &str);

    fn set_visible(&mut self, visible: bool);

    /// Scroll the result list back to the top.
    fn reset_scroll(&mut self);

    /// Give keyboard focus to the first result, if any.
    fn focus_first(&mut self);
}

/// Input coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search phrase changed
    Search(String),
    /// The result at this position of the current list was chosen
    Activate(usize),
    /// Escape: clear the phrase, or close when it is already empty
    Dismiss,
}

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Everything the launcher knows at runtime.
pub struct ApplicationState<P: Presenter> {
    index: EntryIndex,
    interpreter: CommandInterpreter,
    launcher: ProcessLauncher,
    presenter: P,
    visible: bool,
    phrase: String,
}

impl<P: Presenter> ApplicationState<P> {
    #[must_use]
    pub fn new(
        index: EntryIndex,
        interpreter: CommandInterpreter,
        launcher: ProcessLauncher,
        presenter: P,
    ) -> Self {
        Self {
            index,
            interpreter,
            launcher,
            presenter,
            visible: false,
            phrase: String::new(),
        }
    }

    /// Build the index and render it, showing the window if `show` is set.
    pub fn start(&mut self, show: bool) {
        self.index.refresh();
        self.presenter.set_status(&self.index.summary());
        self.render();
        if show {
            self.presenter.focus_first();
            self.set_visible(true);
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn persistent(&self) -> bool {
        self.launcher.mode() == RunMode::Persistent
    }

    /// Handle a message from the signal listener.
    pub fn handle_control(&mut self, message: ControlMessage) -> LoopControl {
        match message {
            ControlMessage::Terminate => {
                info!("Terminate received, exiting");
                LoopControl::Exit
            }
            ControlMessage::Toggle if !self.persistent() => {
                info!("Toggle received outside daemon mode, exiting");
                LoopControl::Exit
            }
            ControlMessage::Toggle => {
                info!("Toggle received");
                if self.visible {
                    self.set_visible(false);
                } else {
                    self.show();
                }
                LoopControl::Continue
            }
        }
    }

    /// Handle input from the presentation layer.
    pub fn handle_ui(&mut self, event: UiEvent) -> LoopControl {
        match event {
            UiEvent::Search(phrase) => {
                self.phrase = phrase;
                self.render();
                self.presenter.focus_first();
                LoopControl::Continue
            }
            UiEvent::Activate(position) => self.activate(position),
            UiEvent::Dismiss if !self.phrase.is_empty() => {
                self.phrase.clear();
                self.render();
                self.presenter.focus_first();
                LoopControl::Continue
            }
            UiEvent::Dismiss => self.close(),
        }
    }

    /// Rescan, clear the search and show the window.
    fn show(&mut self) {
        self.index.refresh();
        self.presenter.set_status(&self.index.summary());
        self.phrase.clear();
        self.render();
        self.presenter.reset_scroll();
        self.presenter.focus_first();
        self.set_visible(true);
    }

    fn close(&mut self) -> LoopControl {
        if self.persistent() {
            self.set_visible(false);
            LoopControl::Continue
        } else {
            LoopControl::Exit
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.presenter.set_visible(visible);
    }

    fn render(&mut self) {
        let results: Vec<&DesktopEntry> = self.index.query(&self.phrase).collect();
        self.presenter.show_results(&results);
    }

    fn activate(&mut self, position: usize) -> LoopControl {
        let Some(entry) = self.index.query(&self.phrase).nth(position) else {
            debug!("No result at position {position}");
            return LoopControl::Continue;
        };

        let spec = self.interpreter.for_entry(entry);
        match self.launcher.launch(&spec) {
            Ok(AfterLaunch::Hide) => {
                self.set_visible(false);
                LoopControl::Continue
            }
            Ok(AfterLaunch::Quit) => LoopControl::Exit,
            Err(e) => {
                warn!("{e}");
                LoopControl::Continue
            }
        }
    }
}
