//! The deck widget: explicit owner of every piece of navigation state.
//!
//! Actions come in through [`DeckWidget::apply`]; scroll observations come in
//! through [`DeckWidget::on_scroll`]. What the host must do in response is
//! returned as [`HostCommand`]s, so the widget never touches the rendering
//! surface itself.

use std::time::{Duration, Instant};

use crate::deck::Deck;
use crate::input::{Action, SwipeStep, SwipeTracker};
use crate::modal::ModalRegistry;
use crate::nav::{Navigator, ScrollBehavior, ScrollRequest};
use crate::view::{PagePadding, ViewModel};
use crate::visibility::{self, VisibilityChange, VisibilitySync};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    ScrollTo(ScrollRequest),
    ToggleFullscreen,
    ToggleTheme,
    ToggleHelp,
    Quit,
}

#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub behavior: ScrollBehavior,
    pub padding: PagePadding,
    pub settle_timeout: Duration,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            padding: PagePadding::Always,
            settle_timeout: crate::nav::DEFAULT_SETTLE_TIMEOUT,
        }
    }
}

pub struct DeckWidget {
    nav: Navigator,
    visibility: VisibilitySync,
    modals: ModalRegistry,
    swipe: SwipeTracker,
    padding: PagePadding,
    view: ViewModel,
}

impl DeckWidget {
    pub fn new(deck: &Deck, options: &WidgetOptions) -> Self {
        let count = deck.len();
        let nav =
            Navigator::new(count, options.behavior).with_settle_timeout(options.settle_timeout);
        Self {
            view: ViewModel::project(nav.current(), count, options.padding),
            nav,
            visibility: VisibilitySync::new(count),
            modals: ModalRegistry::from_deck(deck),
            swipe: SwipeTracker::new(),
            padding: options.padding,
        }
    }

    pub fn current(&self) -> usize {
        self.nav.current()
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn modals(&self) -> &ModalRegistry {
        &self.modals
    }

    pub fn is_slide_active(&self, index: usize) -> bool {
        self.visibility.is_active(index)
    }

    pub fn is_transitioning(&self) -> bool {
        self.nav.is_transitioning()
    }

    fn reproject(&mut self) {
        self.view = ViewModel::project(self.nav.current(), self.nav.len(), self.padding);
    }

    fn navigated(&mut self, request: Option<ScrollRequest>) -> Vec<HostCommand> {
        match request {
            Some(req) => {
                self.reproject();
                vec![HostCommand::ScrollTo(req)]
            }
            None => Vec::new(),
        }
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> Vec<HostCommand> {
        match action {
            Action::Prev => {
                let req = self.nav.prev(now);
                self.navigated(req)
            }
            Action::Next => {
                let req = self.nav.next(now);
                self.navigated(req)
            }
            Action::First => {
                let req = self.nav.first(now);
                self.navigated(req)
            }
            Action::Last => {
                let req = self.nav.last(now);
                self.navigated(req)
            }
            Action::GoTo(index) => {
                let req = self.nav.go_to(index, now);
                self.navigated(req)
            }
            Action::Ordinal(digit) => {
                let req = self.nav.ordinal(digit, now);
                self.navigated(req)
            }
            Action::OpenHotspot(trigger) => {
                self.modals.open(&trigger);
                Vec::new()
            }
            Action::CloseModal(panel) => {
                self.modals.close(&panel);
                Vec::new()
            }
            Action::OutsideClick { panel, target } => {
                self.modals.close_on_outside_click(&panel, target);
                Vec::new()
            }
            Action::CloseAllModals => {
                self.modals.close_all();
                Vec::new()
            }
            Action::TouchStart { x, y } => {
                self.swipe.begin(x, y);
                Vec::new()
            }
            Action::TouchEnd { x, y } => {
                let req = match self.swipe.end(x, y) {
                    Some(SwipeStep::Next) => self.nav.next(now),
                    Some(SwipeStep::Prev) => self.nav.prev(now),
                    None => None,
                };
                self.navigated(req)
            }
            Action::TouchCancel => {
                self.swipe.cancel();
                Vec::new()
            }
            Action::ToggleFullscreen => vec![HostCommand::ToggleFullscreen],
            Action::ToggleTheme => vec![HostCommand::ToggleTheme],
            Action::ToggleHelp => vec![HostCommand::ToggleHelp],
            Action::Quit => vec![HostCommand::Quit],
        }
    }

    /// Feed the strip's scroll position through the visibility observer.
    /// The slide that becomes dominant is taken as current.
    pub fn on_scroll(&mut self, offset: f32, viewport_width: f32) -> Vec<VisibilityChange> {
        let ratios = visibility::visible_ratios(offset, viewport_width, self.nav.len());
        let changes = self.visibility.observe(&ratios);
        let mut changed = false;
        for change in &changes {
            if let VisibilityChange::Entered(index) = change {
                changed |= self.nav.observe_visible(*index);
            }
        }
        if changed {
            self.reproject();
        }
        changes
    }

    pub fn on_settled(&mut self) {
        self.nav.settle();
    }

    pub fn tick(&mut self, now: Instant) {
        self.nav.tick(now);
    }

    /// Swap in a reloaded deck, keeping the position where possible.
    pub fn reload(&mut self, deck: &Deck) {
        self.nav.resize(deck.len());
        self.visibility.resize(deck.len());
        self.modals = ModalRegistry::from_deck(deck);
        self.swipe.cancel();
        self.reproject();
    }

    /// Jump without a transition (start slide from the command line).
    pub fn start_at(&mut self, index: usize) {
        self.nav.observe_visible(index.min(self.nav.len().saturating_sub(1)));
        self.reproject();
    }
}
