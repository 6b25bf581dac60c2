//! Declarative event dispatch.
//!
//! The host translates its own events into [`UiEvent`]s tagged with the
//! [`Role`] of the element they hit; [`dispatch`] maps those to [`Action`]s
//! for the deck widget. Nothing here knows about egui.

pub mod keys;
pub mod swipe;

pub use keys::Key;
pub use swipe::{SwipeStep, SwipeTracker};

use crate::modal::ClickTarget;

/// The part of the UI an event landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    PrevButton,
    NextButton,
    ProgressDot(usize),
    TimelineDot(usize),
    Hotspot(String),
    ModalClose(String),
    ModalBackdrop(String),
    ModalContent(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    End,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(Role),
    Key(Key),
    Touch { phase: TouchPhase, x: f32, y: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Prev,
    Next,
    First,
    Last,
    GoTo(usize),
    Ordinal(u8),
    OpenHotspot(String),
    CloseModal(String),
    OutsideClick { panel: String, target: ClickTarget },
    CloseAllModals,
    TouchStart { x: f32, y: f32 },
    TouchEnd { x: f32, y: f32 },
    TouchCancel,
    ToggleFullscreen,
    ToggleTheme,
    ToggleHelp,
    Quit,
}

pub fn dispatch(event: &UiEvent) -> Option<Action> {
    match event {
        UiEvent::Click(role) => Some(click_action(role)),
        UiEvent::Key(key) => keys::action_for(*key),
        UiEvent::Touch { phase, x, y } => Some(match phase {
            TouchPhase::Start => Action::TouchStart { x: *x, y: *y },
            TouchPhase::End => Action::TouchEnd { x: *x, y: *y },
            TouchPhase::Cancel => Action::TouchCancel,
        }),
    }
}

fn click_action(role: &Role) -> Action {
    match role {
        Role::PrevButton => Action::Prev,
        Role::NextButton => Action::Next,
        Role::ProgressDot(i) | Role::TimelineDot(i) => Action::GoTo(*i),
        Role::Hotspot(id) => Action::OpenHotspot(id.clone()),
        Role::ModalClose(panel) => Action::CloseModal(panel.clone()),
        Role::ModalBackdrop(panel) => Action::OutsideClick {
            panel: panel.clone(),
            target: ClickTarget::Backdrop,
        },
        Role::ModalContent(panel) => Action::OutsideClick {
            panel: panel.clone(),
            target: ClickTarget::Content,
        },
    }
}
