use super::Action;

/// Keys the deck reacts to, independent of the host's key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Home,
    End,
    Digit(u8),
    F,
    D,
    H,
    Q,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Prev,
    Next,
    First,
    Last,
    Ordinal,
    CloseAllModals,
    ToggleFullscreen,
    ToggleTheme,
    ToggleHelp,
    Quit,
}

const BINDINGS: &[(Key, Binding)] = &[
    (Key::ArrowLeft, Binding::Prev),
    (Key::ArrowRight, Binding::Next),
    (Key::Space, Binding::Next),
    (Key::Escape, Binding::CloseAllModals),
    (Key::Home, Binding::First),
    (Key::End, Binding::Last),
    (Key::F, Binding::ToggleFullscreen),
    (Key::D, Binding::ToggleTheme),
    (Key::H, Binding::ToggleHelp),
    (Key::Q, Binding::Quit),
];

pub fn action_for(key: Key) -> Option<Action> {
    let binding = match key {
        Key::Digit(_) => Binding::Ordinal,
        _ => BINDINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, b)| *b)?,
    };
    Some(match binding {
        Binding::Prev => Action::Prev,
        Binding::Next => Action::Next,
        Binding::First => Action::First,
        Binding::Last => Action::Last,
        Binding::Ordinal => match key {
            Key::Digit(d @ 1..=9) => Action::Ordinal(d),
            _ => return None,
        },
        Binding::CloseAllModals => Action::CloseAllModals,
        Binding::ToggleFullscreen => Action::ToggleFullscreen,
        Binding::ToggleTheme => Action::ToggleTheme,
        Binding::ToggleHelp => Action::ToggleHelp,
        Binding::Quit => Action::Quit,
    })
}

/// Shortcut reference shown in the help overlay and `scrolldeck spec`.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2192} / Space", "Next slide"),
    ("\u{2190}", "Previous slide"),
    ("Home / End", "First / last slide"),
    ("1 - 9", "Jump to slide"),
    ("Swipe", "Next / previous slide"),
    ("Esc", "Close panels"),
    ("F", "Toggle fullscreen"),
    ("D", "Toggle theme"),
    ("H", "Toggle this help"),
    ("Q", "Quit"),
];
