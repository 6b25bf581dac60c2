use std::collections::HashMap;

use crate::deck::Deck;

/// What a click inside an open overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the panel.
    Backdrop,
    /// The panel itself.
    Content,
}

#[derive(Debug, Clone)]
struct Panel {
    id: String,
    visible: bool,
}

/// Maps hotspot triggers to overlay panels and tracks which panels are shown.
///
/// Several triggers may open the same panel. Panels are independent; nothing
/// stops two from being visible at once.
#[derive(Debug, Clone, Default)]
pub struct ModalRegistry {
    triggers: HashMap<String, String>,
    panels: Vec<Panel>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_deck(deck: &Deck) -> Self {
        let mut registry = Self::new();
        for modal in &deck.modals {
            registry.add_panel(&modal.id);
        }
        for hotspot in deck.slides.iter().flat_map(|s| &s.hotspots) {
            registry.add_trigger(&hotspot.id, &hotspot.modal);
        }
        registry
    }

    pub fn add_panel(&mut self, id: &str) {
        if self.panel(id).is_none() {
            self.panels.push(Panel {
                id: id.to_string(),
                visible: false,
            });
        }
    }

    pub fn add_trigger(&mut self, trigger: &str, panel: &str) {
        self.triggers
            .insert(trigger.to_string(), panel.to_string());
    }

    fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    fn panel_mut(&mut self, id: &str) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    /// Show the panel `trigger` points at. Unknown triggers and triggers
    /// naming a missing panel do nothing.
    pub fn open(&mut self, trigger: &str) -> bool {
        let Some(target) = self.triggers.get(trigger).cloned() else {
            log::debug!("no modal registered for trigger '{trigger}'");
            return false;
        };
        match self.panel_mut(&target) {
            Some(panel) => {
                panel.visible = true;
                log::debug!("open modal '{target}'");
                true
            }
            None => {
                log::debug!("trigger '{trigger}' names missing modal '{target}'");
                false
            }
        }
    }

    pub fn close(&mut self, panel: &str) {
        if let Some(p) = self.panel_mut(panel) {
            p.visible = false;
        }
    }

    /// Close only when the click hit the backdrop, not the panel content.
    pub fn close_on_outside_click(&mut self, panel: &str, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close(panel);
        }
    }

    pub fn close_all(&mut self) {
        for p in &mut self.panels {
            p.visible = false;
        }
    }

    pub fn is_visible(&self, panel: &str) -> bool {
        self.panel(panel).is_some_and(|p| p.visible)
    }

    pub fn any_visible(&self) -> bool {
        self.panels.iter().any(|p| p.visible)
    }

    /// Visible panel ids in registration order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.panels
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.as_str())
    }

    pub fn target_of(&self, trigger: &str) -> Option<&str> {
        self.triggers.get(trigger).map(String::as_str)
    }
}
