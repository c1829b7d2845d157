/// Top-level view shown under the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Chat,
    Pricing,
    Features,
    Contact,
}

impl Section {
    /// Sections in navigation-bar order.
    pub const ALL: [Section; 4] = [
        Section::Chat,
        Section::Features,
        Section::Pricing,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Chat => "Чат",
            Section::Pricing => "Тарифы",
            Section::Features => "Возможности",
            Section::Contact => "Контакты",
        }
    }

    /// Stable key for element ids and logs.
    pub fn key(self) -> &'static str {
        match self {
            Section::Chat => "chat",
            Section::Pricing => "pricing",
            Section::Features => "features",
            Section::Contact => "contact",
        }
    }
}

/// Presentation state of the shell: which section is active and whether the chat sidebar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    active_section: Section,
    sidebar_open: bool,
}

impl ViewState {
    pub fn new(sidebar_open: bool) -> Self {
        Self {
            active_section: Section::default(),
            sidebar_open,
        }
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Returns `false` when `section` was already active.
    pub fn set_active_section(&mut self, section: Section) -> bool {
        if self.active_section == section {
            return false;
        }

        tracing::debug!(
            from = self.active_section.key(),
            to = section.key(),
            "switched section"
        );
        self.active_section = section;
        true
    }

    /// Flips the sidebar and returns the new value.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_chat_with_open_sidebar() {
        let state = ViewState::default();

        assert_eq!(state.active_section(), Section::Chat);
        assert!(state.sidebar_open());
    }

    #[test]
    fn every_section_reachable_from_every_other() {
        for from in Section::ALL {
            for to in Section::ALL {
                let mut state = ViewState::default();
                state.set_active_section(from);
                state.set_active_section(to);
                assert_eq!(state.active_section(), to);
            }
        }
    }

    #[test]
    fn reselecting_active_section_is_idempotent() {
        let mut state = ViewState::default();
        assert!(state.set_active_section(Section::Pricing));

        let before = state;
        assert!(!state.set_active_section(Section::Pricing));
        assert_eq!(state, before);
    }

    #[test]
    fn toggling_twice_restores_sidebar() {
        for initial in [true, false] {
            let mut state = ViewState::new(initial);
            assert_eq!(state.toggle_sidebar(), !initial);
            assert_eq!(state.toggle_sidebar(), initial);
        }
    }

    #[test]
    fn navigation_order_lists_each_section_once() {
        let keys = Section::ALL.map(Section::key);
        assert_eq!(keys, ["chat", "features", "pricing", "contact"]);
    }
}
