//! The closed set of content sections.
//!
//! Everything that addresses a window goes through this enum, so a typo'd
//! section cannot exist at compile time. [`SectionId::ALL`] fixes the dock
//! and palette order.

use crate::i18n::{Language, tr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Home,
    About,
    Experience,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn label(self, lang: Language) -> &'static str {
        tr(lang, self.label_key())
    }

    pub fn label_key(self) -> &'static str {
        match self {
            SectionId::Home => "nav.home",
            SectionId::About => "nav.about",
            SectionId::Experience => "nav.experience",
            SectionId::Skills => "nav.skills",
            SectionId::Projects => "nav.projects",
            SectionId::Contact => "nav.contact",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SectionId::Home => "⌂",
            SectionId::About => "§",
            SectionId::Experience => "♦",
            SectionId::Skills => "↯",
            SectionId::Projects => "▣",
            SectionId::Contact => "✉",
        }
    }

    /// Second key of the `g` navigation sequence.
    pub fn hotkey(self) -> char {
        match self {
            SectionId::Home => 'h',
            SectionId::About => 'a',
            SectionId::Experience => 'e',
            SectionId::Skills => 's',
            SectionId::Projects => 'p',
            SectionId::Contact => 'c',
        }
    }

    pub fn from_hotkey(c: char) -> Option<SectionId> {
        SectionId::ALL.into_iter().find(|s| s.hotkey() == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_section_once() {
        assert_eq!(SectionId::ALL.len(), 6);
        for (i, a) in SectionId::ALL.iter().enumerate() {
            for b in SectionId::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn hotkeys_are_unique_and_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_hotkey(section.hotkey()), Some(section));
        }
        assert_eq!(SectionId::from_hotkey('z'), None);
    }

    #[test]
    fn labels_follow_the_language() {
        assert_eq!(SectionId::Projects.label(Language::En), "Projects");
        assert_eq!(SectionId::Projects.label(Language::Hi), "परियोजनाएं");
    }
}
