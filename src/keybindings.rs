use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Shell-level actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    OpenPalette,
    OpenHelp,
    ToggleTheme,
    ToggleLanguage,
    // 'g' arms a two-key section jump (g then a section hotkey)
    SectionPrefix,
    // Active-window actions
    MinimizeActive,
    MaximizeActive,
    CloseActive,
    CycleNextWindow,
    CyclePrevWindow,
    // Desktop menu
    MenuToggle,
    MenuUp,
    MenuDown,
    MenuSelect,
    MenuNext, // 'j'
    MenuPrev, // 'k'
    // Confirm dialog navigation/actions
    ConfirmToggle,
    ConfirmLeft,
    ConfirmRight,
    ConfirmAccept,
    ConfirmCancel,
    // Scrolling
    ScrollPageUp,
    ScrollPageDown,
    ScrollHome,
    ScrollEnd,
    ScrollUp,
    ScrollDown,
}

/// A key plus the exact modifier set it must arrive with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chord {
    code: KeyCode,
    mods: KeyModifiers,
}

fn bare(code: KeyCode) -> Chord {
    Chord {
        code,
        mods: KeyModifiers::NONE,
    }
}

fn ctrl(c: char) -> Chord {
    Chord {
        code: KeyCode::Char(c),
        mods: KeyModifiers::CONTROL,
    }
}

fn shifted(code: KeyCode) -> Chord {
    Chord {
        code,
        mods: KeyModifiers::SHIFT,
    }
}

fn default_chords() -> Vec<(Action, Chord)> {
    use Action::*;
    use KeyCode::*;
    vec![
        (Quit, ctrl('q')),
        (OpenPalette, bare(Char('/'))),
        (OpenPalette, ctrl('k')),
        // '?' arrives with or without SHIFT depending on the terminal.
        (OpenHelp, bare(Char('?'))),
        (OpenHelp, shifted(Char('?'))),
        (OpenHelp, bare(F(1))),
        (ToggleTheme, bare(Char('t'))),
        (ToggleLanguage, bare(Char('l'))),
        (SectionPrefix, bare(Char('g'))),
        (MinimizeActive, bare(Char('m'))),
        (MaximizeActive, bare(Char('f'))),
        (CloseActive, bare(Char('x'))),
        (CycleNextWindow, bare(Tab)),
        // BackTab is reported with SHIFT on most terminals, bare on a few.
        (CyclePrevWindow, shifted(BackTab)),
        (CyclePrevWindow, bare(BackTab)),
        (MenuToggle, bare(Esc)),
        (MenuUp, bare(Up)),
        (MenuDown, bare(Down)),
        (MenuSelect, bare(Enter)),
        (MenuNext, bare(Char('j'))),
        (MenuPrev, bare(Char('k'))),
        (ConfirmToggle, bare(Tab)),
        (ConfirmToggle, shifted(BackTab)),
        (ConfirmLeft, bare(Left)),
        (ConfirmRight, bare(Right)),
        (ConfirmAccept, bare(Enter)),
        (ConfirmAccept, bare(Char('y'))),
        (ConfirmCancel, bare(Esc)),
        (ConfirmCancel, bare(Char('n'))),
        (ScrollPageUp, bare(PageUp)),
        (ScrollPageDown, bare(PageDown)),
        (ScrollHome, bare(Home)),
        (ScrollEnd, bare(End)),
        (ScrollUp, bare(Up)),
        (ScrollDown, bare(Down)),
    ]
}

/// Maps shell actions to the chords that trigger them.
///
/// Bare letters only act when no text input is focused, which the desktop
/// guarantees by routing palette input first.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<Chord>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map: HashMap<Action, Vec<Chord>> = HashMap::new();
        for (action, chord) in default_chords() {
            map.entry(action).or_default().push(chord);
        }
        Self { map }
    }
}

impl KeyBindings {
    /// True when `key` is one of the chords bound to `action`. Modifiers
    /// must match exactly, so a bare binding ignores Ctrl-modified presses.
    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map.get(&action).is_some_and(|chords| {
            chords
                .iter()
                .any(|c| c.code == key.code && c.mods == key.modifiers)
        })
    }
}
