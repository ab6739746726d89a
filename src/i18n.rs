//! Interface text in English and Hindi.
//!
//! Keys map to chrome strings only; profile content stays in whatever
//! language the profile file is written in. Hindi entries cover the main
//! navigation and contact surfaces, and anything missing falls back to the
//! English table, then to the key itself.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Short tag for the top-bar indicator.
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Hi => "HI",
        }
    }
}

pub fn tr(lang: Language, key: &'static str) -> &'static str {
    if lang == Language::Hi
        && let Some(value) = lookup(HI, key)
    {
        return value;
    }
    lookup(EN, key).unwrap_or(key)
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, value)| *value)
}

static EN: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.about", "About"),
    ("nav.experience", "Experience"),
    ("nav.skills", "Skills"),
    ("nav.projects", "Projects"),
    ("nav.contact", "Contact"),
    ("hero.greeting", "Hi, I'm"),
    ("hero.hint", "g then a letter opens a section · / for commands · ? for help"),
    ("about.title", "About Me"),
    ("about.expertise", "Areas of Expertise"),
    ("about.education", "Education"),
    ("about.certifications", "Certifications"),
    ("experience.title", "Work Experience"),
    ("skills.title", "Skills & Technologies"),
    ("projects.title", "Featured Projects"),
    ("projects.all", "All"),
    ("projects.hint", "Enter opens the project page, f filters by tag"),
    ("contact.title", "Get In Touch"),
    (
        "contact.description",
        "I'm always interested in hearing about new projects and opportunities. Whether you have a question or just want to say hi, feel free to reach out!",
    ),
    ("contact.name", "Your Name"),
    ("contact.email", "Your Email"),
    ("contact.subject", "Subject"),
    ("contact.message", "Your Message"),
    ("contact.send", "Send Message"),
    ("contact.missing", "Name, e-mail and message are required"),
    ("contact.sent", "Mail draft opened in your e-mail client"),
    ("contact.send_failed", "Could not open a mail client"),
    ("contact.copied", "E-mail address copied"),
    ("contact.copy_failed", "Clipboard unavailable"),
    ("menu.title", "Menu"),
    ("menu.theme", "Theme"),
    ("menu.language", "Language"),
    ("menu.log", "Activity Log"),
    ("menu.mouse", "Mouse Capture"),
    ("menu.help", "Help"),
    ("menu.close_all", "Close All Windows"),
    ("menu.logout", "Log Out"),
    ("palette.placeholder", "Type a command"),
    ("palette.empty", "No matching commands"),
    ("palette.open_prefix", "Open"),
    ("palette.toggle_theme", "Toggle Theme"),
    ("palette.toggle_language", "Toggle Language"),
    ("log.title", "Activity Log"),
    ("log.empty", "Nothing logged yet"),
    ("help.title", "Help"),
    ("confirm.logout.title", "Log Out"),
    (
        "confirm.logout.body",
        "Close every window and leave the desktop?",
    ),
    ("confirm.cancel", "Cancel"),
    ("confirm.accept", "Log Out"),
];

static HI: &[(&str, &str)] = &[
    ("nav.home", "होम"),
    ("nav.about", "परिचय"),
    ("nav.experience", "अनुभव"),
    ("nav.skills", "कौशल"),
    ("nav.projects", "परियोजनाएं"),
    ("nav.contact", "संपर्क"),
    ("hero.greeting", "नमस्ते, मैं हूं"),
    ("about.title", "मेरे बारे में"),
    ("about.education", "शिक्षा"),
    ("experience.title", "कार्य अनुभव"),
    ("skills.title", "कौशल और प्रौद्योगिकियां"),
    ("projects.title", "विशेष परियोजनाएं"),
    ("projects.all", "सभी"),
    ("contact.title", "संपर्क करें"),
    (
        "contact.description",
        "मुझे नई परियोजनाओं और अवसरों के बारे में सुनने में हमेशा रुचि है। चाहे आपका कोई प्रश्न हो या बस नमस्ते कहना चाहते हों, बेझिझक संपर्क करें!",
    ),
    ("contact.name", "आपका नाम"),
    ("contact.email", "आपका ईमेल"),
    ("contact.message", "आपका संदेश"),
    ("contact.send", "संदेश भेजें"),
    ("menu.theme", "थीम"),
    ("menu.language", "भाषा"),
];
