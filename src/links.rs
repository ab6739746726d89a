use linkify::{LinkFinder, LinkKind};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use thiserror::Error;
use tracing::{debug, warn};

use crate::profile::Profile;
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// A named link harvested from the profile, surfaced in the command palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

/// A URL found by [`UrlScanner::scan`], borrowed from the scanned text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoundUrl<'t> {
    pub start: usize,
    pub url: &'t str,
}

impl FoundUrl<'_> {
    fn end(&self) -> usize {
        self.start + self.url.len()
    }
}

/// Sentence punctuation that `linkify` keeps when a URL ends a clause.
const TRAILING_PUNCT: &[char] = &['.', ',', '?', '!', ':', ';', ')', ']', '\'', '"'];

/// Finds http/https URLs in free-form prose.
#[derive(Debug)]
pub struct UrlScanner {
    finder: LinkFinder,
}

impl Default for UrlScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlScanner {
    pub fn new() -> Self {
        let mut finder = LinkFinder::new();
        finder.kinds(&[LinkKind::Url]);
        finder.url_must_have_scheme(true);
        Self { finder }
    }

    /// URLs found in `text`, with trailing sentence punctuation trimmed off.
    pub fn scan<'t>(&self, text: &'t str) -> Vec<FoundUrl<'t>> {
        self.finder
            .links(text)
            .filter_map(|hit| {
                let url = hit.as_str().trim_end_matches(TRAILING_PUNCT);
                if url.is_empty() {
                    return None;
                }
                Some(FoundUrl {
                    start: hit.start(),
                    url,
                })
            })
            .collect()
    }

    /// Splits `text` into spans, underlining every URL in the theme link color.
    pub fn styled_line(&self, text: &str, base: Style, theme: Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut cursor = 0;
        for found in self.scan(text) {
            if found.start > cursor {
                spans.push(Span::styled(text[cursor..found.start].to_string(), base));
            }
            spans.push(Span::styled(found.url.to_string(), link_style(base, theme)));
            cursor = found.end();
        }
        if cursor < text.len() || spans.is_empty() {
            spans.push(Span::styled(text[cursor..].to_string(), base));
        }
        Line::from(spans)
    }
}

pub fn link_style(base: Style, theme: Theme) -> Style {
    base.fg(theme.link_fg()).add_modifier(Modifier::UNDERLINED)
}

/// Gather every link the profile exposes, in a stable order: social links
/// first, then project repositories.
pub fn collect_profile_links(profile: &Profile) -> Vec<ProfileLink> {
    let mut links = Vec::new();
    let personal = &profile.personal;
    if let Some(url) = &personal.github {
        links.push(ProfileLink {
            label: "GitHub".to_string(),
            url: url.clone(),
        });
    }
    if let Some(url) = &personal.linkedin {
        links.push(ProfileLink {
            label: "LinkedIn".to_string(),
            url: url.clone(),
        });
    }
    for project in &profile.projects {
        if let Some(url) = &project.url {
            links.push(ProfileLink {
                label: project.name.clone(),
                url: url.clone(),
            });
        }
    }
    links
}

/// Hand `url` to the system browser. Errors are surfaced to the caller so the
/// UI can show them instead of dying mid-frame.
pub fn open_url(url: &str) -> Result<(), LinkError> {
    match webbrowser::open(url) {
        Ok(()) => {
            debug!(url, "opened link in browser");
            Ok(())
        }
        Err(source) => {
            warn!(url, error = %source, "failed to open link");
            Err(LinkError::Open {
                url: url.to_string(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_requires_a_scheme() {
        let scanner = UrlScanner::new();
        let found = scanner.scan("see https://example.com and www.nope.com");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://example.com");
    }

    #[test]
    fn trailing_punctuation_is_stripped() {
        let scanner = UrlScanner::new();
        let found = scanner.scan("docs at https://example.com/guide.");
        assert_eq!(found[0].url, "https://example.com/guide");
    }

    #[test]
    fn styled_line_splits_around_links() {
        let scanner = UrlScanner::new();
        let line = scanner.styled_line(
            "repo: https://example.com/r done",
            Style::default(),
            Theme::Dark,
        );
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content.as_ref(), "https://example.com/r");
        assert!(
            line.spans[1]
                .style
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
    }

    #[test]
    fn profile_links_order_social_before_projects() {
        let profile = Profile::load(None).unwrap();
        let links = collect_profile_links(&profile);
        assert!(links.len() >= 2);
        assert_eq!(links[0].label, "GitHub");
        assert_eq!(links[1].label, "LinkedIn");
        assert!(links.iter().any(|l| l.label == "Clinical Dashboard"));
    }
}
