//! The portfolio content model.
//!
//! A [`Profile`] is everything the section windows display: identity,
//! hero roles, stats, work history, skills, projects. The default is
//! compiled in from `assets/profile.toml`; `--profile` swaps in another
//! file with the same shape at startup.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_PROFILE: &str = include_str!("../assets/profile.toml");

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub personal: Personal,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub expertise: Vec<Expertise>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Personal {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub bio: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    /// Lines cycled by the home window's typing effect.
    #[serde(default)]
    pub hero_roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expertise {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub period: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub entries: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 0..=100, drawn as a gauge.
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certification {
    pub name: String,
}

impl Profile {
    /// Load from `path`, or the embedded default when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Profile, ProfileError> {
        match path {
            Some(path) => {
                let display = path.display().to_string();
                let text = fs::read_to_string(path).map_err(|source| ProfileError::Read {
                    path: display.clone(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| ProfileError::Parse {
                    path: display,
                    source,
                })
            }
            None => toml::from_str(EMBEDDED_PROFILE).map_err(|source| ProfileError::Parse {
                path: "<embedded>".to_string(),
                source,
            }),
        }
    }

    /// Every tag appearing on any project, deduplicated, in first-seen
    /// order. Drives the projects window's tag filter.
    pub fn project_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for project in &self.projects {
            for tag in &project.tags {
                if !tags.contains(&tag.as_str()) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}
