use rust_embed::Embed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use crate::motion::{MotionError, MotionPresets, SectionMotion};

pub static GLOBAL_PORTFOLIO: LazyLock<Result<Portfolio, ContentError>> =
    LazyLock::new(|| load("portfolio.json"));
pub static GLOBAL_MOTION: LazyLock<Result<MotionPresets, ContentError>> =
    LazyLock::new(|| load("motion.json"));

#[derive(Embed)]
#[folder = "content"]
pub struct Content;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("content file `{0}` not found")]
    NotFound(String),
    #[error("couldn't parse `{file}`: {reason}")]
    Parse { file: String, reason: String },
}

fn load<T: DeserializeOwned>(file: &str) -> Result<T, ContentError> {
    let content = Content::get(file).ok_or_else(|| ContentError::NotFound(file.to_string()))?;
    serde_json::from_slice(&content.data).map_err(|e| ContentError::Parse {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

pub fn portfolio() -> Result<&'static Portfolio, ContentError> {
    GLOBAL_PORTFOLIO.as_ref().map_err(Clone::clone)
}

pub fn motion_presets() -> Result<&'static MotionPresets, ContentError> {
    GLOBAL_MOTION.as_ref().map_err(Clone::clone)
}

/// The motion preset for one page section.
pub fn section_motion(name: &str) -> Result<SectionMotion, MotionError> {
    let presets = motion_presets().map_err(|e| {
        log::warn!("motion presets unavailable: {e}");
        MotionError::UnknownSection(name.to_string())
    })?;
    presets.section(name).cloned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: String,
    pub hero: Hero,
    pub about: Vec<String>,
    pub experience: Vec<Experience>,
    pub philosophy: Vec<Paragraph>,
    pub excellence: String,
    pub skills: Skills,
    pub learning: Vec<Paragraph>,
    pub projects: Vec<Project>,
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub title: Vec<String>,
    pub tagline: String,
    pub name: Vec<String>,
    pub note: String,
    pub portrait: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Running text with some phrases set in emphasis.
pub type Paragraph = Vec<Segment>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    #[serde(default)]
    pub emphasis: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skills {
    pub title: Vec<String>,
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub special: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub kind: String,
    pub link: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub heading: String,
    pub blurb: String,
    pub email: String,
    pub quick_links: Vec<Link>,
    pub socials: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Viewport;

    const SECTIONS: [&str; 10] = [
        "nav",
        "hero",
        "about",
        "experience",
        "philosophy",
        "excellence",
        "skills",
        "learning",
        "projects",
        "contact",
    ];

    #[test]
    fn test_portfolio_parses() {
        let portfolio = portfolio().unwrap();
        assert_eq!(portfolio.experience.len(), 6);
        assert_eq!(portfolio.philosophy.len(), 3);
        assert!(portfolio.experience[0].link.is_some());
        assert!(portfolio.experience[1].highlights.is_empty());
    }

    #[test]
    fn test_learning_emphasis_matches_presets() {
        let portfolio = portfolio().unwrap();
        let emphasized = portfolio
            .learning
            .iter()
            .flatten()
            .filter(|s| s.emphasis)
            .count();
        assert_eq!(emphasized, 6);
    }

    #[test]
    fn test_every_section_plans_at_both_breakpoints() {
        let presets = motion_presets().unwrap();
        for name in SECTIONS {
            let motion = presets.section(name).unwrap();
            for viewport in [Viewport::new(390.0, 844.0), Viewport::new(1440.0, 900.0)] {
                let plan = motion
                    .plan(viewport)
                    .unwrap_or_else(|e| panic!("{name} at {viewport:?}: {e}"));
                assert!(plan.skipped.is_empty(), "{name}: {:?}", plan.skipped);
            }
        }
    }

    #[test]
    fn test_every_section_has_a_preset() {
        let mut names = motion_presets().unwrap().names().collect::<Vec<_>>();
        names.sort_unstable();
        let mut expected = SECTIONS.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_contact_only_animates_on_mobile() {
        let contact = section_motion("contact").unwrap();
        assert!(contact.plan(Viewport::new(1440.0, 900.0)).unwrap().tracks.is_empty());
        assert_eq!(contact.plan(Viewport::new(390.0, 844.0)).unwrap().tracks.len(), 1);
    }

    #[test]
    fn test_missing_section() {
        assert_eq!(
            section_motion("testimonials").unwrap_err(),
            MotionError::UnknownSection("testimonials".to_string())
        );
    }
}
