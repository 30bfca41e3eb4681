//! Style configuration: per-category size/spacing scale factors.
//!
//! The theme map is a closed set — the six categories always resolve to a
//! `SectionTheme`. Documents written with missing categories fall back to
//! their own `global` theme at deserialization time, so no category can ever
//! resolve to "no style".

use serde::{Deserialize, Serialize};

/// Five positive scale factors for one theme bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTheme {
    pub header_size: f64,
    pub item_title_size: f64,
    pub subtitle_size: f64,
    pub text_size: f64,
    pub spacing: f64,
}

impl Default for SectionTheme {
    fn default() -> Self {
        SectionTheme {
            header_size: 1.5,
            item_title_size: 1.25,
            subtitle_size: 1.0,
            text_size: 0.95,
            spacing: 1.0,
        }
    }
}

impl SectionTheme {
    /// The profile bucket starts emphasized: a large header, slightly
    /// smaller supporting text.
    pub fn profile_default() -> Self {
        SectionTheme {
            header_size: 2.75,
            item_title_size: 1.1,
            subtitle_size: 0.9,
            text_size: 1.0,
            spacing: 1.0,
        }
    }
}

/// The six style buckets: `global` plus the five section types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Global,
    Profile,
    Experience,
    Project,
    Education,
    Activity,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 6] = [
        ThemeCategory::Global,
        ThemeCategory::Profile,
        ThemeCategory::Experience,
        ThemeCategory::Project,
        ThemeCategory::Education,
        ThemeCategory::Activity,
    ];
}

/// One `SectionTheme` per category. A struct rather than a map keeps the
/// category set closed by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ThemeMapWire")]
pub struct ThemeMap {
    pub global: SectionTheme,
    pub profile: SectionTheme,
    pub experience: SectionTheme,
    pub project: SectionTheme,
    pub education: SectionTheme,
    pub activity: SectionTheme,
}

impl Default for ThemeMap {
    fn default() -> Self {
        ThemeMap {
            global: SectionTheme::default(),
            profile: SectionTheme::profile_default(),
            experience: SectionTheme::default(),
            project: SectionTheme::default(),
            education: SectionTheme::default(),
            activity: SectionTheme::default(),
        }
    }
}

impl ThemeMap {
    pub fn get(&self, category: ThemeCategory) -> &SectionTheme {
        match category {
            ThemeCategory::Global => &self.global,
            ThemeCategory::Profile => &self.profile,
            ThemeCategory::Experience => &self.experience,
            ThemeCategory::Project => &self.project,
            ThemeCategory::Education => &self.education,
            ThemeCategory::Activity => &self.activity,
        }
    }

    pub fn get_mut(&mut self, category: ThemeCategory) -> &mut SectionTheme {
        match category {
            ThemeCategory::Global => &mut self.global,
            ThemeCategory::Profile => &mut self.profile,
            ThemeCategory::Experience => &mut self.experience,
            ThemeCategory::Project => &mut self.project,
            ThemeCategory::Education => &mut self.education,
            ThemeCategory::Activity => &mut self.activity,
        }
    }
}

/// Wire shape for `ThemeMap`: categories missing from a stored document
/// inherit the document's `global` theme rather than the crate defaults.
#[derive(Deserialize)]
struct ThemeMapWire {
    #[serde(default)]
    global: SectionTheme,
    #[serde(default)]
    profile: Option<SectionTheme>,
    #[serde(default)]
    experience: Option<SectionTheme>,
    #[serde(default)]
    project: Option<SectionTheme>,
    #[serde(default)]
    education: Option<SectionTheme>,
    #[serde(default)]
    activity: Option<SectionTheme>,
}

impl From<ThemeMapWire> for ThemeMap {
    fn from(wire: ThemeMapWire) -> Self {
        let global = wire.global;
        ThemeMap {
            profile: wire.profile.unwrap_or_else(|| global.clone()),
            experience: wire.experience.unwrap_or_else(|| global.clone()),
            project: wire.project.unwrap_or_else(|| global.clone()),
            education: wire.education.unwrap_or_else(|| global.clone()),
            activity: wire.activity.unwrap_or_else(|| global.clone()),
            global,
        }
    }
}

/// Document-wide style configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeStyle {
    #[serde(default)]
    pub theme: ThemeMap,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default = "default_section_spacing")]
    pub section_spacing: f64,
}

fn default_line_height() -> f64 {
    1.6
}

fn default_section_spacing() -> f64 {
    1.0
}

impl Default for ResumeStyle {
    fn default() -> Self {
        ResumeStyle {
            theme: ThemeMap::default(),
            line_height: default_line_height(),
            section_spacing: default_section_spacing(),
        }
    }
}
