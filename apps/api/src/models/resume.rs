//! Resume document model.
//!
//! A `Resume` is the exclusive root of its profile, its ordered sections and
//! its style configuration — nothing is shared across resumes. Structural
//! invariants (unique section ids, all six theme categories present) are
//! enforced by construction, not by runtime checks.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::style::ResumeStyle;

/// The root resume document, stored as one JSON file per id.
///
/// `id`, `title` and the timestamps default when absent so a partial body
/// (a create request) deserializes; the persistence gateway overwrites them
/// before writing anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub styles: ResumeStyle,
}

fn default_title() -> String {
    "Untitled".to_string()
}

impl Resume {
    /// Builds the default document a newly created resume starts from:
    /// placeholder profile, the four standard sections (all visible, no
    /// items) and default styles. Id and timestamps are left unset — the
    /// persistence gateway stamps them on create.
    pub fn skeleton(title: &str) -> Self {
        Resume {
            id: String::new(),
            title: title.to_string(),
            created_at: None,
            updated_at: None,
            profile: Profile {
                name: "Your Name".to_string(),
                role: "Developer".to_string(),
                intro: String::new(),
                image: None,
                contact: BTreeMap::new(),
            },
            sections: vec![
                Section::empty("exp", SectionType::Experience, "Experience"),
                Section::empty("proj", SectionType::Project, "Projects"),
                Section::empty("edu", SectionType::Education, "Education"),
                Section::empty("act", SectionType::Activity, "Activities"),
            ],
            styles: ResumeStyle::default(),
        }
    }

    /// The lightweight view used by the resume picker.
    pub fn meta(&self) -> ResumeMeta {
        ResumeMeta {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Metadata-only listing entry: enough to populate the picker without
/// loading full document bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMeta {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile block: name, role, intro, optional image URL, and an open-ended
/// map of contact channels (email/phone/github/blog/anything). Empty values
/// are allowed at the model level — rendering omits them, validation is a
/// separate advisory concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contact: BTreeMap<String, String>,
}

/// Which named theme bucket styles a section; otherwise free-form display
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Experience,
    Project,
    Education,
    Activity,
    Custom,
}

/// A named, typed, orderable group of items. Sequence order in
/// `Resume::sections` is the display order and the target of the reorder
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionType,
    pub title: String,
    /// Absent means visible. Kept optional to match documents written
    /// before the toggle existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default)]
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn empty(id: &str, kind: SectionType, title: &str) -> Self {
        Section {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            visible: Some(true),
            items: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

/// One entry within a section (a job, a project, ...). May nest sub-items
/// to unbounded depth; editing recurses with a depth guard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<SectionItem>,
}

impl SectionItem {
    /// Fresh item prepended by the editor's add-item operation.
    pub fn placeholder() -> Self {
        SectionItem {
            id: Uuid::new_v4().to_string(),
            title: Some("New item".to_string()),
            ..SectionItem::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_has_four_visible_sections() {
        let r = Resume::skeleton("Test");
        assert_eq!(r.title, "Test");
        assert_eq!(r.sections.len(), 4);
        assert!(r.sections.iter().all(|s| s.is_visible()));
        assert_eq!(r.sections[0].kind, SectionType::Experience);
        assert!(r.id.is_empty());
        assert!(r.created_at.is_none());
    }

    #[test]
    fn test_section_ids_unique_in_skeleton() {
        let r = Resume::skeleton("x");
        let mut ids: Vec<&str> = r.sections.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), r.sections.len());
    }

    #[test]
    fn test_partial_body_deserializes() {
        let r: Resume = serde_json::from_str(r#"{"title":"Just a title"}"#).unwrap();
        assert_eq!(r.title, "Just a title");
        assert!(r.id.is_empty());
        assert!(r.sections.is_empty());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut r = Resume::skeleton("Wire");
        r.created_at = Some(Utc::now());
        r.sections[0].items.push(SectionItem {
            tech_stack: vec!["rust".to_string()],
            ..SectionItem::placeholder()
        });
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json["sections"][0]["items"][0].get("techStack").is_some());
        assert_eq!(json["sections"][0]["type"], "experience");
    }

    #[test]
    fn test_visible_absent_means_visible() {
        let s: Section =
            serde_json::from_str(r#"{"id":"a","type":"custom","title":"T","items":[]}"#).unwrap();
        assert!(s.visible.is_none());
        assert!(s.is_visible());
    }
}
