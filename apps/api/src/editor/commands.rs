//! Editor mutation API: a closed set of pure, total transformations.
//!
//! Every editable field gets its own command variant, dispatched through a
//! single `apply` function — no string-keyed field access. `apply` always
//! returns a new document; a command addressing a missing section, item,
//! point or index is a no-op that returns the input unchanged. It never
//! fails: totality is the deliberate trade against partiality here.

use crate::models::resume::{Link, Resume, Section, SectionItem};
use crate::models::style::ThemeCategory;

/// Sub-item recursion stops here. Items only nest by construction so a
/// cycle should be impossible, but an accidental one must not hang the
/// editor.
const MAX_ITEM_DEPTH: usize = 16;

/// Placeholder appended by the add-point operation.
const NEW_POINT: &str = "New bullet point";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Role,
    Intro,
    Image,
}

/// One variant per editable item field, carrying the new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Title(String),
    Subtitle(String),
    Date(String),
    Description(String),
    Location(String),
    TechStack(Vec<String>),
    Links(Vec<Link>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeField {
    HeaderSize,
    ItemTitleSize,
    SubtitleSize,
    TextSize,
    Spacing,
}

/// Where a moved section lands relative to another section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionAnchor {
    Before(String),
    After(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    SetProfileField {
        field: ProfileField,
        value: String,
    },
    SetContact {
        channel: String,
        value: String,
    },
    SetSectionTitle {
        section_id: String,
        title: String,
    },
    /// Absent visibility counts as visible, so the first toggle hides.
    ToggleSectionVisibility {
        section_id: String,
    },
    /// Prepends a fresh item with a generated id.
    AddItem {
        section_id: String,
    },
    RemoveItem {
        section_id: String,
        item_id: String,
    },
    SetItemField {
        section_id: String,
        item_id: String,
        field: ItemField,
    },
    AddPoint {
        section_id: String,
        item_id: String,
    },
    RemovePoint {
        section_id: String,
        item_id: String,
        index: usize,
    },
    SetPoint {
        section_id: String,
        item_id: String,
        index: usize,
        value: String,
    },
    /// Standard array-move: remove at the old index, insert at the new one.
    MoveSection {
        section_id: String,
        anchor: SectionAnchor,
    },
    SetThemeField {
        category: ThemeCategory,
        field: ThemeField,
        value: f64,
    },
    /// Copies one category's theme to all six buckets, itself included.
    ApplyThemeToAll {
        category: ThemeCategory,
    },
    SetLineHeight(f64),
    SetSectionSpacing(f64),
}

/// Applies one command, yielding a structurally new document with exactly
/// the addressed node replaced.
pub fn apply(resume: &Resume, command: EditCommand) -> Resume {
    let mut next = resume.clone();
    match command {
        EditCommand::SetProfileField { field, value } => match field {
            ProfileField::Name => next.profile.name = value,
            ProfileField::Role => next.profile.role = value,
            ProfileField::Intro => next.profile.intro = value,
            ProfileField::Image => {
                next.profile.image = if value.is_empty() { None } else { Some(value) }
            }
        },
        EditCommand::SetContact { channel, value } => {
            next.profile.contact.insert(channel, value);
        }
        EditCommand::SetSectionTitle { section_id, title } => {
            with_section(&mut next, &section_id, |section| section.title = title);
        }
        EditCommand::ToggleSectionVisibility { section_id } => {
            with_section(&mut next, &section_id, |section| {
                section.visible = Some(!section.is_visible());
            });
        }
        EditCommand::AddItem { section_id } => {
            with_section(&mut next, &section_id, |section| {
                section.items.insert(0, SectionItem::placeholder());
            });
        }
        EditCommand::RemoveItem {
            section_id,
            item_id,
        } => {
            with_section(&mut next, &section_id, |section| {
                section.items.retain(|item| item.id != item_id);
            });
        }
        EditCommand::SetItemField {
            section_id,
            item_id,
            field,
        } => {
            with_item(&mut next, &section_id, &item_id, |item| match field {
                ItemField::Title(v) => item.title = Some(v),
                ItemField::Subtitle(v) => item.subtitle = Some(v),
                ItemField::Date(v) => item.date = Some(v),
                ItemField::Description(v) => item.description = Some(v),
                ItemField::Location(v) => item.location = Some(v),
                ItemField::TechStack(v) => item.tech_stack = v,
                ItemField::Links(v) => item.links = v,
            });
        }
        EditCommand::AddPoint {
            section_id,
            item_id,
        } => {
            with_item(&mut next, &section_id, &item_id, |item| {
                item.points.push(NEW_POINT.to_string());
            });
        }
        EditCommand::RemovePoint {
            section_id,
            item_id,
            index,
        } => {
            with_item(&mut next, &section_id, &item_id, |item| {
                if index < item.points.len() {
                    item.points.remove(index);
                }
            });
        }
        EditCommand::SetPoint {
            section_id,
            item_id,
            index,
            value,
        } => {
            with_item(&mut next, &section_id, &item_id, |item| {
                if let Some(point) = item.points.get_mut(index) {
                    *point = value;
                }
            });
        }
        EditCommand::MoveSection { section_id, anchor } => {
            move_section(&mut next.sections, &section_id, &anchor);
        }
        EditCommand::SetThemeField {
            category,
            field,
            value,
        } => {
            let theme = next.styles.theme.get_mut(category);
            match field {
                ThemeField::HeaderSize => theme.header_size = value,
                ThemeField::ItemTitleSize => theme.item_title_size = value,
                ThemeField::SubtitleSize => theme.subtitle_size = value,
                ThemeField::TextSize => theme.text_size = value,
                ThemeField::Spacing => theme.spacing = value,
            }
        }
        EditCommand::ApplyThemeToAll { category } => {
            let source = next.styles.theme.get(category).clone();
            for target in ThemeCategory::ALL {
                *next.styles.theme.get_mut(target) = source.clone();
            }
        }
        EditCommand::SetLineHeight(value) => next.styles.line_height = value,
        EditCommand::SetSectionSpacing(value) => next.styles.section_spacing = value,
    }
    next
}

fn with_section(resume: &mut Resume, section_id: &str, edit: impl FnOnce(&mut Section)) {
    if let Some(section) = resume.sections.iter_mut().find(|s| s.id == section_id) {
        edit(section);
    }
}

fn with_item(
    resume: &mut Resume,
    section_id: &str,
    item_id: &str,
    edit: impl FnOnce(&mut SectionItem),
) {
    let item = resume
        .sections
        .iter_mut()
        .find(|s| s.id == section_id)
        .and_then(|section| find_item_mut(&mut section.items, item_id, 0));
    if let Some(item) = item {
        edit(item);
    }
}

/// Depth-first search through an item tree, including nested sub-items.
fn find_item_mut<'a>(
    items: &'a mut [SectionItem],
    item_id: &str,
    depth: usize,
) -> Option<&'a mut SectionItem> {
    if depth > MAX_ITEM_DEPTH {
        return None;
    }
    for item in items.iter_mut() {
        if item.id == item_id {
            return Some(item);
        }
        if let Some(found) = find_item_mut(&mut item.sub_items, item_id, depth + 1) {
            return Some(found);
        }
    }
    None
}

fn move_section(sections: &mut Vec<Section>, section_id: &str, anchor: &SectionAnchor) {
    let (anchor_id, place_after) = match anchor {
        SectionAnchor::Before(id) => (id.as_str(), false),
        SectionAnchor::After(id) => (id.as_str(), true),
    };
    if anchor_id == section_id {
        return;
    }
    let Some(from) = sections.iter().position(|s| s.id == section_id) else {
        return;
    };
    if !sections.iter().any(|s| s.id == anchor_id) {
        return;
    }

    let section = sections.remove(from);
    // The anchor is still present: it is a different section than the moved one.
    let Some(anchor_index) = sections.iter().position(|s| s.id == anchor_id) else {
        sections.insert(from, section);
        return;
    };
    let to = if place_after { anchor_index + 1 } else { anchor_index };
    sections.insert(to.min(sections.len()), section);
}
