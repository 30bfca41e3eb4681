pub mod commands;

pub use commands::{
    apply, EditCommand, ItemField, ProfileField, SectionAnchor, ThemeField,
};
