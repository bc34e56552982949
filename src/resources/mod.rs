//! Resource schema descriptors.
//!
//! Every content type the CMS manages is described here as data: its table,
//! scalar fields, file slots and child collections. The record service and the
//! request dispatcher are generic over these descriptors.

pub mod definitions;

use crate::error::AppError;

pub use definitions::{
    BANNERS, CLUBS, EDU_TOURS, EVENTS, FACULTY, GALLERY, PLACEMENT, RECRUITERS,
    RECRUIT_AND_PARTNER, TESTIMONIALS,
};

/// Order in which `list` returns rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Ascending id.
    Insertion,
    /// Most recently created first.
    NewestFirst,
}

/// A nullable text column written from a submitted field of the same name.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    /// Stored on create when the field is absent or blank.
    pub default: Option<&'static str>,
    /// Strip markup before storing.
    pub sanitize: bool,
}

impl Field {
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: None,
            sanitize: false,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            default: None,
            sanitize: false,
        }
    }

    pub const fn with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: Some(default),
            sanitize: false,
        }
    }

    pub const fn sanitized(name: &'static str, required: bool) -> Self {
        Self {
            name,
            required,
            default: None,
            sanitize: true,
        }
    }
}

/// One stored image attached to a parent row.
#[derive(Debug)]
pub struct FileSlot {
    /// Submission key carrying the upload (multipart part name or JSON key).
    pub input: &'static str,
    /// Column holding the relative `uploads/<file>` path.
    pub column: &'static str,
    /// Filename prefix for newly stored files.
    pub type_tag: &'static str,
    /// Record key of the derived absolute URL.
    pub url_key: &'static str,
    pub required: bool,
    /// Optional column receiving the bare generated filename.
    pub name_column: Option<&'static str>,
    /// Optional column receiving the stored byte size.
    pub size_column: Option<&'static str>,
}

impl FileSlot {
    pub const fn new(
        input: &'static str,
        column: &'static str,
        type_tag: &'static str,
        url_key: &'static str,
        required: bool,
    ) -> Self {
        Self {
            input,
            column,
            type_tag,
            url_key,
            required,
            name_column: None,
            size_column: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// Plain strings (tags).
    Text,
    /// Image references; new uploads are stored with `type_tag`.
    Image { type_tag: &'static str },
}

/// A 1:N child table holding one string value per row.
#[derive(Debug)]
pub struct ChildCollection {
    /// Record and submission key (`tags`, `gallery`).
    pub key: &'static str,
    pub table: &'static str,
    pub parent_column: &'static str,
    pub value_column: &'static str,
    pub kind: ChildKind,
}

#[derive(Debug)]
pub struct Messages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

#[derive(Debug)]
pub struct ResourceSchema {
    /// Path segment / `?resource=` value.
    pub key: &'static str,
    pub table: &'static str,
    /// Human label used in messages (`Club not found`).
    pub label: &'static str,
    pub fields: &'static [Field],
    pub files: &'static [FileSlot],
    pub children: &'static [ChildCollection],
    pub order: ListOrder,
    pub messages: Messages,
    /// Categories offered by the admin UI. Advertised, not enforced.
    pub categories: &'static [&'static str],
}

impl ResourceSchema {
    pub fn not_found(&self) -> AppError {
        AppError::NotFound(format!("{} not found", self.label))
    }

    /// Every column read back for a record, in a stable order.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec!["id"];
        columns.extend(self.fields.iter().map(|f| f.name));
        for slot in self.files {
            columns.push(slot.column);
            columns.extend(slot.name_column);
            columns.extend(slot.size_column);
        }
        columns.push("created_at");
        columns.push("updated_at");
        columns
    }
}

static ALL: [&ResourceSchema; 10] = [
    &GALLERY,
    &EVENTS,
    &CLUBS,
    &FACULTY,
    &PLACEMENT,
    &RECRUITERS,
    &TESTIMONIALS,
    &BANNERS,
    &EDU_TOURS,
    &RECRUIT_AND_PARTNER,
];

pub fn all() -> &'static [&'static ResourceSchema] {
    &ALL
}

pub fn find(key: &str) -> Option<&'static ResourceSchema> {
    ALL.iter().copied().find(|schema| schema.key == key)
}
