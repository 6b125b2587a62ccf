//! Template registry — maps a catalog id to its layout strategy and metadata.
//!
//! Built once at startup and shared read-only. Lookups for unknown ids fail loudly;
//! there is no fallback template.

use serde::Serialize;
use thiserror::Error;

use crate::layout::{Layout, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown template: '{id}'")]
    UnknownTemplate { id: String },
    #[error("duplicate template id: '{id}'")]
    Duplicate { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMeta {
    pub id: String,
    pub label: String,
    pub description: String,
    pub category: String,
    pub is_popular: bool,
    pub is_new: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    meta: TemplateMeta,
    layout: Layout,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: Vec<Entry>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template. Ids are unique; registration order is catalog order.
    pub fn register(&mut self, meta: TemplateMeta, layout: Layout) -> Result<(), RegistryError> {
        if self.entries.iter().any(|e| e.meta.id == meta.id) {
            return Err(RegistryError::Duplicate { id: meta.id });
        }
        self.entries.push(Entry { meta, layout });
        Ok(())
    }

    pub fn resolve(&self, id: &str) -> Result<Layout, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.meta.id == id)
            .map(|e| e.layout)
            .ok_or_else(|| RegistryError::UnknownTemplate { id: id.to_string() })
    }

    pub fn list(&self) -> Vec<TemplateMeta> {
        self.entries.iter().map(|e| e.meta.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The built-in catalog. A duplicate id in the table fails startup.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_table(BUILTIN)
    }

    fn from_table(rows: &[BuiltinRow]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (id, label, description, category, popular, new, layout) in rows {
            let meta = TemplateMeta {
                id: id.to_string(),
                label: label.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                is_popular: *popular,
                is_new: *new,
            };
            registry.register(meta, *layout)?;
        }
        Ok(registry)
    }
}

type BuiltinRow = (&'static str, &'static str, &'static str, &'static str, bool, bool, Layout);

const BUILTIN: &[BuiltinRow] = &[
    (
        "classic",
        "Classic",
        "Timeless single-column resume with ruled section headings, at home in any industry.",
        "professional",
        true,
        false,
        Layout::Classic { centered: false },
    ),
    (
        "traditional",
        "Traditional",
        "Centered header and conservative structure for law, finance and public sector roles.",
        "professional",
        false,
        false,
        Layout::Classic { centered: true },
    ),
    (
        "modern",
        "Modern",
        "Bold color header with a sidebar for skills and contact details.",
        "modern",
        true,
        false,
        Layout::Modern { sidebar: Side::Left },
    ),
    (
        "tech",
        "Tech",
        "Software engineer template with skill meters and project tags in a right-hand rail.",
        "modern",
        true,
        true,
        Layout::Modern { sidebar: Side::Right },
    ),
    (
        "minimal",
        "Minimal",
        "Quiet serif typography and generous whitespace that lets the content lead.",
        "simple",
        true,
        false,
        Layout::Minimal { compact: false },
    ),
    (
        "compact",
        "Compact",
        "Dense minimal layout that fits a long career onto fewer pages.",
        "simple",
        false,
        true,
        Layout::Minimal { compact: true },
    ),
    (
        "executive",
        "Executive",
        "Leadership resume with a core competencies grid and emphasis on impact.",
        "professional",
        true,
        false,
        Layout::Executive,
    ),
    (
        "creative",
        "Creative",
        "Full-height color sidebar for designers, marketers and other creative professionals.",
        "creative",
        false,
        false,
        Layout::Creative { sidebar: Side::Left },
    ),
    (
        "portfolio",
        "Portfolio",
        "Creative layout with the identity rail on the right and project tags up front.",
        "creative",
        false,
        true,
        Layout::Creative { sidebar: Side::Right },
    ),
    (
        "academic",
        "Academic",
        "Education-forward minimal layout suited to research and teaching positions.",
        "simple",
        false,
        false,
        Layout::Minimal { compact: false },
    ),
    (
        "corporate",
        "Corporate",
        "Structured executive layout for senior management and consulting.",
        "professional",
        false,
        false,
        Layout::Executive,
    ),
    (
        "startup",
        "Startup",
        "Energetic two-column layout for product and growth roles at young companies.",
        "modern",
        false,
        true,
        Layout::Modern { sidebar: Side::Left },
    ),
    (
        "elegant",
        "Elegant",
        "Centered classic layout with refined spacing for client-facing roles.",
        "professional",
        false,
        false,
        Layout::Classic { centered: true },
    ),
    (
        "student",
        "Student",
        "Compact single-column layout for graduates and internship applications.",
        "simple",
        false,
        false,
        Layout::Minimal { compact: true },
    ),
];
