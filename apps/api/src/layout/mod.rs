// Template rendering engine.
// A layout maps (resume data, theme, settings) to a PageTree. It is a pure function:
// no I/O, no mutation of its inputs, never fails on incomplete data.

pub mod classic;
pub mod common;
pub mod creative;
pub mod executive;
pub mod font_metrics;
pub mod minimal;
pub mod modern;
pub mod tree;

use serde::Serialize;

pub use font_metrics::{FontFamily, PaperSize};
pub use tree::{PageTree, SectionKind, Side};

use crate::models::{ResumeData, ResumeSettings};
use crate::theme::{Palette, Theme};

/// Inputs every strategy reads. The palette is derived once per render.
pub struct LayoutContext<'a> {
    pub data: &'a ResumeData,
    pub palette: Palette,
    pub font: FontFamily,
}

/// The closed set of layout strategies. Catalog entries pick a variant plus options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Layout {
    Classic { centered: bool },
    Modern { sidebar: Side },
    Minimal { compact: bool },
    Executive,
    Creative { sidebar: Side },
}

impl Layout {
    /// One representative of each strategy.
    pub const ALL: [Layout; 5] = [
        Layout::Classic { centered: false },
        Layout::Modern { sidebar: Side::Left },
        Layout::Minimal { compact: false },
        Layout::Executive,
        Layout::Creative { sidebar: Side::Left },
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Classic { .. } => "classic",
            Layout::Modern { .. } => "modern",
            Layout::Minimal { .. } => "minimal",
            Layout::Executive => "executive",
            Layout::Creative { .. } => "creative",
        }
    }

    /// Face used when the settings carry no (recognised) override.
    pub fn default_font(&self) -> FontFamily {
        match self {
            Layout::Minimal { .. } => FontFamily::Times,
            _ => FontFamily::Helvetica,
        }
    }

    pub fn layout(&self, data: &ResumeData, theme: &Theme, settings: &ResumeSettings) -> PageTree {
        let font = settings
            .font_family
            .as_deref()
            .and_then(FontFamily::from_setting)
            .unwrap_or_else(|| self.default_font());
        let ctx = LayoutContext {
            data,
            palette: theme.palette(),
            font,
        };
        match *self {
            Layout::Classic { centered } => classic::layout(&ctx, centered),
            Layout::Modern { sidebar } => modern::layout(&ctx, sidebar),
            Layout::Minimal { compact } => minimal::layout(&ctx, compact),
            Layout::Executive => executive::layout(&ctx),
            Layout::Creative { sidebar } => creative::layout(&ctx, sidebar),
        }
    }
}
