//! Font name normalization and save-time font selection.
//!
//! Embedded font names arrive as raw base names, often with a subset tag
//! ("BAAAAA+ArialMT-Bold") and vendor suffixes. This module reduces them to
//! a canonical family plus a two-valued weight during extraction, and maps a
//! family/weight pair to one of the standard base fonts when the edited text
//! is drawn back.

pub mod metrics;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Font weight as carried through extraction and editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Bold weight (includes heavy/black/semibold raw names)
    Bold,
}

impl FontWeight {
    /// True for the bold variant.
    pub fn is_bold(&self) -> bool {
        matches!(self, FontWeight::Bold)
    }
}

/// Broad font classification used to pick a standard base font at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontClass {
    /// Times-like serif faces
    Serif,
    /// Helvetica-like sans faces (the default)
    Sans,
    /// Courier-like fixed-pitch faces
    Mono,
}

lazy_static! {
    /// Subset tag per the naming convention for embedded subsets:
    /// six uppercase letters and a plus sign.
    static ref SUBSET_TAG: Regex = Regex::new(r"^[A-Z]{6}\+").unwrap();

    /// Raw names that signal a bold face anywhere in the string.
    static ref BOLD_NAME: Regex =
        Regex::new(r"(?i)bold|heavy|black|demibold|semibold").unwrap();

    static ref SERIF_FAMILY: Regex =
        Regex::new(r"(?i)times|georgia|garamond|palatino|book|serif").unwrap();

    static ref MONO_FAMILY: Regex =
        Regex::new(r"(?i)courier|mono|consolas").unwrap();

    /// Canonical family names keyed by lowercased raw base name.
    static ref FAMILY_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("arialmt", "Arial");
        m.insert("arial", "Arial");
        m.insert("arialnarrow", "Arial");
        m.insert("helvetica", "Helvetica");
        m.insert("helveticaneue", "Helvetica");
        m.insert("timesnewromanps", "Times New Roman");
        m.insert("timesnewromanpsmt", "Times New Roman");
        m.insert("timesnewroman", "Times New Roman");
        m.insert("times", "Times New Roman");
        m.insert("couriernewps", "Courier New");
        m.insert("couriernewpsmt", "Courier New");
        m.insert("couriernew", "Courier New");
        m.insert("courier", "Courier New");
        m.insert("georgia", "Georgia");
        m.insert("verdana", "Verdana");
        m.insert("calibri", "Calibri");
        m.insert("cambria", "Cambria");
        m.insert("garamond", "Garamond");
        m
    };
}

/// Resolve a raw embedded font name to a canonical family.
///
/// Strips a subset tag if present, keeps the segment before the first `-` or
/// `,`, and looks the result up case-insensitively in the alias table. Names
/// with no alias entry pass through stripped but otherwise unchanged.
///
/// # Examples
///
/// ```
/// use pdf_retouch::fonts::resolve_family;
///
/// assert_eq!(resolve_family("BAAAAA+ArialMT-Bold"), "Arial");
/// assert_eq!(resolve_family("TimesNewRomanPS-ItalicMT"), "Times New Roman");
/// assert_eq!(resolve_family("SomeHouseFace"), "SomeHouseFace");
/// ```
pub fn resolve_family(raw_name: &str) -> String {
    let stripped = SUBSET_TAG.replace(raw_name, "");
    let base = stripped
        .split(|c| c == '-' || c == ',')
        .next()
        .unwrap_or(&stripped)
        .trim();

    match FAMILY_ALIASES.get(base.to_lowercase().as_str()) {
        Some(family) => (*family).to_string(),
        None => base.to_string(),
    }
}

/// Resolve the weight from the full, unstripped raw font name.
pub fn resolve_weight(raw_name: &str) -> FontWeight {
    if BOLD_NAME.is_match(raw_name) {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    }
}

/// Classify a canonical family for save-time font selection.
///
/// Unmatched families default to [`FontClass::Sans`].
pub fn resolve_class(family: &str) -> FontClass {
    if SERIF_FAMILY.is_match(family) {
        FontClass::Serif
    } else if MONO_FAMILY.is_match(family) {
        FontClass::Mono
    } else {
        FontClass::Sans
    }
}

/// Pick the standard base font the document library should draw with.
///
/// # Examples
///
/// ```
/// use pdf_retouch::fonts::base_font_name;
///
/// assert_eq!(base_font_name("Arial", false), "Helvetica");
/// assert_eq!(base_font_name("Times New Roman", true), "Times-Bold");
/// assert_eq!(base_font_name("Courier New", false), "Courier");
/// ```
pub fn base_font_name(family: &str, bold: bool) -> &'static str {
    match (resolve_class(family), bold) {
        (FontClass::Serif, false) => "Times-Roman",
        (FontClass::Serif, true) => "Times-Bold",
        (FontClass::Mono, false) => "Courier",
        (FontClass::Mono, true) => "Courier-Bold",
        (FontClass::Sans, false) => "Helvetica",
        (FontClass::Sans, true) => "Helvetica-Bold",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_tag_stripped() {
        assert_eq!(resolve_family("BAAAAA+ArialMT"), "Arial");
        assert_eq!(resolve_family("XYZABC+TimesNewRomanPSMT"), "Times New Roman");
    }

    #[test]
    fn test_subset_tag_requires_six_uppercase() {
        // A short or lowercase prefix is part of the name, not a tag
        assert_eq!(resolve_family("AB+Custom"), "AB+Custom");
        assert_eq!(resolve_family("abcdef+Custom"), "abcdef+Custom");
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        assert_eq!(resolve_family("ARIALMT"), "Arial");
        assert_eq!(resolve_family("couriernew"), "Courier New");
    }

    #[test]
    fn test_suffix_segments_dropped() {
        assert_eq!(resolve_family("Arial-BoldMT"), "Arial");
        assert_eq!(resolve_family("Calibri,Italic"), "Calibri");
    }

    #[test]
    fn test_unknown_family_passes_through() {
        assert_eq!(resolve_family("FFFAAA+HouseGrotesk-Medium"), "HouseGrotesk");
    }

    #[test]
    fn test_weight_from_full_name() {
        assert_eq!(resolve_weight("BAAAAA+ArialMT-Bold"), FontWeight::Bold);
        assert_eq!(resolve_weight("Helvetica-Black"), FontWeight::Bold);
        assert_eq!(resolve_weight("Gotham-SemiBold"), FontWeight::Bold);
        assert_eq!(resolve_weight("Minion-Heavy"), FontWeight::Bold);
        assert_eq!(resolve_weight("ArialMT"), FontWeight::Normal);
        assert_eq!(resolve_weight("Helvetica-Oblique"), FontWeight::Normal);
    }

    #[test]
    fn test_spec_alias_example() {
        assert_eq!(resolve_family("BAAAAA+ArialMT-Bold"), "Arial");
        assert!(resolve_weight("BAAAAA+ArialMT-Bold").is_bold());
    }

    #[test]
    fn test_font_classes() {
        assert_eq!(resolve_class("Times New Roman"), FontClass::Serif);
        assert_eq!(resolve_class("Georgia"), FontClass::Serif);
        assert_eq!(resolve_class("Courier New"), FontClass::Mono);
        assert_eq!(resolve_class("Arial"), FontClass::Sans);
        assert_eq!(resolve_class("HouseGrotesk"), FontClass::Sans);
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(base_font_name("Verdana", false), "Helvetica");
        assert_eq!(base_font_name("Verdana", true), "Helvetica-Bold");
        assert_eq!(base_font_name("Garamond", false), "Times-Roman");
        assert_eq!(base_font_name("Courier New", true), "Courier-Bold");
    }
}
