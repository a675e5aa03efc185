//! Character formatting: font, size, colors, weight and slant.
//!
//! - [`TextAttributes`]: Bitflags for bold and italic
//! - [`Style`]: The full attribute set applied to a styled run
//! - [`StyleBuilder`]: Fluent builder for constructing styles
//!
//! Styles use *replace* semantics. Applying a style to a range overwrites
//! every field, so `Style::plain()` clears bold and italic instead of
//! leaving earlier values in place.
//!
//! Family and size are only set through methods that normalize them: the
//! size is at least 1 point, and the family has no `;` and no surrounding
//! whitespace, as RTF font tables require.
//!
//! # Examples
//!
//! ```
//! use quillpad::{Rgb, Style, TextAttributes};
//!
//! let heading = Style::builder()
//!     .family("Monospaced")
//!     .size(18)
//!     .fg(Rgb::BLUE)
//!     .bold()
//!     .build();
//!
//! assert_eq!(heading.family(), "Monospaced");
//! assert!(heading.attributes.contains(TextAttributes::BOLD));
//! assert!(heading.with_plain().attributes.is_empty());
//! ```

use crate::color::Rgb;
use bitflags::bitflags;

bitflags! {
    /// Weight and slant flags.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold weight.
        const BOLD   = 0x01;
        /// Italic slant.
        const ITALIC = 0x02;
    }
}

/// Default font family for new documents.
pub const DEFAULT_FAMILY: &str = "Serif";
/// Default font size in points.
pub const DEFAULT_SIZE: u16 = 12;

/// Complete formatting attribute set of a styled run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    family: String,
    size: u16,
    /// Foreground (text) color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Weight and slant.
    pub attributes: TextAttributes,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_string(),
            size: DEFAULT_SIZE,
            fg: Rgb::BLACK,
            bg: Rgb::WHITE,
            attributes: TextAttributes::empty(),
        }
    }
}

impl Style {
    /// Create a new style builder starting from the defaults.
    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    /// Default style with no weight or slant.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Font family name.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font size in points, always at least 1.
    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Return a new style with the specified font family.
    ///
    /// `;` is removed and surrounding whitespace trimmed; a name left empty
    /// falls back to [`DEFAULT_FAMILY`].
    #[must_use]
    pub fn with_family(self, family: impl Into<String>) -> Self {
        Self {
            family: normalize_family(family.into()),
            ..self
        }
    }

    /// Return a new style with the specified size (clamped to at least 1).
    #[must_use]
    pub fn with_size(self, size: u16) -> Self {
        Self {
            size: size.max(1),
            ..self
        }
    }

    /// Return a new style with the specified foreground color.
    #[must_use]
    pub fn with_fg(self, color: Rgb) -> Self {
        Self { fg: color, ..self }
    }

    /// Return a new style with the specified background color.
    #[must_use]
    pub fn with_bg(self, color: Rgb) -> Self {
        Self { bg: color, ..self }
    }

    /// Return a new style with exactly these attributes.
    #[must_use]
    pub fn with_attributes(self, attributes: TextAttributes) -> Self {
        Self { attributes, ..self }
    }

    /// Return a new style with the bold attribute added.
    #[must_use]
    pub fn with_bold(self) -> Self {
        let attributes = self.attributes | TextAttributes::BOLD;
        self.with_attributes(attributes)
    }

    /// Return a new style with the italic attribute added.
    #[must_use]
    pub fn with_italic(self) -> Self {
        let attributes = self.attributes | TextAttributes::ITALIC;
        self.with_attributes(attributes)
    }

    /// Return a new style with bold and italic cleared.
    #[must_use]
    pub fn with_plain(self) -> Self {
        self.with_attributes(TextAttributes::empty())
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.attributes.contains(TextAttributes::BOLD)
    }

    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.attributes.contains(TextAttributes::ITALIC)
    }
}

fn normalize_family(family: String) -> String {
    let cleaned: String = family.chars().filter(|&c| c != ';').collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        DEFAULT_FAMILY.to_string()
    } else if trimmed.len() == family.len() {
        family
    } else {
        trimmed.to_string()
    }
}

/// Builder for creating styles fluently.
#[derive(Clone, Debug, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    /// Set font family.
    #[must_use]
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.style.family = normalize_family(family.into());
        self
    }

    /// Set font size in points.
    #[must_use]
    pub fn size(mut self, size: u16) -> Self {
        self.style.size = size.max(1);
        self
    }

    /// Set foreground color.
    #[must_use]
    pub fn fg(mut self, color: Rgb) -> Self {
        self.style.fg = color;
        self
    }

    /// Set background color.
    #[must_use]
    pub fn bg(mut self, color: Rgb) -> Self {
        self.style.bg = color;
        self
    }

    /// Add bold attribute.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.style.attributes |= TextAttributes::BOLD;
        self
    }

    /// Add italic attribute.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.style.attributes |= TextAttributes::ITALIC;
        self
    }

    /// Build the final style.
    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_builder() {
        let style = Style::builder()
            .family("Monospaced")
            .size(14)
            .fg(Rgb::RED)
            .bg(Rgb::BLACK)
            .bold()
            .italic()
            .build();

        assert_eq!(style.family(), "Monospaced");
        assert_eq!(style.size(), 14);
        assert_eq!(style.fg, Rgb::RED);
        assert_eq!(style.bg, Rgb::BLACK);
        assert!(style.is_bold());
        assert!(style.is_italic());
    }

    #[test]
    fn test_defaults_are_legal() {
        let style = Style::default();
        assert_eq!(style.family(), DEFAULT_FAMILY);
        assert_eq!(style.size(), DEFAULT_SIZE);
        assert_eq!(style.fg, Rgb::BLACK);
        assert_eq!(style.bg, Rgb::WHITE);
        assert!(style.attributes.is_empty());
    }

    #[test]
    fn test_plain_clears_weight_and_slant() {
        let style = Style::plain().with_bold().with_italic().with_fg(Rgb::BLUE);
        let plain = style.with_plain();
        assert!(!plain.is_bold());
        assert!(!plain.is_italic());
        assert_eq!(plain.fg, Rgb::BLUE);
    }

    #[test]
    fn test_zero_size_clamped() {
        assert_eq!(Style::builder().size(0).build().size(), 1);
        assert_eq!(Style::plain().with_size(0).size(), 1);
    }

    #[test]
    fn test_family_normalized() {
        assert_eq!(Style::plain().with_family(" Mono;Sans ").family(), "MonoSans");
        assert_eq!(Style::builder().family("Courier New").build().family(), "Courier New");
        assert_eq!(Style::plain().with_family(" ; ").family(), DEFAULT_FAMILY);
    }
}
