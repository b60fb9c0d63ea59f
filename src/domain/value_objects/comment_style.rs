//! Comment Style Value Object
//!
//! The four decorations a comment block can carry on disk, and the
//! classifier that recovers the decoration from raw lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Character that starts every comment line.
pub const MARKER: char = '#';

/// How a comment block is drawn
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// ```text
    /// # Comment
    /// ```
    #[default]
    Simple,
    /// ```text
    /// #
    /// # Comment
    /// #
    /// ```
    Spaced,
    /// ```text
    /// ###########
    /// # Comment #
    /// ###########
    /// ```
    Blocked,
    /// ```text
    /// #############
    /// #|¯¯¯¯¯¯¯¯¯|#
    /// #| Comment |#
    /// #|_________|#
    /// #############
    /// ```
    #[value(name = "blockspaced")]
    BlockSpaced,
}

/// Fixed drawing parameters of a [`CommentStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub draw_border: bool,
    pub draw_space: bool,
    pub comment_prefix: &'static str,
    pub comment_suffix: &'static str,
    pub space_prefix_top: &'static str,
    pub space_char_top: char,
    pub space_suffix_top: &'static str,
    pub space_prefix_bottom: &'static str,
    pub space_char_bottom: char,
    pub space_suffix_bottom: &'static str,
}

impl StyleDescriptor {
    const fn plain(
        draw_border: bool,
        draw_space: bool,
        comment_prefix: &'static str,
        comment_suffix: &'static str,
    ) -> Self {
        Self {
            draw_border,
            draw_space,
            comment_prefix,
            comment_suffix,
            space_prefix_top: "",
            space_char_top: ' ',
            space_suffix_top: "",
            space_prefix_bottom: "",
            space_char_bottom: ' ',
            space_suffix_bottom: "",
        }
    }

    /// Decoration rows at each end of the block (border and/or spacer).
    pub fn line_pad(&self) -> usize {
        usize::from(self.draw_border) + usize::from(self.draw_space)
    }
}

const SIMPLE: StyleDescriptor = StyleDescriptor::plain(false, false, " ", "");
const SPACED: StyleDescriptor = StyleDescriptor::plain(false, true, " ", "");
const BLOCKED: StyleDescriptor = StyleDescriptor::plain(true, false, " ", " ");
const BLOCK_SPACED: StyleDescriptor = StyleDescriptor {
    draw_border: true,
    draw_space: true,
    comment_prefix: "| ",
    comment_suffix: " |",
    space_prefix_top: "|\u{AF}",
    space_char_top: '\u{AF}',
    space_suffix_top: "\u{AF}|",
    space_prefix_bottom: "|_",
    space_char_bottom: '_',
    space_suffix_bottom: "_|",
};

impl CommentStyle {
    pub const ALL: [CommentStyle; 4] = [
        CommentStyle::Simple,
        CommentStyle::Spaced,
        CommentStyle::Blocked,
        CommentStyle::BlockSpaced,
    ];

    pub fn descriptor(&self) -> &'static StyleDescriptor {
        match self {
            CommentStyle::Simple => &SIMPLE,
            CommentStyle::Spaced => &SPACED,
            CommentStyle::Blocked => &BLOCKED,
            CommentStyle::BlockSpaced => &BLOCK_SPACED,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommentStyle::Simple => "simple",
            CommentStyle::Spaced => "spaced",
            CommentStyle::Blocked => "blocked",
            CommentStyle::BlockSpaced => "blockspaced",
        }
    }

    /// Detect which style produced a block of raw comment lines.
    ///
    /// Rules are checked in order and the first match wins:
    /// 1. two lines or fewer is always `Simple`, even if they look like borders
    /// 2. a bare marker on the first and last line is `Spaced`
    /// 3. without marker-run borders on both ends it is `Simple`
    /// 4. bordered, more than four lines, and an overline spacer on line two is `BlockSpaced`
    /// 5. otherwise `Blocked`
    pub fn classify<S: AsRef<str>>(lines: &[S]) -> CommentStyle {
        if lines.len() <= 2 {
            return CommentStyle::Simple;
        }

        let first = lines[0].as_ref().trim();
        let last = lines[lines.len() - 1].as_ref().trim();

        if is_bare_marker(first) && is_bare_marker(last) {
            return CommentStyle::Spaced;
        }

        if !(is_border(first) && is_border(last)) {
            return CommentStyle::Simple;
        }

        if lines.len() > 4 && is_block_spacer(lines[1].as_ref().trim()) {
            return CommentStyle::BlockSpaced;
        }

        CommentStyle::Blocked
    }
}

fn is_bare_marker(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(MARKER) && chars.next().is_none()
}

/// Marker repeated two or more times and nothing else.
fn is_border(line: &str) -> bool {
    line.chars().count() >= 2 && line.chars().all(|c| c == MARKER)
}

/// `#|¯¯...¯|#` with at least one glyph between the corner pieces.
fn is_block_spacer(line: &str) -> bool {
    let style = CommentStyle::BlockSpaced.descriptor();
    let inner = line
        .strip_prefix(MARKER)
        .and_then(|l| l.strip_suffix(MARKER))
        .and_then(|l| l.strip_prefix(style.space_prefix_top))
        .and_then(|l| l.strip_suffix(style.space_suffix_top));

    match inner {
        Some(run) => !run.is_empty() && run.chars().all(|c| c == style.space_char_top),
        None => false,
    }
}

impl fmt::Display for CommentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommentStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CommentStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| {
                ValidationError::new(format!(
                    "unknown comment style '{}' (expected simple, spaced, blocked or blockspaced)",
                    s
                ))
            })
    }
}
