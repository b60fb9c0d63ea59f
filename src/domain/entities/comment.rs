//! Comment entity
//!
//! A comment is stored as plain text lines. Markers, borders, spacer rows
//! and alignment padding only exist in the rendered form and are stripped
//! again by [`Comment::parse`].

use std::fmt;
use std::io::{self, Write};

use crate::domain::value_objects::{CommentStyle, StyleDescriptor, MARKER};
use crate::error::{ConfigError, ConfigResult};

/// Ordered comment lines plus an optional explicit style
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    lines: Vec<String>,
    style: Option<CommentStyle>,
}

impl Comment {
    /// Build a comment from text lines. Embedded newlines split a line in two.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .flat_map(|line| {
                line.as_ref()
                    .split('\n')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { lines, style: None }
    }

    pub fn with_style(mut self, style: CommentStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn style(&self) -> Option<CommentStyle> {
        self.style
    }

    pub fn set_style(&mut self, style: Option<CommentStyle>) {
        self.style = style;
    }

    /// Parse a raw comment block, detecting its style.
    ///
    /// `raw` must be exactly one block, decoration included. Indentation is
    /// ignored.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> ConfigResult<Comment> {
        Self::parse_with_style(raw, CommentStyle::classify(raw))
    }

    /// Parse a raw comment block that is known to use `style`.
    pub fn parse_with_style<S: AsRef<str>>(
        raw: &[S],
        style: CommentStyle,
    ) -> ConfigResult<Comment> {
        let descriptor = style.descriptor();
        let line_pad = descriptor.line_pad();

        if raw.len() < line_pad * 2 {
            return Err(ConfigError::MalformedComment {
                style,
                expected: line_pad * 2,
                found: raw.len(),
            });
        }

        let lines = raw[line_pad..raw.len() - line_pad]
            .iter()
            .map(|line| strip_decoration(line.as_ref(), descriptor))
            .collect();

        Ok(Comment {
            lines,
            style: Some(style),
        })
    }

    /// Write the comment block, one row per line, each `indent` spaces deep.
    ///
    /// A comment with no lines writes nothing. Bordered boxes are at least one
    /// column wide so a spacer row always carries a glyph.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        indent: usize,
        default_style: CommentStyle,
    ) -> io::Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }

        let style = self.style.unwrap_or(default_style).descriptor();
        let pad = " ".repeat(indent);
        let mut min_spacing = 0;
        let mut border_width = 0;

        if style.draw_border {
            min_spacing = self
                .lines
                .iter()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0)
                .max(1);
            border_width =
                min_spacing + width(style.comment_prefix) + width(style.comment_suffix);
            write_border(out, &pad, border_width)?;
            if style.draw_space {
                write_spacer(
                    out,
                    &pad,
                    border_width,
                    style.space_prefix_top,
                    style.space_char_top,
                    style.space_suffix_top,
                )?;
            }
        } else if style.draw_space {
            writeln!(out, "{pad}{MARKER}")?;
        }

        for line in &self.lines {
            if style.draw_border {
                let fill = " ".repeat(min_spacing - line.chars().count());
                writeln!(
                    out,
                    "{pad}{MARKER}{}{line}{fill}{}{MARKER}",
                    style.comment_prefix, style.comment_suffix
                )?;
            } else {
                let row = format!(
                    "{pad}{MARKER}{}{line}{}",
                    style.comment_prefix, style.comment_suffix
                );
                writeln!(out, "{}", row.trim_end())?;
            }
        }

        if style.draw_border {
            if style.draw_space {
                write_spacer(
                    out,
                    &pad,
                    border_width,
                    style.space_prefix_bottom,
                    style.space_char_bottom,
                    style.space_suffix_bottom,
                )?;
            }
            write_border(out, &pad, border_width)?;
        } else if style.draw_space {
            writeln!(out, "{pad}{MARKER}")?;
        }

        Ok(())
    }

    /// Render into a string. Every row ends with `\n`.
    pub fn render(&self, indent: usize, default_style: CommentStyle) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf, indent, default_style);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn write_border<W: Write + ?Sized>(out: &mut W, pad: &str, border_width: usize) -> io::Result<()> {
    let border: String = std::iter::repeat(MARKER).take(border_width + 2).collect();
    writeln!(out, "{pad}{border}")
}

fn write_spacer<W: Write + ?Sized>(
    out: &mut W,
    pad: &str,
    border_width: usize,
    prefix: &str,
    glyph: char,
    suffix: &str,
) -> io::Result<()> {
    let run: String = std::iter::repeat(glyph)
        .take(border_width.saturating_sub(width(prefix) + width(suffix)))
        .collect();
    writeln!(out, "{pad}{MARKER}{prefix}{run}{suffix}{MARKER}")
}

/// Recover stored text from one rendered content row.
fn strip_decoration(raw: &str, style: &StyleDescriptor) -> String {
    let mut line = raw.trim();
    line = line.strip_prefix(MARKER).unwrap_or(line);
    line = line.strip_prefix(style.comment_prefix).unwrap_or(line);
    if style.draw_border {
        line = line.strip_suffix(MARKER).unwrap_or(line);
        line = line.strip_suffix(style.comment_suffix).unwrap_or(line);
    }
    line.trim().to_string()
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
