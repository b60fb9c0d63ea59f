//! Reader and writer for the indented `key: value` settings format
//!
//! Supports the subset operators actually write by hand: nested sections,
//! `- item` lists, single-line scalars (parsed with `serde_yaml_ng`), and
//! `#` comment blocks above keys. Block scalars (`|`, `>`), anchors and
//! multi-line list entries are rejected with a syntax error.

use std::path::Path;

use serde_json::Value;

use super::tree::{Node, NodeValue};
use crate::domain::entities::Comment;
use crate::domain::value_objects::{CommentStyle, MARKER};
use crate::error::{ConfigError, ConfigResult};

const INDENT_WIDTH: usize = 2;

/// Parsed file contents
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Outline {
    pub nodes: Vec<Node>,
    /// Comment blocks after the last key
    pub footer: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    Blank,
    Comment(&'a str),
    Entry {
        indent: usize,
        key: String,
        rest: Option<&'a str>,
    },
    Item {
        indent: usize,
        text: &'a str,
    },
}

struct Parser<'a> {
    lines: Vec<(usize, Line<'a>)>,
    pos: usize,
    file: &'a Path,
}

pub(crate) fn parse(text: &str, file: &Path) -> ConfigResult<Outline> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = tokenize(raw).map_err(|message| ConfigError::Syntax {
            file: file.to_path_buf(),
            line: number,
            message,
        })?;
        lines.push((number, line));
    }

    let mut parser = Parser {
        lines,
        pos: 0,
        file,
    };

    let root_indent = parser.next_entry_indent().unwrap_or(0);
    let nodes = parser.parse_block(root_indent)?;
    let footer = parser.take_comment_blocks()?;

    if let Some((number, _)) = parser.lines.get(parser.pos) {
        return Err(parser.error(*number, "key is indented less than the first key"));
    }

    Ok(Outline { nodes, footer })
}

fn tokenize(raw: &str) -> Result<Line<'_>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "---" {
        return Ok(Line::Blank);
    }

    let content = raw.trim_start_matches(' ');
    let indent = raw.len() - content.len();

    if content.starts_with('\t') {
        return Err("tabs are not allowed for indentation".to_string());
    }
    if content.starts_with(MARKER) {
        return Ok(Line::Comment(content.trim_end()));
    }
    if content == "-" || content.starts_with("- ") {
        return Ok(Line::Item {
            indent,
            text: content[1..].trim(),
        });
    }

    let (key, rest) = split_key(content.trim_end())?;
    Ok(Line::Entry { indent, key, rest })
}

/// Split `key: rest` into the key and an optional non-empty rest.
fn split_key(content: &str) -> Result<(String, Option<&str>), String> {
    let (key, after) = if content.starts_with('"') {
        let end = closing_double_quote(content)
            .ok_or_else(|| "unterminated quoted key".to_string())?;
        let key: String = serde_json::from_str(&content[..=end])
            .map_err(|e| format!("invalid quoted key: {}", e))?;
        (key, &content[end + 1..])
    } else if let Some(stripped) = content.strip_prefix('\'') {
        let end = stripped
            .find('\'')
            .ok_or_else(|| "unterminated quoted key".to_string())?;
        (stripped[..end].to_string(), &stripped[end + 1..])
    } else {
        let colon = find_separator(content)
            .ok_or_else(|| format!("expected 'key: value', found '{}'", content))?;
        (content[..colon].trim_end().to_string(), &content[colon..])
    };

    let rest = after
        .strip_prefix(':')
        .ok_or_else(|| format!("expected ':' after key '{}'", key))?
        .trim();

    if key.is_empty() {
        return Err("empty key".to_string());
    }

    // A trailing `# note` on a section header is not a value.
    if rest.is_empty() || rest.starts_with(MARKER) {
        Ok((key, None))
    } else {
        Ok((key, Some(rest)))
    }
}

fn closing_double_quote(content: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in content.char_indices().skip(1) {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

/// Byte offset of the first `:` that ends a key (followed by space or end of line).
fn find_separator(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        let ends_key = b == b':' && bytes.get(i + 1).map_or(true, |next| *next == b' ');
        ends_key.then_some(i)
    })
}

pub(crate) fn parse_scalar(text: &str) -> Result<Value, String> {
    if text.is_empty() {
        return Ok(Value::Null);
    }
    if text.starts_with('|') || text.starts_with('>') {
        return Err("block scalars are not supported".to_string());
    }
    if text.starts_with('&') || text.starts_with('*') {
        return Err("anchors and aliases are not supported".to_string());
    }
    serde_yaml_ng::from_str::<Value>(text).map_err(|e| format!("invalid value '{}': {}", text, e))
}

impl<'a> Parser<'a> {
    fn error(&self, line: usize, message: impl Into<String>) -> ConfigError {
        ConfigError::Syntax {
            file: self.file.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    fn peek_significant(&self) -> Option<&(usize, Line<'a>)> {
        self.lines[self.pos..]
            .iter()
            .find(|(_, line)| !matches!(line, Line::Blank | Line::Comment(_)))
    }

    fn next_entry_indent(&self) -> Option<usize> {
        match self.peek_significant() {
            Some((_, Line::Entry { indent, .. })) => Some(*indent),
            _ => None,
        }
    }

    /// Consume comment and blank lines, grouping comment runs into blocks.
    /// Returns `(blocks, last_block_touches_next_line)`.
    fn take_comment_runs(&mut self) -> (Vec<Vec<&'a str>>, bool) {
        let mut blocks: Vec<Vec<&'a str>> = Vec::new();
        let mut current: Vec<&'a str> = Vec::new();

        while let Some((_, line)) = self.lines.get(self.pos) {
            match line {
                Line::Comment(text) => current.push(*text),
                Line::Blank => {
                    if !current.is_empty() {
                        blocks.push(std::mem::take(&mut current));
                    }
                }
                _ => break,
            }
            self.pos += 1;
        }

        let adjacent = !current.is_empty();
        if adjacent {
            blocks.push(current);
        }
        (blocks, adjacent)
    }

    fn take_comment_blocks(&mut self) -> ConfigResult<Vec<Comment>> {
        let start = self.pos;
        let (runs, _) = self.take_comment_runs();
        runs.iter()
            .map(|run| self.parse_comment(run, start))
            .collect()
    }

    fn parse_comment(&self, run: &[&str], near: usize) -> ConfigResult<Comment> {
        Comment::parse(run).map_err(|e| {
            let line = self.lines.get(near).map(|(n, _)| *n).unwrap_or(0);
            self.error(line, e.to_string())
        })
    }

    fn parse_block(&mut self, indent: usize) -> ConfigResult<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            let checkpoint = self.pos;
            let (mut runs, adjacent) = self.take_comment_runs();

            let Some((number, line)) = self.lines.get(self.pos).cloned() else {
                self.pos = checkpoint;
                break;
            };

            match line {
                Line::Entry {
                    indent: found,
                    key,
                    rest,
                } if found == indent => {
                    self.pos += 1;

                    let attached = if adjacent { runs.pop() } else { None };
                    let mut node = Node::new(key, self.parse_value(number, indent, rest)?);
                    node.detached = runs
                        .iter()
                        .map(|run| self.parse_comment(run, checkpoint))
                        .collect::<ConfigResult<_>>()?;
                    node.comment = attached
                        .map(|run| self.parse_comment(&run, checkpoint))
                        .transpose()?;
                    nodes.push(node);
                }
                Line::Entry { indent: found, .. } if found < indent => {
                    self.pos = checkpoint;
                    break;
                }
                Line::Entry { .. } => {
                    return Err(self.error(number, "unexpected indentation"));
                }
                Line::Item { .. } => {
                    return Err(self.error(number, "list item outside of a list"));
                }
                Line::Blank | Line::Comment(_) => unreachable!("skipped by take_comment_runs"),
            }
        }

        Ok(nodes)
    }

    fn parse_value(
        &mut self,
        number: usize,
        indent: usize,
        rest: Option<&str>,
    ) -> ConfigResult<NodeValue> {
        if let Some(text) = rest {
            return parse_scalar(text)
                .map(NodeValue::Scalar)
                .map_err(|message| self.error(number, message));
        }

        match self.peek_significant().cloned() {
            Some((_, Line::Item { indent: item_indent, .. })) if item_indent >= indent => {
                self.parse_items(item_indent).map(NodeValue::List)
            }
            Some((_, Line::Entry { indent: child, .. })) if child > indent => {
                self.parse_block(child).map(NodeValue::Section)
            }
            _ => Ok(NodeValue::Section(Vec::new())),
        }
    }

    fn parse_items(&mut self, indent: usize) -> ConfigResult<Vec<Value>> {
        let mut items = Vec::new();

        loop {
            let checkpoint = self.pos;
            let (runs, _) = self.take_comment_runs();

            match self.lines.get(self.pos).cloned() {
                Some((number, Line::Item { indent: found, text })) if found == indent => {
                    if !runs.is_empty() {
                        log::debug!(
                            "dropping comment inside list at {}:{}",
                            self.file.display(),
                            number
                        );
                    }
                    self.pos += 1;
                    items.push(parse_scalar(text).map_err(|message| self.error(number, message))?);
                }
                _ => {
                    self.pos = checkpoint;
                    break;
                }
            }
        }

        Ok(items)
    }
}

/// Render an outline back to text.
pub(crate) fn render(outline: &Outline, default_style: CommentStyle) -> String {
    let mut out = String::new();
    render_nodes(&mut out, &outline.nodes, 0, default_style);

    for block in &outline.footer {
        separate(&mut out);
        out.push_str(&block.render(0, default_style));
    }

    out
}

fn render_nodes(out: &mut String, nodes: &[Node], indent: usize, default_style: CommentStyle) {
    let pad = " ".repeat(indent);

    for (index, node) in nodes.iter().enumerate() {
        for block in &node.detached {
            separate(out);
            out.push_str(&block.render(indent, default_style));
            out.push('\n');
        }

        if let Some(comment) = &node.comment {
            if indent == 0 && index > 0 && node.detached.is_empty() {
                separate(out);
            }
            out.push_str(&comment.render(indent, default_style));
        }

        let key = render_key(&node.key);
        match &node.value {
            NodeValue::Scalar(value) => {
                out.push_str(&format!("{pad}{key}: {}\n", render_scalar(value)));
            }
            NodeValue::List(items) if items.is_empty() => {
                out.push_str(&format!("{pad}{key}: []\n"));
            }
            NodeValue::List(items) => {
                out.push_str(&format!("{pad}{key}:\n"));
                for item in items {
                    out.push_str(&format!(
                        "{pad}{}- {}\n",
                        " ".repeat(INDENT_WIDTH),
                        render_scalar(item)
                    ));
                }
            }
            NodeValue::Section(children) => {
                out.push_str(&format!("{pad}{key}:\n"));
                render_nodes(out, children, indent + INDENT_WIDTH, default_style);
            }
        }
    }
}

/// Ensure the buffer ends with a blank line, unless it is empty.
fn separate(out: &mut String) {
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn render_key(key: &str) -> String {
    let plain = !key.is_empty()
        && key.trim() == key
        && !key.starts_with(['#', '-', '"', '\'', '&', '*', '[', '{'])
        && find_separator(key).is_none();
    if plain {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => match serde_yaml_ng::to_string(s) {
            Ok(yaml) if !yaml.trim_end().contains('\n') => yaml.trim_end().to_string(),
            _ => value.to_string(),
        },
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
