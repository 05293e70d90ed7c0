//! Render diagnostic text as an RST grid table.
//!
//! Every alternative of a select becomes a row inside a box; pieces printed next to each other become columns.
//! The output is a list of lines of equal width. `%select{a|bc}0` renders as:
//!
//! ```text
//! +--------------+
//! |:diagtext:`a` |
//! +--------------+
//! |:diagtext:`bc`|
//! +--------------+
//! ```
//!
//! ## Notes
//! - Widths are measured in chars.
//! - A sequence is flattened through substitutions and nested sequences before its columns are laid out, so a
//!   substitution that expands to a select lines up with its neighbours instead of opening a nested box.
//! - Plain text is wrapped in an RST role (`:diagtext:`...``, or the severity role for the prefix), with RST
//!   metacharacters escaped and leading or trailing spaces turned into `|nbsp|` markers.

use crate::error::TextErrorKind;
use crate::piece::{DiffPiece, EnumSelectPiece, Piece, PlaceholderPiece, PluralPiece, SelectPiece, TextPiece};
use crate::substitution::{ResolveContext, SubstitutionTable};
use crate::visit::{TextVisitor, VisitResult};

const NBSP: &str = " |nbsp| ";
const RST_SPECIAL: &[char] = &['`', '*', '|', '_', '[', ']', '\\'];

pub struct DocumentationPrinter<'s> {
    ctx: ResolveContext<'s>,
    lines: Vec<String>,
}

impl<'s> DocumentationPrinter<'s> {
    pub fn new(substitutions: &'s SubstitutionTable) -> Self {
        Self::with_context(ResolveContext::new(substitutions))
    }

    fn with_context(ctx: ResolveContext<'s>) -> Self {
        Self { ctx, lines: Vec::new() }
    }

    /// Render `piece` into table lines.
    pub fn print(mut self, piece: &Piece) -> Result<Vec<String>, TextErrorKind> {
        self.visit(piece)?;
        Ok(self.lines)
    }

    /// Lay out the given pieces as one row of boxed columns, appended to `self.lines`.
    fn layout_columns(&mut self, nodes: Vec<(&Piece, ResolveContext<'s>)>) -> VisitResult {
        let start = self.lines.len();
        let mut empty_line_prefix = String::new();
        let mut previous_multiline = true;

        for (node, ctx) in nodes {
            let mut column = DocumentationPrinter::with_context(ctx).print(node)?;
            if column.is_empty() {
                continue;
            }

            // A separator is needed next to any multi-line column, and before the first one.
            let multiline = column.len() > 1;
            let separator = if multiline || previous_multiline { "|" } else { "" };
            previous_multiline = multiline;

            if start + column.len() > self.lines.len() {
                self.lines.resize(start + column.len(), empty_line_prefix.clone());
            }
            pad_to_same_width(&mut column);
            let blank = " ".repeat(width(&column[0]));

            for (i, line) in self.lines[start..].iter_mut().enumerate() {
                line.push_str(separator);
                line.push_str(column.get(i).map_or(blank.as_str(), String::as_str));
            }
            empty_line_prefix.push_str(separator);
            empty_line_prefix.push_str(&blank);
        }

        for line in &mut self.lines[start..] {
            line.push('|');
        }
        empty_line_prefix.push('|');
        let border = row_separator(&empty_line_prefix);
        self.lines.insert(start, border.clone());
        self.lines.push(border);
        Ok(())
    }

    /// Stack the options as rows of a single-column box.
    fn layout_rows<'p>(&mut self, options: impl IntoIterator<Item = &'p Piece>) -> VisitResult {
        let mut separators = vec![self.lines.len()];
        self.lines.push(String::new());
        for option in options {
            self.visit(option)?;
            separators.push(self.lines.len());
            self.lines.push(String::new());
        }

        let first = separators[0];
        make_table_rows(&mut self.lines[first..]);
        for index in separators {
            self.lines[index] = row_separator(&self.lines[index]);
        }
        Ok(())
    }
}

impl<'s> TextVisitor<'s> for DocumentationPrinter<'s> {
    fn context(&self) -> &ResolveContext<'s> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ResolveContext<'s> {
        &mut self.ctx
    }

    fn visit_multi(&mut self, pieces: &[Piece]) -> VisitResult {
        match pieces {
            [] => {
                self.lines.push(String::new());
                Ok(())
            }
            [single] => self.visit(single),
            _ => {
                let mut nodes = Vec::new();
                for piece in pieces {
                    gather_nodes(piece, &self.ctx, &mut nodes)?;
                }
                self.layout_columns(nodes)
            }
        }
    }

    fn visit_text(&mut self, text: &TextPiece) -> VisitResult {
        let mut line = String::new();
        let mut body = text.text.as_str();
        while let Some(rest) = body.strip_prefix(' ') {
            line.push_str(NBSP);
            body = rest;
        }
        let mut suffix = String::new();
        while let Some(rest) = body.strip_suffix(' ') {
            suffix.push_str(NBSP);
            body = rest;
        }

        if !body.is_empty() {
            line.push(':');
            line.push_str(&text.role);
            line.push_str(":`");
            escape_rst(body, &mut line);
            line.push('`');
        }
        line.push_str(&suffix);
        self.lines.push(line);
        Ok(())
    }

    fn visit_placeholder(&mut self, placeholder: &PlaceholderPiece) -> VisitResult {
        let index = self.map_index(placeholder.index)?;
        self.lines.push(format!(":placeholder:`{}`", placeholder_letter(index)));
        Ok(())
    }

    fn visit_select(&mut self, select: &SelectPiece) -> VisitResult {
        self.layout_rows(&select.options)
    }

    fn visit_enum_select(&mut self, select: &EnumSelectPiece) -> VisitResult {
        self.layout_rows(select.bodies())
    }

    fn visit_plural(&mut self, plural: &PluralPiece) -> VisitResult {
        self.layout_rows(plural.options.iter().map(|option| &option.body))
    }

    fn visit_diff(&mut self, diff: &DiffPiece) -> VisitResult {
        self.visit_select(&diff.as_select())
    }
}

/// Flatten substitutions and sequences, pairing each leaf with the resolve state it must be printed in.
fn gather_nodes<'p, 's: 'p>(
    piece: &'p Piece,
    ctx: &ResolveContext<'s>,
    out: &mut Vec<(&'p Piece, ResolveContext<'s>)>,
) -> VisitResult {
    match piece {
        Piece::Substitution(sub) => {
            let (inner, target) = ctx.entered(sub)?;
            gather_nodes(target, &inner, out)
        }
        Piece::Multi(pieces) => pieces.iter().try_for_each(|piece| gather_nodes(piece, ctx, out)),
        leaf => {
            out.push((leaf, ctx.clone()));
            Ok(())
        }
    }
}

fn width(line: &str) -> usize {
    line.chars().count()
}

fn pad_to_same_width(lines: &mut [String]) {
    let target = lines.iter().map(|line| width(line)).max().unwrap_or(0);
    for line in lines {
        let missing = target - width(line);
        line.extend(std::iter::repeat_n(' ', missing));
    }
}

fn make_table_rows(lines: &mut [String]) {
    if lines.is_empty() {
        return;
    }
    pad_to_same_width(lines);
    for line in lines {
        *line = format!("|{line}|");
    }
}

/// `|` becomes a `+` corner, everything else a `-` rule.
fn row_separator(line: &str) -> String {
    line.chars().map(|c| if c == '|' { '+' } else { '-' }).collect()
}

fn escape_rst(text: &str, out: &mut String) {
    for c in text.chars() {
        if RST_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Arguments are shown as capital letters: `%0` is `A`, `%1` is `B`.
fn placeholder_letter(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(u32::from(b'A')))
        .and_then(char::from_u32)
        .unwrap_or('?')
}
