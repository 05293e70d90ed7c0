//! Recursive-descent parser for diagnostic text.
//!
//! The language has no separate lexer: plain text runs until a *stop character*, and the set of stop characters
//! depends on how deeply the parser is nested ([`StopAt`]). A `%` starts a directive, which is dispatched on the
//! modifier name found between the `%` and the first digit, `<` or `{`.
//!
//! ## Notes
//! - `%%`, `%|` and `%$` are escapes: they never stop a text run and are kept verbatim in the text.
//! - All delimiters are ASCII, so scanning works on bytes and every slice boundary is a char boundary.
//!
//! ## Examples
//! ```rust
//! use diaggen_text::parser;
//! use diaggen_text::piece::Piece;
//!
//! let root = parser::parse("unused %0").unwrap();
//! let Piece::Multi(pieces) = root else { unreachable!() };
//! assert_eq!(pieces.len(), 2);
//! ```

use diaggen_core::lang::modifiers::{self, ModifierKind};

use crate::error::TextErrorKind;
use crate::piece::{
    DiffPiece, EnumOption, EnumSelectPiece, Piece, PluralOption, PluralPiece, SelectPiece, SubstitutionPiece,
};

/// Where a nested text run must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopAt {
    /// Top level: only `%` interrupts text.
    End,
    /// Inside `{...}` alternatives.
    PipeOrCloseBrace,
    /// Inside the first two parts of `%diff`; after the second `$`, a `$` is plain text.
    Dollar,
}

impl StopAt {
    fn stop_set(self) -> &'static [u8] {
        match self {
            StopAt::End => b"%",
            StopAt::PipeOrCloseBrace => b"%|}",
            StopAt::Dollar => b"%|}$",
        }
    }
}

/// Characters that end a modifier name.
const MODIFIER_NAME_END: &[u8] = b"0123456789<{";

/// Parse a diagnostic text into a piece tree rooted at [`Piece::Multi`].
///
/// ## Errors
/// - Any syntax error; the first one aborts parsing.
#[tracing::instrument(level = "trace", skip_all, fields(len = text.len()))]
pub fn parse(text: &str) -> Result<Piece, TextErrorKind> {
    let mut parser = Parser::new(text);
    parser.parse_text(StopAt::End)
}

/// Parser state: the input and a byte cursor.
struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse_text(&mut self, stop: StopAt) -> Result<Piece, TextErrorKind> {
        let mut parsed = Vec::new();

        while !self.is_at_end() {
            let end = self.find_stop(stop);
            if end > self.pos {
                parsed.push(Piece::text(&self.text[self.pos..end]));
                self.pos = end;
                if self.is_at_end() {
                    break;
                }
            }

            // Anything other than '%' belongs to the enclosing construct.
            if self.peek() != Some(b'%') {
                break;
            }
            self.pos += 1;

            let name_end = self.find_from(self.pos, MODIFIER_NAME_END).unwrap_or(self.text.len());
            let modifier = &self.text[self.pos..name_end];
            self.pos = name_end;

            let kind = modifiers::from_str(modifier);
            if kind != Some(ModifierKind::EnumSelect) && self.peek() == Some(b'<') {
                return Err(TextErrorKind::AngleOutsideEnumSelect(modifier.to_string()));
            }
            let Some(kind) = kind else {
                return Err(TextErrorKind::UnknownModifier(modifier.to_string()));
            };

            let piece = match kind {
                ModifierKind::Select => self.select(modifier)?,
                ModifierKind::EnumSelect => self.enum_select(modifier)?,
                ModifierKind::Plural => self.plural(modifier)?,
                ModifierKind::Sub => self.substitution(modifier)?,
                ModifierKind::Diff => self.diff(modifier)?,
                ModifierKind::S => {
                    let index = self.modifier_index()?;
                    Piece::Select(SelectPiece {
                        kind: ModifierKind::S,
                        options: vec![Piece::text_with_role("", ""), Piece::text("s")],
                        index,
                    })
                }
                ModifierKind::Placeholder
                | ModifierKind::Ordinal
                | ModifierKind::Human
                | ModifierKind::Q
                | ModifierKind::ObjCClass
                | ModifierKind::ObjCInstance
                | ModifierKind::Quoted => Piece::placeholder(kind, self.modifier_index()?),
            };
            parsed.push(piece);
        }

        Ok(Piece::Multi(parsed))
    }

    fn select(&mut self, modifier: &str) -> Result<Piece, TextErrorKind> {
        self.expect(b'{', modifier)?;
        let mut options = Vec::new();
        loop {
            options.push(self.parse_text(StopAt::PipeOrCloseBrace)?);
            if !self.eat(b'|') {
                break;
            }
        }
        self.expect_close(modifier)?;
        let index = self.modifier_index()?;
        Ok(Piece::Select(SelectPiece {
            kind: ModifierKind::Select,
            options,
            index,
        }))
    }

    fn enum_select(&mut self, modifier: &str) -> Result<Piece, TextErrorKind> {
        if !self.eat(b'<') {
            return Err(TextErrorKind::ExpectedAfter {
                expected: '<',
                modifier: modifier.to_string(),
            });
        }
        let name_end = self.find_from(self.pos, b">").unwrap_or(self.text.len());
        let enum_name = self.text[self.pos..name_end].to_string();
        self.pos = name_end;
        self.expect(b'>', modifier)?;

        if !self.eat(b'{') {
            return Err(TextErrorKind::ExpectedAfter {
                expected: '{',
                modifier: modifier.to_string(),
            });
        }

        let mut options = Vec::new();
        loop {
            let mut bracketed = false;
            let mut enumerator = None;
            if self.eat(b'%') {
                let name_end = self.find_from(self.pos, b"{").unwrap_or(self.text.len());
                let name = &self.text[self.pos..name_end];
                if !name.is_empty() {
                    enumerator = Some(name.to_string());
                }
                self.pos = name_end;
                self.expect(b'{', modifier)?;
                bracketed = true;
            } else if self.eat(b'{') {
                bracketed = true;
            }

            let body = self.parse_text(StopAt::PipeOrCloseBrace)?;
            if bracketed {
                self.expect(b'}', modifier)?;
            }
            options.push(EnumOption { enumerator, body });

            if !self.eat(b'|') {
                break;
            }
        }
        self.expect_close(modifier)?;
        let index = self.modifier_index()?;
        Ok(Piece::EnumSelect(EnumSelectPiece {
            enum_name,
            options,
            index,
        }))
    }

    fn plural(&mut self, modifier: &str) -> Result<Piece, TextErrorKind> {
        self.expect(b'{', modifier)?;
        let mut options = Vec::new();
        loop {
            let colon = self
                .find_from(self.pos, b":")
                .ok_or(TextErrorKind::ExpectedPluralColon)?;
            let prefix = self.text[self.pos..=colon].to_string();
            self.pos = colon + 1;
            let body = self.parse_text(StopAt::PipeOrCloseBrace)?;
            options.push(PluralOption { prefix, body });
            if !self.eat(b'|') {
                break;
            }
        }
        self.expect_close(modifier)?;
        let index = self.modifier_index()?;
        Ok(Piece::Plural(PluralPiece { options, index }))
    }

    fn substitution(&mut self, modifier: &str) -> Result<Piece, TextErrorKind> {
        self.expect(b'{', modifier)?;
        let name_end = self.find_from(self.pos, b"}").ok_or_else(|| TextErrorKind::ExpectedDelimiter {
            expected: '}',
            modifier: modifier.to_string(),
        })?;
        let name = self.text[self.pos..name_end].to_string();
        if name.is_empty() {
            return Err(TextErrorKind::EmptySubstitutionName);
        }
        self.pos = name_end + 1;

        let mut modifiers = Vec::new();
        if self.peek().is_some_and(|b| b.is_ascii_digit()) {
            loop {
                modifiers.push(self.modifier_index()?);
                if !self.eat(b',') {
                    break;
                }
            }
        }
        Ok(Piece::Substitution(SubstitutionPiece { name, modifiers }))
    }

    fn diff(&mut self, modifier: &str) -> Result<Piece, TextErrorKind> {
        self.expect(b'{', modifier)?;
        let first = self.parse_text(StopAt::Dollar)?;
        self.expect(b'$', modifier)?;
        let second = self.parse_text(StopAt::Dollar)?;
        self.expect(b'$', modifier)?;
        let third = self.parse_text(StopAt::PipeOrCloseBrace)?;
        self.expect(b'|', modifier)?;
        let fallback = self.parse_text(StopAt::PipeOrCloseBrace)?;
        self.expect_close(modifier)?;
        let first_index = self.modifier_index()?;
        self.expect(b',', modifier)?;
        let second_index = self.modifier_index()?;
        Ok(Piece::Diff(Box::new(DiffPiece {
            parts: [first, second, third, fallback],
            indexes: [first_index, second_index],
        })))
    }

    /// Parse a decimal argument index.
    fn modifier_index(&mut self) -> Result<usize, TextErrorKind> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(TextErrorKind::ExpectedModifierIndex);
        }
        let digits = &self.text[start..self.pos];
        digits
            .parse::<usize>()
            .map_err(|_| TextErrorKind::ModifierIndexOverflow(digits.to_string()))
    }

    // --- helpers -----------------------------------------------------------------

    fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, modifier: &str) -> Result<(), TextErrorKind> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(TextErrorKind::ExpectedDelimiter {
                expected: char::from(byte),
                modifier: modifier.to_string(),
            })
        }
    }

    /// Consume the `}` closing an option list; running out of input reports the construct as unterminated.
    fn expect_close(&mut self, modifier: &str) -> Result<(), TextErrorKind> {
        if self.is_at_end() {
            return Err(TextErrorKind::Unterminated(modifier.to_string()));
        }
        self.expect(b'}', modifier)
    }

    fn find_from(&self, from: usize, set: &[u8]) -> Option<usize> {
        self.text.as_bytes()[from..]
            .iter()
            .position(|b| set.contains(b))
            .map(|offset| from + offset)
    }

    /// Position of the next unescaped stop character, or the end of input.
    fn find_stop(&self, stop: StopAt) -> usize {
        let bytes = self.text.as_bytes();
        let set = stop.stop_set();
        let mut i = self.pos;
        while i < bytes.len() {
            let b = bytes[i];
            if set.contains(&b) {
                let escaped = b == b'%' && matches!(bytes.get(i + 1), Some(b'%' | b'|' | b'$'));
                if !escaped {
                    return i;
                }
                i += 2;
                continue;
            }
            i += 1;
        }
        bytes.len()
    }
}

#[cfg(test)]
mod tests;
