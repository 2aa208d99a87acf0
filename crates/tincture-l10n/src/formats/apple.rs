//! Apple `.strings` tables.
//!
//! ```text
//! /* Shown on the home screen */
//! "greeting" = "Hello %@";
//! // Unquoted keys are accepted too
//! farewell = "Bye\nfor now";
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::LoadError;

pub(crate) fn parse(source: &str) -> Result<Vec<(String, String)>, LoadError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut scanner = Scanner::new(source);
    let mut entries = Vec::new();

    loop {
        scanner.skip_trivia()?;
        if scanner.peek().is_none() {
            return Ok(entries);
        }
        let key = scanner.token("key")?;
        scanner.skip_trivia()?;
        scanner.expect('=')?;
        scanner.skip_trivia()?;
        let value = scanner.token("value")?;
        scanner.skip_trivia()?;
        scanner.expect(';')?;
        entries.push((key, value));
    }
}

struct Scanner<'a> {
    chars: Peekable<CharIndices<'a>>,
    source: &'a str,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            source,
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> LoadError {
        LoadError::Strings {
            line: self.line,
            message: message.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn expect(&mut self, wanted: char) -> Result<(), LoadError> {
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(self.error(format!("expected '{wanted}', found '{c}'"))),
            None => Err(self.error(format!("expected '{wanted}', found end of input"))),
        }
    }

    /// Skips whitespace, `/* */` blocks and `//` line comments.
    fn skip_trivia(&mut self) -> Result<(), LoadError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '/' && self.peek_second() == Some('*') {
                let start_line = self.line;
                self.bump();
                self.bump();
                let mut previous = '\0';
                loop {
                    match self.bump() {
                        Some('/') if previous == '*' => break,
                        Some(c) => previous = c,
                        None => {
                            return Err(LoadError::Strings {
                                line: start_line,
                                message: "unterminated comment".to_string(),
                            })
                        }
                    }
                }
            } else if c == '/' && self.peek_second() == Some('/') {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn token(&mut self, what: &str) -> Result<String, LoadError> {
        match self.peek() {
            Some('"') => self.quoted(),
            Some(c) if is_bare(c) => Ok(self.bare()),
            Some(c) => Err(self.error(format!("expected {what}, found '{c}'"))),
            None => Err(self.error(format!("expected {what}, found end of input"))),
        }
    }

    fn bare(&mut self) -> String {
        let start = self.chars.peek().map_or(self.source.len(), |&(i, _)| i);
        while matches!(self.peek(), Some(c) if is_bare(c)) {
            self.bump();
        }
        let end = self.chars.peek().map_or(self.source.len(), |&(i, _)| i);
        self.source[start..end].to_string()
    }

    fn quoted(&mut self) -> Result<String, LoadError> {
        let start_line = self.line;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
                None => {
                    return Err(LoadError::Strings {
                        line: start_line,
                        message: "unterminated string".to_string(),
                    })
                }
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LoadError> {
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('U') | Some('u') => {
                let unit = self.hex4()?;
                let c = if (0xD800..0xDC00).contains(&unit) {
                    self.low_surrogate(unit)?
                } else {
                    char::from_u32(u32::from(unit))
                        .ok_or_else(|| self.error(format!("invalid code point \\U{unit:04X}")))?
                };
                out.push(c);
            }
            Some(c) => out.push(c),
            None => return Err(self.error("unterminated escape")),
        }
        Ok(())
    }

    fn low_surrogate(&mut self, high: u16) -> Result<char, LoadError> {
        let paired = self.bump() == Some('\\') && matches!(self.bump(), Some('U') | Some('u'));
        if !paired {
            return Err(self.error("unpaired surrogate escape"));
        }
        let low = self.hex4()?;
        char::decode_utf16([high, low])
            .next()
            .and_then(Result::ok)
            .ok_or_else(|| self.error("invalid surrogate pair"))
    }

    fn hex4(&mut self) -> Result<u16, LoadError> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => digits.push(c),
                _ => return Err(self.error("expected four hex digits in unicode escape")),
            }
        }
        u16::from_str_radix(&digits, 16).map_err(|e| self.error(e.to_string()))
    }
}

fn is_bare(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '$' | ':' | '/')
}
