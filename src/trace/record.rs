//! Structural matching of a single log line into a [`LogRecord`].

use super::lexer::{Token, tokenize};

/// Number of seconds in the simulated horizon (one calendar day).
pub const SECONDS_PER_DAY: u32 = 86_400;

/// One request batch recovered from a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Second of day the batch arrived, in `[0, SECONDS_PER_DAY)`.
    pub arrival_second: u32,
    /// Zone identifier taken from the nested `[int, zone]` pair.
    pub zone: String,
}

/// Why a line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The line does not have the five-field bracketed shape.
    Malformed,
    /// The shape matched but the arrival second is not a time of day.
    OutOfRange,
}

/// Parses one log line, returning `None` if it is rejected for any reason.
///
/// The accepted grammar is
///
/// ```text
/// line  := '[' value ',' value ',' INT ',' value ',' '[' INT ',' STR ']' ']'
/// value := scalar | '[' (value (',' value)*)? ']'
/// ```
///
/// # Examples
///
/// ```
/// use qdelay_sim::trace::record::parse_line;
///
/// let rec = parse_line("['p', 'Alabama', 41115, 'default prompt', [12, \"SE-SE3\"]]");
/// assert_eq!(rec.map(|r| (r.arrival_second, r.zone)), Some((41115, "SE-SE3".to_string())));
/// assert!(parse_line("not a record").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<LogRecord> {
    classify_line(line).ok()
}

/// Like [`parse_line`] but reports why a line was dropped.
///
/// # Errors
///
/// Returns the [`Rejection`] kind for lines that do not yield a record.
pub fn classify_line(line: &str) -> Result<LogRecord, Rejection> {
    let tokens = tokenize(line).ok_or(Rejection::Malformed)?;
    let (raw_second, zone) = match_shape(&tokens).ok_or(Rejection::Malformed)?;

    // Time-of-day only; absolute timestamps are dropped, not wrapped.
    let arrival_second = u32::try_from(raw_second)
        .ok()
        .filter(|s| *s < SECONDS_PER_DAY)
        .ok_or(Rejection::OutOfRange)?;

    Ok(LogRecord {
        arrival_second,
        zone: zone.to_owned(),
    })
}

fn match_shape(tokens: &[Token]) -> Option<(i64, &str)> {
    let mut cur = Cursor { tokens, pos: 0 };

    cur.expect(&Token::Open)?;
    cur.value()?;
    cur.expect(&Token::Comma)?;
    cur.value()?;
    cur.expect(&Token::Comma)?;
    let second = cur.int()?;
    cur.expect(&Token::Comma)?;
    cur.value()?;
    cur.expect(&Token::Comma)?;
    cur.expect(&Token::Open)?;
    cur.int()?;
    cur.expect(&Token::Comma)?;
    let zone = cur.string()?;
    cur.expect(&Token::Close)?;
    cur.expect(&Token::Close)?;

    if !cur.at_end() || zone.is_empty() || zone.contains(['\'', '"']) {
        return None;
    }
    Some((second, zone))
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos == self.tokens.len()
    }

    fn expect(&mut self, want: &Token) -> Option<()> {
        (self.next()? == want).then_some(())
    }

    fn int(&mut self) -> Option<i64> {
        match self.next()? {
            Token::Int(n) => Some(*n),
            _ => None,
        }
    }

    fn string(&mut self) -> Option<&'a str> {
        match self.next()? {
            Token::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Skips one scalar or a (possibly nested) list.
    fn value(&mut self) -> Option<()> {
        match self.next()? {
            Token::Int(_) | Token::Float(_) | Token::Ident | Token::Str(_) => Some(()),
            Token::Open => {
                if self.peek()? == &Token::Close {
                    self.pos += 1;
                    return Some(());
                }
                loop {
                    self.value()?;
                    match self.next()? {
                        Token::Comma => {}
                        Token::Close => return Some(()),
                        _ => return None,
                    }
                }
            }
            Token::Close | Token::Comma => None,
        }
    }
}
