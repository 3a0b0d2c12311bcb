//! Path data codec.
//!
//! Parses the path strings emitted by the geometry kernel into typed
//! commands and writes them back in compact form, with numbers formatted
//! the same way as every other coordinate in the document. The codec does
//! no geometry: commands are kept in the order and mode (absolute or
//! relative) they were written in.
//!
//! Supported commands are move-to, line-to, horizontal and vertical
//! line-to (each absolute and relative) and close-path. Coordinate pairs
//! following a move-to are implicit line-to commands.

use std::fmt;

use crate::error::KvadratError;
use crate::geometry::Point;
use crate::number::format_number;

/// One path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// `M x y`
    MoveTo(Point),
    /// `m dx dy`
    MoveBy(Point),
    /// `L x y`
    LineTo(Point),
    /// `l dx dy`
    LineBy(Point),
    /// `H x`
    HorizontalTo(f64),
    /// `h dx`
    HorizontalBy(f64),
    /// `V y`
    VerticalTo(f64),
    /// `v dy`
    VerticalBy(f64),
    /// `z`
    Close,
}

impl PathCommand {
    /// The single-letter opcode for this command.
    pub fn opcode(&self) -> char {
        match self {
            PathCommand::MoveTo(_) => 'M',
            PathCommand::MoveBy(_) => 'm',
            PathCommand::LineTo(_) => 'L',
            PathCommand::LineBy(_) => 'l',
            PathCommand::HorizontalTo(_) => 'H',
            PathCommand::HorizontalBy(_) => 'h',
            PathCommand::VerticalTo(_) => 'V',
            PathCommand::VerticalBy(_) => 'v',
            PathCommand::Close => 'z',
        }
    }

    fn is_move(&self) -> bool {
        matches!(self, PathCommand::MoveTo(_) | PathCommand::MoveBy(_))
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p)
            | PathCommand::MoveBy(p)
            | PathCommand::LineTo(p)
            | PathCommand::LineBy(p) => write!(
                f,
                "{}{} {}",
                self.opcode(),
                format_number(p.x),
                format_number(p.y)
            ),
            PathCommand::HorizontalTo(v)
            | PathCommand::HorizontalBy(v)
            | PathCommand::VerticalTo(v)
            | PathCommand::VerticalBy(v) => write!(f, "{}{}", self.opcode(), format_number(*v)),
            PathCommand::Close => write!(f, "z"),
        }
    }
}

/// Number of arguments one repetition of `opcode` consumes.
fn arity(opcode: char) -> Option<usize> {
    match opcode {
        'M' | 'm' | 'L' | 'l' => Some(2),
        'H' | 'h' | 'V' | 'v' => Some(1),
        'Z' | 'z' => Some(0),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Op(char),
    Num(f64),
}

fn tokenize(input: &str) -> Result<Vec<Token>, KvadratError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        match b {
            b' ' | b'\t' | b'\n' | b'\r' | b',' => pos += 1,
            b'0'..=b'9' | b'.' | b'+' | b'-' => {
                let end = scan_number(bytes, pos);
                let text = &input[pos..end];
                let value: f64 = text
                    .parse()
                    .map_err(|_| KvadratError::format(input, format!("invalid number '{}'", text)))?;
                if !value.is_finite() {
                    return Err(KvadratError::format(
                        input,
                        format!("number '{}' is out of range", text),
                    ));
                }
                tokens.push(Token::Num(value));
                pos = end;
            }
            _ if b.is_ascii_alphabetic() => {
                let op = b as char;
                if arity(op).is_none() {
                    return Err(KvadratError::format(
                        input,
                        format!("unsupported command '{}'", op),
                    ));
                }
                tokens.push(Token::Op(op));
                pos += 1;
            }
            _ => {
                let c = input[pos..].chars().next().unwrap_or('?');
                return Err(KvadratError::format(
                    input,
                    format!("unexpected character '{}'", c),
                ));
            }
        }
    }
    Ok(tokens)
}

/// Returns the end of the number starting at `start`.
///
/// Follows the path-data number grammar: optional sign, digits with at
/// most one decimal point, optional exponent. A second decimal point
/// starts a new number.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits_from = |mut pos: usize| {
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        pos
    };

    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }
    pos = digits_from(pos);
    if bytes.get(pos) == Some(&b'.') {
        pos = digits_from(pos + 1);
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            pos = digits_from(exp);
        }
    }
    pos.max(start + 1)
}

/// Parses path data into commands.
///
/// Empty input yields no commands.
///
/// # Errors
/// Returns [`KvadratError::Format`] when the data contains an unknown
/// opcode, a malformed number, numbers before the first command, or an
/// argument count that does not fit the command.
pub fn parse_path(input: &str) -> Result<Vec<PathCommand>, KvadratError> {
    let tokens = tokenize(input)?;
    let mut commands = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let op = match token {
            Token::Op(op) => op,
            Token::Num(value) => {
                return Err(KvadratError::format(
                    input,
                    format!("expected a command, found number {}", format_number(value)),
                ))
            }
        };

        let mut args = Vec::new();
        while let Some(Token::Num(value)) = iter.peek() {
            args.push(*value);
            iter.next();
        }

        let arity = arity(op).unwrap_or(0);
        if arity == 0 {
            if !args.is_empty() {
                return Err(KvadratError::format(
                    input,
                    format!("'{}' takes no arguments, got {}", op, args.len()),
                ));
            }
            commands.push(PathCommand::Close);
            continue;
        }
        if args.is_empty() || args.len() % arity != 0 {
            return Err(KvadratError::format(
                input,
                format!(
                    "'{}' takes arguments in groups of {}, got {}",
                    op,
                    arity,
                    args.len()
                ),
            ));
        }

        for (i, chunk) in args.chunks(arity).enumerate() {
            // pairs after a move-to are line-tos of the same mode
            let op = match (op, i) {
                ('M', 1..) => 'L',
                ('m', 1..) => 'l',
                _ => op,
            };
            commands.push(build_command(op, chunk));
        }
    }

    if let Some(first) = commands.first() {
        if !first.is_move() {
            return Err(KvadratError::format(
                input,
                format!("path must start with a move-to, found '{}'", first.opcode()),
            ));
        }
    }
    Ok(commands)
}

fn build_command(op: char, args: &[f64]) -> PathCommand {
    let point = || Point::new(args[0], args[1]);
    match op {
        'M' => PathCommand::MoveTo(point()),
        'm' => PathCommand::MoveBy(point()),
        'L' => PathCommand::LineTo(point()),
        'l' => PathCommand::LineBy(point()),
        'H' => PathCommand::HorizontalTo(args[0]),
        'h' => PathCommand::HorizontalBy(args[0]),
        'V' => PathCommand::VerticalTo(args[0]),
        'v' => PathCommand::VerticalBy(args[0]),
        _ => PathCommand::Close,
    }
}

/// Writes commands in compact form, e.g. `M0 0L1 0L1 1z`.
pub fn format_path(commands: &[PathCommand]) -> String {
    commands.iter().map(PathCommand::to_string).collect()
}

/// Parses and re-serializes path data in compact form.
///
/// # Errors
/// Fails like [`parse_path`].
pub fn normalize_path(input: &str) -> Result<String, KvadratError> {
    Ok(format_path(&parse_path(input)?))
}
