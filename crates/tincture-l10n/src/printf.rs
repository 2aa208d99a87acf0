//! printf-style template formatting.
//!
//! Placeholders follow `%[n$][flags][width][.precision][length]conversion`:
//!
//! | Conversion | Accepts | Output |
//! |------------|---------|--------|
//! | `@`, `s`, `S` | any argument | its display form |
//! | `d`, `i`, `D` | integers, characters | signed decimal |
//! | `u`, `U` | integers, characters | unsigned decimal |
//! | `x`, `X`, `o`, `O` | integers, characters | hexadecimal, octal |
//! | `f`, `F`, `e`, `E`, `g`, `G` | numbers | floating point |
//! | `c`, `C` | characters, integer code points | one character |
//! | `%%` | nothing | a literal `%` |
//!
//! Flags are `-` (left align), `+` (always sign), space (space for positive),
//! `#` (alternate form) and `0` (zero padding). Length modifiers (`hh`, `h`,
//! `l`, `ll`, `q`, `z`, `t`, `j`, `L`) are accepted and ignored since
//! arguments carry their own width. `%2$@` picks an argument by position, so
//! translations can reorder them.
//!
//! Negative integers under unsigned conversions print as their 64-bit two's
//! complement.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FormatError;

/// Widths and precisions above this are rejected as invalid placeholders.
const MAX_WIDTH: usize = 1024;

const DEFAULT_FLOAT_PRECISION: usize = 6;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"%(?:([1-9][0-9]*)\$)?([-+ #0]*)([0-9]+)?(?:\.([0-9]*))?(?:hh|h|ll|l|q|z|t|j|L)?([@sSdDiuUxXoOfFeEgGcC%])",
    )
    .expect("placeholder pattern")
});

/// An argument substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
}

impl FormatArg {
    /// Name of the argument's kind, as reported in [`FormatError::TypeMismatch`].
    pub fn kind(&self) -> &'static str {
        match self {
            FormatArg::Str(_) => "text",
            FormatArg::Int(_) => "an integer",
            FormatArg::UInt(_) => "an unsigned integer",
            FormatArg::Float(_) => "a float",
            FormatArg::Char(_) => "a character",
        }
    }

    fn as_integer(&self) -> Option<i128> {
        match *self {
            FormatArg::Int(value) => Some(i128::from(value)),
            FormatArg::UInt(value) => Some(i128::from(value)),
            FormatArg::Char(value) => Some(i128::from(u32::from(value))),
            FormatArg::Str(_) | FormatArg::Float(_) => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match *self {
            FormatArg::Float(value) => Some(value),
            FormatArg::Int(value) => Some(value as f64),
            FormatArg::UInt(value) => Some(value as f64),
            FormatArg::Str(_) | FormatArg::Char(_) => None,
        }
    }

    fn as_char(&self) -> Option<char> {
        match self {
            FormatArg::Char(value) => Some(*value),
            FormatArg::Int(_) | FormatArg::UInt(_) => self
                .as_integer()
                .and_then(|code| u32::try_from(code).ok())
                .and_then(char::from_u32),
            FormatArg::Str(_) | FormatArg::Float(_) => None,
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Str(value) => f.write_str(value),
            FormatArg::Int(value) => write!(f, "{value}"),
            FormatArg::UInt(value) => write!(f, "{value}"),
            FormatArg::Float(value) => write!(f, "{value}"),
            FormatArg::Char(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        FormatArg::Str(value.clone())
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Char(value)
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        FormatArg::Float(f64::from(value))
    }
}

macro_rules! signed_arg {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FormatArg {
            fn from(value: $ty) -> Self {
                FormatArg::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! unsigned_arg {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FormatArg {
            fn from(value: $ty) -> Self {
                FormatArg::UInt(u64::from(value))
            }
        })*
    };
}

signed_arg!(i8, i16, i32, i64);
unsigned_arg!(u8, u16, u32, u64);

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        FormatArg::UInt(value as u64)
    }
}

impl From<isize> for FormatArg {
    fn from(value: isize) -> Self {
        FormatArg::Int(value as i64)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    zero: bool,
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    /// Zero-based argument index, `None` for `%%`.
    argument: Option<usize>,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

enum Piece<'t> {
    Literal(&'t str),
    Placeholder(Placeholder),
}

fn parse_template(template: &str) -> Result<Vec<Piece<'_>>, FormatError> {
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut next_sequential = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_literal(&mut pieces, template, literal_start, whole.start())?;
        literal_start = whole.end();

        let conversion = caps
            .get(5)
            .and_then(|m| m.as_str().chars().next())
            .ok_or(FormatError::InvalidPlaceholder {
                offset: whole.start(),
            })?;
        let invalid = || FormatError::InvalidPlaceholder {
            offset: whole.start(),
        };

        let mut flags = Flags::default();
        for flag in caps.get(2).map_or("", |m| m.as_str()).chars() {
            match flag {
                '-' => flags.left = true,
                '+' => flags.plus = true,
                ' ' => flags.space = true,
                '#' => flags.alternate = true,
                _ => flags.zero = true,
            }
        }
        let width = caps
            .get(3)
            .map(|m| parse_bounded(m.as_str()).ok_or_else(invalid))
            .transpose()?;
        let precision = caps
            .get(4)
            .map(|m| {
                if m.as_str().is_empty() {
                    Some(0)
                } else {
                    parse_bounded(m.as_str())
                }
                .ok_or_else(invalid)
            })
            .transpose()?;

        let argument = if conversion == '%' {
            None
        } else if let Some(position) = caps.get(1) {
            let position: usize = position.as_str().parse().map_err(|_| invalid())?;
            Some(position - 1)
        } else {
            next_sequential += 1;
            Some(next_sequential - 1)
        };

        pieces.push(Piece::Placeholder(Placeholder {
            argument,
            flags,
            width,
            precision,
            conversion,
        }));
    }
    push_literal(&mut pieces, template, literal_start, template.len())?;
    Ok(pieces)
}

fn push_literal<'t>(
    pieces: &mut Vec<Piece<'t>>,
    template: &'t str,
    start: usize,
    end: usize,
) -> Result<(), FormatError> {
    let literal = &template[start..end];
    if let Some(stray) = literal.find('%') {
        return Err(FormatError::InvalidPlaceholder {
            offset: start + stray,
        });
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(())
}

fn parse_bounded(digits: &str) -> Option<usize> {
    digits.parse().ok().filter(|value| *value <= MAX_WIDTH)
}

fn required_count(pieces: &[Piece<'_>]) -> usize {
    pieces
        .iter()
        .filter_map(|piece| match piece {
            Piece::Placeholder(placeholder) => placeholder.argument.map(|index| index + 1),
            Piece::Literal(_) => None,
        })
        .max()
        .unwrap_or(0)
}

/// Number of arguments a template consumes.
///
/// With explicit positions this is the highest position used.
///
/// ```rust
/// use tincture_l10n::required_arguments;
///
/// assert_eq!(required_arguments("%@ and %@").unwrap(), 2);
/// assert_eq!(required_arguments("%2$@ before %1$@, 100%%").unwrap(), 2);
/// assert_eq!(required_arguments("no placeholders").unwrap(), 0);
/// assert!(required_arguments("dangling %").is_err());
/// ```
pub fn required_arguments(template: &str) -> Result<usize, FormatError> {
    parse_template(template).map(|pieces| required_count(&pieces))
}

/// Substitutes `args` into a printf-style `template`.
///
/// # Errors
///
/// - [`FormatError::ArgumentMismatch`] if the template uses more arguments
///   than were supplied. Surplus arguments are ignored.
/// - [`FormatError::TypeMismatch`] if an argument cannot satisfy its
///   conversion.
/// - [`FormatError::InvalidPlaceholder`] for a `%` that starts no placeholder.
///
/// # Example
///
/// ```rust
/// use tincture_l10n::{format_template, FormatArg, FormatError};
///
/// let out = format_template("%@ scored %05.1f%%", &["Ana".into(), 93.27.into()]).unwrap();
/// assert_eq!(out, "Ana scored 093.3%");
///
/// let err = format_template("Hello %s", &[]).unwrap_err();
/// assert_eq!(err, FormatError::ArgumentMismatch { required: 1, supplied: 0 });
/// ```
pub fn format_template(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let pieces = parse_template(template)?;
    let required = required_count(&pieces);
    if required > args.len() {
        return Err(FormatError::ArgumentMismatch {
            required,
            supplied: args.len(),
        });
    }

    let mut out = String::with_capacity(template.len());
    for piece in &pieces {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Placeholder(placeholder) => match placeholder.argument {
                None => out.push('%'),
                Some(index) => out.push_str(&render(placeholder, index, &args[index])?),
            },
        }
    }
    Ok(out)
}

fn render(placeholder: &Placeholder, index: usize, arg: &FormatArg) -> Result<String, FormatError> {
    let mismatch = || FormatError::TypeMismatch {
        position: index + 1,
        conversion: placeholder.conversion,
        found: arg.kind(),
    };

    let (sign, prefix, body, numeric) = match placeholder.conversion {
        '@' | 's' | 'S' => {
            let text = arg.to_string();
            let body = match placeholder.precision {
                Some(limit) => text.chars().take(limit).collect(),
                None => text,
            };
            ("", "", body, false)
        }
        'c' | 'C' => {
            let value = arg.as_char().ok_or_else(mismatch)?;
            ("", "", value.to_string(), false)
        }
        'd' | 'i' | 'D' => {
            let value = arg.as_integer().ok_or_else(mismatch)?;
            let digits = with_min_digits(value.unsigned_abs().to_string(), placeholder.precision);
            (sign_for(value < 0, placeholder.flags), "", digits, true)
        }
        'u' | 'U' | 'x' | 'X' | 'o' | 'O' => {
            let value = arg.as_integer().ok_or_else(mismatch)?;
            let bits = u64::try_from(value).unwrap_or(value as u64);
            let (digits, prefix) = match placeholder.conversion {
                'x' => (format!("{bits:x}"), "0x"),
                'X' => (format!("{bits:X}"), "0X"),
                'o' | 'O' => (format!("{bits:o}"), "0"),
                _ => (bits.to_string(), ""),
            };
            let prefix = if placeholder.flags.alternate && bits != 0 {
                prefix
            } else {
                ""
            };
            let digits = with_min_digits(digits, placeholder.precision);
            let prefix = if prefix == "0" && digits.starts_with('0') {
                ""
            } else {
                prefix
            };
            ("", prefix, digits, true)
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
            let value = arg.as_float().ok_or_else(mismatch)?;
            let sign = sign_for(value.is_sign_negative() && !value.is_nan(), placeholder.flags);
            let body = format_float(value.abs(), placeholder);
            (sign, "", body, value.is_finite())
        }
        other => {
            return Err(FormatError::TypeMismatch {
                position: index + 1,
                conversion: other,
                found: arg.kind(),
            })
        }
    };

    Ok(pad(placeholder, sign, prefix, &body, numeric))
}

fn sign_for(negative: bool, flags: Flags) -> &'static str {
    if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

fn with_min_digits(digits: String, precision: Option<usize>) -> String {
    match precision {
        Some(0) if digits == "0" => String::new(),
        Some(min) if digits.len() < min => format!("{}{digits}", "0".repeat(min - digits.len())),
        _ => digits,
    }
}

fn pad(placeholder: &Placeholder, sign: &str, prefix: &str, body: &str, numeric: bool) -> String {
    let len = sign.chars().count() + prefix.len() + body.chars().count();
    let fill = placeholder.width.unwrap_or(0).saturating_sub(len);
    if fill == 0 {
        return format!("{sign}{prefix}{body}");
    }
    let integer_with_precision =
        matches!(placeholder.conversion, 'd' | 'i' | 'D' | 'u' | 'U' | 'x' | 'X' | 'o' | 'O')
            && placeholder.precision.is_some();
    if placeholder.flags.left {
        format!("{sign}{prefix}{body}{}", " ".repeat(fill))
    } else if placeholder.flags.zero && numeric && !integer_with_precision {
        format!("{sign}{prefix}{}{body}", "0".repeat(fill))
    } else {
        format!("{}{sign}{prefix}{body}", " ".repeat(fill))
    }
}

fn format_float(value: f64, placeholder: &Placeholder) -> String {
    let upper = placeholder.conversion.is_ascii_uppercase();
    if !value.is_finite() {
        let text = if value.is_nan() { "nan" } else { "inf" };
        return if upper {
            text.to_ascii_uppercase()
        } else {
            text.to_string()
        };
    }

    let precision = placeholder.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    match placeholder.conversion {
        'f' | 'F' => {
            let fixed = format!("{value:.precision$}");
            if placeholder.flags.alternate && precision == 0 {
                fixed + "."
            } else {
                fixed
            }
        }
        'e' | 'E' => format_exponent(value, precision, upper),
        _ => format_general(value, precision, placeholder.flags.alternate, upper),
    }
}

/// C-style exponent notation: at least two exponent digits, explicit sign.
fn format_exponent(value: f64, precision: usize, upper: bool) -> String {
    let rust = format!("{value:.precision$e}");
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((rust.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exponent.unsigned_abs())
}

fn decimal_exponent(value: f64, significant: usize) -> i32 {
    if value == 0.0 {
        return 0;
    }
    let rounded = format!("{value:.prec$e}", prec = significant - 1);
    rounded
        .split_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0)
}

/// `%g`: fixed or exponent notation, whichever C would pick, with trailing
/// zeros removed unless the alternate form is requested.
fn format_general(value: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let significant = precision.max(1);
    let exponent = decimal_exponent(value, significant);
    let formatted = if exponent >= -4 && exponent < significant as i32 {
        let decimals = usize::try_from(significant as i32 - 1 - exponent).unwrap_or(0);
        format!("{value:.decimals$}")
    } else {
        format_exponent(value, significant - 1, upper)
    };
    if alternate {
        return formatted;
    }
    match formatted.find(['e', 'E']) {
        Some(at) => {
            let (mantissa, exponent) = formatted.split_at(at);
            format!("{}{exponent}", trim_fraction(mantissa))
        }
        None => trim_fraction(&formatted).to_string(),
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
