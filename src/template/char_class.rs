//! Named character classes and range expansion
//!
//! Inside a character class, a backslash followed by a class code expands to
//! every member of that class. Expansions are appended verbatim and never
//! deduplicated: `[a-z\d\d]` draws a digit twice as often as `[a-z\d]`.
//!
//! | Code | Members |
//! |------|---------|
//! | `d` | digits |
//! | `w` | `_` + ASCII letters + digits |
//! | `W` | whitespace + punctuation |
//! | `s` | whitespace |
//! | `p` | punctuation |
//! | `l` | ASCII letters |
//! | `u`, `U` | uppercase letters |
//! | `c` | lowercase letters |
//! | `o` | octal digits |
//! | `h` | hex digits |
//! | `r` | printable characters |

/// Decimal digits
pub const DIGITS: &str = "0123456789";
/// Lowercase ASCII letters
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Uppercase ASCII letters
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Lowercase followed by uppercase ASCII letters
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// ASCII whitespace: space, tab, newline, carriage return, vertical tab, form feed
pub const WHITESPACE: &str = " \t\n\r\x0b\x0c";
/// ASCII punctuation
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;
/// Octal digits
pub const OCTAL_DIGITS: &str = "01234567";
/// Hexadecimal digits, both cases
pub const HEX_DIGITS: &str = "0123456789abcdefABCDEF";
/// Word characters
pub const WORD: &str = "_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Non-word characters: whitespace then punctuation
pub const NON_WORD: &str = concat!(" \t\n\r\x0b\x0c", r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##);
/// Printable characters: digits, letters, punctuation, whitespace
pub const PRINTABLE: &str = concat!(
    "0123456789",
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
    r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##,
    " \t\n\r\x0b\x0c"
);

/// Default limit on the number of code points a single range may span
pub const DEFAULT_MAX_RANGE_SPAN: u32 = 10_000;

/// A named character class selected by a backslash code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassCode {
    /// `\d`
    Digit,
    /// `\w`
    Word,
    /// `\W`
    NonWord,
    /// `\s`
    Space,
    /// `\p`
    Punct,
    /// `\l`
    Letter,
    /// `\u` or `\U`
    Upper,
    /// `\c`
    Lower,
    /// `\o`
    OctDigit,
    /// `\h`
    HexDigit,
    /// `\r`
    Printable,
}

impl ClassCode {
    /// Look up the class for a code letter
    #[inline]
    pub fn from_code(code: char) -> Option<Self> {
        let class = match code {
            'd' => Self::Digit,
            'w' => Self::Word,
            'W' => Self::NonWord,
            's' => Self::Space,
            'p' => Self::Punct,
            'l' => Self::Letter,
            'u' | 'U' => Self::Upper,
            'c' => Self::Lower,
            'o' => Self::OctDigit,
            'h' => Self::HexDigit,
            'r' => Self::Printable,
            _ => return None,
        };
        Some(class)
    }

    /// Every member of the class, in a fixed order
    pub fn members(&self) -> &'static str {
        match self {
            Self::Digit => DIGITS,
            Self::Word => WORD,
            Self::NonWord => NON_WORD,
            Self::Space => WHITESPACE,
            Self::Punct => PUNCTUATION,
            Self::Letter => LETTERS,
            Self::Upper => UPPERCASE,
            Self::Lower => LOWERCASE,
            Self::OctDigit => OCTAL_DIGITS,
            Self::HexDigit => HEX_DIGITS,
            Self::Printable => PRINTABLE,
        }
    }
}

/// Why a range could not be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The range spans more code points than allowed
    TooLarge {
        /// Number of code points between the bounds
        span: u32,
    },
}

/// Expand an inclusive range of code points
///
/// Bounds are normalized so `z-a` behaves like `a-z`. Code points that are
/// not valid `char`s (the surrogate block) are skipped. The span check runs
/// before anything is allocated.
pub fn expand_range(from: char, to: char, max_span: u32) -> Result<Vec<char>, RangeError> {
    let (low, high) = if (from as u32) <= (to as u32) {
        (from as u32, to as u32)
    } else {
        (to as u32, from as u32)
    };

    let span = high - low;
    if span > max_span {
        return Err(RangeError::TooLarge { span });
    }

    Ok((low..=high).filter_map(char::from_u32).collect())
}
