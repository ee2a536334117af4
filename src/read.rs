//! Pull-style JSON token reader, and the [`ReadJson`] trait for decoding
//! values out of it in place.
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::convert::TryFrom;
use std::fmt;
use std::hash::BuildHasher;

#[derive(PartialEq, Debug, Clone)]
pub(crate) enum Token<'s> {
    Null,
    Bool(bool),
    NumU(u128),
    NumI(i128),
    NumF(f64),
    StrBorrow(&'s str),
    StrOwn(Box<str>),
    Colon,
    Comma,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
}

impl Token<'_> {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Token::Null => Kind::Null,
            Token::Bool(false) => Kind::False,
            Token::Bool(true) => Kind::True,
            Token::NumU(_) | Token::NumI(_) | Token::NumF(_) => Kind::Number,
            Token::StrBorrow(_) | Token::StrOwn(_) => Kind::String,
            Token::ObjectBegin => Kind::ObjectBegin,
            Token::ObjectEnd => Kind::ObjectEnd,
            Token::ArrayBegin => Kind::ArrayBegin,
            Token::ArrayEnd => Kind::ArrayEnd,
            Token::Colon | Token::Comma => Kind::Invalid,
        }
    }
}

/// The kind of the next token, as reported by [`Reader::peek_kind`].
///
/// `Invalid` covers everything that can't appear where a value is expected:
/// end of input, stray separators, and bytes that start no JSON token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    False,
    True,
    String,
    Number,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    Invalid,
}

impl Kind {
    fn from_byte(b: u8) -> Self {
        match b {
            b'n' => Kind::Null,
            b'f' => Kind::False,
            b't' => Kind::True,
            b'"' => Kind::String,
            b'-' | b'0'..=b'9' => Kind::Number,
            b'{' => Kind::ObjectBegin,
            b'}' => Kind::ObjectEnd,
            b'[' => Kind::ArrayBegin,
            b']' => Kind::ArrayEnd,
            _ => Kind::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Kind::Invalid
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::False => "false",
            Kind::True => "true",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::ObjectBegin => "'{'",
            Kind::ObjectEnd => "'}'",
            Kind::ArrayBegin => "'['",
            Kind::ArrayEnd => "']'",
            Kind::Invalid => "invalid token",
        })
    }
}

/// Location in the input. `line` and `column` are 1-based, `column` counts
/// bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} (line {} column {})",
            self.index, self.line, self.column
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("JSON parse error around {0}")]
    Syntax(Position),

    #[error("unexpected end of JSON input at {0}")]
    UnexpectedEnd(Position),

    #[error("cannot decode JSON {found} as {expected} at {pos}")]
    Mismatch {
        expected: &'static str,
        found: Kind,
        pos: Position,
    },

    #[error("trailing characters after JSON value at {0}")]
    TrailingCharacters(Position),

    #[error("JSON input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

impl Error {
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax(p) | Error::UnexpectedEnd(p) | Error::TrailingCharacters(p) => Some(*p),
            Error::Mismatch { pos, .. } => Some(*pos),
            Error::InvalidUtf8 { .. } => None,
        }
    }

    /// True if the input ended before a complete value was read.
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEnd(_))
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Extensions to strict JSON the reader will accept.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dialect {
    /// `/* block */` and `// line` comments anywhere whitespace may appear.
    pub allow_comments: bool,
    /// A single `,` before the closing `]` or `}`.
    pub allow_trailing_comma: bool,
}

impl Dialect {
    pub const STRICT: Self = Self {
        allow_comments: false,
        allow_trailing_comma: false,
    };

    pub const DEFAULT: Self = Self {
        allow_comments: cfg!(feature = "default_allow_comments"),
        allow_trailing_comma: cfg!(feature = "default_allow_trailing_comma"),
    };

    pub const fn comments(self, allow: bool) -> Self {
        Self {
            allow_comments: allow,
            allow_trailing_comma: self.allow_trailing_comma,
        }
    }

    pub const fn trailing_comma(self, allow: bool) -> Self {
        Self {
            allow_comments: self.allow_comments,
            allow_trailing_comma: allow,
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub struct Reader<'a> {
    input: &'a str,
    bytes: &'a [u8],
    tok_start: usize,
    pos: usize,
    buf: String,
    dialect: Dialect,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, Dialect::DEFAULT)
    }

    pub fn with_dialect(input: &'a str, dialect: Dialect) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            buf: String::new(),
            tok_start: 0,
            dialect,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn position_of(&self, index: usize) -> Position {
        let index = index.min(self.bytes.len());
        // note: use `bytes` to avoid panic if index not on char_boundary.
        let so_far = &self.bytes[..index];
        let line = so_far.iter().filter(|n| **n == b'\n').count() + 1;
        let line_start = so_far
            .iter()
            .rposition(|n| *n == b'\n')
            .map(|i| i + 1)
            .unwrap_or_default();
        Position {
            index,
            line,
            column: index - line_start + 1,
        }
    }

    /// Current position, after any whitespace already skipped.
    pub fn position(&self) -> Position {
        self.position_of(self.pos)
    }

    #[cold]
    pub(crate) fn err(&self) -> Error {
        let pos = self.position_of(self.pos);
        if self.pos >= self.bytes.len() {
            Error::UnexpectedEnd(pos)
        } else {
            Error::Syntax(pos)
        }
    }

    #[cold]
    pub(crate) fn err_at_token(&self) -> Error {
        Error::Syntax(self.position_of(self.tok_start))
    }

    #[cold]
    pub(crate) fn mismatch(&self, expected: &'static str, found: Kind) -> Error {
        Error::Mismatch {
            expected,
            found,
            pos: self.position_of(self.tok_start),
        }
    }

    fn bnext(&mut self) -> Option<u8> {
        if self.pos < self.bytes.len() {
            let ch = self.bytes[self.pos];
            self.pos += 1;
            Some(ch)
        } else {
            None
        }
    }

    fn bnext_or_err(&mut self) -> Result<u8> {
        match self.bnext() {
            Some(c) => Ok(c),
            None => Err(self.err()),
        }
    }

    fn bpeek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Skips whitespace, and comments if the dialect allows them. On error
    /// (an unterminated block comment) the position is left untouched.
    fn skip_ws(&mut self) -> Result<()> {
        let (mut p, bs) = (self.pos, self.bytes);
        loop {
            while p < bs.len() && matches!(bs[p], b'\n' | b' ' | b'\t' | b'\r') {
                p += 1;
            }
            if !self.dialect.allow_comments || p + 1 >= bs.len() || bs[p] != b'/' {
                break;
            }
            match bs[p + 1] {
                b'/' => {
                    p += 2;
                    while p < bs.len() && bs[p] != b'\n' {
                        p += 1;
                    }
                }
                b'*' => {
                    let body = &bs[p + 2..];
                    match body.windows(2).position(|w| w == b"*/") {
                        Some(end) => p += 2 + end + 2,
                        None => return Err(Error::UnexpectedEnd(self.position_of(bs.len()))),
                    }
                }
                _ => break,
            }
        }
        self.pos = p;
        Ok(())
    }

    /// Reports the kind of the next token without consuming it.
    ///
    /// Never fails: anything that would fail to tokenize (including the end
    /// of input) reports [`Kind::Invalid`], and the error surfaces from the
    /// next call that consumes.
    pub fn peek_kind(&mut self) -> Kind {
        if self.skip_ws().is_err() {
            return Kind::Invalid;
        }
        self.bpeek().map_or(Kind::Invalid, Kind::from_byte)
    }

    /// Consumes exactly one token and returns its kind. Separators (`,` and
    /// `:`) are returned as [`Kind::Invalid`]; running out of input is an
    /// error.
    pub fn read_token(&mut self) -> Result<Kind> {
        let t = tri!(self.next());
        Ok(t.kind())
    }

    /// Checks that nothing but whitespace (and comments, if allowed) remains.
    pub fn finish(&mut self) -> Result<()> {
        tri!(self.skip_ws());
        if self.pos < self.bytes.len() {
            Err(Error::TrailingCharacters(self.position_of(self.pos)))
        } else {
            Ok(())
        }
    }

    fn single_hex_escape(&mut self) -> Result<u16> {
        let mut acc = 0;
        for _ in 0..4 {
            let b = tri!(self.bnext_or_err());
            let n = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => return Err(self.err()),
            };
            acc = acc * 16 + (n as u16);
        }
        Ok(acc)
    }

    fn read_hex_escape(&mut self) -> Result<()> {
        use core::char::REPLACEMENT_CHARACTER as REPLACEMENT;
        const LEAD: core::ops::Range<u16> = 0xd800..0xdc00;
        const TRAIL: core::ops::Range<u16> = 0xdc00..0xe000;

        let lead = tri!(self.single_hex_escape());
        if let Some(c) = core::char::from_u32(lead as u32) {
            self.buf.push(c);
            return Ok(());
        }
        if TRAIL.contains(&lead) {
            self.buf.push(REPLACEMENT);
            return Ok(());
        }
        debug_assert!(LEAD.contains(&lead));
        let p = self.pos;
        let trail = if self.bytes[p..].starts_with(b"\\u") {
            self.pos += 2;
            tri!(self.single_hex_escape())
        } else {
            self.buf.push(REPLACEMENT);
            return Ok(());
        };
        if !TRAIL.contains(&trail) {
            // rewind here so we follow algorithm 2 (max subparts of illegal
            // sequence) for https://www.unicode.org/review/pr-121.html.
            self.pos = p;
            self.buf.push(REPLACEMENT);
            return Ok(());
        }
        let scalar = (((lead as u32 - 0xd800) << 10) | (trail as u32 - 0xdc00)) + 0x10000;
        // every well-formed surrogate pair maps to a scalar value.
        self.buf
            .push(core::char::from_u32(scalar).unwrap_or(REPLACEMENT));
        Ok(())
    }

    fn expect_next(&mut self, next: &[u8]) -> Result<()> {
        for &i in next {
            if Some(i) != self.bnext() {
                return Err(self.err());
            }
        }
        Ok(())
    }

    fn unescape_next(&mut self) -> Result<()> {
        let b = tri!(self.bnext_or_err());
        match b {
            b'b' => self.buf.push('\x08'),
            b'f' => self.buf.push('\x0c'),
            b'n' => self.buf.push('\n'),
            b'r' => self.buf.push('\r'),
            b't' => self.buf.push('\t'),
            b'\\' => self.buf.push('\\'),
            b'/' => self.buf.push('/'),
            b'\"' => self.buf.push('\"'),
            b'u' => return self.read_hex_escape(),
            _ => return Err(self.err()),
        }
        Ok(())
    }

    fn read_keyword(&mut self, id: &[u8], t: Token<'a>) -> Result<Token<'a>> {
        debug_assert_eq!(self.bytes[self.pos - 1], id[0]);
        tri!(self.expect_next(&id[1..]));
        if let Some(b) = self.bpeek() {
            if !self.is_delim_byte(b) {
                return Err(self.err());
            }
        }
        Ok(t)
    }

    pub(crate) fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        tri!(self.skip_ws());
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        self.tok_start = self.pos;
        let tok = match tri!(self.bnext_or_err()) {
            b':' => return Ok(Some(Token::Colon)),
            b',' => return Ok(Some(Token::Comma)),
            b'{' => return Ok(Some(Token::ObjectBegin)),
            b'}' => return Ok(Some(Token::ObjectEnd)),
            b'[' => return Ok(Some(Token::ArrayBegin)),
            b']' => return Ok(Some(Token::ArrayEnd)),
            b'"' => self.read_string(),
            b't' => self.read_keyword(b"true", Token::Bool(true)),
            b'f' => self.read_keyword(b"false", Token::Bool(false)),
            b'n' => self.read_keyword(b"null", Token::Null),
            b'-' | b'0'..=b'9' => self.read_num(),
            _ => {
                self.pos = self.tok_start;
                return Err(self.err());
            }
        };
        Ok(Some(tri!(tok)))
    }

    fn is_delim_byte(&self, b: u8) -> bool {
        match b {
            b',' | b'}' | b']' | b':' | b' ' | b'\t' | b'\n' | b'\r' => true,
            b'/' => self.dialect.allow_comments,
            _ => false,
        }
    }

    /// Scans `-? (0 | [1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?`. Integers
    /// that fit in 128 bits stay exact, anything else goes through `f64`.
    fn read_num(&mut self) -> Result<Token<'a>> {
        let bs = self.bytes;
        let digits = |from: usize| bs[from..].iter().take_while(|b| b.is_ascii_digit()).count();
        let mut p = self.tok_start;
        let neg = bs[p] == b'-';
        if neg {
            p += 1;
        }
        let n = digits(p);
        if n == 0 || (n > 1 && bs[p] == b'0') {
            return Err(self.err_at_token());
        }
        p += n;
        let mut float = false;
        if bs.get(p) == Some(&b'.') {
            let n = digits(p + 1);
            if n == 0 {
                return Err(self.err_at_token());
            }
            p += 1 + n;
            float = true;
        }
        if matches!(bs.get(p), Some(b'e') | Some(b'E')) {
            p += 1;
            if matches!(bs.get(p), Some(b'+') | Some(b'-')) {
                p += 1;
            }
            let n = digits(p);
            if n == 0 {
                return Err(self.err_at_token());
            }
            p += n;
            float = true;
        }
        self.pos = p;
        if let Some(b) = self.bpeek() {
            if !self.is_delim_byte(b) {
                return Err(self.err());
            }
        }
        let text = &self.input[self.tok_start..self.pos];
        if !float {
            if neg {
                if let Ok(i) = text.parse::<i128>() {
                    return Ok(if i < 0 { Token::NumI(i) } else { Token::NumU(0) });
                }
            } else if let Ok(u) = text.parse::<u128>() {
                return Ok(Token::NumU(u));
            }
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Token::NumF(v)),
            _ => Err(self.err_at_token()),
        }
    }

    fn read_string(&mut self) -> Result<Token<'a>> {
        self.buf.clear();
        let bs = self.bytes;
        loop {
            let mut p = self.pos;
            let start = p;
            while p < bs.len() && bs[p] >= 0x20 && bs[p] != b'"' && bs[p] != b'\\' {
                p += 1;
            }
            // raw control characters must be escaped.
            if p == bs.len() || bs[p] < 0x20 || !self.input.is_char_boundary(p) {
                self.pos = p;
                return Err(self.err());
            }
            self.pos = p + 1;
            if bs[p] == b'"' && self.buf.is_empty() {
                // didn't need any unescaping.
                return Ok(Token::StrBorrow(&self.input[start..p]));
            }
            self.buf.push_str(&self.input[start..p]);
            if bs[p] == b'"' {
                return Ok(Token::StrOwn(self.buf.clone().into_boxed_str()));
            }
            debug_assert_eq!(bs[p], b'\\');
            tri!(self.unescape_next());
        }
    }
}

impl<'a> Reader<'a> {
    pub(crate) fn next(&mut self) -> Result<Token<'a>> {
        match self.next_token() {
            Ok(Some(v)) => Ok(v),
            Err(e) => Err(e),
            Ok(None) => Err(self.err()),
        }
    }

    fn colon(&mut self) -> Result<()> {
        match tri!(self.next()) {
            Token::Colon => Ok(()),
            _ => Err(self.err_at_token()),
        }
    }

    /// After a `,`, returns true if the container is closed by a trailing
    /// comma the dialect allows.
    fn trailing_close(&mut self, close: Kind) -> Result<bool> {
        if self.dialect.allow_trailing_comma && self.peek_kind() == close {
            tri!(self.next());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn comma_or_end(&mut self, end: Kind) -> Result<bool> {
        match tri!(self.next()) {
            Token::Comma => Ok(!tri!(self.trailing_close(end))),
            t if t.kind() == end => Ok(false),
            _ => Err(self.err_at_token()),
        }
    }

    pub fn read_str(&mut self) -> Result<Cow<'a, str>> {
        match tri!(self.next()) {
            Token::StrBorrow(s) => Ok(Cow::Borrowed(s)),
            Token::StrOwn(s) => Ok(Cow::Owned(s.into())),
            t => Err(self.mismatch("string", t.kind())),
        }
    }

    /// Reads a JSON array, calling `each` once per element with the reader
    /// positioned at the element.
    pub fn read_array<F>(&mut self, mut each: F) -> Result<()>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        match tri!(self.next()) {
            Token::ArrayBegin => {}
            t => return Err(self.mismatch("array", t.kind())),
        }
        if self.peek_kind() == Kind::ArrayEnd {
            tri!(self.next());
            return Ok(());
        }
        loop {
            tri!(each(self));
            if !tri!(self.comma_or_end(Kind::ArrayEnd)) {
                return Ok(());
            }
        }
    }

    /// Reads a JSON object, calling `each` once per member with its key and
    /// the reader positioned at the member's value.
    pub fn read_object<F>(&mut self, mut each: F) -> Result<()>
    where
        F: FnMut(&mut Self, Cow<'a, str>) -> Result<()>,
    {
        match tri!(self.next()) {
            Token::ObjectBegin => {}
            t => return Err(self.mismatch("object", t.kind())),
        }
        if self.peek_kind() == Kind::ObjectEnd {
            tri!(self.next());
            return Ok(());
        }
        loop {
            let key = match tri!(self.next()) {
                Token::StrBorrow(s) => Cow::Borrowed(s),
                Token::StrOwn(s) => Cow::Owned(s.into()),
                _ => return Err(self.err_at_token()),
            };
            tri!(self.colon());
            tri!(each(self, key));
            if !tri!(self.comma_or_end(Kind::ObjectEnd)) {
                return Ok(());
            }
        }
    }

    /// Consumes and discards one complete value.
    pub fn skip_value(&mut self) -> Result<()> {
        match self.peek_kind() {
            Kind::ArrayBegin => self.read_array(|r| r.skip_value()),
            Kind::ObjectBegin => self.read_object(|r, _| r.skip_value()),
            _ => match tri!(self.next()) {
                Token::Colon | Token::Comma | Token::ObjectEnd | Token::ArrayEnd => {
                    Err(self.err_at_token())
                }
                _ => Ok(()),
            },
        }
    }
}

/// Decoding from a [`Reader`] into an existing value.
///
/// Implementations overwrite `self` entirely on success. On failure `self`
/// may be left partially written; callers that need all-or-nothing
/// semantics wrap it (see [`crate::Option`]).
pub trait ReadJson {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()>;
}

impl ReadJson for bool {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        match tri!(r.next()) {
            Token::Bool(b) => {
                *self = b;
                Ok(())
            }
            t => Err(r.mismatch("bool", t.kind())),
        }
    }
}

impl ReadJson for () {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        match tri!(r.next()) {
            Token::Null => Ok(()),
            t => Err(r.mismatch("null", t.kind())),
        }
    }
}

macro_rules! impl_read_json_int {
    ($($t:ident),+ $(,)?) => {$(
        impl ReadJson for $t {
            fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
                let v = match tri!(r.next()) {
                    Token::NumU(u) => $t::try_from(u).ok(),
                    Token::NumI(i) => $t::try_from(i).ok(),
                    t => return Err(r.mismatch(stringify!($t), t.kind())),
                };
                match v {
                    Some(v) => {
                        *self = v;
                        Ok(())
                    }
                    None => Err(r.mismatch(stringify!($t), Kind::Number)),
                }
            }
        }
    )+};
}
impl_read_json_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_read_json_float {
    ($($t:ident),+ $(,)?) => {$(
        impl ReadJson for $t {
            fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
                *self = match tri!(r.next()) {
                    Token::NumU(u) => u as $t,
                    Token::NumI(i) => i as $t,
                    Token::NumF(f) => f as $t,
                    t => return Err(r.mismatch(stringify!($t), t.kind())),
                };
                Ok(())
            }
        }
    )+};
}
impl_read_json_float!(f32, f64);

impl ReadJson for String {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let s = tri!(r.read_str());
        self.clear();
        self.push_str(&s);
        Ok(())
    }
}

impl<T: ?Sized + ReadJson> ReadJson for Box<T> {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        T::read_json(&mut **self, r)
    }
}

impl<T: ReadJson + Default> ReadJson for Vec<T> {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        self.clear();
        r.read_array(|r| {
            let mut v = T::default();
            tri!(v.read_json(r));
            self.push(v);
            Ok(())
        })
    }
}

impl<T: ReadJson + Default> ReadJson for BTreeMap<String, T> {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        self.clear();
        r.read_object(|r, k| {
            let mut v = T::default();
            tri!(v.read_json(r));
            self.insert(k.into_owned(), v);
            Ok(())
        })
    }
}

impl<T: ReadJson + Default, S: BuildHasher> ReadJson for HashMap<String, T, S> {
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        self.clear();
        r.read_object(|r, k| {
            let mut v = T::default();
            tri!(v.read_json(r));
            self.insert(k.into_owned(), v);
            Ok(())
        })
    }
}

/// Decodes a complete document into a fresh `T`.
pub fn from_str<T: ReadJson + Default>(s: &str) -> Result<T> {
    from_str_with(s, Dialect::DEFAULT)
}

pub fn from_str_with<T: ReadJson + Default>(s: &str, d: Dialect) -> Result<T> {
    let mut r = Reader::with_dialect(s, d);
    let mut v = T::default();
    tri!(v.read_json(&mut r));
    tri!(r.finish());
    Ok(v)
}

#[cfg(test)]
mod test {
    use super::*;

    fn dec_utf16_single(a: u16, b: u16) -> Option<char> {
        if (0xdc00..=0xdfff).contains(&a) || !(0xdc00..=0xdfff).contains(&b) {
            return None;
        }
        debug_assert!((0xd800..0xdc00).contains(&a), "huh? {:#x}", a);
        let c = (((a as u32 - 0xd800) << 10) | (b as u32 - 0xdc00)) + 0x10000;
        core::char::from_u32(c)
    }

    #[test]
    fn test_u16() {
        for c in (0x10000..0x110000).filter_map(core::char::from_u32) {
            let mut buf = [0, 0];
            c.encode_utf16(&mut buf);
            assert_eq!(dec_utf16_single(buf[0], buf[1]), Some(c));
        }
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut r = Reader::new(" [ null , 1 ] ");
        assert_eq!(r.peek_kind(), Kind::ArrayBegin);
        assert_eq!(r.peek_kind(), Kind::ArrayBegin);
        assert_eq!(r.read_token(), Ok(Kind::ArrayBegin));
        assert_eq!(r.peek_kind(), Kind::Null);
        assert_eq!(r.read_token(), Ok(Kind::Null));
        assert_eq!(r.peek_kind(), Kind::Invalid);
        assert_eq!(r.read_token(), Ok(Kind::Invalid));
        assert_eq!(r.peek_kind(), Kind::Number);
        assert_eq!(r.read_token(), Ok(Kind::Number));
        assert_eq!(r.read_token(), Ok(Kind::ArrayEnd));
        assert_eq!(r.peek_kind(), Kind::Invalid);
        assert!(r.read_token().unwrap_err().is_eof());
        assert_eq!(r.finish(), Ok(()));
    }

    #[test]
    fn test_positions() {
        let mut r = Reader::new("[1,\n  x]");
        let mut v: Vec<u32> = vec![];
        let e = v.read_json(&mut r).unwrap_err();
        assert_eq!(
            e,
            Error::Syntax(Position {
                index: 6,
                line: 2,
                column: 3
            })
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let d = Dialect::STRICT.comments(true);
        let mut r = Reader::with_dialect("/* 1", d);
        assert_eq!(r.peek_kind(), Kind::Invalid);
        assert!(r.read_token().unwrap_err().is_eof());
    }

    #[test]
    fn test_int_ranges() {
        assert_eq!(from_str::<u8>("255"), Ok(255));
        assert!(matches!(
            from_str::<u8>("256"),
            Err(Error::Mismatch {
                expected: "u8",
                found: Kind::Number,
                ..
            })
        ));
        assert!(from_str::<u32>("-1").is_err());
        assert_eq!(from_str::<i64>("-9"), Ok(-9));
        assert_eq!(from_str::<i32>("-0"), Ok(0));
        assert!(from_str::<i32>("1.5").is_err());
        assert_eq!(from_str::<f64>("2"), Ok(2.0));
    }

    #[test]
    fn test_number_grammar() {
        for bad in &["01", "-01", "00", "-", "1.", "1.e5", ".5", "1e", "1e+", "+1", "1x", "0x10"] {
            assert!(from_str::<f64>(bad).is_err(), "accepted {:?}", bad);
        }
        assert!(from_str::<i32>("01").is_err());
        assert_eq!(from_str::<f64>("0"), Ok(0.0));
        assert_eq!(from_str::<f64>("-0.5"), Ok(-0.5));
        assert_eq!(from_str::<f64>("10E-1"), Ok(1.0));
        assert_eq!(from_str::<f64>("0e0"), Ok(0.0));
        assert_eq!(from_str::<Vec<i32>>("[0,-10]"), Ok(vec![0, -10]));
    }

    #[test]
    fn test_raw_control_in_string() {
        assert!(from_str::<String>("\"a\x01b\"").is_err());
        assert!(from_str::<String>("\"a\nb\"").is_err());
        assert!(from_str::<String>("\"\\t\x1f\"").is_err());
        assert_eq!(from_str::<String>("\"a\x7fb\""), Ok("a\x7fb".to_string()));
    }

    #[test]
    fn test_wide_ints() {
        let max = u128::MAX.to_string();
        assert_eq!(from_str::<u128>(&max), Ok(u128::MAX));
        assert_eq!(from_str::<i128>(&i128::MIN.to_string()), Ok(i128::MIN));
        assert!(from_str::<u64>(&max).is_err());
        assert_eq!(from_str::<f64>(&max), Ok(u128::MAX as f64));
        // past 128 bits it's only a float.
        assert!(from_str::<u128>("340282366920938463463374607431768211456").is_err());
    }

    #[test]
    fn test_dialect() {
        let d = Dialect::STRICT.trailing_comma(true);
        let mut r = Reader::with_dialect("[1,]", d);
        assert_eq!(r.dialect(), d);
        assert_eq!(Reader::new("").dialect(), Dialect::default());
        let mut v: Vec<u8> = vec![];
        v.read_json(&mut r).unwrap();
        assert_eq!(v, [1]);
    }

    #[test]
    fn test_skip_value() {
        let mut r = Reader::new(r#"{"a": [1, {"b": null}], "c": "d"} 5"#);
        r.skip_value().unwrap();
        assert_eq!(r.peek_kind(), Kind::Number);
        assert!(Reader::new("]").skip_value().is_err());
    }
}
