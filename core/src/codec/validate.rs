/// True iff `c` is in `0-9A-Fa-f`.
#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Byte form of [`is_hex_digit`], used on the hot path.
#[inline]
pub fn is_hex_byte(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Whitespace as the C locale sees it: space, \t, \n, \v, \f, \r.
#[inline]
pub fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// First offending byte of a raw line piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDigit {
    /// 0-based offset into the raw piece, whitespace included.
    pub offset: usize,
    pub byte: u8,
}

impl InvalidDigit {
    /// The offending character, or U+FFFD for a byte inside a multi-byte sequence.
    pub fn found(&self) -> char {
        if self.byte.is_ascii() {
            char::from(self.byte)
        } else {
            char::REPLACEMENT_CHARACTER
        }
    }
}

/// Strip whitespace from `raw` and append the remaining hex digits to `out`.
///
/// On the first invalid byte `out` is restored to its previous length, so a
/// rejected piece never reaches the accumulation buffer.
/// Returns the number of digits appended.
pub fn strip_and_validate(raw: &[u8], out: &mut Vec<u8>) -> Result<usize, InvalidDigit> {
    let mark = out.len();
    out.reserve(raw.len());

    for (offset, &byte) in raw.iter().enumerate() {
        if is_space(byte) {
            continue;
        }
        if !is_hex_byte(byte) {
            out.truncate(mark);
            return Err(InvalidDigit { offset, byte });
        }
        out.push(byte);
    }

    Ok(out.len() - mark)
}
