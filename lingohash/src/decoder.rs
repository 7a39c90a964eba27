//! Lenient UTF-8 decoder.
//!
//! The decoder yields raw codepoint values rather than [`char`]s: continuation bytes are
//! not checked, and neither overlong forms nor surrogates are rejected. Feature buckets of
//! a trained model depend on this exact behavior, so it must not be made stricter.

/// Iterator over the codepoints encoded in a byte sequence.
///
/// * A lead byte that matches no UTF-8 pattern is skipped.
/// * A multi-byte sequence that does not fit in the rest of the input stops the decoding.
///
/// # Examples
///
/// ```
/// use lingohash::Utf8Decoder;
///
/// let cps: Vec<u32> = Utf8Decoder::new(b"a\xc3\xa9\xff\xe6").collect();
/// assert_eq!(vec![0x61, 0xe9], cps);
/// ```
#[derive(Clone, Debug)]
pub struct Utf8Decoder<'a> {
    bytes: &'a [u8],
}

impl<'a> Utf8Decoder<'a> {
    /// Creates a new decoder.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Returns the undecoded part of the input.
    pub const fn remaining(&self) -> &'a [u8] {
        self.bytes
    }
}

#[inline(always)]
fn cont(b: u8) -> u32 {
    u32::from(b & 0x3f)
}

impl<'a> Iterator for Utf8Decoder<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            let (&lead, rest) = self.bytes.split_first()?;
            let (cp, len) = match lead {
                0x00..=0x7f => (u32::from(lead), 1),
                _ if lead & 0xe0 == 0xc0 => match rest {
                    [b1, ..] => ((u32::from(lead & 0x1f) << 6) | cont(*b1), 2),
                    _ => break,
                },
                _ if lead & 0xf0 == 0xe0 => match rest {
                    [b1, b2, ..] => (
                        (u32::from(lead & 0x0f) << 12) | (cont(*b1) << 6) | cont(*b2),
                        3,
                    ),
                    _ => break,
                },
                _ if lead & 0xf8 == 0xf0 => match rest {
                    [b1, b2, b3, ..] => (
                        (u32::from(lead & 0x07) << 18)
                            | (cont(*b1) << 12)
                            | (cont(*b2) << 6)
                            | cont(*b3),
                        4,
                    ),
                    _ => break,
                },
                _ => {
                    self.bytes = rest;
                    continue;
                }
            };
            self.bytes = &self.bytes[len..];
            return Some(cp);
        }
        // Truncated sequence: the rest of the input is dropped.
        self.bytes = &[];
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<u32> {
        Utf8Decoder::new(bytes).collect()
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(b"").is_empty());
    }

    #[test]
    fn test_decode_valid() {
        let text = "aé水😀";
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        assert_eq!(expected, decode(text.as_bytes()));
    }

    #[test]
    fn test_decode_invalid_lead_skips_one_byte() {
        assert_eq!(vec![0x61], decode(&[0xff, 0x80, 0x61]));
        assert_eq!(vec![0x61, 0x62], decode(&[0x61, 0xbf, 0xf8, 0x62]));
    }

    #[test]
    fn test_decode_truncated_stops() {
        assert!(decode(&[0xe3]).is_empty());
        assert!(decode(&[0xe3, 0x61]).is_empty());
        assert_eq!(vec![0x61], decode(&[0x61, 0xf0, 0x9f, 0x98]));
    }

    #[test]
    fn test_decode_truncated_empties_remaining() {
        let mut it = Utf8Decoder::new(&[0x61, 0xc3]);
        assert_eq!(Some(0x61), it.next());
        assert_eq!(&[0xc3], it.remaining());
        assert_eq!(None, it.next());
        assert!(it.remaining().is_empty());
    }

    #[test]
    fn test_decode_continuation_not_checked() {
        // 0xc3 0x41: the second byte is taken as a continuation byte.
        assert_eq!(vec![0xc1], decode(&[0xc3, 0x41]));
    }

    #[test]
    fn test_decode_out_of_range() {
        assert_eq!(vec![0x1f_ffff], decode(&[0xf7, 0xbf, 0xbf, 0xbf]));
    }

    #[test]
    fn test_decode_surrogate() {
        assert_eq!(vec![0xd800], decode(&[0xed, 0xa0, 0x80]));
    }
}
