use crate::decoder::Utf8Decoder;

const BIGRAM_MASK: u32 = (1 << 16) - 1;
const TRIGRAM_MASK: u32 = (1 << 24) - 1;

const SPACE: u32 = b' ' as u32;

// Japanese and CJK ranges.
const JP_PUNCT_START: u32 = 0x3000;
const JP_PUNCT_END: u32 = 0x303f;
const JP_HIRAGANA_START: u32 = 0x3040;
const JP_HIRAGANA_END: u32 = 0x309f;
const JP_KATAKANA_START: u32 = 0x30a0;
const JP_KATAKANA_END: u32 = 0x30ff;
const CJK_KANJI_START: u32 = 0x4e00;
const CJK_KANJI_END: u32 = 0x9faf;
const JP_HALFWIDTH_KATAKANA_START: u32 = 0xff61;
const JP_HALFWIDTH_KATAKANA_END: u32 = 0xff90;

/// Sorted boundaries of the Unicode classes. Must agree with the table used for training.
const CLASS_BOUNDARIES: [u32; 52] = [
    160, 161, 171, 172, 173, 174, 187, 192, 196, 199, 200, 201, 202, 205, 214, 220, 223, 224,
    225, 226, 227, 228, 231, 232, 233, 234, 235, 236, 237, 238, 239, 242, 243, 244, 245, 246,
    249, 250, 251, 252, 333, 339,
    JP_PUNCT_START,
    JP_PUNCT_END,
    JP_HIRAGANA_START,
    JP_HIRAGANA_END,
    JP_KATAKANA_START,
    JP_KATAKANA_END,
    CJK_KANJI_START,
    CJK_KANJI_END,
    JP_HALFWIDTH_KATAKANA_START,
    JP_HALFWIDTH_KATAKANA_END,
];

/// Gets the Unicode class of a codepoint, i.e., the number of class boundaries smaller than
/// the codepoint.
///
/// # Examples
///
/// ```
/// use lingohash::unicode_class;
///
/// assert_eq!(0, unicode_class(0xa0));
/// assert_eq!(49, unicode_class(u32::from('水')));
/// ```
pub fn unicode_class(cp: u32) -> u32 {
    // The table has 52 elements.
    CLASS_BOUNDARIES.partition_point(|&b| b < cp) as u32
}

/// Feature extracted from a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureToken {
    /// Lowercased ASCII characters packed into an integer, one byte per character and the
    /// last character in the lowest byte. Bigrams use 16 bits, trigrams 24 bits, and
    /// 4-grams all 32 bits.
    AsciiNgram(u32),

    /// Non-ASCII codepoint.
    Unicode(u32),

    /// Unicode class of a non-ASCII codepoint. See [`unicode_class()`].
    UnicodeClass(u32),
}

/// Iterator over the features of a text.
///
/// ASCII characters are lowercased and combined into n-grams of up to four characters. The
/// text is treated as if it started with a space, and a character that is not ASCII
/// alphanumeric ends the current word: n-grams may end with it but the next n-gram starts
/// afresh. Each non-ASCII codepoint yields a [`FeatureToken::Unicode`] and a
/// [`FeatureToken::UnicodeClass`].
///
/// # Examples
///
/// ```
/// use lingohash::{FeatureToken, Features};
///
/// let features: Vec<_> = Features::from_bytes(b"Hi").collect();
/// assert_eq!(
///     vec![
///         FeatureToken::AsciiNgram(0x2068),   // " h"
///         FeatureToken::AsciiNgram(0x6869),   // "hi"
///         FeatureToken::AsciiNgram(0x206869), // " hi"
///     ],
///     features,
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Features<I> {
    codepoints: I,
    window: u32,
    n_prev_ascii: u8,
    buf: [FeatureToken; 3],
    buf_len: u8,
    buf_pos: u8,
}

impl<'a> Features<Utf8Decoder<'a>> {
    /// Creates an iterator over the features of a UTF-8 text. Malformed bytes are handled as
    /// described in [`Utf8Decoder`].
    pub const fn from_bytes(text: &'a [u8]) -> Self {
        Self::new(Utf8Decoder::new(text))
    }
}

impl<I> Features<I>
where
    I: Iterator<Item = u32>,
{
    /// Creates an iterator over the features of a codepoint sequence.
    pub const fn new(codepoints: I) -> Self {
        Self {
            codepoints,
            window: SPACE,
            n_prev_ascii: 1,
            buf: [FeatureToken::AsciiNgram(0); 3],
            buf_len: 0,
            buf_pos: 0,
        }
    }

    #[inline(always)]
    fn push(&mut self, token: FeatureToken) {
        self.buf[usize::from(self.buf_len)] = token;
        self.buf_len += 1;
    }

    fn feed(&mut self, cp: u32) {
        let c = match u8::try_from(cp) {
            Ok(c) if c.is_ascii() => c,
            _ => {
                self.push(FeatureToken::Unicode(cp));
                self.push(FeatureToken::UnicodeClass(unicode_class(cp)));
                self.n_prev_ascii = 0;
                return;
            }
        };
        self.window = (self.window << 8) | u32::from(c.to_ascii_lowercase());
        match self.n_prev_ascii {
            0 => {
                self.n_prev_ascii = 1;
            }
            1 => {
                self.push(FeatureToken::AsciiNgram(self.window & BIGRAM_MASK));
                self.n_prev_ascii = 2;
            }
            2 => {
                self.push(FeatureToken::AsciiNgram(self.window & BIGRAM_MASK));
                self.push(FeatureToken::AsciiNgram(self.window & TRIGRAM_MASK));
                self.n_prev_ascii = 3;
            }
            _ => {
                self.push(FeatureToken::AsciiNgram(self.window & BIGRAM_MASK));
                self.push(FeatureToken::AsciiNgram(self.window & TRIGRAM_MASK));
                self.push(FeatureToken::AsciiNgram(self.window));
            }
        }
        if !c.is_ascii_alphanumeric() {
            self.window = SPACE;
        }
    }
}

impl<I> Iterator for Features<I>
where
    I: Iterator<Item = u32>,
{
    type Item = FeatureToken;

    fn next(&mut self) -> Option<FeatureToken> {
        while self.buf_pos == self.buf_len {
            let cp = self.codepoints.next()?;
            self.buf_len = 0;
            self.buf_pos = 0;
            self.feed(cp);
        }
        let token = self.buf[usize::from(self.buf_pos)];
        self.buf_pos += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use FeatureToken::*;

    fn pack(s: &[u8]) -> u32 {
        s.iter().fold(0, |acc, &c| (acc << 8) | u32::from(c))
    }

    fn ngrams(text: &str) -> Vec<u32> {
        Features::from_bytes(text.as_bytes())
            .map(|t| match t {
                AsciiNgram(k) => k,
                _ => panic!("unexpected feature: {:?}", t),
            })
            .collect()
    }

    #[test]
    fn test_unicode_class() {
        assert_eq!(0, unicode_class(0x80));
        assert_eq!(0, unicode_class(160));
        assert_eq!(1, unicode_class(161));
        assert_eq!(24, unicode_class(u32::from('é')));
        assert_eq!(45, unicode_class(u32::from('あ')));
        assert_eq!(48, unicode_class(0x4e00));
        assert_eq!(49, unicode_class(0x6c34));
        assert_eq!(52, unicode_class(0x1f600));
    }

    #[test]
    fn test_features_empty() {
        assert_eq!(0, Features::from_bytes(b"").count());
    }

    #[test]
    fn test_features_single_char() {
        assert_eq!(vec![pack(b" a")], ngrams("A"));
    }

    #[test]
    fn test_features_word() {
        assert_eq!(
            vec![
                pack(b" q"),
                pack(b"qu"),
                pack(b" qu"),
                pack(b"uo"),
                pack(b"quo"),
                pack(b" quo"),
                pack(b"oi"),
                pack(b"uoi"),
                pack(b"quoi"),
            ],
            ngrams("Quoi"),
        );
    }

    #[test]
    fn test_features_word_boundary() {
        assert_eq!(
            vec![
                pack(b" a"),
                pack(b"ab"),
                pack(b" ab"),
                pack(b"b "),
                pack(b"ab "),
                pack(b" ab "),
                pack(b" c"),
                pack(b" c"),
                pack(b" c"),
                pack(b"cd"),
                pack(b" cd"),
                pack(b" cd"),
            ],
            ngrams("ab cd"),
        );
    }

    #[test]
    fn test_features_never_span_separator() {
        for key in ngrams("ab cd") {
            let bytes = key.to_be_bytes();
            let left = bytes.iter().any(|&b| b == b'a' || b == b'b');
            let right = bytes.iter().any(|&b| b == b'c' || b == b'd');
            assert!(!(left && right), "{:08x} spans the separator", key);
        }
    }

    #[test]
    fn test_features_non_ascii() {
        let features: Vec<_> = Features::from_bytes("水".as_bytes()).collect();
        assert_eq!(vec![Unicode(0x6c34), UnicodeClass(49)], features);
    }

    #[test]
    fn test_features_after_non_ascii() {
        // The first ASCII character after a non-ASCII one only primes the window.
        let features: Vec<_> = Features::from_bytes("éthe".as_bytes()).collect();
        assert_eq!(
            vec![
                Unicode(0xe9),
                UnicodeClass(24),
                AsciiNgram(pack(b"th")),
                AsciiNgram(pack(b"he")),
                AsciiNgram(pack(b"the")),
            ],
            features,
        );
    }

    #[test]
    fn test_features_malformed_only() {
        assert_eq!(0, Features::from_bytes(&[0xff, 0x80, 0xe3]).count());
    }

    #[test]
    fn test_features_from_codepoints() {
        let features: Vec<_> = Features::new([0x41, 0x3042].into_iter()).collect();
        assert_eq!(
            vec![AsciiNgram(pack(b" a")), Unicode(0x3042), UnicodeClass(45)],
            features,
        );
    }
}
