//! Keyboard layouts: nine key-groups on a 3×3 grid.
//!
//! Keys are stored in row-major order (top-left, top-centre, top-right,
//! middle-left, …, bottom-right). Each key holds up to three candidate
//! characters; missing candidates are empty slots at the end.
//!
//! Layouts can also be decoded from the fixed-width text encoding:
//! ```text
//! layout := key × 9
//! key    := c c c \0 | c c \0 \0 | c \0 \0 \0 | \0 \0 \0 \0
//! ```
//! The terminator of the final key may be left off.

use core::str::FromStr;

use crate::error::{Error, LayoutError};

/// Candidate slots per key.
pub const GROUP_SLOTS: usize = 3;

/// Keys per layout.
pub const LAYOUT_KEYS: usize = 9;

/// Encoded width of one key, terminator included.
const ENCODED_KEY_WIDTH: usize = GROUP_SLOTS + 1;

/// The 0-3 candidate characters behind one on-screen key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyGroup {
    slots: [Option<char>; GROUP_SLOTS],
}

impl KeyGroup {
    /// A key with no candidates.
    pub const EMPTY: Self = Self {
        slots: [None; GROUP_SLOTS],
    };

    /// Build a key from up to three characters. Extra characters are ignored.
    pub const fn new(chars: &[char]) -> Self {
        let mut slots = [None; GROUP_SLOTS];
        let mut i = 0;
        while i < chars.len() && i < GROUP_SLOTS {
            slots[i] = Some(chars[i]);
            i += 1;
        }
        Self { slots }
    }

    /// Candidate in `slot` (0-based), `None` if the slot is empty.
    pub fn get(&self, slot: usize) -> Option<char> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn first(&self) -> Option<char> {
        self.slots[0]
    }

    /// Number of present candidates.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// Raw slots, empty ones included.
    pub fn slots(&self) -> [Option<char>; GROUP_SLOTS] {
        self.slots
    }

    /// Present candidates in order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.slots.iter().map_while(|c| *c)
    }
}

/// One complete 3×3 grid of keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    groups: [KeyGroup; LAYOUT_KEYS],
}

impl Layout {
    pub const fn new(groups: [KeyGroup; LAYOUT_KEYS]) -> Self {
        Self { groups }
    }

    /// Key at 1-based `(row, col)`, `None` outside the 3×3 grid.
    pub fn group(&self, row: u8, col: u8) -> Option<&KeyGroup> {
        if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
            return None;
        }
        let index = (row as usize - 1) * 3 + (col as usize - 1);
        self.groups.get(index)
    }

    pub fn groups(&self) -> &[KeyGroup; LAYOUT_KEYS] {
        &self.groups
    }

    /// Decode and validate a fixed-width layout string.
    pub fn decode(encoded: &str) -> Result<Self, LayoutError> {
        const WIDTH: usize = LAYOUT_KEYS * ENCODED_KEY_WIDTH;

        let mut raw = ['\0'; WIDTH];
        let mut count = 0;
        for c in encoded.chars() {
            if count < WIDTH {
                raw[count] = c;
            }
            count += 1;
        }
        // The final terminator is optional.
        if count != WIDTH && count != WIDTH - 1 {
            return Err(LayoutError::Length(count));
        }

        let mut groups = [KeyGroup::EMPTY; LAYOUT_KEYS];
        for (key, chunk) in raw.chunks_exact(ENCODED_KEY_WIDTH).enumerate() {
            let key_id = key as u8;
            if chunk[GROUP_SLOTS] != '\0' {
                return Err(LayoutError::Unterminated { key: key_id });
            }

            let mut slots = [None; GROUP_SLOTS];
            let mut ended = false;
            for (slot, &c) in chunk[..GROUP_SLOTS].iter().enumerate() {
                if c == '\0' {
                    ended = true;
                } else if ended {
                    return Err(LayoutError::Gap { key: key_id });
                } else if c.is_control() {
                    return Err(LayoutError::Unprintable { key: key_id });
                } else {
                    slots[slot] = Some(c);
                }
            }
            groups[key] = KeyGroup { slots };
        }

        Ok(Self { groups })
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        Ok(Self::decode(s)?)
    }
}

const fn key(chars: &[char]) -> KeyGroup {
    KeyGroup::new(chars)
}

/// Lower-case letters and a space.
/// ```text
/// abc  def  ghi
/// jkl  mno  pqr
/// stu  vwx  yz
/// ```
pub const LOWERCASE: Layout = Layout::new([
    key(&['a', 'b', 'c']),
    key(&['d', 'e', 'f']),
    key(&['g', 'h', 'i']),
    key(&['j', 'k', 'l']),
    key(&['m', 'n', 'o']),
    key(&['p', 'q', 'r']),
    key(&['s', 't', 'u']),
    key(&['v', 'w', 'x']),
    key(&['y', 'z', ' ']),
]);

/// Upper-case letters and a space.
pub const UPPERCASE: Layout = Layout::new([
    key(&['A', 'B', 'C']),
    key(&['D', 'E', 'F']),
    key(&['G', 'H', 'I']),
    key(&['J', 'K', 'L']),
    key(&['M', 'N', 'O']),
    key(&['P', 'Q', 'R']),
    key(&['S', 'T', 'U']),
    key(&['V', 'W', 'X']),
    key(&['Y', 'Z', ' ']),
]);

/// Digits.
/// ```text
/// 01   2    3
/// 4    5    6
/// 7    8    9
/// ```
pub const NUMBERS: Layout = Layout::new([
    key(&['0', '1']),
    key(&['2']),
    key(&['3']),
    key(&['4']),
    key(&['5']),
    key(&['6']),
    key(&['7']),
    key(&['8']),
    key(&['9']),
]);

/// Punctuation and operators.
/// ```text
/// .    '!   :;"
/// ,    -    @$#
/// ?    &%   +*=
/// ```
pub const PUNCTUATION: Layout = Layout::new([
    key(&['.']),
    key(&['\'', '!']),
    key(&[':', ';', '"']),
    key(&[',']),
    key(&['-']),
    key(&['@', '$', '#']),
    key(&['?']),
    key(&['&', '%']),
    key(&['+', '*', '=']),
]);

/// Brackets, slashes and miscellaneous characters.
/// ```text
/// ()   <>   {}
/// /    \    []
/// |_   ~^`  ¢½
/// ```
pub const BRACKETS: Layout = Layout::new([
    key(&['(', ')']),
    key(&['<', '>']),
    key(&['{', '}']),
    key(&['/']),
    key(&['\\']),
    key(&['[', ']']),
    key(&['|', '_']),
    key(&['~', '^', '`']),
    key(&['¢', '½']),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_group_counts_until_first_empty_slot() {
        assert_eq!(key(&['a', 'b', 'c']).len(), 3);
        assert_eq!(key(&['y', 'z']).len(), 2);
        assert_eq!(KeyGroup::EMPTY.len(), 0);
        assert!(KeyGroup::EMPTY.is_empty());
        assert_eq!(key(&['a', 'b', 'c', 'd']).get(2), Some('c'));
    }

    #[test]
    fn key_group_empty_slots_read_as_none() {
        let group = key(&['&', '%']);
        assert_eq!(group.get(0), Some('&'));
        assert_eq!(group.get(2), None);
        assert_eq!(group.get(7), None);
        assert_eq!(group.slots(), [Some('&'), Some('%'), None]);
    }

    #[test]
    fn group_lookup_is_row_major_and_one_based() {
        assert_eq!(LOWERCASE.group(1, 1), Some(&key(&['a', 'b', 'c'])));
        assert_eq!(LOWERCASE.group(2, 1), Some(&key(&['j', 'k', 'l'])));
        assert_eq!(LOWERCASE.group(3, 3), Some(&key(&['y', 'z', ' '])));
        assert_eq!(LOWERCASE.group(0, 1), None);
        assert_eq!(LOWERCASE.group(1, 4), None);
    }

    #[test]
    fn decode_matches_builtin_layouts() {
        let lower = "abc\0def\0ghi\0jkl\0mno\0pqr\0stu\0vwx\0yz ";
        assert_eq!(Layout::decode(lower), Ok(LOWERCASE));

        let numbers = "01\0\02\0\0\03\0\0\04\0\0\05\0\0\06\0\0\07\0\0\08\0\0\09\0\0\0";
        assert_eq!(Layout::decode(numbers), Ok(NUMBERS));

        let brackets = "()\0\0<>\0\0{}\0\0/\0\0\0\\\0\0\0[]\0\0|_\0\0~^`\0¢½\0";
        assert_eq!(Layout::decode(brackets), Ok(BRACKETS));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(Layout::decode("abc\0"), Err(LayoutError::Length(4)));
        assert_eq!(Layout::decode(""), Err(LayoutError::Length(0)));
    }

    #[test]
    fn parse_wraps_layout_errors() {
        assert_eq!(
            "abc\0".parse::<Layout>(),
            Err(Error::Layout(LayoutError::Length(4)))
        );
        let mut encoded = String::from("a\0b\0");
        encoded.push_str(&"\0".repeat(32));
        assert_eq!(
            encoded.parse::<Layout>(),
            Err(Error::Layout(LayoutError::Gap { key: 0 }))
        );
    }

    #[test]
    fn decode_rejects_gap_inside_key() {
        let gap = "a\0c\0def\0ghi\0jkl\0mno\0pqr\0stu\0vwx\0yz ";
        assert_eq!(Layout::decode(gap), Err(LayoutError::Gap { key: 0 }));
    }

    #[test]
    fn decode_rejects_missing_terminator() {
        let long = "abcddef\0ghi\0jkl\0mno\0pqr\0stu\0vwx\0yz ";
        assert_eq!(Layout::decode(long), Err(LayoutError::Unterminated { key: 0 }));
    }

    #[test]
    fn decode_rejects_control_characters() {
        let ctrl = "abc\0d\te\0ghi\0jkl\0mno\0pqr\0stu\0vwx\0yz ";
        assert_eq!(Layout::decode(ctrl), Err(LayoutError::Unprintable { key: 1 }));
    }
}
