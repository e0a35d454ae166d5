//! Locale-aware string comparison.
//!
//! Approximates the root collation order used by browsers and Node's
//! `localeCompare` for the text that shows up in repository names and log
//! messages: whitespace < punctuation < symbols < digits < letters, letters
//! compared case- and accent-insensitively first, then accents (unaccented
//! first), then case (lowercase first). Byte order is the final tie-break so
//! the result is a total order.

use std::cmp::Ordering;

/// Root-collation order of the ASCII punctuation and symbols.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
  Whitespace,
  Punctuation,
  Symbol,
  Digit,
  Letter,
}

#[derive(Debug, Default)]
struct SortKey {
  primary: Vec<(Class, u32)>,
  secondary: Vec<bool>,
  tertiary: Vec<bool>,
}

/// Compare two strings the way a user would expect them sorted.
pub fn compare(a: &str, b: &str) -> Ordering {
  let ka = sort_key(a);
  let kb = sort_key(b);
  ka.primary
    .cmp(&kb.primary)
    .then_with(|| ka.secondary.cmp(&kb.secondary))
    .then_with(|| ka.tertiary.cmp(&kb.tertiary))
    .then_with(|| a.cmp(b))
}

fn sort_key(s: &str) -> SortKey {
  let mut key = SortKey::default();
  for ch in s.chars() {
    let upper = ch.is_uppercase();
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    let (base, accented) = fold(lower);
    for c in base.into_iter().flatten() {
      key.primary.push(primary(c));
      key.secondary.push(accented);
      key.tertiary.push(upper);
    }
  }
  key
}

fn primary(c: char) -> (Class, u32) {
  if c.is_whitespace() {
    (Class::Whitespace, c as u32)
  } else if let Some(i) = PUNCTUATION_ORDER.find(c) {
    (Class::Punctuation, i as u32)
  } else if c.is_numeric() {
    // Other scripts' digits sort after 0-9.
    (Class::Digit, c.to_digit(10).unwrap_or(10 + c as u32))
  } else if c.is_alphabetic() {
    (Class::Letter, c as u32)
  } else {
    (Class::Symbol, c as u32)
  }
}

/// Base letters of a lowercase char and whether it carried a diacritic.
fn fold(c: char) -> ([Option<char>; 2], bool) {
  let one = |b: char| ([Some(b), None], true);
  match c {
    'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => one('a'),
    'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => one('c'),
    'ď' | 'đ' => one('d'),
    'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => one('e'),
    'ĝ' | 'ğ' | 'ġ' | 'ģ' => one('g'),
    'ĥ' | 'ħ' => one('h'),
    'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => one('i'),
    'ĵ' => one('j'),
    'ķ' => one('k'),
    'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => one('l'),
    'ñ' | 'ń' | 'ņ' | 'ň' => one('n'),
    'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => one('o'),
    'ŕ' | 'ŗ' | 'ř' => one('r'),
    'ś' | 'ŝ' | 'ş' | 'š' => one('s'),
    'ţ' | 'ť' | 'ŧ' => one('t'),
    'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => one('u'),
    'ŵ' => one('w'),
    'ý' | 'ÿ' | 'ŷ' => one('y'),
    'ź' | 'ż' | 'ž' => one('z'),
    'ß' => ([Some('s'), Some('s')], true),
    'æ' => ([Some('a'), Some('e')], true),
    'œ' => ([Some('o'), Some('e')], true),
    _ => ([Some(c), None], false),
  }
}
