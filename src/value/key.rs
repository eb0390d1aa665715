//! Keys of a [`Traversable`](super::Traversable).

use std::fmt;

/// A key of a traversable: either an integer index or a string name.
///
/// Strings holding the canonical decimal form of an `i64` are coerced to
/// [`Key::Index`], so `Key::from("5") == Key::Index(5)`. Strings with a sign
/// prefix `+`, leading zeros or surrounding whitespace stay names.
///
/// # Examples
///
/// ```rust
/// use traverso::value::Key;
///
/// assert_eq!(Key::from("5"), Key::Index(5));
/// assert_eq!(Key::from("-3"), Key::Index(-3));
/// assert_eq!(Key::from("05"), Key::Name("05".to_string()));
/// assert_eq!(Key::from("foo"), Key::Name("foo".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// An integer key.
    Index(i64),
    /// A string key.
    Name(String),
}

impl Key {
    /// Returns `true` if this is an integer key.
    #[inline]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Returns `true` if this is a string key.
    #[inline]
    pub const fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// Returns the integer index, if any.
    #[inline]
    pub const fn as_index(&self) -> Option<i64> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }

    /// Returns the string name, if any.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(name) => Some(name),
        }
    }
}

fn canonical_index(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|byte| byte.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && text != "-0";
    if canonical { text.parse().ok() } else { None }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        i64::try_from(index).map_or_else(|_| Self::Name(index.to_string()), Self::Index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        canonical_index(name).map_or_else(|| Self::Name(name.to_string()), Self::Index)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        canonical_index(&name).map_or(Self::Name(name), Self::Index)
    }
}

impl From<&Self> for Key {
    fn from(key: &Self) -> Self {
        key.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => formatter.write_str(name),
        }
    }
}
