//! Tags: opaque string classifiers carried by every instance.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// An opaque string classifier attached to an instance at construction.
///
/// Independent of success/failure: a `Failure` may carry `"Retryable"`, a
/// `Success` may carry `"Cached"`. Literal tags cost nothing to build or
/// clone.
///
/// ```
/// use tagres_core::Tag;
/// const CACHED: Tag = Tag::new("Cached");
/// assert_eq!(CACHED, "Cached");
/// assert_eq!(Tag::OK.as_str(), "Ok");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Default tag of a success.
    pub const OK: Tag = Tag::new("Ok");

    /// Default tag of a failure.
    pub const ERR: Tag = Tag::new("Err");

    #[inline]
    pub const fn new(literal: &'static str) -> Self {
        Tag(Cow::Borrowed(literal))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this is the default tag of either variant.
    pub fn is_default(&self) -> bool {
        *self == Tag::OK || *self == Tag::ERR
    }
}

impl From<&'static str> for Tag {
    fn from(literal: &'static str) -> Self {
        Tag::new(literal)
    }
}

impl From<String> for Tag {
    fn from(owned: String) -> Self {
        Tag(Cow::Owned(owned))
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.as_str())
    }
}
