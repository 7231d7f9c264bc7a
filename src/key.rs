use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// A type that can be stored as a tree key by projecting itself to a string.
///
/// The projected string (the *key-string*) is the sequence of characters the
/// tree indexes on. The projection must be deterministic, and only keys with
/// a non-empty projection can be stored. Equality must agree with the
/// projection in one direction: keys that compare equal must project to the
/// same string. The converse is not required — two non-equal keys may spell
/// the same string, in which case inserting the second is reported as a
/// collision rather than an overwrite.
pub trait StringKey: PartialEq {
    /// The container type that holds the projected string, which can be
    /// referenced to get the slice of characters.
    type Target<'a>: 'a + AsRef<str>
    where
        Self: 'a;

    /// Returns the string this key projects to.
    fn key_str(&self) -> Self::Target<'_>;
}

impl StringKey for String {
    type Target<'a> = &'a str;

    fn key_str(&self) -> Self::Target<'_> {
        self
    }
}

impl StringKey for &str {
    type Target<'a>
        = &'a str
    where
        Self: 'a;

    fn key_str(&self) -> Self::Target<'_> {
        self
    }
}

impl StringKey for Box<str> {
    type Target<'a> = &'a str;

    fn key_str(&self) -> Self::Target<'_> {
        self
    }
}

impl StringKey for Rc<str> {
    type Target<'a> = &'a str;

    fn key_str(&self) -> Self::Target<'_> {
        self
    }
}

impl StringKey for Arc<str> {
    type Target<'a> = &'a str;

    fn key_str(&self) -> Self::Target<'_> {
        self
    }
}

impl StringKey for Cow<'_, str> {
    type Target<'a>
        = &'a str
    where
        Self: 'a;

    fn key_str(&self) -> Self::Target<'_> {
        self
    }
}

impl StringKey for char {
    type Target<'a> = String;

    fn key_str(&self) -> Self::Target<'_> {
        self.to_string()
    }
}

macro_rules! impl_string_key_for_integer {
    ($T:ty) => {
        impl StringKey for $T {
            type Target<'a> = String;

            fn key_str(&self) -> Self::Target<'_> {
                self.to_string()
            }
        }
    };
}

impl_string_key_for_integer!(u8);
impl_string_key_for_integer!(u16);
impl_string_key_for_integer!(u32);
impl_string_key_for_integer!(u64);
impl_string_key_for_integer!(u128);
impl_string_key_for_integer!(usize);

impl_string_key_for_integer!(i8);
impl_string_key_for_integer!(i16);
impl_string_key_for_integer!(i32);
impl_string_key_for_integer!(i64);
impl_string_key_for_integer!(i128);
impl_string_key_for_integer!(isize);
