use alloc::{
    borrow::Cow,
    boxed::Box,
    rc::Rc,
    string::{String, ToString},
    sync::Arc,
};

/// Types usable as map keys: anything with a string form.
///
/// Renderers emit map entries as `key: value` pairs, so a map whose key type
/// doesn't implement this can't be reflected at all.
pub trait MapKey {
    /// The key as it appears in rendered output.
    fn map_key(&self) -> Cow<'_, str>;
}

impl MapKey for str {
    fn map_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl MapKey for String {
    fn map_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl MapKey for Cow<'_, str> {
    fn map_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl<T: MapKey + ?Sized> MapKey for &T {
    fn map_key(&self) -> Cow<'_, str> {
        (**self).map_key()
    }
}

macro_rules! impl_map_key_via {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: MapKey + ?Sized> MapKey for $ty {
                fn map_key(&self) -> Cow<'_, str> {
                    (**self).map_key()
                }
            }
        )*
    };
}

impl_map_key_via!(Box<T>, Rc<T>, Arc<T>);

macro_rules! impl_map_key_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn map_key(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_map_key_display!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    #[test]
    fn borrowed_keys_stay_borrowed() {
        let key = String::from("item1");
        assert!(matches!(key.map_key(), Cow::Borrowed("item1")));
        assert!(matches!("item2".map_key(), Cow::Borrowed("item2")));
    }

    #[test]
    fn integer_keys_use_their_decimal_form() {
        assert_eq!(42u32.map_key(), "42");
        assert_eq!((-7i64).map_key(), "-7");
        assert_eq!('x'.map_key(), "x");
    }

    #[test]
    fn smart_pointer_keys_forward() {
        let key: Rc<str> = Rc::from("shared");
        assert_eq!(key.map_key(), "shared");
        assert_eq!(Box::new(3u8).map_key(), "3");
    }
}
