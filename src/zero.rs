//! Zero-value detection, for "leave it out if it's empty" conventions.
use crate::Option;
use std::collections::{BTreeMap, HashMap};

/// Reports whether a value is its type's zero (empty, default) value.
pub trait IsZero {
    fn is_zero(&self) -> bool;
}

impl<T: IsZero> Option<T> {
    /// True if there is no value, or the value is itself zero.
    pub fn is_zero(&self) -> bool {
        self.as_ref().map_or(true, T::is_zero)
    }
}

impl<T: Default + PartialEq> Option<T> {
    /// True if there is no value, or the value equals `T::default()`. The
    /// fallback for types without an [`IsZero`] impl.
    pub fn is_default(&self) -> bool {
        self.as_ref().map_or(true, |v| *v == T::default())
    }
}

impl<T: IsZero> IsZero for Option<T> {
    fn is_zero(&self) -> bool {
        Option::is_zero(self)
    }
}

/// Implements [`IsZero`] for types by comparing against their `Default`.
///
/// ```
/// #[derive(Default, PartialEq)]
/// struct Point { x: i32, y: i32 }
/// smolopt::impl_is_zero_by_default!(Point);
///
/// use smolopt::IsZero;
/// assert!(Point::default().is_zero());
/// assert!(!Point { x: 1, y: 0 }.is_zero());
/// ```
#[macro_export]
macro_rules! impl_is_zero_by_default {
    ($($t:ty),+ $(,)?) => {$(
        impl $crate::IsZero for $t {
            fn is_zero(&self) -> bool {
                *self == <$t as ::core::default::Default>::default()
            }
        }
    )+};
}

macro_rules! impl_is_zero_num {
    ($($t:ty),+ $(,)?) => {$(
        impl IsZero for $t {
            fn is_zero(&self) -> bool {
                *self == 0 as $t
            }
        }
    )+};
}
impl_is_zero_num!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// bitwise, so `-0.0` is not zero.
macro_rules! impl_is_zero_float {
    ($($t:ty),+ $(,)?) => {$(
        impl IsZero for $t {
            fn is_zero(&self) -> bool {
                self.to_bits() == 0
            }
        }
    )+};
}
impl_is_zero_float!(f32, f64);

impl IsZero for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl IsZero for char {
    fn is_zero(&self) -> bool {
        *self == '\0'
    }
}

impl IsZero for () {
    fn is_zero(&self) -> bool {
        true
    }
}

impl IsZero for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsZero for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsZero for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: ?Sized + IsZero> IsZero for &T {
    fn is_zero(&self) -> bool {
        T::is_zero(*self)
    }
}

impl<T: ?Sized + IsZero> IsZero for Box<T> {
    fn is_zero(&self) -> bool {
        T::is_zero(&**self)
    }
}

macro_rules! impl_is_zero_tuple {
    ($(($($n:tt $t:ident),+))+) => {$(
        impl<$($t: IsZero),+> IsZero for ($($t,)+) {
            fn is_zero(&self) -> bool {
                $(self.$n.is_zero())&&+
            }
        }
    )+};
}
impl_is_zero_tuple! {
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
}
