use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

type StdOption<T> = core::option::Option<T>;

/// Either a value of type `T` or nothing.
///
/// Stored as a validity flag next to a `T` slot. An absent option always
/// holds `T::default()` in its slot, which is what makes
/// [`unwrap_or_zero`](Self::unwrap_or_zero) and in-place decoding possible
/// without `unsafe`.
///
/// Every method here consumes or borrows the option and hands back a new
/// value. The only things that change an option in place are the decode
/// entry points in [`crate::codec`].
#[derive(Clone, Copy)]
pub struct Option<T> {
    pub(crate) valid: bool,
    pub(crate) slot: T,
}

/// Shorthand for [`Option::some`].
#[inline]
pub fn some<T>(value: T) -> Option<T> {
    Option::some(value)
}

/// Shorthand for [`Option::none`].
#[inline]
pub fn none<T: Default>() -> Option<T> {
    Option::none()
}

impl<T: Default> Option<T> {
    #[inline]
    pub fn none() -> Self {
        Self {
            valid: false,
            slot: T::default(),
        }
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        *self = Self::none();
    }

    /// Returns `self` if it holds a value that satisfies `pred`.
    pub fn filter<P>(self, pred: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        if self.valid && pred(&self.slot) {
            self
        } else {
            Self::none()
        }
    }

    /// Returns whichever of `self` and `other` holds a value, if exactly one
    /// does.
    pub fn xor(self, other: Self) -> Self {
        match (self.valid, other.valid) {
            (true, false) => self,
            (false, true) => other,
            _ => Self::none(),
        }
    }
}

impl<T> Option<T> {
    #[inline]
    pub const fn some(value: T) -> Self {
        Self {
            valid: true,
            slot: value,
        }
    }

    #[inline]
    pub const fn is_some(&self) -> bool {
        self.valid
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        !self.valid
    }

    /// True if there is a value and it satisfies `pred`.
    pub fn is_some_and<P>(&self, pred: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        self.valid && pred(&self.slot)
    }

    /// True if there is no value, or the value satisfies `pred`.
    pub fn is_none_or<P>(&self, pred: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        !self.valid || pred(&self.slot)
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if there is no value.
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        if self.valid {
            self.slot
        } else {
            expect_failed(msg)
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if there is no value.
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> T {
        if self.valid {
            self.slot
        } else {
            unwrap_failed()
        }
    }

    #[inline]
    pub fn unwrap_or(self, fallback: T) -> T {
        if self.valid {
            self.slot
        } else {
            fallback
        }
    }

    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        if self.valid {
            self.slot
        } else {
            f()
        }
    }

    /// Returns the slot as is: the value if there is one, otherwise
    /// `T::default()`.
    #[inline]
    pub fn unwrap_or_zero(self) -> T {
        self.slot
    }

    /// A one element slice borrowing the value, or an empty slice.
    pub fn as_slice(&self) -> &[T] {
        if self.valid {
            core::slice::from_ref(&self.slot)
        } else {
            &[]
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn as_ref(&self) -> StdOption<&T> {
        if self.valid {
            Some(&self.slot)
        } else {
            None
        }
    }

    #[inline]
    pub fn into_std(self) -> StdOption<T> {
        if self.valid {
            Some(self.slot)
        } else {
            None
        }
    }

    /// Calls `f` with a reference to the value, if any, and returns `self`
    /// unchanged.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if self.valid {
            f(&self.slot);
        }
        self
    }

    pub fn map<U, F>(self, f: F) -> Option<U>
    where
        U: Default,
        F: FnOnce(T) -> U,
    {
        if self.valid {
            Option::some(f(self.slot))
        } else {
            Option::none()
        }
    }

    pub fn map_or<U, F>(self, fallback: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        if self.valid {
            f(self.slot)
        } else {
            fallback
        }
    }

    pub fn map_or_else<U, D, F>(self, fallback: D, f: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        if self.valid {
            f(self.slot)
        } else {
            fallback()
        }
    }

    /// Returns `other` if `self` holds a value, dropping that value.
    pub fn and<U: Default>(self, other: Option<U>) -> Option<U> {
        if self.valid {
            other
        } else {
            Option::none()
        }
    }

    pub fn and_then<U, F>(self, f: F) -> Option<U>
    where
        U: Default,
        F: FnOnce(T) -> Option<U>,
    {
        if self.valid {
            f(self.slot)
        } else {
            Option::none()
        }
    }

    pub fn or(self, other: Self) -> Self {
        if self.valid {
            self
        } else {
            other
        }
    }

    pub fn or_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        if self.valid {
            self
        } else {
            f()
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn expect_failed(msg: &str) -> ! {
    panic!("{}", msg)
}

#[cold]
#[inline(never)]
#[track_caller]
fn unwrap_failed() -> ! {
    panic!("called Unwrap on a None value")
}

impl<T: Default> Default for Option<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T: Default> From<StdOption<T>> for Option<T> {
    fn from(o: StdOption<T>) -> Self {
        match o {
            Some(v) => Self::some(v),
            None => Self::none(),
        }
    }
}

impl<T> From<Option<T>> for StdOption<T> {
    fn from(o: Option<T>) -> Self {
        o.into_std()
    }
}

impl<'a, T> IntoIterator for &'a Option<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Comparisons go through `as_ref` so an absent slot never takes part.
impl<T: PartialEq> PartialEq for Option<T> {
    fn eq(&self, o: &Self) -> bool {
        self.as_ref() == o.as_ref()
    }
}

impl<T: Eq> Eq for Option<T> {}

impl<T: PartialOrd> PartialOrd for Option<T> {
    fn partial_cmp(&self, o: &Self) -> StdOption<Ordering> {
        self.as_ref().partial_cmp(&o.as_ref())
    }
}

impl<T: Ord> Ord for Option<T> {
    fn cmp(&self, o: &Self) -> Ordering {
        self.as_ref().cmp(&o.as_ref())
    }
}

impl<T: Hash> Hash for Option<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ref().hash(state)
    }
}
