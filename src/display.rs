use crate::Option;
use core::fmt;

/// `Some(value)` or `None`.
impl<T: fmt::Display> fmt::Display for Option<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(v) => write!(f, "Some({})", v),
            None => f.write_str("None"),
        }
    }
}

/// `Some(value)` or `None::<T>()`, naming the type even when there's no
/// value to look at.
impl<T: fmt::Debug> fmt::Debug for Option<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(v) => f.debug_tuple("Some").field(v).finish(),
            None => write!(f, "None::<{}>()", core::any::type_name::<T>()),
        }
    }
}
