//! JSON encoding for [`Option`]: `null` when absent, otherwise exactly what
//! the contained type encodes to.
//!
//! Decoding always leaves the option either holding a fully decoded value or
//! absent; a failed decode never leaves a half-populated value behind.
use crate::read::{Kind, ReadJson, Reader, Result};
use crate::write::{self, Null, WriteJson, Writer};
use crate::Option;
use core::any::type_name;

type StdOption<T> = core::option::Option<T>;

impl<T: WriteJson> WriteJson for Option<T> {
    fn write_json(&self, dest: &mut Writer) {
        match self.as_ref() {
            Some(v) => v.write_json(dest),
            None => Null.write_json(dest),
        }
    }
}

impl<T: ReadJson + Default> ReadJson for Option<T> {
    /// Peeks at the next token: `null`, or anything that can't start a value
    /// at all, is consumed as a single token and makes the option absent.
    /// Anything else is decoded as a `T`.
    fn read_json(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let kind = r.peek_kind();
        if kind == Kind::Null || !kind.is_valid() {
            let res = r.read_token();
            self.reset();
            return match res {
                Ok(Kind::Null) => Ok(()),
                Ok(_) => {
                    tracing::trace!(ty = type_name::<T>(), "separator in value position");
                    Err(r.err_at_token())
                }
                Err(e) => {
                    tracing::trace!(ty = type_name::<T>(), error = %e, "no value token");
                    Err(e)
                }
            };
        }
        match self.slot.read_json(r) {
            Ok(()) => {
                self.valid = true;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(ty = type_name::<T>(), error = %e, "decode failed, option reset");
                self.reset();
                Err(e)
            }
        }
    }
}

/// Decodes into `target`.
///
/// # Panics
///
/// Panics if `target` is `None`: there's no option to decode into.
pub fn read_into<T>(target: StdOption<&mut Option<T>>, r: &mut Reader<'_>) -> Result<()>
where
    T: ReadJson + Default,
{
    match target {
        Some(o) => o.read_json(r),
        None => no_target(),
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn no_target() -> ! {
    panic!("no target option to decode into")
}

impl<T: WriteJson> Option<T> {
    /// Encodes to a compact JSON string.
    pub fn to_json(&self) -> String {
        write::to_string(self, false)
    }
}

impl<T: ReadJson + Default> Option<T> {
    /// Replaces `self` with the option decoded from a complete JSON document.
    ///
    /// The exact bytes `null` give an absent option. Anything else must be a
    /// single JSON value (surrounding whitespace is fine) that decodes as
    /// `T`. On error `self` is left absent.
    pub fn from_json(&mut self, data: &[u8]) -> Result<()> {
        if data == b"null" {
            self.reset();
            return Ok(());
        }
        let res = decode_document(self, data);
        if res.is_err() {
            self.reset();
        }
        res
    }
}

fn decode_document<T: ReadJson + Default>(o: &mut Option<T>, data: &[u8]) -> Result<()> {
    let s = match core::str::from_utf8(data) {
        Ok(s) => s,
        Err(e) => {
            return Err(crate::Error::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            })
        }
    };
    let mut r = Reader::new(s);
    tri!(o.read_json(&mut r));
    r.finish()
}
