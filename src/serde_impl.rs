//! Bridge to serde. An option serializes as its value (no wrapping, no tag)
//! or as the format's "none"; `serde_json` turns that into the value or
//! `null`.
use crate::Option;
use core::fmt;
use core::marker::PhantomData;
use serde::de::{DeserializeOwned, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

impl<T: Serialize> Serialize for Option<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_ref() {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

struct OptionVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de> + Default> Visitor<'de> for OptionVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null or a value")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Option::none())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Option::none())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        T::deserialize(d).map(Option::some)
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Option<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_option(OptionVisitor(PhantomData))
    }

    // The in-place form must not leave `place` half written either.
    fn deserialize_in_place<D: Deserializer<'de>>(d: D, place: &mut Self) -> Result<(), D::Error> {
        match Self::deserialize(d) {
            Ok(v) => {
                *place = v;
                Ok(())
            }
            Err(e) => {
                place.reset();
                Err(e)
            }
        }
    }
}

/// Encodes with `serde_json`: the value's own encoding, or `null`.
pub fn to_json_vec<T: Serialize>(o: &Option<T>) -> serde_json::Result<Vec<u8>> {
    match o.as_ref() {
        Some(v) => serde_json::to_vec(v),
        None => Ok(b"null".to_vec()),
    }
}

/// Decodes a whole buffer with `serde_json` into `o`, leaving it absent on
/// error.
pub fn from_json_slice<T>(o: &mut Option<T>, data: &[u8]) -> serde_json::Result<()>
where
    T: DeserializeOwned + Default,
{
    if data == b"null" {
        o.reset();
        return Ok(());
    }
    match serde_json::from_slice::<Option<T>>(data) {
        Ok(v) => {
            *o = v;
            Ok(())
        }
        Err(e) => {
            tracing::debug!(ty = core::any::type_name::<T>(), error = %e, "serde decode failed, option reset");
            o.reset();
            Err(e)
        }
    }
}
