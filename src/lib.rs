//! A small optional-value container, [`Option<T>`], with its own minimal JSON
//! codec.
//!
//! It holds either a `T` or nothing, behaves much like the standard library's
//! option, and encodes to JSON as `null` or as the bare contained value. The
//! name deliberately shadows the prelude type, so import it explicitly (or
//! refer to it as `smolopt::Option`).
//!
//! ## Basic Usage
//! ```
//! use smolopt::{none, some, Option};
//!
//! let port: Option<u16> = some(8080);
//! assert_eq!(port.map(|p| p + 1).unwrap_or(0), 8081);
//! assert_eq!(none::<u16>().unwrap_or(80), 80);
//!
//! assert_eq!(port.to_json(), "8080");
//! assert_eq!(none::<u16>().to_json(), "null");
//!
//! let mut decoded = Option::<u16>::none();
//! decoded.from_json(b"443").unwrap();
//! assert_eq!(decoded, some(443));
//! ```
//!
//! ## Streaming
//!
//! [`ReadJson`] and [`WriteJson`] work against a [`Reader`] or [`Writer`]
//! directly, so an option can sit inside a larger document without being
//! buffered separately. Decoding peeks at the next token; `null` (or a
//! token that can't start a value) yields an absent option, anything else is
//! decoded as `T`. A failed decode always leaves the option absent.
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`Option`], plus
//!   whole-buffer helpers on top of `serde_json` in `serde_impl`.
//! - `default_allow_comments`, `default_allow_trailing_comma`: change
//!   [`Dialect::DEFAULT`].

// `?` expansion currently harms both compile time (lots of llvm instrs
// generated) and runtime :(
macro_rules! tri {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => return Err(e),
        }
    };
}

pub mod codec;
mod display;
pub mod option;
pub mod read;
#[cfg(feature = "serde")]
pub mod serde_impl;
pub mod write;
pub mod zero;

pub use option::{none, some, Option};
pub use read::{from_str, Dialect, Error, Kind, ReadJson, Reader};
pub use write::{WriteJson, Writer};
pub use zero::IsZero;
