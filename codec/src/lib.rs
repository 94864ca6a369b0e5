//! Canonical binary serialization for chain structures.
//!
//! # Overview
//!
//! Anything hashed or signed on the wire must serialize to a byte sequence
//! that is a pure function of its field values. This crate provides that
//! canonical encoding: struct fields are written in declaration order,
//! unsigned integers as big-endian fixed-width values or protobuf-style
//! varints, byte strings with a varint length prefix, and `Option` presence
//! as a single tag byte. Two values that compare equal always encode to
//! byte-identical output.
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use mason_codec::{DecodeExt, Encode, EncodeSize, Error, Read, Write};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Entry {
//!     index: u64,
//!     payload: Vec<u8>,
//! }
//!
//! impl Write for Entry {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.index.write(buf);
//!         self.payload.write(buf);
//!     }
//! }
//!
//! impl EncodeSize for Entry {
//!     fn encode_size(&self) -> usize {
//!         self.index.encode_size() + self.payload.encode_size()
//!     }
//! }
//!
//! impl Read for Entry {
//!     fn read(buf: &mut impl Buf) -> Result<Self, Error> {
//!         let index = u64::read(buf)?;
//!         let payload = Vec::<u8>::read(buf)?;
//!         Ok(Self { index, payload })
//!     }
//! }
//!
//! let entry = Entry { index: 7, payload: vec![1, 2, 3] };
//! let encoded = entry.encode();
//! assert_eq!(Entry::decode(encoded).unwrap(), entry);
//! ```

pub mod codec;
pub mod error;
pub mod types;
pub mod varint;

pub use codec::{Decode, DecodeExt, Encode, EncodeSize, FixedSize, Read, Write};
pub use error::Error;
