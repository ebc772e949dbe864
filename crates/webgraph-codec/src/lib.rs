//! # webgraph-codec
//!
//! Maps graph records to flat documents for an inverted-index store, and back.
//!
//! Every record kind shares one document schema: a fixed set of string-valued
//! fields, some of them repeated, plus a `TYPE` discriminator naming the kind.
//!
//! ## Features
//! - Exhaustive encode/decode over the seven record kinds
//! - Identity assignment per kind (always new, kept when supplied, or none)
//! - Creation/modification date stamping from an injected clock
//! - Namespaced tags flattened to `namespace:key=value` entries
//!
//! ## Error tiers
//! - Caller errors (`CodecError`): unknown kind, empty creation rule
//! - Refusals (`Encoded::Refused`): record lacks a key field, logged and skipped
//! - Absent optional fields: resolved to defaults on decode

pub mod clock;
pub mod codec;
pub mod document;
pub mod error;
pub mod field;
pub mod stamp;
pub mod tags;

pub use clock::{Clock, IdSource, ManualClock, SequentialIds, SystemClock, UlidSource};
pub use codec::{decode, decode_as, Encoded, MissingField, RecordCodec, Refusal};
pub use document::Document;
pub use error::CodecError;
pub use field::FieldName;
pub use stamp::{format_date, parse_date, set_document_dates};
pub use tags::{decode_tags, encode_tags, format_tag, parse_tag};
