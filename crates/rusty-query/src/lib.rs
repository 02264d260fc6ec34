//! # rusty-query
//!
//! Tag-driven binding between flat string key/value stores (URL query
//! strings, route parameters, form tables) and typed Rust records.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_query::{create_query, parse_query, QueryString, Record};
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! struct TileParams {
//!     #[query("w")]
//!     width: i32,
//!     #[query("h")]
//!     height: i32,
//!     #[query("max_zoom")]
//!     max_zoom: Option<f64>,
//! }
//!
//! // Decode: string table -> record
//! let query = QueryString::parse("w=10&h=10&max_zoom=2.4");
//! let mut params = TileParams::default();
//! parse_query(&query, &mut params).unwrap();
//! assert_eq!(params.max_zoom, Some(2.4));
//!
//! // Encode: record -> string table
//! let mut out = QueryString::new();
//! create_query(&params, &mut out).unwrap();
//! assert_eq!(out.to_string(), "w=10&h=10&max_zoom=2.4");
//! ```
//!
//! ## Features
//!
//! - **`axum`** (default) - [`Query`] extractor for axum handlers
//!
//! ## Architecture
//!
//! - [`coerce`] turns one raw string into a [`Value`] of a target [`Kind`]
//! - [`parse_query`] walks a [`Record`] and fills tagged fields from a [`QueryLookup`]
//! - [`create_query`] walks a [`Record`] and writes non-default fields to a [`QueryWriter`]
//! - `#[derive(Record)]` (from `rusty-query-derive`) implements [`Record`] and [`Reflect`]

#![doc(html_root_url = "https://docs.rs/rusty-query/0.1.0")]

// Lets the derive macro's `::rusty_query` paths resolve inside this crate
extern crate self as rusty_query;

mod coerce;
mod config;
mod decode;
mod encode;
mod error;
mod kind;
mod query_string;
mod record;
pub mod route;
mod store;
mod value;

#[cfg(feature = "axum")]
mod extract;

// Re-export derive macro (always available)
pub use rusty_query_derive::Record;

pub use coerce::{coerce, parse_bool, parse_f32, parse_f64, parse_int, parse_uint};
pub use config::{Config, DuplicateKeys, QueryConfig};
pub use decode::{parse_query, parse_query_into};
pub use encode::create_query;
pub use error::{CoerceError, ParseError, ParseErrorReason, QueryError, UnsupportedType};
pub use kind::{Kind, TypeInfo};
pub use query_string::QueryString;
pub use record::{Binding, Field, Record, EXCLUDE_TAG};
pub use store::{lookup_fn, FnLookup, QueryLookup, QueryWriter};
pub use value::{Reflect, Value};

#[cfg(feature = "axum")]
pub use extract::Query;
