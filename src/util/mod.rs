// src/util/mod.rs
//! Helpers built only on the [`Reader`](crate::Reader) and
//! [`Writer`](crate::Writer) contracts

mod delim;
mod limited;
mod string;

pub use delim::peek_to;
pub use limited::LimitedReader;
pub use string::write_string;
