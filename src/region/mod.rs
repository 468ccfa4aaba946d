// src/region/mod.rs
//! Byte region shared by the buffered readers and writers

pub(crate) mod core;
pub(crate) mod ops;

pub(crate) use self::core::Region;
