//! I/O utilities for binary decoding
//!
//! This module provides the byte order strategies used to decode
//! integers and floats from an in-memory TIFF buffer.

pub mod byte_order;
