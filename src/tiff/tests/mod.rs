//! Unit tests for the TIFF module

#![cfg(test)]

mod byte_order_tests;
mod reader_tests;
