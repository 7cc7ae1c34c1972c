#![no_std]

#[cfg(test)]
extern crate std;

pub mod maths;

pub use maths::fastlibm;
pub use maths::fastlibm::{cos, sin, sincos};
