#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod arithmetic;
pub mod bits;
pub mod cipher;
pub mod curve;
pub mod eddsa;
pub mod field;
pub mod hash;
pub mod schnorr;
