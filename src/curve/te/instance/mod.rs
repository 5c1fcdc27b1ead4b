//! Twisted Edwards curve instances.

pub mod ed25519;
pub mod ed448;
