//! Short Weierstrass curve instances.

pub mod secp256k1;
