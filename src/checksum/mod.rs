//! Reusable checksum algorithms.
//!
//! Every algorithm is a standalone, stateless function so any structural
//! validator can compose them. None inspects locale, clock, or environment,
//! and none allocates beyond the call stack.

pub mod letters;
pub mod luhn;
pub mod mod11;
pub mod mod97;
