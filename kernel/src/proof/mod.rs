//! Proof module: canonical JSON bytes and domain-separated hashing.
//!
//! Depends on nothing else in the kernel. `catalog` uses it for snapshot digests.

pub mod canon;
pub mod hash;
pub mod hash_domain;
