//! Synchronization primitives with platform-appropriate implementations.
//!
//! # Submodules
//!
//! - [`spin`] - Spin-based primitives that never block across an await point
//!
//! # Choosing the Right Primitive
//!
//! | Use Case | Primitive |
//! |----------|-----------|
//! | Write-once value, many lock-free readers | [`spin::Once`] |
//! | O(n) iteration, may block | `std::sync::Mutex` |

pub mod spin;
