//! Entity types persisted in the local store.
//!
//! Every entity is a strongly-typed record; nothing is accessed through
//! stringly-typed field lookup.

pub mod dose_occurrence;
pub mod enums;
pub mod medication;
pub mod reminder;

pub use dose_occurrence::*;
pub use enums::*;
pub use medication::*;
pub use reminder::*;
