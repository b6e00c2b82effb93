//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod item;
pub mod key_action;
pub mod text;

// Re-export for convenience
pub use error::{InputError, LookupError};
pub use item::{Item, ItemList, Matchable};
pub use key_action::KeyAction;
