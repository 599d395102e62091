//! Design tokens
//!
//! - [`TokenRegistry`]: the fixed, enumerable list of editable token names
//! - [`TokenValue`]: one token's light and dark variants

mod registry;
mod value;

pub use registry::*;
pub use value::*;
