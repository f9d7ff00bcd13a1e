//! Move pattern generators, one per piece kind, and the side-wide move enumerator built on
//! top of them.

#[allow(clippy::module_inception)]
mod movegen;
pub use self::movegen::*;

mod piece_type;
pub use self::piece_type::*;
