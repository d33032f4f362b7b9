mod binding;
mod core;
mod field;
mod parameter;

pub use self::core::*;
pub use binding::*;
pub use field::*;
pub use parameter::*;
