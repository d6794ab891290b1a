mod as_value;
mod cursor;
mod error;
mod guard;
mod hydrator;
mod memory;
mod row;
mod traverse;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use cursor::*;
pub use error::*;
pub use guard::*;
pub use hydrator::*;
pub use memory::*;
pub use row::*;
pub use traverse::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
