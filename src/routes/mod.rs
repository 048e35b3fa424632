mod collection;
mod health_check;

pub use collection::*;
pub use health_check::*;
