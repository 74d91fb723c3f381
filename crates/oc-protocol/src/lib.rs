pub mod evidence;
pub mod intent;
pub mod query;
pub mod records;

pub use evidence::*;
pub use intent::*;
pub use query::*;
pub use records::*;
