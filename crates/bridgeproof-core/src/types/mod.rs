pub mod account;
pub mod header;
pub mod key;
pub mod record;

pub use account::*;
pub use header::*;
pub use key::*;
pub use record::*;
