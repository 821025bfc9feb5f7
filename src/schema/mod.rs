pub mod conversion;
pub mod node;
pub mod validate;

pub use conversion::*;
pub use node::*;
pub use validate::*;
