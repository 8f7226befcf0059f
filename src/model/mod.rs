pub mod condition;
pub mod node;

pub use condition::*;
pub use node::*;
