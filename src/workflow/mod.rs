pub mod conversion;
pub mod defaults;
pub mod definition;
pub mod validation;

pub use conversion::*;
pub use defaults::add_node;
pub use definition::*;
pub use validation::*;
