pub mod enums;
pub mod health_input;
pub mod health_record;
pub mod risk;

pub use enums::*;
pub use health_input::*;
pub use health_record::*;
pub use risk::*;
