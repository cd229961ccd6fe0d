pub mod repair_handler;

pub use repair_handler::*;
