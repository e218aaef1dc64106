pub mod error;
mod generator;
mod reading;
mod relay;
mod stubs;

pub use generator::*;
pub use reading::*;
pub use relay::*;
pub use stubs::*;

pub static CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
