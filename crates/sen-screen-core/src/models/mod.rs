//! Domain models for the SEN screening system.

mod answers;
mod assessment;
mod patient;

pub use answers::*;
pub use assessment::*;
pub use patient::*;
