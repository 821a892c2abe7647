mod error;
mod map;
mod report;

#[cfg(test)]
mod tests;

pub use error::PassError;
pub use map::MapEngine;
pub use report::{EventOutcome, PassOutcome, PassReport};
