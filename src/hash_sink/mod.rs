pub mod core;

#[cfg(test)]
mod tests;

pub use self::core::{Blake2bSink, HashSink};
