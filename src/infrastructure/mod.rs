//! Infrastructure adapters: the synthetic market feed plus console and
//! clock implementations of the domain logging traits.

pub mod fixture;
pub mod services;

pub use fixture::RandomMarketData;
pub use services::{ConsoleLogger, MemoryLogger, SystemTimeProvider};
