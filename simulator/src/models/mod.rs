//! Domain entities of the trust game

pub mod agent;

pub use agent::GamerAgent;
