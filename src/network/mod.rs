pub mod network;
pub mod spec;

pub use network::{Network, NetworkError};
pub use spec::{NetworkSpec, SpecError};
