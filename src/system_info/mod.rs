pub mod network;
pub mod sensors;
pub mod storage;

pub use network::*;
pub use sensors::*;
pub use storage::*;
