pub mod activation;
pub mod error;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::Activation;
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use network::network::NeuralNetwork;
pub use network::record::NetworkRecord;
pub use train::driver::{mean_squared_error, train_sampled};
