pub mod network;
pub mod record;

pub use network::NeuralNetwork;
pub use record::NetworkRecord;
