pub mod driver;

pub use driver::{mean_squared_error, train_sampled};
