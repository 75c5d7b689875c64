pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use math::matrix::{Matrix, MatrixError};
pub use activation::activation::{sigmoid, sigmoid_prime};
pub use layers::dense::Layer;
pub use network::network::{Network, NetworkError};
pub use network::spec::{NetworkSpec, SpecError};
pub use loss::mse::MseLoss;
pub use train::{evaluate, train_epoch, train_loop, EpochStats, TrainConfig, TrainError};
