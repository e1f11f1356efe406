// Adapters layer: concrete implementations of the domain ports.

pub mod tokio_process;

pub use tokio_process::TokioSpawner;
