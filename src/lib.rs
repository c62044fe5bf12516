pub mod checkpoint;
pub mod data;
pub mod device;
pub mod eval;
pub mod loss;
pub mod model;
pub mod optim;
pub mod report;
pub mod train;

// Convenience re-exports
pub use checkpoint::{CheckpointSink, FileCheckpointSink};
pub use data::{Batch, DataSource, DatasetDescriptor, InMemoryDataSource};
pub use device::{DevicePlacement, ToDevice};
pub use eval::{test_model, ClassAccuracy, ClassLabels, ClassPredictions, TestReport};
pub use loss::{CrossEntropyLoss, LossFunction, MseLoss};
pub use model::Model;
pub use optim::Optimizer;
pub use report::{write_report, GridSample};
pub use train::{train_loop, EpochStats, RunConfig, TrainingState};
