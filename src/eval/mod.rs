pub mod class_accuracy;
pub mod predictions;
pub mod tester;

pub use class_accuracy::ClassAccuracy;
pub use predictions::{ClassLabels, ClassPredictions};
pub use tester::{test_model, TestReport};
