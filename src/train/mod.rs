pub mod epoch_stats;
pub mod evaluator;
pub mod loop_fn;
pub mod run_config;
pub mod state;
pub mod trainer;

pub use epoch_stats::EpochStats;
pub use evaluator::evaluate_epoch;
pub use loop_fn::train_loop;
pub use run_config::RunConfig;
pub use state::TrainingState;
pub use trainer::train_epoch;
