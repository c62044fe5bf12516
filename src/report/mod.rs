pub mod loss_plot;
pub mod prediction_grid;
pub mod writer;

pub use loss_plot::render_loss_curve;
pub use prediction_grid::{render_prediction_grid, GridSample};
pub use writer::write_report;
