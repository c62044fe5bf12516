use crate::data::DataSource;
use crate::device::{DevicePlacement, ToDevice};
use crate::loss::LossFunction;
use crate::model::Model;
use crate::optim::Optimizer;

/// Batches between progress lines. The printed value is the mean per-batch
/// loss over the window, which then resets.
const PROGRESS_WINDOW: usize = 20;

/// Runs one full training epoch over `data` and returns the accumulated
/// (unnormalized) loss sum: Σ batch_loss × batch_len.
///
/// Per batch: place on the configured device, clear gradients, forward,
/// loss, backward, one optimizer step. Mutates the model parameters in
/// place. Every batch in the source is processed — the pass never returns
/// early, so no mini-batch's gradient update is silently discarded. An
/// empty source yields a loss sum of 0.0, which is valid, not an error.
pub fn train_epoch<M, O, L, D>(
    model: &mut M,
    optimizer: &mut O,
    criterion: &L,
    data: &D,
    device: DevicePlacement,
    epoch: usize,
) -> f64
where
    M: Model,
    M::Input: ToDevice,
    O: Optimizer<M>,
    L: LossFunction<M::Output, D::Target>,
    D: DataSource<Input = M::Input>,
    D::Target: ToDevice,
{
    model.train_mode();
    println!("Training");

    let mut loss_sum = 0.0;
    let mut window_sum = 0.0;

    for (batch_i, mut batch) in data.batches().enumerate() {
        batch.place(device);

        optimizer.zero_grad(model);
        let output = model.forward(&batch.input);
        let loss = criterion.loss(&output, &batch.target);
        let grad = criterion.gradient(&output, &batch.target);
        model.backward(&grad);
        optimizer.step(model);

        window_sum += loss;
        loss_sum += loss * batch.len as f64;

        if batch_i % PROGRESS_WINDOW == PROGRESS_WINDOW - 1 {
            println!(
                "Epoch {}, Batch {} loss: {:.16}",
                epoch,
                batch_i + 1,
                window_sum / PROGRESS_WINDOW as f64
            );
            window_sum = 0.0;
        }
    }

    loss_sum
}
