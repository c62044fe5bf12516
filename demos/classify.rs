/// Synthetic-data classification demo for ferrite-train.
///
/// Dataset:    8×8 grayscale "band" images — class k has a bright horizontal
///             band at rows 2k..2k+2, everything else is noise
/// Model:      linear softmax classifier, 64 → 4
/// Loss:       CrossEntropyLoss (combined with softmax — gradient is
///             predicted - expected)
/// Optimizer:  SGD, lr = 0.5
/// Batch size: 16
///
/// Run with:
///   cargo run --example classify --release
///
/// Writes checkpoints to checkpoints/ and a browsable report to report/.

use rand::Rng;
use serde::Serialize;

use ferrite_train::{
    test_model, train_loop, Batch, ClassPredictions, CrossEntropyLoss, DataSource,
    DatasetDescriptor, FileCheckpointSink, GridSample, InMemoryDataSource, Model, Optimizer,
    RunConfig,
};

const IMAGE_SIDE: usize = 8;
const FEATURES: usize = IMAGE_SIDE * IMAGE_SIDE;
const CLASSES: usize = 4;
const BATCH_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// Model: linear softmax classifier
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LinearSnapshot {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

struct LinearSoftmax {
    /// [class][feature] weight matrix.
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    w_grad: Vec<Vec<f64>>,
    b_grad: Vec<f64>,
    /// Input batch cached by `forward` for the backward pass.
    last_input: Vec<Vec<f64>>,
    training: bool,
}

impl LinearSoftmax {
    fn new(rng: &mut impl Rng) -> LinearSoftmax {
        let weights = (0..CLASSES)
            .map(|_| (0..FEATURES).map(|_| rng.gen_range(-0.05..0.05)).collect())
            .collect();
        LinearSoftmax {
            weights,
            biases: vec![0.0; CLASSES],
            w_grad: vec![vec![0.0; FEATURES]; CLASSES],
            b_grad: vec![0.0; CLASSES],
            last_input: Vec::new(),
            training: false,
        }
    }
}

impl Model for LinearSoftmax {
    type Input = Vec<Vec<f64>>;
    type Output = Vec<Vec<f64>>;
    type Snapshot = LinearSnapshot;

    fn train_mode(&mut self) {
        self.training = true;
    }

    fn eval_mode(&mut self) {
        self.training = false;
    }

    fn forward(&mut self, input: &Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        if self.training {
            self.last_input = input.clone();
        }
        input
            .iter()
            .map(|x| {
                let logits: Vec<f64> = self
                    .weights
                    .iter()
                    .zip(self.biases.iter())
                    .map(|(row, b)| row.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f64>() + b)
                    .collect();
                softmax(&logits)
            })
            .collect()
    }

    /// `output_grad` rows are the combined softmax+CE gradient
    /// (predicted - expected); accumulate mean parameter gradients.
    fn backward(&mut self, output_grad: &Vec<Vec<f64>>) {
        let n = output_grad.len().max(1) as f64;
        for (x, g) in self.last_input.iter().zip(output_grad.iter()) {
            for c in 0..CLASSES {
                self.b_grad[c] += g[c] / n;
                for f in 0..FEATURES {
                    self.w_grad[c][f] += g[c] * x[f] / n;
                }
            }
        }
    }

    fn snapshot(&self) -> LinearSnapshot {
        LinearSnapshot {
            weights: self.weights.clone(),
            biases: self.biases.clone(),
        }
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

// ---------------------------------------------------------------------------
// Optimizer: plain SGD
// ---------------------------------------------------------------------------

struct Sgd {
    learning_rate: f64,
}

impl Optimizer<LinearSoftmax> for Sgd {
    fn zero_grad(&mut self, model: &mut LinearSoftmax) {
        for row in model.w_grad.iter_mut() {
            row.fill(0.0);
        }
        model.b_grad.fill(0.0);
    }

    fn step(&mut self, model: &mut LinearSoftmax) {
        for (w_row, g_row) in model.weights.iter_mut().zip(model.w_grad.iter()) {
            for (w, g) in w_row.iter_mut().zip(g_row.iter()) {
                *w -= self.learning_rate * g;
            }
        }
        for (b, g) in model.biases.iter_mut().zip(model.b_grad.iter()) {
            *b -= self.learning_rate * g;
        }
    }
}

// ---------------------------------------------------------------------------
// Synthetic data
// ---------------------------------------------------------------------------

/// One sample: a noisy 8×8 image with a bright band at rows 2k..2k+2.
fn make_sample(label: usize, rng: &mut impl Rng) -> Vec<f64> {
    let mut pixels: Vec<f64> = (0..FEATURES).map(|_| rng.gen_range(0.0..0.25)).collect();
    for row in label * 2..label * 2 + 2 {
        for col in 0..IMAGE_SIDE {
            pixels[row * IMAGE_SIDE + col] = rng.gen_range(0.75..1.0);
        }
    }
    pixels
}

fn make_source(
    n_samples: usize,
    rng: &mut impl Rng,
) -> InMemoryDataSource<Vec<Vec<f64>>, Vec<Vec<f64>>> {
    let mut batches = Vec::new();
    let mut inputs = Vec::new();
    let mut targets = Vec::new();

    for _ in 0..n_samples {
        let label = rng.gen_range(0..CLASSES);
        let mut one_hot = vec![0.0; CLASSES];
        one_hot[label] = 1.0;
        inputs.push(make_sample(label, rng));
        targets.push(one_hot);

        if inputs.len() == BATCH_SIZE {
            let len = inputs.len();
            batches.push(Batch::new(
                std::mem::take(&mut inputs),
                std::mem::take(&mut targets),
                len,
            ));
        }
    }
    // Trailing short batch, if any — the tester will skip it by design.
    if !inputs.is_empty() {
        let len = inputs.len();
        batches.push(Batch::new(inputs, targets, len));
    }

    InMemoryDataSource::new(batches)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let mut rng = rand::thread_rng();

    let descriptor = DatasetDescriptor::from_names(&["north", "mid-up", "mid-down", "south"]);

    println!("Generating synthetic band dataset...");
    let train_data = make_source(960, &mut rng).shuffled();
    let valid_data = make_source(240, &mut rng);
    let test_data = make_source(200, &mut rng);
    println!(
        "  train: {} samples, valid: {}, test: {}",
        train_data.sample_count(),
        valid_data.sample_count(),
        test_data.sample_count()
    );

    let mut model = LinearSoftmax::new(&mut rng);
    let mut optimizer = Sgd { learning_rate: 0.5 };
    let criterion = CrossEntropyLoss;
    let mut checkpoints =
        FileCheckpointSink::new("checkpoints").expect("Failed to create checkpoint directory");

    let config = RunConfig::new(30, BATCH_SIZE).with_patience(5);

    println!("\nTraining for up to {} epochs (patience {})...\n", config.epochs, config.patience);
    let history = train_loop(
        &mut model,
        &mut optimizer,
        &criterion,
        &train_data,
        &valid_data,
        &mut checkpoints,
        &config,
    )
    .expect("Training run failed");

    // --- Test pass ---
    println!("\nTesting on {} held-out samples...", test_data.sample_count());
    let report = test_model(
        &mut model,
        &criterion,
        &test_data,
        &descriptor,
        config.batch_size,
        config.device,
    );
    report.print_summary();

    // --- Report: first test batch rendered as a prediction grid ---
    let samples: Vec<GridSample> = match test_data.batches().next() {
        Some(batch) => {
            let output = model.forward(&batch.input);
            let predictions = output.predicted_classes();
            batch
                .input
                .iter()
                .zip(batch.target.iter())
                .zip(predictions.iter())
                .take(8)
                .map(|((pixels, one_hot), &predicted)| GridSample {
                    pixels: pixels.clone(),
                    width: IMAGE_SIDE as u32,
                    height: IMAGE_SIDE as u32,
                    channels: 1,
                    predicted,
                    truth: one_hot
                        .iter()
                        .position(|&v| v == 1.0)
                        .unwrap_or(0),
                })
                .collect()
        }
        None => Vec::new(),
    };

    ferrite_train::write_report("report", &history, &report, &samples, &descriptor)
        .expect("Failed to write report");
    println!("\nReport written to report/ — browse it with `cargo run --bin viewer -- report`");
}
