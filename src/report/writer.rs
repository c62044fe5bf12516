use std::fs;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::data::DatasetDescriptor;
use crate::eval::TestReport;
use crate::train::EpochStats;

use super::loss_plot::render_loss_curve;
use super::prediction_grid::{render_prediction_grid, GridSample};

/// Writes a complete run report into `dir`:
///
/// - `history.json`    — per-epoch stats, machine readable
/// - `train_loss.png`  — training loss curve (truncated at its minimum)
/// - `valid_loss.png`  — validation loss curve (same truncation)
/// - `predictions.png` — sample test images bordered by correctness
/// - `report.html`     — index page tying it all together
///
/// The `viewer` binary serves this directory over HTTP.
pub fn write_report<P: AsRef<Path>>(
    dir: P,
    history: &[EpochStats],
    test_report: &TestReport,
    samples: &[GridSample],
    descriptor: &DatasetDescriptor,
) -> io::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let file = fs::File::create(dir.join("history.json"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), history)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let train_losses: Vec<f64> = history.iter().map(|s| s.train_loss).collect();
    let valid_losses: Vec<f64> = history.iter().map(|s| s.valid_loss).collect();
    render_loss_curve(&train_losses, dir.join("train_loss.png"))?;
    render_loss_curve(&valid_losses, dir.join("valid_loss.png"))?;
    render_prediction_grid(samples, dir.join("predictions.png"))?;

    fs::write(
        dir.join("report.html"),
        build_html(history, test_report, samples, descriptor),
    )
}

fn build_html(
    history: &[EpochStats],
    test_report: &TestReport,
    samples: &[GridSample],
    descriptor: &DatasetDescriptor,
) -> String {
    let mut class_rows = String::new();
    for class in &test_report.classes {
        let accuracy = match class.accuracy() {
            Some(acc) => format!("{:.1}% ({}/{})", acc * 100.0, class.correct, class.total),
            None => "N/A (no test examples)".to_string(),
        };
        class_rows.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td></tr>\n",
            class.name, accuracy
        ));
    }

    let overall = match test_report.overall_accuracy() {
        Some(acc) => format!("{:.1}%", acc * 100.0),
        None => "N/A".to_string(),
    };

    // Captions mirror the grid tile order: predicted (true), green when the
    // prediction matched.
    let mut captions = String::new();
    for sample in samples {
        let color = if sample.predicted == sample.truth {
            "#28a03c"
        } else {
            "#c83232"
        };
        captions.push_str(&format!(
            "    <span style=\"color:{}\">{} ({})</span>\n",
            color,
            descriptor.class_name(sample.predicted),
            descriptor.class_name(sample.truth),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>ferrite-train run report</title></head>
<body style="font-family:sans-serif;max-width:720px;margin:auto">
  <h1>Training run report</h1>
  <p>{epochs} epochs recorded. Test loss: {test_loss:.6}. Overall accuracy: {overall}.</p>
  <h2>Loss curves</h2>
  <p><img src="train_loss.png" alt="training loss"></p>
  <p><img src="valid_loss.png" alt="validation loss"></p>
  <h2>Per-class accuracy</h2>
  <table border="1" cellpadding="4">
    <tr><th>Class</th><th>Accuracy</th></tr>
{class_rows}  </table>
  <h2>Sample predictions — predicted (true)</h2>
  <p><img src="predictions.png" alt="sample predictions"></p>
  <p>
{captions}  </p>
</body>
</html>
"#,
        epochs = history.len(),
        test_loss = test_report.mean_loss,
        overall = overall,
        class_rows = class_rows,
        captions = captions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ClassAccuracy;

    #[test]
    fn report_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let history = vec![EpochStats {
            epoch: 1,
            total_epochs: 1,
            train_loss: 0.5,
            valid_loss: 0.4,
            train_secs: 0.1,
            eval_secs: 0.05,
        }];
        let test_report = TestReport {
            mean_loss: 0.42,
            classes: vec![
                ClassAccuracy {
                    name: "cat".into(),
                    correct: 3,
                    total: 4,
                },
                ClassAccuracy {
                    name: "dog".into(),
                    correct: 0,
                    total: 0,
                },
            ],
        };
        let descriptor = DatasetDescriptor::from_names(&["cat", "dog"]);

        write_report(dir.path(), &history, &test_report, &[], &descriptor).unwrap();

        for name in [
            "history.json",
            "train_loss.png",
            "valid_loss.png",
            "predictions.png",
            "report.html",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }

        let html = std::fs::read_to_string(dir.path().join("report.html")).unwrap();
        assert!(html.contains("N/A (no test examples)"));
    }
}
