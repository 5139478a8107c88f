//! Train a classifier on a small, well-separated dataset, report how it does on a
//! held-out batch, and print the header an embedded target would compile.
//!
//! Set `RUST_LOG=debug` (or `trace` for per-iteration costs) to see training logs.

use linear_classifier::{Dataset, LinearClassifier, TrainConfig};

fn main() -> linear_classifier::Result<()> {
    env_logger::init();

    let train = Dataset::from_rows(
        &[[2.0, 4.0], [100.0, 5.0], [6.0, 88.0], [90.0, 111.0]],
        &[0, 1, 2, 3],
    )?;
    let test = Dataset::from_rows(
        &[[0.0, 0.0], [200.0, 230.0], [6.0, 88.0], [150.0, 19.0]],
        &[0, 3, 2, 1],
    )?;

    let mut classifier = LinearClassifier::new(4, train.num_features())?;
    let cfg = TrainConfig {
        rate: 0.1,
        num_iter: 100,
    };
    let history = classifier.fit(&train, cfg)?;

    if let (Some(first), Some(last)) = (history.iter_rows().next(), history.iter_rows().last()) {
        println!("cost after first iteration: {first:?}");
        println!("cost after {} iterations: {last:?}", history.rows());
    }
    println!();
    print!("{}", classifier.evaluate_dataset(&test)?);
    println!();
    print!("{}", classifier.to_c_header()?);
    Ok(())
}
