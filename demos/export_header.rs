use linear_classifier::{Dataset, LinearClassifier, QuadraticClassifier, TrainConfig};

fn main() -> linear_classifier::Result<()> {
    env_logger::init();

    let rows = [
        [0.2, 0.1],
        [2.4, 0.3],
        [-0.1, 0.3],
        [-2.2, 1.1],
        [0.1, -0.2],
        [0.4, -2.5],
    ];
    let data = Dataset::from_rows(&rows, &[0, 1, 0, 1, 0, 1])?;
    let cfg = TrainConfig {
        rate: 0.1,
        num_iter: 200,
    };

    let mut linear = LinearClassifier::new(2, 2)?;
    linear.fit(&data, cfg)?;
    let path = "target/classifier.h";
    linear.write_c_header(path)?;
    println!(
        "linear accuracy {:.2}, header written to {path}",
        linear.evaluate_dataset(&data)?.accuracy
    );

    let mut quadratic = QuadraticClassifier::new(2, 2)?;
    quadratic.fit(&data, cfg)?;
    println!(
        "quadratic accuracy {:.2} over {} expanded features",
        quadratic.evaluate_dataset(&data)?.accuracy,
        quadratic.expanded_features()
    );
    Ok(())
}
