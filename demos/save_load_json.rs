#[cfg(not(feature = "serde"))]
fn main() {
    println!("enable the `serde` feature: cargo run --example save_load_json --features serde");
}

#[cfg(feature = "serde")]
fn main() -> linear_classifier::Result<()> {
    use linear_classifier::{Dataset, LinearClassifier, TrainConfig};

    env_logger::init();

    let train = Dataset::from_rows(
        &[[2.0, 4.0], [100.0, 5.0], [6.0, 88.0], [90.0, 111.0]],
        &[0, 1, 2, 3],
    )?;

    let mut classifier = LinearClassifier::new(4, train.num_features())?;
    classifier.fit(
        &train,
        TrainConfig {
            rate: 0.1,
            num_iter: 100,
        },
    )?;

    let path = "target/tmp_classifier.json";
    classifier.save(path)?;

    let loaded = LinearClassifier::load(path)?;
    assert_eq!(loaded, classifier);
    println!("saved and loaded classifier: {path}");
    Ok(())
}
