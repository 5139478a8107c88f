use criterion::{Criterion, black_box, criterion_group, criterion_main};

use linear_classifier::{LinearClassifier, Matrix};

const NUM_SAMPLES: usize = 2_000;
const NUM_FEATURES: usize = 8;
const NUM_CLASSES: usize = 4;

fn dataset() -> (Matrix, Vec<usize>) {
    // Deterministic, class-dependent features without pulling in an RNG.
    let mut data = Vec::with_capacity(NUM_SAMPLES * NUM_FEATURES);
    let mut labels = Vec::with_capacity(NUM_SAMPLES);
    for i in 0..NUM_SAMPLES {
        let class = i % NUM_CLASSES;
        for f in 0..NUM_FEATURES {
            let jitter = ((i * 31 + f * 17) % 97) as f64 / 97.0;
            data.push((class * (f + 1)) as f64 * 10.0 + jitter);
        }
        labels.push(class);
    }
    (
        Matrix::from_flat(data, NUM_SAMPLES, NUM_FEATURES).unwrap(),
        labels,
    )
}

fn train_bench(c: &mut Criterion) {
    let (x, y) = dataset();

    c.bench_function("train_2000x8_4_classes_50_iters", |b| {
        b.iter(|| {
            let mut classifier = LinearClassifier::new(NUM_CLASSES, NUM_FEATURES).unwrap();
            let history = classifier
                .train(black_box(&x), black_box(&y), 0.02, 50)
                .unwrap();
            black_box(history);
        })
    });
}

fn predict_bench(c: &mut Criterion) {
    let (x, y) = dataset();
    let mut classifier = LinearClassifier::new(NUM_CLASSES, NUM_FEATURES).unwrap();
    classifier.train(&x, &y, 0.02, 50).unwrap();

    c.bench_function("predict_2000x8_4_classes", |b| {
        b.iter(|| {
            let predicted = classifier.predict(black_box(&x)).unwrap();
            black_box(predicted);
        })
    });
}

criterion_group!(benches, train_bench, predict_bench);
criterion_main!(benches);
