//! End-to-end checks of the nearest-neighbour sweep harness.

use bandsweep_dtw::{BandFraction, ClassLabel, DtwEngine, Sample, Series, Variant};
use bandsweep_knn::{KnnError, NearestNeighbor, Split, SweepConfig, SweepData};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn flat(label: i64, values: &[f64]) -> Series {
    Series::univariate(ClassLabel::new(label), values).expect("valid test series")
}

/// Noisy copies of one prototype shape per class, with jittered lengths.
fn noisy_class_set(rng: &mut ChaCha8Rng, per_class: usize, dims: usize) -> Vec<Series> {
    let prototypes: [fn(f64) -> f64; 3] = [
        |t: f64| t.sin(),
        |t: f64| (2.0 * t).cos(),
        |t: f64| t * 0.3 - 1.0,
    ];
    let mut out = Vec::new();
    for _ in 0..per_class {
        for (class, shape) in prototypes.iter().enumerate() {
            let len = rng.gen_range(18..26);
            let samples = (0..len)
                .map(|i| {
                    let t = i as f64 * 6.0 / len as f64;
                    let mut noise = || rng.gen_range(-0.15_f64..0.15);
                    let x = shape(t) + noise();
                    if dims == 1 {
                        Sample::scalar(x)
                    } else {
                        Sample::new(x, shape(t + 0.5) + noise(), shape(t + 1.0) + noise())
                    }
                })
                .collect();
            out.push(Series::new(ClassLabel::new(class as i64 + 1), samples).unwrap());
        }
    }
    out
}

fn synthetic_data(seed: u64) -> SweepData {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    SweepData {
        univariate: Split::new(
            noisy_class_set(&mut rng, 4, 1),
            noisy_class_set(&mut rng, 3, 1),
        ),
        multivariate: Split::new(
            noisy_class_set(&mut rng, 4, 3),
            noisy_class_set(&mut rng, 3, 3),
        ),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn nearer_training_series_wins_with_full_accuracy() {
    let train = vec![flat(1, &[0.0, 1.0, 2.0, 1.0]), flat(2, &[4.0, 3.0, 4.0, 3.0])];
    let test = vec![flat(1, &[0.0, 0.9, 2.2, 1.0])];
    let data = SweepData {
        univariate: Split::new(train.clone(), test.clone()),
        multivariate: Split::default(),
    };

    let knn = NearestNeighbor::new(Variant::Dtw, BandFraction::UNCONSTRAINED);
    let mut engine = DtwEngine::new();
    let prediction = knn.classify(&mut engine, &train, &test[0]).unwrap();
    assert_eq!(prediction.label, ClassLabel::new(1));

    let report = SweepConfig::new()
        .with_variants(vec![Variant::Dtw])
        .with_bands(vec![BandFraction::UNCONSTRAINED])
        .run(&data);
    let eval = report.records[0].outcome.as_ref().unwrap();
    assert_eq!(eval.accuracy_percent(), 100.0);
    assert_eq!(eval.predictions, vec![ClassLabel::new(1)]);
}

#[test]
fn duplicate_training_series_resolve_to_first_label() {
    let shape = [0.0, 2.0, 0.0];
    let train = vec![flat(8, &shape), flat(3, &shape)];
    let test = vec![flat(3, &shape)];
    let mut engine = DtwEngine::new();
    let eval = NearestNeighbor::new(Variant::Dtw, BandFraction::UNCONSTRAINED)
        .evaluate(&mut engine, &train, &test)
        .unwrap();
    assert_eq!(eval.predictions, vec![ClassLabel::new(8)]);
    assert_eq!(eval.correct, 0);
}

#[test]
fn missing_multivariate_training_data_is_reported() {
    let data = SweepData {
        univariate: Split::new(vec![flat(1, &[1.0])], vec![flat(1, &[1.0])]),
        multivariate: Split::new(Vec::new(), vec![flat(1, &[1.0])]),
    };
    let report = SweepConfig::new()
        .with_bands(vec![BandFraction::new(0.1).unwrap()])
        .run(&data);
    assert!(report.records[0].outcome.is_ok());
    assert_eq!(
        report.records[1].outcome,
        Err(KnnError::InsufficientTrainingData)
    );
}

// ---------------------------------------------------------------------------
// Determinism and accuracy
// ---------------------------------------------------------------------------

#[test]
fn repeated_sweeps_are_bit_identical() {
    let data = synthetic_data(11);
    let first = SweepConfig::new().run(&data);
    let second = SweepConfig::new().run(&data);

    assert_eq!(first.records.len(), second.records.len());
    for (a, b) in first.records.iter().zip(&second.records) {
        let (ea, eb) = (a.outcome.as_ref().unwrap(), b.outcome.as_ref().unwrap());
        assert_eq!(ea.accuracy.to_bits(), eb.accuracy.to_bits());
        assert_eq!(ea.predictions, eb.predictions);
    }
}

#[test]
fn separable_classes_are_recognised_without_a_band() {
    let data = synthetic_data(23);
    let report = SweepConfig::new()
        .with_bands(vec![BandFraction::UNCONSTRAINED])
        .run(&data);
    for (record, eval) in report.completed() {
        assert!(
            eval.accuracy >= 0.8,
            "{} reached only {:.1}%",
            record.variant,
            eval.accuracy_percent()
        );
    }
    assert_eq!(report.failures().count(), 0);
}

#[test]
fn widening_removes_unreachable_distances() {
    // Every test series matches a training series of a different length, so a
    // zero band can only reach the wrong one.
    let data = SweepData {
        univariate: Split::new(
            vec![flat(1, &[0.0, 0.0, 0.0]), flat(2, &[5.0, 5.0, 5.0, 5.0])],
            vec![flat(2, &[5.0, 5.0, 5.0]), flat(1, &[0.0, 0.0, 0.0, 0.0])],
        ),
        multivariate: Split::default(),
    };
    let config = SweepConfig::new()
        .with_variants(vec![Variant::Dtw])
        .with_bands(vec![BandFraction::new(0.0).unwrap()]);

    let strict = config.run(&data);
    let eval = strict.records[0].outcome.as_ref().unwrap();
    assert_eq!(eval.predictions, vec![ClassLabel::new(1), ClassLabel::new(2)]);
    assert_eq!(eval.correct, 0);

    let widened = config.with_length_difference_widening(true).run(&data);
    let eval = widened.records[0].outcome.as_ref().unwrap();
    assert_eq!(eval.predictions, vec![ClassLabel::new(2), ClassLabel::new(1)]);
    assert_eq!(eval.accuracy, 1.0);

    let data = synthetic_data(5);
    let split = data.split_for(Variant::DtwD);
    let mut engine = DtwEngine::new().with_length_difference_widening(true);
    for query in &split.test {
        let p = NearestNeighbor::new(Variant::DtwD, BandFraction::new(0.0).unwrap())
            .classify(&mut engine, &split.train, query)
            .unwrap();
        assert!(p.distance.is_finite());
    }
}
