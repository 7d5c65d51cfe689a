use criterion::{criterion_group, criterion_main};

mod checksum_benchmark {
    use ageverify::{checksum, CheckDigitValidator, Validator};
    use criterion::{black_box, Criterion};

    pub fn criterion_benchmark(c: &mut Criterion) {
        let fields = vec![
            // https://de.wikipedia.org/wiki/Personalausweis_(Deutschland)
            "T220001293",
            "LZ6311T475",
            // dates
            "9001011",
            "3101159",
            "1502246",
        ];
        c.bench_function("check-digit-validator", |b| {
            b.iter(|| {
                for field in fields.iter() {
                    CheckDigitValidator.is_valid_match(black_box(field));
                }
            })
        });

        let composite = "LZ6311T47590010113101159";
        c.bench_function("composite-checksum", |b| {
            b.iter(|| checksum(black_box(composite)))
        });
    }
}

mod verifier_benchmark {
    use ageverify::{generate_with, FixedClock, GeneratorConfig, Verifier, VerifierConfig};
    use chrono::NaiveDate;
    use criterion::{black_box, Criterion};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub fn criterion_benchmark(c: &mut Criterion) {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let clock = FixedClock::new(now);
        let verifier = Verifier::with_clock(VerifierConfig::default(), clock);
        let mut rng = StdRng::seed_from_u64(0);
        let documents: Vec<_> = (0..100)
            .map(|_| generate_with(&GeneratorConfig::default(), &clock, &mut rng).unwrap())
            .collect();
        let composites: Vec<_> = documents
            .iter()
            .map(|document| document.composite_check.to_string())
            .collect();

        c.bench_function("verify", |b| {
            b.iter(|| {
                for (document, composite) in documents.iter().zip(composites.iter()) {
                    let _ = black_box(verifier.verify(
                        &document.id,
                        &document.birth_date,
                        &document.expiry_date,
                        composite,
                    ));
                }
            })
        });

        c.bench_function("generate", |b| {
            b.iter(|| generate_with(&GeneratorConfig::default(), &clock, &mut rng))
        });
    }
}

criterion_group!(
    benches,
    checksum_benchmark::criterion_benchmark,
    verifier_benchmark::criterion_benchmark
);
criterion_main!(benches);
