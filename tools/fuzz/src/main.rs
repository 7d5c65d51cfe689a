use afl::fuzz;
use ageverify::{generate_with, FixedClock, GeneratorConfig, Verified, Verifier, VerifierConfig};
use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

/// Input layout: `id,birth_date,expiry_date,composite,seed`
fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (id, bytes) = split_bytes_once(bytes)?;
    let (birth_date, bytes) = split_bytes_once(bytes)?;
    let (expiry_date, bytes) = split_bytes_once(bytes)?;
    let (composite, rand_seed) = split_bytes_once(bytes)?;

    let id = std::str::from_utf8(id).ok()?;
    let birth_date = std::str::from_utf8(birth_date).ok()?;
    let expiry_date = std::str::from_utf8(expiry_date).ok()?;
    let composite = std::str::from_utf8(composite).ok()?;

    let mut rng_seed: u64 = 0;
    for i in 0..8 {
        if rand_seed.len() > i {
            rng_seed <<= 8;
            rng_seed += rand_seed[i] as u64;
        }
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    run_fuzz(id, birth_date, expiry_date, composite, rng);

    Some(())
}

fn run_fuzz(id: &str, birth_date: &str, expiry_date: &str, composite: &str, mut rng: StdRng) {
    // any day between 1950 and 2100
    let epoch = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    let today = epoch + Duration::days(rng.gen_range(0..365 * 150));
    let clock = FixedClock::new(today.and_hms_opt(rng.gen_range(0..24), 0, 0).unwrap());
    let verifier = Verifier::with_clock(VerifierConfig::default(), clock);

    // arbitrary input must never panic
    let result = verifier.verify(id, birth_date, expiry_date, composite);

    #[cfg(feature = "manual_test")]
    {
        println!("Now: {:?}", clock);
        println!("Input: {:?}", (id, birth_date, expiry_date, composite));
        println!("Result: {:?}", result);
    }
    let _ = result;

    let min_age = rng.gen_range(0..=99);
    let max_age = rng.gen_range(min_age..=99);
    let config = GeneratorConfig::new().min_age(min_age).max_age(max_age);
    let document = generate_with(&config, &clock, &mut rng).unwrap();
    assert_eq!(
        verifier.verify(
            &document.id,
            &document.birth_date,
            &document.expiry_date,
            &document.composite_check.to_string(),
        ),
        Ok(Verified { age: document.age }),
        "generated document {document} does not verify"
    );
}
