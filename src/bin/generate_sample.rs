//! Writes a synthetic table in the NFHS layout for trying the dashboard:
//! `India/States/UTs, Survey, Area` followed by a handful of indicators.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Generate a synthetic NFHS-style survey table
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output CSV path
    #[arg(default_value = "sample_nfhs.csv")]
    output: PathBuf,

    /// Seed for the generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const REGIONS: [&str; 8] = [
    "India",
    "Assam",
    "Bihar",
    "Goa",
    "Kerala",
    "Maharashtra",
    "Tamil Nadu",
    "Uttar Pradesh",
];
const SURVEYS: [&str; 3] = ["NFHS-3", "NFHS-4", "NFHS-5"];
const AREAS: [&str; 3] = ["Rural", "Total", "Urban"];

/// (name, national baseline, change per round, urban premium, clamp to 0..=100)
const INDICATORS: [(&str, f64, f64, f64, bool); 4] = [
    ("Population below age 15 years (%)", 31.0, -2.5, -4.0, true),
    ("Sex ratio of the total population (females per 1,000 males)", 1000.0, 10.0, -15.0, false),
    ("Households with electricity (%)", 70.0, 12.0, 12.0, true),
    ("Women who are literate (%)", 55.0, 7.0, 14.0, true),
];

fn main() -> Result<()> {
    let args = Args::parse();
    let output_path = args.output.display().to_string();

    let mut rng = SimpleRng::new(args.seed);
    let mut wtr = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec!["India/States/UTs", "Survey", "Area"];
    header.extend(INDICATORS.iter().map(|(name, ..)| *name));
    wtr.write_record(&header).context("writing header")?;

    let mut rows = 0usize;
    for (r, region) in REGIONS.iter().enumerate() {
        let region_shift = rng.gauss(0.0, 6.0);
        for (s, survey) in SURVEYS.iter().enumerate() {
            for area in AREAS {
                let mut record = vec![region.to_string(), survey.to_string(), area.to_string()];
                for &(_, base, per_round, urban, clamp) in &INDICATORS {
                    // Older rounds did not report every state.
                    if s == 0 && r % 3 == 2 {
                        record.push(String::new());
                        continue;
                    }
                    let area_shift = match area {
                        "Urban" => urban / 2.0,
                        "Rural" => -urban / 2.0,
                        _ => 0.0,
                    };
                    let mut v = base + per_round * s as f64 + area_shift + region_shift
                        + rng.gauss(0.0, 1.5);
                    if clamp {
                        v = v.clamp(0.0, 100.0);
                    }
                    record.push(format!("{v:.1}"));
                }
                wtr.write_record(&record)
                    .with_context(|| format!("writing row {rows}"))?;
                rows += 1;
            }
        }
    }
    wtr.flush().context("flushing output")?;

    println!(
        "Wrote {rows} rows ({} indicators each) to {output_path}",
        INDICATORS.len()
    );
    Ok(())
}
