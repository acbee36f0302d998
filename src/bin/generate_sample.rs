//! Writes demo tables for instaplot: `generate_sample [OUT_DIR]`.
//!
//! Each file has an x column and three y-series built from gaussian peaks
//! plus noise.  The files share a column count but not an x grid, so they
//! exercise both plain plotting and `--file-factors` resampling.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn series(x: f64, peaks: &[(f64, f64, f64)], noise: f64, rng: &mut StdRng) -> f64 {
    let signal: f64 = peaks
        .iter()
        .map(|&(mu, sigma, amp)| gaussian(x, mu, sigma, amp))
        .sum();
    signal + gauss(rng, 0.0, noise)
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);

    // (name, samples, x step, per-column peaks)
    let files: [(&str, usize, f64, [[(f64, f64, f64); 2]; 3]); 2] = [
        (
            "sample_a.txt",
            200,
            0.05,
            [
                [(2.0, 0.4, 1.0), (6.0, 0.8, 0.5)],
                [(4.0, 0.5, 0.8), (8.0, 0.3, 0.4)],
                [(1.0, 0.2, 0.3), (5.0, 1.0, 0.9)],
            ],
        ),
        (
            "sample_b.txt",
            150,
            0.067,
            [
                [(2.2, 0.4, 0.9), (6.1, 0.7, 0.6)],
                [(3.8, 0.5, 0.7), (8.2, 0.3, 0.5)],
                [(1.1, 0.2, 0.4), (5.2, 1.0, 0.8)],
            ],
        ),
    ];

    for (name, samples, step, peaks) in &files {
        let path = out_dir.join(name);
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "# x y1 y2 y3")?;
        for i in 0..*samples {
            let x = i as f64 * step;
            write!(writer, "{x:.4}")?;
            for column_peaks in peaks {
                write!(writer, " {:.6}", series(x, column_peaks, 0.01, &mut rng))?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        println!("Wrote {samples} rows to {}", path.display());
    }
    Ok(())
}
