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

const OUTPUT_PATH: &str = "university_student_data.csv";
const FIRST_YEAR: i32 = 2015;
const LAST_YEAR: i32 = 2024;

/// Department enrollment weights: Engineering, Business, Arts, Science.
/// Floors of weight × enrolled keep the per-row department sum below the
/// enrolled total.
const DEPT_WEIGHTS: [f64; 4] = [0.34, 0.26, 0.17, 0.21];

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(OUTPUT_PATH).expect("Failed to create output file");
    writer
        .write_record([
            "Year",
            "Term",
            "Applications",
            "Admitted",
            "Enrolled",
            "Retention Rate (%)",
            "Student Satisfaction (%)",
            "Engineering Enrolled",
            "Business Enrolled",
            "Arts Enrolled",
            "Science Enrolled",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for (growth, year) in (FIRST_YEAR..=LAST_YEAR).enumerate() {
        let growth = growth as f64;

        for (term, term_factor) in [("Spring", 0.9), ("Fall", 1.1)] {
            let applications = (4200.0 * 1.03f64.powf(growth) * term_factor
                * (1.0 + rng.gauss(0.0, 0.03)))
            .max(1.0) as u64;

            let admission_rate = (0.55 - 0.005 * growth + rng.gauss(0.0, 0.01)).clamp(0.3, 0.9);
            let admitted = (applications as f64 * admission_rate) as u64;

            let yield_rate = (0.72 + 0.004 * growth + rng.gauss(0.0, 0.015)).clamp(0.4, 0.95);
            let enrolled = (admitted as f64 * yield_rate) as u64;

            let retention = (84.0 + 0.6 * growth + rng.gauss(0.0, 0.5)).clamp(0.0, 100.0);
            let satisfaction = (80.0 + 0.7 * growth + rng.gauss(0.0, 0.6)).clamp(0.0, 100.0);

            let departments: Vec<u64> = DEPT_WEIGHTS
                .iter()
                .map(|weight| (enrolled as f64 * weight) as u64)
                .collect();

            writer
                .write_record([
                    year.to_string(),
                    term.to_string(),
                    applications.to_string(),
                    admitted.to_string(),
                    enrolled.to_string(),
                    format!("{retention:.1}"),
                    format!("{satisfaction:.1}"),
                    departments[0].to_string(),
                    departments[1].to_string(),
                    departments[2].to_string(),
                    departments[3].to_string(),
                ])
                .expect("Failed to write record");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} records ({FIRST_YEAR}–{LAST_YEAR}, Spring and Fall) to {OUTPUT_PATH}");
}
