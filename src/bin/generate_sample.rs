//! Writes `sample_data.csv`, a deterministic staff directory for trying out
//! search, sort and copy on a large table.
//!
//! Usage: `generate_sample [ROWS]` (default 20000).

const FIRST_NAMES: [&str; 12] = [
    "Alice", "Bob", "Carol", "Dmitri", "Eun-ji", "Farid", "Grace", "Hiro", "Ingrid", "José",
    "Kwame", "Lena",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Jones", "García", "Nakamura", "O'Brien", "Kowalski", "Okafor", "Müller", "Chen",
    "Silva",
];
const CITIES: [&str; 8] = [
    "Berlin", "Paris", "New York", "São Paulo", "Tokyo", "Lagos", "Melbourne", "Toronto",
];
const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Design",
    "Sales",
    "Support",
    "Finance",
    "Research & Development",
];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// Format cents as `$12,345.67`.
fn currency(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}.{:02}", cents % 100)
}

fn main() {
    let rows: usize = std::env::args()
        .nth(1)
        .map(|a| a.parse().expect("ROWS must be a positive integer"))
        .unwrap_or(20_000);

    let mut rng = SimpleRng::new(42);
    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record(["id", "name", "city", "department", "salary", "joined"])
        .expect("Failed to write header");

    for id in 1..=rows {
        let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
        let salary = currency(3_000_000 + rng.below(15_000_000) as u64);
        let joined = format!(
            "{}-{:02}-{:02}",
            2005 + rng.below(20),
            1 + rng.below(12),
            1 + rng.below(28)
        );
        writer
            .write_record([
                id.to_string().as_str(),
                name.as_str(),
                rng.pick(&CITIES),
                rng.pick(&DEPARTMENTS),
                salary.as_str(),
                joined.as_str(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} rows to {output_path}");
}
