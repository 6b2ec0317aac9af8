//! Writes a deterministic sample dataset in the source CSV schema, covering
//! all four segments, address-prefixed names, and a few missing coordinates.

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

const SHOP_NAMES: [&str; 12] = [
    "Kopi Santai",
    "Ruang Seduh",
    "Titik Temu Coffee",
    "Warung Kopi Lawas",
    "Studio Brew",
    "Kedai Rindang",
    "Kopi Pagi",
    "Sudut Kota Coffee",
    "Rumah Roastery",
    "Teras Kayu",
    "Kopi Lembah",
    "Angkringan Kopi",
];

const STREETS: [&str; 6] = [
    "Jl. Kaliurang",
    "Jl. Malioboro",
    "Jl. Prawirotaman",
    "Jl. Affandi",
    "Jl. Palagan",
    "Jl. Parangtritis",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_shops.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "OrganizationName",
            "OrganizationLatitude",
            "OrganizationLongitude",
            "RateStars",
            "ReviewsTotalCount",
            "Nugas_Score_Normalized",
            "Nongkrong_Score_Normalized",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for (i, name) in SHOP_NAMES.iter().enumerate() {
        for (j, street) in STREETS.iter().enumerate() {
            // Every third combination gets the raw address form seen in the
            // real export.
            let organization_name = if (i + j) % 3 == 0 {
                format!("Alamat: {name} {street}, Yogyakarta")
            } else {
                format!("{name} {street}")
            };

            // Roughly one row in ten has no coordinates.
            let (lat, lon) = if rng.next_f64() < 0.1 {
                (String::new(), String::new())
            } else {
                (
                    format!("{:.5}", -7.7956 + rng.range(-0.05, 0.05)),
                    format!("{:.5}", 110.3695 + rng.range(-0.05, 0.05)),
                )
            };

            let rating = format!("{:.1}", (rng.range(3.8, 5.0) * 10.0).round() / 10.0);
            let reviews = (rng.range(5.0, 1200.0) as u32).to_string();
            let nugas = format!("{:.3}", rng.next_f64());
            let nongkrong = format!("{:.3}", rng.next_f64());

            writer
                .write_record([
                    organization_name.as_str(),
                    lat.as_str(),
                    lon.as_str(),
                    rating.as_str(),
                    reviews.as_str(),
                    nugas.as_str(),
                    nongkrong.as_str(),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output file");
    println!("Wrote {rows} shops to {output_path}");
}
