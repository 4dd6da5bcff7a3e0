use anyhow::{Context, Result};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

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

    /// Uniform in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

const HEADERS: [&str; 10] = [
    "Name",
    "City",
    "Country",
    "From Date",
    "Until Date",
    "Bedroom",
    "Bathrooms",
    "Max People",
    "Sqr Meters",
    "Stars",
];

const GUESTS: [&str; 8] = [
    "Anna", "Bruno", "Chloe", "Dmitri", "Elena", "Farid", "Greta", "Hugo",
];

const PLACES: [(&str, &str); 6] = [
    ("Lyon", "France"),
    ("Bordeaux", "France"),
    ("Valencia", "Spain"),
    ("Porto", "Portugal"),
    ("Bologna", "Italy"),
    ("Utrecht", "Netherlands"),
];

const ROWS: u32 = 40;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for row in 1..=ROWS {
        let guest = rng.pick(&GUESTS);
        let (city, country) = rng.pick(&PLACES);
        let month = 1 + rng.below(12) as u8;
        let day = 1 + rng.below(18) as u8;
        let nights = 2 + rng.below(8) as u8;

        sheet.write_string(row, 0, *guest)?;
        sheet.write_string(row, 1, *city)?;
        // Row 7 has no country and row 13 an unreadable date, so the
        // viewer's cleaning has something to report.
        if row != 7 {
            sheet.write_string(row, 2, *country)?;
        }
        let from = ExcelDateTime::from_ymd(2025, month, day)?;
        if row == 13 {
            sheet.write_string(row, 3, "early spring")?;
        } else {
            sheet.write_datetime_with_format(row, 3, &from, &date_format)?;
        }
        let until = ExcelDateTime::from_ymd(2025, month, day + nights)?;
        sheet.write_datetime_with_format(row, 4, &until, &date_format)?;

        let bedrooms = 1 + rng.below(4);
        sheet.write_number(row, 5, bedrooms as f64)?;
        sheet.write_number(row, 6, (1 + rng.below(bedrooms)) as f64)?;
        sheet.write_number(row, 7, (bedrooms * 2) as f64)?;
        sheet.write_number(row, 8, (35 + bedrooms * 25 + rng.below(30)) as f64)?;
        sheet.write_number(row, 9, 3.0 + rng.below(5) as f64 * 0.5)?;
    }

    let output_path = "sample_requests.xlsx";
    workbook
        .save(output_path)
        .with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {ROWS} requests to {output_path}");
    Ok(())
}
