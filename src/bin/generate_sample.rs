use std::fmt::Write as _;

use anyhow::{Context, Result};
use freq_labels::AIRBAND_RASTER_HZ;

/// Nominal 8.33 kHz channel centre for a displayed channel name like 118.005.
fn airband_channel(mhz: f64) -> f64 {
    (mhz * 1e6 / AIRBAND_RASTER_HZ).round() * AIRBAND_RASTER_HZ
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "freq_labels.csv".to_string());

    let broadcast = [
        (88_200_000.0, "Radio One"),
        (91_500_000.0, "Classic FM"),
        (94_300_000.0, "City News"),
        (99_900_000.0, "Jazz 99.9"),
        (104_800_000.0, "Rock Station"),
        (107_100_000.0, "Community Radio"),
    ];

    let airband = [
        (118.000, "Tower"),
        (118.005, "Tower (8.33)"),
        (119.100, "Approach"),
        (121.500, "Guard / Emergency"),
        (121.900, "Ground"),
        (126.830, "ATIS"),
    ];

    let mut out = String::from("frequency_hz,name\r\n");
    let mut rows = 0usize;

    for (hz, name) in broadcast {
        writeln!(out, "{hz},{name}\r")?;
        rows += 1;
    }

    // Semicolon rows so a label can carry a comma.
    for (mhz, name) in airband {
        writeln!(out, "{:.3};{name}, {mhz:.3}\r", airband_channel(mhz))?;
        rows += 1;
    }

    writeln!(out, "145500000,2m FM calling\r")?;
    writeln!(out, "433500000;70cm FM calling\r")?;
    rows += 2;

    // Rows a hand-edited table tends to pick up; the loader drops them.
    out.push_str("\r\n,missing frequency\r\nabc,not a number\r\n-5,negative\r\n");

    std::fs::write(&output_path, &out)
        .with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {rows} labels (plus 3 malformed rows) to {output_path}");
    Ok(())
}
