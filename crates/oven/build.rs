use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// IEC 61966-2-1 sRGB decoding curve
fn decode_srgb(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 sRGB encoding curve
fn encode_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Emit `pub static NAME: [f32; len]` with `curve` sampled at `i / (len - 1)`.
fn write_table(
    out: &mut impl Write,
    doc: &str,
    name: &str,
    len: usize,
    curve: fn(f64) -> f64,
) -> io::Result<()> {
    writeln!(out, "/// {doc}")?;
    writeln!(out, "pub static {name}: [f32; {len}] = [")?;
    let last = (len - 1) as f64;
    for row in (0..len).collect::<Vec<_>>().chunks(8) {
        let values: Vec<String> = row
            .iter()
            .map(|&i| format!("{:.9}", curve(i as f64 / last) as f32))
            .collect();
        writeln!(out, "    {},", values.join(", "))?;
    }
    writeln!(out, "];")?;
    writeln!(out)
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let mut file = File::create(Path::new(&out_dir).join("gamma_lut.rs"))?;

    write_table(
        &mut file,
        "Linear value for every 8-bit sRGB channel value",
        "SRGB8_TO_LINEAR",
        256,
        decode_srgb,
    )?;
    write_table(
        &mut file,
        "sRGB value for linear input quantized to 12 bits (index = linear * 4095)",
        "LINEAR_TO_SRGB",
        4096,
        encode_srgb,
    )?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
