use vspace_noise::{classify, fractal_noise, gradient, noise, BandTable, ColorMode, OctaveParameters};

fn main() {
    let params = OctaveParameters::default();
    let bands = BandTable::default();
    let (x, y) = (0.5, 0.5);

    let raw = noise(x, y);
    let value = fractal_noise(x, y, &params);

    println!("Gradient at (0, 0): {:?}", gradient(0, 0));
    println!("Sample Point: ({}, {})", x, y);
    println!("Lattice Noise (raw): {}", raw);
    println!("Fractal Noise ({} octaves): {}", params.count(), value);
    println!("Grayscale: {:?}", classify(value, ColorMode::Grayscale, &bands));
    println!("Banded:    {:?}", classify(value, ColorMode::Banded, &bands));
}
