//! Quantizer benchmark: palette matching with and without a warm cache.
//!
//! Target: < 2ms to quantize a 256x256 region against a 64-entry palette

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixelframe::{ColorTransformer, PaletteTransformer, Pixmap, Rect, Rgba};

/// A 64-entry palette spread across the color cube.
fn palette() -> PaletteTransformer {
    let colors: Vec<Rgba> = (0u8..64)
        .map(|i| {
            let v = i * 4;
            Rgba::opaque(v, 255 - v, v.wrapping_mul(3))
        })
        .collect();
    PaletteTransformer::new(colors).unwrap()
}

/// A gradient pixmap with enough distinct colors to defeat the cache.
fn gradient(width: u32, height: u32) -> Pixmap {
    let mut pixmap = Pixmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            pixmap.set(x, y, Rgba::opaque((x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8));
        }
    }
    pixmap
}

fn match_cold_cache(c: &mut Criterion) {
    c.bench_function("match_4096_colors_cold", |b| {
        b.iter(|| {
            let mut transformer = palette();
            for i in 0u32..4096 {
                let color = Rgba::opaque((i % 256) as u8, (i / 16 % 256) as u8, 0);
                black_box(transformer.match_index(black_box(color)));
            }
        })
    });
}

fn match_warm_cache(c: &mut Criterion) {
    let mut transformer = palette();
    // Prime the cache with the full working set.
    for i in 0u32..4096 {
        let color = Rgba::opaque((i % 256) as u8, (i / 16 % 256) as u8, 0);
        transformer.match_index(color);
    }

    c.bench_function("match_4096_colors_warm", |b| {
        b.iter(|| {
            for i in 0u32..4096 {
                let color = Rgba::opaque((i % 256) as u8, (i / 16 % 256) as u8, 0);
                black_box(transformer.match_index(black_box(color)));
            }
        })
    });
}

fn convert_region_256(c: &mut Criterion) {
    let source = gradient(256, 256);

    c.bench_function("convert_region_256x256", |b| {
        b.iter(|| {
            let mut transformer = palette();
            let mut pixmap = source.clone();
            transformer.convert_region(&mut pixmap, Rect::new(0, 0, 256, 256));
            pixmap
        })
    });
}

criterion_group!(benches, match_cold_cache, match_warm_cache, convert_region_256);
criterion_main!(benches);
