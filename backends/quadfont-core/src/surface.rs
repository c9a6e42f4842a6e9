// this_file: backends/quadfont-core/src/surface.rs

//! Pixel buffer helpers shared by the core and the backends.

/// Copy a tightly packed bitmap into a larger buffer with a zero border of
/// `padding` pixels on every side.
pub fn pad_pixels(data: &[u8], width: u32, height: u32, channels: usize, padding: u32) -> Vec<u8> {
    let padded_width = (width + 2 * padding) as usize;
    let padded_height = (height + 2 * padding) as usize;
    let mut out = vec![0u8; padded_width * padded_height * channels];
    let row_len = width as usize * channels;
    if row_len == 0 {
        return out;
    }

    for (row, src) in data.chunks_exact(row_len).take(height as usize).enumerate() {
        let start = ((row + padding as usize) * padded_width + padding as usize) * channels;
        out[start..start + row_len].copy_from_slice(src);
    }
    out
}

/// Multiply color channels of straight RGBA pixels by their alpha.
pub fn premultiply(data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(4) {
        let alpha = chunk[3] as u16;
        if alpha == 255 {
            continue;
        }
        for channel in &mut chunk[..3] {
            *channel = ((*channel as u16 * alpha + 127) / 255) as u8;
        }
    }
}

/// Divide color channels of premultiplied RGBA pixels by their alpha.
pub fn unpremultiply(data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(4) {
        let alpha = chunk[3];
        if alpha == 0 || alpha == 255 {
            continue;
        }
        let alpha_f = alpha as f32 / 255.0;
        for channel in &mut chunk[..3] {
            let unpremultiplied = ((*channel as f32) / alpha_f).clamp(0.0, 255.0);
            *channel = unpremultiplied.round() as u8;
        }
    }
}

/// Snap coverage to fully on or off.
pub fn threshold(data: &mut [u8], cutoff: u8) {
    for value in data.iter_mut() {
        *value = if *value >= cutoff { 255 } else { 0 };
    }
}

/// Separable box blur of a single channel bitmap, in place.
pub fn box_blur(data: &mut [u8], width: u32, height: u32, radius: u32) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let (w, h, r) = (width as usize, height as usize, radius as i64);
    let mut scratch = vec![0u8; data.len()];

    let blur_line = |get: &dyn Fn(usize) -> u8, len: usize, out: &mut dyn FnMut(usize, u8)| {
        let window = (2 * r + 1) as u32;
        for i in 0..len {
            let mut sum = 0u32;
            for offset in -r..=r {
                let j = i as i64 + offset;
                if j >= 0 && (j as usize) < len {
                    sum += get(j as usize) as u32;
                }
            }
            out(i, (sum / window) as u8);
        }
    };

    for y in 0..h {
        let row = &data[y * w..(y + 1) * w];
        blur_line(&|x| row[x], w, &mut |x, v| scratch[y * w + x] = v);
    }
    for x in 0..w {
        let source = &scratch;
        blur_line(&|y| source[y * w + x], h, &mut |y, v| data[y * w + x] = v);
    }
}
