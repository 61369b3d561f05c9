//! Per-pixel color filters. Pixels are `[B, G, R]`.

use crate::pixel::{B, G, PixelBuffer, R};

fn for_each_pixel(buf: &mut PixelBuffer, f: impl Fn(&mut [u8; 3])) {
    buf.pixels_mut().iter_mut().for_each(f);
}

pub(super) fn invert(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        for c in px.iter_mut() {
            *c = 255 - *c;
        }
    });
}

pub(super) fn grayscale(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        let sum = u16::from(px[B]) + u16::from(px[G]) + u16::from(px[R]);
        let avg = (sum / 3) as u8;
        *px = [avg; 3];
    });
}

pub(super) fn black_and_white(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[B] = px[R];
        px[G] = px[R];
    });
}

/// Sepia weights in thousandths, one row per output channel over (R, G, B).
const SEPIA_R: [u32; 3] = [393, 769, 189];
const SEPIA_G: [u32; 3] = [349, 686, 168];
const SEPIA_B: [u32; 3] = [272, 534, 131];

/// Weighted sum rounded half-up, clamped to 255.
///
/// The red and green rows sum past 1.0, so bright inputs exceed 255. The
/// value is clamped here instead of being narrowed with wraparound.
fn sepia_channel(weights: [u32; 3], r: u32, g: u32, b: u32) -> u8 {
    let v = (weights[0] * r + weights[1] * g + weights[2] * b + 500) / 1000;
    v.min(255) as u8
}

pub(super) fn sepia(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        let (r, g, b) = (u32::from(px[R]), u32::from(px[G]), u32::from(px[B]));
        px[R] = sepia_channel(SEPIA_R, r, g, b);
        px[G] = sepia_channel(SEPIA_G, r, g, b);
        px[B] = sepia_channel(SEPIA_B, r, g, b);
    });
}

pub(super) fn red(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[B] = 0;
        px[G] = 0;
    });
}

pub(super) fn green(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| px[R] = 0);
}

// Known anomaly: zeroes the same channels as `red` rather than green and red.
pub(super) fn blue(buf: &mut PixelBuffer) {
    red(buf);
}

pub(super) fn yellow(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[G] = 255;
        px[R] = 255;
    });
}

pub(super) fn tint(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[G] = 165;
        px[R] = 255;
    });
}

pub(super) fn thunder_noir(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[G] = 135;
        px[R] = 135;
    });
}

// Halving truncates, same as narrowing `channel * 0.5`.

pub(super) fn moonlight(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[G] = 0;
        px[B] /= 2;
    });
}

pub(super) fn color_pop(buf: &mut PixelBuffer) {
    moonlight(buf);
}

pub(super) fn sunset(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[B] = 0;
        px[G] /= 2;
    });
}

pub(super) fn dusk(buf: &mut PixelBuffer) {
    for_each_pixel(buf, |px| {
        px[R] = 0;
        px[G] /= 2;
    });
}
