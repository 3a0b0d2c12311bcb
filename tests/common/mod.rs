#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

/// Builds an RGBA image from rows of `[r, g, b, a]` pixels.
pub fn rgba_image(rows: &[&[[u8; 4]]]) -> RgbaImage {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    RgbaImage::from_fn(width, height, |x, y| Rgba(rows[y as usize][x as usize]))
}

pub fn png_bytes(rows: &[&[[u8; 4]]]) -> Vec<u8> {
    let mut bytes = Vec::new();
    rgba_image(rows)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

pub fn write_png(path: &Path, rows: &[&[[u8; 4]]]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, png_bytes(rows)).expect("write png file");
}

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
