use image::DynamicImage;

use super::grid::ReadingLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A cropped region of a page, tagged with its place in reading order.
#[derive(Debug, Clone)]
pub struct Segment {
    label: ReadingLabel,
    source_file: String,
    rect: Rect,
    pixels: DynamicImage,
}

impl Segment {
    pub fn new(label: ReadingLabel, source_file: String, rect: Rect, pixels: DynamicImage) -> Self {
        Self {
            label,
            source_file,
            rect,
            pixels,
        }
    }

    pub fn label(&self) -> ReadingLabel {
        self.label
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }
}
