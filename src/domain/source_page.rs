use image::DynamicImage;

/// A single photographed page. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SourcePage {
    file_id: String,
    index: Option<u32>,
    image: DynamicImage,
}

impl SourcePage {
    pub fn new(file_id: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            file_id: file_id.into(),
            index: None,
            image,
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}
