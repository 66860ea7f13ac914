use std::io::Cursor;

use image::ImageFormat;

use crate::domain::{
    ExtractionRequest, GridShape, ILLEGIBLE_PLACEHOLDER, Segment, SourcePage, file_close_tag,
    file_open_tag, segment_tag,
};

use super::page_segmenter::segment_page;

pub const TRANSCRIPTION_RULES: &str = "You are transcribing photographed magazine pages for a reading-report workflow.\n\
Follow these strict rules:\n\
1. Transcribe the printed text verbatim, in its original language and script. Do not summarize, paraphrase, translate or add anything that is not printed.\n\
2. If a character cannot be read, write the placeholder {illegible} in its place instead of guessing.\n\
3. Output only the transcription and the tags described below, with no commentary.";

pub const SEGMENTED_ORDER_CONTRACT: &str = "The images are regions cut from vertically written, multi-column pages and are already in reading order \
(right column first, each column from top to bottom). Reproduce them in exactly the order received. \
Before the text of each region, repeat its [[segment:...]] tag exactly as supplied. \
Repeat every [[file:...]] and [[/file:...]] tag where it appears. A region may be blank; keep its tag and leave it empty.";

pub const WHOLE_PAGE_ORDER_CONTRACT: &str = "Each image is a whole page. Read vertical text right to left, top to bottom. \
Before the text of each page, repeat its [[segment:...]] tag exactly as supplied, and repeat every [[file:...]] and [[/file:...]] tag where it appears.";

pub fn instruction_block(grid: GridShape) -> String {
    let rules = TRANSCRIPTION_RULES.replace("{illegible}", ILLEGIBLE_PLACEHOLDER);
    let contract = if grid.is_single() {
        WHOLE_PAGE_ORDER_CONTRACT
    } else {
        SEGMENTED_ORDER_CONTRACT
    };
    format!("{rules}\n\n{contract}")
}

/// Builds the ordered request for one group: per page a file tag, then every segment's
/// position tag followed by its image, then the closing file tag.
pub fn build_request(pages: &[SourcePage], grid: GridShape) -> ExtractionRequest {
    let mut request = ExtractionRequest::new(instruction_block(grid));

    for page in pages {
        request.push_tag(file_open_tag(page.file_id()));

        for segment in segment_page(page, grid) {
            push_segment(&mut request, &segment);
        }

        request.push_tag(file_close_tag(page.file_id()));
    }

    request
}

fn push_segment(request: &mut ExtractionRequest, segment: &Segment) {
    let label = segment.label().to_string();
    request.push_tag(segment_tag(&label));

    if segment.is_empty() {
        tracing::debug!(
            file = segment.source_file(),
            label = %label,
            "Empty region, sending tag only"
        );
        return;
    }

    match encode_png(segment) {
        Ok(png) => {
            request.push_image(segment.source_file(), &label, png);
            request.expect(segment.source_file(), &label);
        }
        Err(e) => {
            tracing::warn!(
                file = segment.source_file(),
                label = %label,
                error = %e,
                "Segment encoding failed, sending placeholder"
            );
            request.push_unavailable(segment.source_file(), &label, &e.to_string());
        }
    }
}

fn encode_png(segment: &Segment) -> Result<Vec<u8>, image::ImageError> {
    let mut png_bytes: Vec<u8> = Vec::new();
    segment
        .pixels()
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;
    Ok(png_bytes)
}
