use image::DynamicImage;
use tategaki::application::services::{build_request, instruction_block};
use tategaki::domain::{GridShape, ILLEGIBLE_PLACEHOLDER, RequestItem, SourcePage};

use crate::helpers::page;

fn outline(items: &[RequestItem]) -> Vec<String> {
    items
        .iter()
        .skip(1)
        .map(|item| match item {
            RequestItem::Image { label, .. } => format!("<img {label}>"),
            other => other.as_text().unwrap_or_default().to_string(),
        })
        .collect()
}

#[test]
fn given_any_grid_when_building_instructions_then_mentions_placeholder() {
    let block = instruction_block(GridShape::new(3, 2).unwrap());

    assert!(block.contains(ILLEGIBLE_PLACEHOLDER));
    assert!(block.contains("verbatim"));
    assert!(block.contains("[[segment:...]]"));
}

#[test]
fn given_two_pages_when_building_then_tags_wrap_each_page_in_reading_order() {
    let grid = GridShape::new(2, 1).unwrap();

    let request = build_request(&[page("p1", 40, 20), page("p2", 40, 20)], grid);

    assert!(matches!(request.items()[0], RequestItem::Instruction(_)));
    assert_eq!(
        outline(request.items()),
        vec![
            "[[file:p1]]",
            "[[segment:right]]",
            "<img right>",
            "[[segment:left]]",
            "<img left>",
            "[[/file:p1]]",
            "[[file:p2]]",
            "[[segment:right]]",
            "<img right>",
            "[[segment:left]]",
            "<img left>",
            "[[/file:p2]]",
        ]
    );
    assert_eq!(request.image_count(), 4);
    assert_eq!(request.expected().len(), 4);
    assert_eq!(request.source_files(), vec!["p1", "p2"]);
}

#[test]
fn given_segment_image_when_building_then_payload_is_png() {
    let request = build_request(&[page("p1", 8, 8)], GridShape::SINGLE);

    let png = request
        .items()
        .iter()
        .find_map(|item| match item {
            RequestItem::Image { png, .. } => Some(png.clone()),
            _ => None,
        })
        .unwrap();

    assert_eq!(&png[..4], b"\x89PNG");
}

#[test]
fn given_empty_region_when_building_then_tag_sent_without_image() {
    let grid = GridShape::new(3, 1).unwrap();

    let request = build_request(&[page("narrow", 1, 10)], grid);

    assert_eq!(request.image_count(), 1);
    assert_eq!(request.expected().len(), 1);
    let tags = outline(request.items())
        .into_iter()
        .filter(|t| t.starts_with("[[segment:"))
        .count();
    assert_eq!(tags, 3);
}

#[test]
fn given_page_png_cannot_encode_when_building_then_placeholders_and_next_page_still_sent() {
    let float_page = SourcePage::new("hdr", DynamicImage::new_rgba32f(40, 20));
    let grid = GridShape::new(2, 1).unwrap();

    let request = build_request(&[float_page, page("p2", 40, 20)], grid);

    let outline = outline(request.items());
    assert_eq!(outline[0], "[[file:hdr]]");
    assert_eq!(outline[1], "[[segment:right]]");
    assert!(outline[2].starts_with("[[segment unavailable:"));
    assert_eq!(outline[3], "[[segment:left]]");
    assert!(outline[4].starts_with("[[segment unavailable:"));
    assert_eq!(
        &outline[5..],
        [
            "[[/file:hdr]]",
            "[[file:p2]]",
            "[[segment:right]]",
            "<img right>",
            "[[segment:left]]",
            "<img left>",
            "[[/file:p2]]",
        ]
    );

    let lost: Vec<(&str, &str)> = request
        .unavailable()
        .iter()
        .map(|u| (u.source_file.as_str(), u.label.as_str()))
        .collect();
    assert_eq!(lost, vec![("hdr", "right"), ("hdr", "left")]);
    assert_eq!(request.image_count(), 2);
    assert!(request.expected().iter().all(|e| e.source_file == "p2"));
}
