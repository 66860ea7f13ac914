use tategaki::infrastructure::imaging::{PageLoadError, load_page};

use crate::helpers::png_bytes;

#[test]
fn given_png_upload_when_loading_then_dimensions_preserved() {
    let page = load_page("scan-01.png", &png_bytes(64, 48)).unwrap();

    assert_eq!(page.file_id(), "scan-01.png");
    assert_eq!((page.width(), page.height()), (64, 48));
    assert_eq!(page.index(), None);
}

#[test]
fn given_empty_upload_when_loading_then_empty_error() {
    assert!(matches!(
        load_page("blank.jpg", &[]),
        Err(PageLoadError::Empty { .. })
    ));
}

#[test]
fn given_garbage_bytes_when_loading_then_decode_error_names_file() {
    let err = load_page("notes.txt", b"definitely not an image").unwrap_err();

    assert!(matches!(err, PageLoadError::Decode { .. }));
    assert!(err.to_string().contains("notes.txt"));
}
