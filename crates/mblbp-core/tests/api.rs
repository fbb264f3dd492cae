use image::{GrayImage, Luma};
use mblbp_core::{FeatureCatalog, MblbpError, MblbpParams, MblbpRepresentation, Rect};

fn make_gradient_image(w: u32, h: u32) -> GrayImage {
    let mut data = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            data.push(((x * 11 + y * 7) % 200) as u8);
        }
    }
    GrayImage::from_vec(w, h, data).expect("gradient image")
}

#[test]
fn default_catalog_is_stable() {
    let a = MblbpRepresentation::new(MblbpParams::default()).unwrap();
    let b = FeatureCatalog::build(&MblbpParams::default());
    assert_eq!(a.num_features(), 8464);
    assert_eq!(a.catalog().rects(), b.rects());
    assert_eq!(a.window_size(), (25, 25));
}

#[test]
fn horizontal_gradient_sets_east_side_bits() {
    // Brightness grows with x only: NE, E, SE compare >= center, as do N and
    // S which share the center column.
    let (w, h) = (9u32, 9u32);
    let img = GrayImage::from_fn(w, h, |x, _| Luma([(x * 20) as u8]));
    let repr = MblbpRepresentation::new(MblbpParams::new(w, h)).unwrap();
    let ii = repr
        .preprocess(img.as_raw(), w as usize, h as usize)
        .unwrap();

    let idx = repr
        .catalog()
        .iter()
        .position(|f| f.rect() == Rect::new(0, 0, 3, 3))
        .unwrap();
    // NW N NE E SE S SW W -> 0 1 1 1 1 1 0 0
    assert_eq!(repr.evaluate(&ii, &[idx]).unwrap(), vec![0b0111_1100]);
}

#[test]
fn codes_are_invariant_to_uniform_brightness_shift() {
    let (w, h) = (24u32, 24u32);
    let img = make_gradient_image(w, h);
    let mut brighter = img.clone();
    for p in brighter.pixels_mut() {
        p[0] = p[0].saturating_add(3);
    }
    assert!(img.pixels().all(|p| p[0] < 200));

    let repr = MblbpRepresentation::new(MblbpParams::new(w, h)).unwrap();
    let a = repr
        .evaluate_all(&repr.preprocess(img.as_raw(), 24, 24).unwrap())
        .unwrap();
    let b = repr
        .evaluate_all(&repr.preprocess(brighter.as_raw(), 24, 24).unwrap())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn errors_are_typed() {
    let repr = MblbpRepresentation::new(MblbpParams::new(6, 6)).unwrap();
    let n = repr.num_features();
    let ii = repr.preprocess(&[0u8; 36], 6, 6).unwrap();

    assert_eq!(
        repr.evaluate(&ii, &[n]),
        Err(MblbpError::IndexOutOfRange { index: n, len: n })
    );
    assert!(matches!(
        repr.preprocess(&[0u8; 35], 6, 6),
        Err(MblbpError::ImageBuffer { .. })
    ));

    let small = repr.preprocess(&[0u8; 25], 5, 5).unwrap();
    assert!(matches!(
        repr.evaluate(&small, &[0]),
        Err(MblbpError::ShapeMismatch { .. })
    ));
    assert_eq!(
        MblbpError::IndexOutOfRange { index: 7, len: 4 }.to_string(),
        "feature index 7 out of range for catalog of 4 features"
    );
}

#[test]
fn preprocess_accepts_images_whose_total_exceeds_i32() {
    let repr = MblbpRepresentation::new(MblbpParams::default()).unwrap();
    let (w, h) = (9000usize, 1000usize);
    let ii = repr.preprocess(&vec![255u8; w * h], w, h).unwrap();
    assert_eq!(ii.rect_sum(100, 100, 24, 24), 255 * 24 * 24);
    // wrong shape for the window, but a typed error rather than a panic
    assert!(matches!(
        repr.evaluate(&ii, &[0]),
        Err(MblbpError::ShapeMismatch { .. })
    ));
}
