use x16::logo::{self, Palette, LOGO_FILENAME, LOGO_SIZE};
use x16::{Pixel, PNG};

fn expected_index(i: i32, j: i32) -> u8 {
    if (i - 2) % 3 == 0 || (j - 1) % 3 == 0 {
        1
    } else {
        0
    }
}

#[test]
fn logo_round_trips_through_png() {
    let image = logo::paint(&Palette::default());
    let bytes = PNG::new(image.clone()).unwrap().encode();
    let decoded = PNG::decode(&bytes).unwrap();

    assert_eq!(decoded.bit_depth(), 2);
    let decoded = decoded.into_image();
    assert_eq!((decoded.width(), decoded.height()), (LOGO_SIZE, LOGO_SIZE));
    assert_eq!(decoded, image);
}

#[test]
fn decoded_grid_matches_the_stripe_rule_everywhere() {
    let bytes = PNG::new(logo::paint(&Palette::new([0, 64, 128, 192])))
        .unwrap()
        .encode();
    let image = PNG::decode(&bytes).unwrap().into_image();
    for i in 0..16 {
        for j in 0..16 {
            assert_eq!(
                image.pixel(i as u32, j as u32),
                Some(expected_index(i, j)),
                "({i}, {j})"
            );
        }
    }
}

#[test]
fn palette_survives_for_every_level() {
    for level in 0..=255u8 {
        let levels = [level, 255 - level, level / 2, 7];
        let bytes = PNG::new(logo::paint(&Palette::new(levels)))
            .unwrap()
            .encode();
        let image = PNG::decode(&bytes).unwrap().into_image();
        let expected: Vec<Pixel> = levels.into_iter().map(Pixel::grey).collect();
        assert_eq!(image.palette(), expected.as_slice());
        assert!(image.palette().iter().all(Pixel::is_grey));
    }
}

#[test]
fn saved_logo_is_a_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(LOGO_FILENAME);
    logo::save(logo::paint(&Palette::default()), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let image = PNG::decode(&bytes).unwrap().into_image();
    assert_eq!(
        image.palette(),
        &[
            Pixel::grey(255),
            Pixel::grey(170),
            Pixel::grey(85),
            Pixel::grey(0)
        ]
    );
}
