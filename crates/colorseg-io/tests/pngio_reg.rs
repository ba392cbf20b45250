//! PNG and JPEG I/O regression test
//!
//! Writes synthetic images through both codecs and reads them back,
//! checking geometry, alpha handling and recorded input format.
//!
//! ```text
//! cargo test -p colorseg-io --test pngio_reg
//! ```

use colorseg_core::{ImageFormat, Pix, PixelDepth};
use colorseg_io::{read_image, read_image_mem, write_image, write_image_mem};
use colorseg_test::{RegParams, regout_dir};

/// 20x10 RGBA image: left half transparent, right half an opaque gradient
fn create_rgba_image() -> Pix {
    let pix = Pix::new(20, 10, PixelDepth::Bit32).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    pm.set_spp(4).unwrap();
    for y in 0..10 {
        for x in 0..20 {
            if x < 10 {
                pm.set_rgba(x, y, 0, 0, 0, 0).unwrap();
            } else {
                pm.set_rgba(x, y, (x * 12) as u8, (y * 25) as u8, 90, 255)
                    .unwrap();
            }
        }
    }
    pm.into()
}

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");

    // --- PNG keeps alpha exactly ---
    let rgba = create_rgba_image();
    let bytes = write_image_mem(&rgba, ImageFormat::Png).expect("write png");
    let back = read_image_mem(&bytes).expect("read png");
    rp.compare_values(4.0, back.spp() as f64, 0.0);
    rp.compare_pix(&rgba, &back);
    rp.compare_values(1.0, if back.is_transparent(3, 3) { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, if back.is_transparent(15, 3) { 1.0 } else { 0.0 }, 0.0);
    rp.write_pix_and_check(&back, &rgba, ImageFormat::Png)
        .expect("write_pix_and_check png");

    // --- Through the filesystem ---
    let path = format!("{}/pngio_file.png", regout_dir());
    write_image(&rgba, &path, ImageFormat::Png).expect("write png file");
    let from_file = read_image(&path).expect("read png file");
    let is_png = from_file.informat() == ImageFormat::Png;
    rp.compare_values(1.0, if is_png { 1.0 } else { 0.0 }, 0.0);
    rp.compare_pix(&rgba, &from_file);

    // --- JPEG drops alpha and reports RGB ---
    let jpeg = write_image_mem(&rgba, ImageFormat::Jpeg).expect("write jpeg");
    let back = read_image_mem(&jpeg).expect("read jpeg");
    rp.compare_values(3.0, back.spp() as f64, 0.0);
    rp.compare_values(20.0, back.width() as f64, 0.0);
    rp.compare_values(10.0, back.height() as f64, 0.0);
    rp.compare_values(0.0, if back.is_transparent(3, 3) { 1.0 } else { 0.0 }, 0.0);

    // --- Unknown data is rejected ---
    rp.compare_values(
        1.0,
        if read_image_mem(b"not an image").is_err() { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "pngio regression test failed");
}
