use super::*;

#[test]
fn oversized_canvas_is_a_render_error() {
    let err = surface_size(Canvas {
        width: 70_000,
        height: 10,
    })
    .unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));
    assert!(
        surface_size(Canvas {
            width: 0,
            height: 10
        })
        .is_err()
    );
    assert_eq!(
        surface_size(Canvas {
            width: 6008,
            height: 6848
        })
        .unwrap(),
        (6008, 6848)
    );
}

#[test]
fn pixmap_rejects_length_mismatch() {
    assert!(image_premul_bytes_to_pixmap(&[0u8; 15], 2, 2).is_err());
    let pm = image_premul_bytes_to_pixmap(&[255u8; 16], 2, 2).unwrap();
    assert_eq!((pm.width(), pm.height()), (2, 2));
}

#[test]
fn pixel_lookup_is_row_major() {
    let mut data = vec![0u8; 2 * 2 * 4];
    data[(1 * 2 + 0) * 4..(1 * 2 + 0) * 4 + 4].copy_from_slice(&[1, 2, 3, 4]);
    let s = Surface {
        canvas: Canvas {
            width: 2,
            height: 2,
        },
        rgba8_premul: data,
    };
    assert_eq!(s.pixel(0, 1), Some([1, 2, 3, 4]));
    assert_eq!(s.pixel(2, 0), None);
}

#[test]
fn affine_conversion_keeps_coefficients() {
    let a = Affine::translate((3.0, 4.0)) * Affine::scale(2.0);
    assert_eq!(affine_to_cpu(a).as_coeffs(), a.as_coeffs());
}
