use super::*;
use crate::foundation::core::Point;

const EPS: f64 = 1e-9;

fn cell() -> Rect {
    Rect::new(100.0, 50.0, 100.0 + 1920.0, 50.0 + 1440.0)
}

#[test]
fn wide_source_is_cropped_horizontally_only() {
    let fit = cover_fit(4000, 1500, cell()).unwrap();
    assert!((fit.scale - 1440.0 / 1500.0).abs() < EPS);
    assert!(fit.crops_horizontally(4000));
    assert!(!fit.crops_vertically(1500));
    assert!((fit.draw.height() - 1440.0).abs() < EPS);
    assert!(fit.draw.width() > 1920.0);
}

#[test]
fn tall_source_is_cropped_vertically_only() {
    let fit = cover_fit(1080, 1920, cell()).unwrap();
    assert!((fit.scale - 1920.0 / 1080.0).abs() < EPS);
    assert!(fit.crops_vertically(1920));
    assert!(!fit.crops_horizontally(1080));
    assert!((fit.draw.width() - 1920.0).abs() < EPS);
}

#[test]
fn scaling_is_uniform_and_preserves_aspect() {
    for &(w, h) in &[(640u32, 480u32), (1000, 3000), (5000, 200), (1, 1), (1921, 1439)] {
        let fit = cover_fit(w, h, cell()).unwrap();
        let src_aspect = f64::from(w) / f64::from(h);
        let drawn_aspect = fit.draw.width() / fit.draw.height();
        assert!((src_aspect - drawn_aspect).abs() < 1e-9 * src_aspect.max(1.0));
        assert!((fit.draw.width() - f64::from(w) * fit.scale).abs() < 1e-6);
        assert!((fit.draw.height() - f64::from(h) * fit.scale).abs() < 1e-6);
        // The draw rect always covers the cell.
        assert!(fit.draw.x0 <= cell().x0 + 1e-6 && fit.draw.x1 >= cell().x1 - 1e-6);
        assert!(fit.draw.y0 <= cell().y0 + 1e-6 && fit.draw.y1 >= cell().y1 - 1e-6);
    }
}

#[test]
fn crop_maps_exactly_onto_cell() {
    let fit = cover_fit(3000, 1000, cell()).unwrap();
    let t = fit.transform();
    let p0 = t * Point::new(fit.src_crop.x0, fit.src_crop.y0);
    let p1 = t * Point::new(fit.src_crop.x1, fit.src_crop.y1);
    assert!((p0.x - cell().x0).abs() < 1e-6 && (p0.y - cell().y0).abs() < 1e-6);
    assert!((p1.x - cell().x1).abs() < 1e-6 && (p1.y - cell().y1).abs() < 1e-6);
}

#[test]
fn crop_is_centered() {
    let fit = cover_fit(3000, 1000, cell()).unwrap();
    let left = fit.src_crop.x0;
    let right = 3000.0 - fit.src_crop.x1;
    assert!((left - right).abs() < 1e-6);
}

#[test]
fn empty_inputs_have_no_fit() {
    assert!(cover_fit(0, 10, cell()).is_none());
    assert!(cover_fit(10, 0, cell()).is_none());
    assert!(cover_fit(10, 10, Rect::new(0.0, 0.0, 0.0, 5.0)).is_none());
}
