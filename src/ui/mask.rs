/// Shape mask geometry
///
/// Pure mapping from the selected shape to the silhouette each tile is
/// clipped to. Polygon vertices are normalized to the unit square and
/// scaled to the tile at draw time.

use iced::widget::canvas::Path;
use iced::{Point, Size};

use crate::state::data::Shape;

/// Hexagon silhouette, flat top and bottom
pub const HEXAGON: [(f32, f32); 6] = [
    (0.25, 0.06),
    (0.75, 0.06),
    (1.0, 0.5),
    (0.75, 0.94),
    (0.25, 0.94),
    (0.0, 0.5),
];

/// Upward-pointing triangle silhouette
pub const TRIANGLE: [(f32, f32); 3] = [(0.5, 0.0), (0.0, 1.0), (1.0, 1.0)];

/// Normalized polygon vertices for a shape, if it is polygonal.
/// The circle is built directly as an arc and the square has no mask.
pub fn vertices(shape: Shape) -> Option<&'static [(f32, f32)]> {
    match shape {
        Shape::Hexagon => Some(&HEXAGON),
        Shape::Triangle => Some(&TRIANGLE),
        Shape::Circle | Shape::Square => None,
    }
}

/// Build the cutout path for a tile of side length `size`.
///
/// The path contains the full tile rectangle plus the shape as a second
/// subpath; filled with the even-odd rule it covers everything *outside*
/// the shape, turning the shape into a window onto the image. `None`
/// means no clipping (square).
pub fn cutout(shape: Shape, size: f32) -> Option<Path> {
    match shape {
        Shape::Square => None,
        Shape::Circle => Some(Path::new(|builder| {
            builder.rectangle(Point::ORIGIN, Size::new(size, size));
            builder.circle(Point::new(size / 2.0, size / 2.0), size / 2.0);
        })),
        Shape::Hexagon | Shape::Triangle => {
            let points = vertices(shape)?;
            Some(Path::new(|builder| {
                builder.rectangle(Point::ORIGIN, Size::new(size, size));
                let mut scaled = points.iter().map(|(x, y)| Point::new(x * size, y * size));
                if let Some(first) = scaled.next() {
                    builder.move_to(first);
                    for point in scaled {
                        builder.line_to(point);
                    }
                    builder.close();
                }
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_tables() {
        assert_eq!(vertices(Shape::Hexagon).unwrap().len(), 6);
        assert_eq!(vertices(Shape::Triangle).unwrap().len(), 3);
        assert!(vertices(Shape::Circle).is_none());
        assert!(vertices(Shape::Square).is_none());
    }

    #[test]
    fn test_vertices_stay_in_unit_square() {
        for shape in [Shape::Hexagon, Shape::Triangle] {
            for &(x, y) in vertices(shape).unwrap() {
                assert!((0.0..=1.0).contains(&x));
                assert!((0.0..=1.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_hexagon_is_left_right_symmetric() {
        // Every vertex has a mirror partner across x = 0.5
        for &(x, y) in HEXAGON.iter() {
            let mirrored = (1.0 - x, y);
            assert!(HEXAGON
                .iter()
                .any(|&(mx, my)| (mx - mirrored.0).abs() < 1e-6 && (my - mirrored.1).abs() < 1e-6));
        }
    }

    #[test]
    fn test_square_has_no_cutout() {
        assert!(cutout(Shape::Square, 260.0).is_none());
        assert!(cutout(Shape::Hexagon, 260.0).is_some());
        assert!(cutout(Shape::Circle, 260.0).is_some());
        assert!(cutout(Shape::Triangle, 260.0).is_some());
    }
}
