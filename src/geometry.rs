/// Axis-aligned rectangle in pixel units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Square rectangle covering one grid cell whose top-left corner is `(x, y)`.
    #[must_use]
    pub fn cell(x: i32, y: i32, size: i32) -> Self {
        Self {
            x,
            y,
            w: size,
            h: size,
        }
    }
}

/// Anything that occupies an axis-aligned area on the board.
pub trait Bounded {
    fn rect(&self) -> Rect;
}

impl Bounded for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// Returns true when the two areas intersect with non-zero area.
///
/// Rectangles that only share an edge do not overlap.
#[must_use]
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Bounded + ?Sized,
    B: Bounded + ?Sized,
{
    let a = a.rect();
    let b = b.rect();

    b.x + b.w > a.x && a.x + a.w > b.x && b.y + b.h > a.y && a.y + a.h > b.y
}

#[cfg(test)]
mod tests {
    use super::{overlaps, Rect};

    #[test]
    fn identical_cells_overlap() {
        let head = Rect::cell(64, 32, 8);
        let food = Rect::cell(64, 32, 8);

        assert!(overlaps(&head, &food));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::cell(0, 0, 8);

        assert!(!overlaps(&a, &Rect::cell(8, 0, 8)));
        assert!(!overlaps(&a, &Rect::cell(0, 8, 8)));
        assert!(!overlaps(&a, &Rect::cell(-8, 0, 8)));
        assert!(!overlaps(&a, &Rect::cell(8, 8, 8)));
    }

    #[test]
    fn partial_overlap_counts() {
        let a = Rect::cell(0, 0, 8);
        let b = Rect {
            x: 7,
            y: 7,
            w: 2,
            h: 2,
        };

        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn contained_rectangle_overlaps() {
        let outer = Rect {
            x: 0,
            y: 0,
            w: 32,
            h: 32,
        };
        let inner = Rect::cell(8, 8, 8);

        assert!(overlaps(&outer, &inner));
    }
}
