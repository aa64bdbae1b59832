use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (L2) distance between two points, in grid steps.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::at(0, 0);
        let b = Point::at(3, 4);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(manhattan(b, b), 0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        for p in gridpath_core::Range::new(0, 0, 6, 6) {
            let e = Point::at(5, 2);
            assert!(euclidean(p, e) <= f64::from(manhattan(p, e)));
        }
    }
}
