/// Play-field geometry shared by the pointer-driven levels.
///
/// Every level lays itself out on the same logical field of
/// `FIELD_W` x `FIELD_H` cells. The renderer maps the field onto the
/// terminal; game logic never sees terminal coordinates.

use rand::Rng;

pub const FIELD_W: i32 = 48;
pub const FIELD_H: i32 = 14;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Field centre.
    pub const fn center() -> Self {
        Point { x: FIELD_W / 2, y: FIELD_H / 2 }
    }

    /// Move by (dx, dy), clamped to the field.
    pub fn offset_clamped(self, dx: i32, dy: i32) -> Self {
        Point {
            x: (self.x + dx).clamp(0, FIELD_W - 1),
            y: (self.y + dy).clamp(0, FIELD_H - 1),
        }
    }

    /// Within `dx` columns and `dy` rows of `other`.
    pub fn near(self, other: Point, dx: i32, dy: i32) -> bool {
        (self.x - other.x).abs() <= dx && (self.y - other.y).abs() <= dy
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (0, -1),
            MoveDir::Down => (0, 1),
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
        }
    }
}

/// Axis-aligned rectangle, `w` x `h` cells, top-left at `(x, y)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// A `w` x `h` rect centred on `c`.
    pub fn centered_on(c: Point, w: i32, h: i32) -> Self {
        Rect { x: c.x - w / 2, y: c.y - h / 2, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pick a top-left corner for a `w` x `h` rect fully inside the field that
/// does not cover `avoid`. Gives up after a handful of tries and returns
/// the last candidate; the field is always much larger than the rect.
pub fn random_placement<R: Rng>(rng: &mut R, w: i32, h: i32, avoid: Point) -> Point {
    let max_x = (FIELD_W - w).max(0);
    let max_y = (FIELD_H - h).max(0);
    let mut candidate = Point::new(0, 0);
    for _ in 0..32 {
        candidate = Point::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
        if !Rect::new(candidate.x, candidate.y, w, h).contains(avoid) {
            break;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn offset_clamps_to_field() {
        let p = Point::new(0, 0).offset_clamped(-5, -5);
        assert_eq!(p, Point::new(0, 0));
        let q = Point::new(FIELD_W - 1, FIELD_H - 1).offset_clamped(3, 3);
        assert_eq!(q, Point::new(FIELD_W - 1, FIELD_H - 1));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(5, 4)));
        assert!(!r.contains(Point::new(6, 4)));
        assert!(!r.contains(Point::new(5, 5)));
    }

    #[test]
    fn random_placement_stays_inside_and_avoids_pointer() {
        let mut rng = StdRng::seed_from_u64(7);
        let avoid = Point::center();
        for _ in 0..200 {
            let p = random_placement(&mut rng, 12, 1, avoid);
            assert!(p.x >= 0 && p.x + 12 <= FIELD_W);
            assert!(p.y >= 0 && p.y < FIELD_H);
            assert!(!Rect::new(p.x, p.y, 12, 1).contains(avoid));
        }
    }
}
