use std::ops::RangeInclusive;

/// Integer Bresenham walk between two points, both endpoints included.
///
/// The axis with the larger absolute delta is the major axis (ties go to x) and advances by one
/// unit per step. The error term grows by `2 * minor` per step; once it exceeds `major` the minor
/// coordinate steps and the error drops by `2 * major`. A line of deltas `(dx, dy)` yields
/// exactly `max(|dx|, |dy|) + 1` points.
///
/// Deltas and the error term are kept in `i128`, so any pair of `i64` endpoints is walkable.
#[derive(Clone, Debug)]
pub struct Line {
    cur: (i64, i64),
    end: (i64, i64),
    inc: (i64, i64),
    major: i128,
    minor: i128,
    x_major: bool,
    err: i128,
    done: bool,
}

impl Line {
    /// Start a walk from `(x1, y1)` to `(x2, y2)`.
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        let dx = i128::from(x2) - i128::from(x1);
        let dy = i128::from(y2) - i128::from(y1);
        let inc = (if dx < 0 { -1 } else { 1 }, if dy < 0 { -1 } else { 1 });
        let (hx, hy) = (dx.abs(), dy.abs());
        let x_major = hy <= hx;
        let (major, minor) = if x_major { (hx, hy) } else { (hy, hx) };

        Self {
            cur: (x1, y1),
            end: (x2, y2),
            inc,
            major,
            minor,
            x_major,
            err: 0,
            done: false,
        }
    }

    /// Walk from `(x1, y1)` to `(x2, y2)`, yielding only the points whose major-axis coordinate
    /// lies in `xs` (x-major) or `ys` (y-major).
    ///
    /// The yielded points are exactly those [`Line::new`] would yield in that range; the walk
    /// jumps straight to the first of them, so its length is bounded by the range, not the line.
    /// The minor coordinate is not restricted.
    pub fn clipped(
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        xs: RangeInclusive<i64>,
        ys: RangeInclusive<i64>,
    ) -> Self {
        let mut line = Self::new(x1, y1, x2, y2);
        let (start, inc, range) = if line.x_major {
            (x1, line.inc.0, xs)
        } else {
            (y1, line.inc.1, ys)
        };
        let (s, lo, hi) = (
            i128::from(start),
            i128::from(*range.start()),
            i128::from(*range.end()),
        );

        // Steps k in 0..=major with `s + inc * k` inside lo..=hi.
        let (k_lo, k_hi) = if inc > 0 { (lo - s, hi - s) } else { (s - hi, s - lo) };
        let first = k_lo.max(0);
        let last = k_hi.min(line.major);
        if first > last {
            line.done = true;
            return line;
        }

        let major_end = s + i128::from(inc) * last;
        // Lies between the two i64 endpoints.
        let major_end = major_end as i64;
        if line.x_major {
            line.end.0 = major_end;
        } else {
            line.end.1 = major_end;
        }
        Self::skip(&mut line, first);
        line
    }

    // Jump `k` major steps ahead in O(1), reproducing the state the step-by-step walk reaches.
    fn skip(&mut self, k: i128) {
        if k <= 0 {
            return;
        }
        // k > 0 implies major > 0; both deltas are below 2^64, so minor * k fits in u128.
        let major = self.major as u128;
        let p = self.minor as u128 * k as u128;
        let (q, r) = (p / major, p % major);
        let carry = 2 * r > major;
        let minor_steps = q + u128::from(carry);
        self.err = 2 * r as i128 - if carry { 2 * self.major } else { 0 };

        let (x, y) = &mut self.cur;
        let (major_pos, major_inc, minor_pos, minor_inc) = if self.x_major {
            (x, self.inc.0, y, self.inc.1)
        } else {
            (y, self.inc.1, x, self.inc.0)
        };
        // Both stay between their start and end coordinates.
        *major_pos = (i128::from(*major_pos) + i128::from(major_inc) * k) as i64;
        *minor_pos = (i128::from(*minor_pos) + i128::from(minor_inc) * minor_steps as i128) as i64;
    }
}

impl Iterator for Line {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.cur;

        let (x, y) = &mut self.cur;
        let (major_pos, major_end, major_inc, minor_pos, minor_inc) = if self.x_major {
            (x, self.end.0, self.inc.0, y, self.inc.1)
        } else {
            (y, self.end.1, self.inc.1, x, self.inc.0)
        };

        if *major_pos == major_end {
            self.done = true;
            return Some(out);
        }
        *major_pos += major_inc;
        self.err += 2 * self.minor;
        if self.err > self.major {
            *minor_pos += minor_inc;
            self.err -= 2 * self.major;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (pos, end) = if self.x_major {
            (self.cur.0, self.end.0)
        } else {
            (self.cur.1, self.end.1)
        };
        let span = (i128::from(end) - i128::from(pos)).unsigned_abs();
        let n = usize::try_from(span).unwrap_or(usize::MAX).saturating_add(1);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line {}

#[cfg(test)]
#[path = "../../tests/unit/raster/line.rs"]
mod tests;
