use supercube_geom::Color;

/// A previously built face grid whose vertex colors can seed a rebuild.
#[derive(Copy, Clone, Debug)]
pub struct ColorGrid<'a> {
    pub colors: &'a [Color],
    pub start: usize,
    pub width: usize,
    pub height: usize,
}

impl ColorGrid<'_> {
    /// True when the grid actually fits inside its color slice.
    pub fn is_complete(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self
                .start
                .checked_add(self.width * self.height)
                .is_some_and(|end| end <= self.colors.len())
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.colors[self.start + x + y * self.width]
    }

    /// Bilinear sample at normalized grid coordinates `(u, v)` in `[0, 1]`.
    /// Callers must check [`is_complete`](Self::is_complete) first.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f32;
        let fy = v.clamp(0.0, 1.0) * (self.height - 1) as f32;
        let x = fx as usize;
        let y = fy as usize;
        let tx = fx - x as f32;
        let ty = fy - y as f32;
        let top = self.at(x, y).lerp(self.at(x + 1, y), tx);
        let bottom = self.at(x, y + 1).lerp(self.at(x + 1, y + 1), tx);
        top.lerp(bottom, ty)
    }
}

/// Resamples `prev` onto a `new_width x new_height` grid, appending to `out`.
/// An incomplete prior grid yields white.
pub fn resample_colors(out: &mut Vec<Color>, prev: &ColorGrid<'_>, new_width: usize, new_height: usize) {
    out.reserve(new_width * new_height);
    if !prev.is_complete() {
        out.extend(std::iter::repeat_n(Color::WHITE, new_width * new_height));
        return;
    }
    let denom = |n: usize| if n > 1 { (n - 1) as f32 } else { 1.0 };
    let (dx, dy) = (denom(new_width), denom(new_height));
    for y in 0..new_height {
        for x in 0..new_width {
            out.push(prev.sample(x as f32 / dx, y as f32 / dy));
        }
    }
}
