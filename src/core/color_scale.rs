use crate::error::{HeatmapError, HeatmapResult};
use crate::render::Color;

/// ColorBrewer RdYlBu, 11 classes, red end first.
const RD_YL_BU: [[u8; 3]; 11] = [
    [0xa5, 0x00, 0x26],
    [0xd7, 0x30, 0x27],
    [0xf4, 0x6d, 0x43],
    [0xfd, 0xae, 0x61],
    [0xfe, 0xe0, 0x90],
    [0xff, 0xff, 0xbf],
    [0xe0, 0xf3, 0xf8],
    [0xab, 0xd9, 0xe9],
    [0x74, 0xad, 0xd1],
    [0x45, 0x75, 0xb4],
    [0x31, 0x36, 0x95],
];

/// Samples the RdYlBu palette at `t` in `[0, 1]` (clamped).
///
/// Channels follow a uniform cubic B-spline through the palette stops, so the
/// gradient is smooth across stop boundaries. `0` is dark red, `1` dark blue.
#[must_use]
pub fn interpolate_rd_yl_bu(t: f64) -> Color {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let channel = |c: usize| {
        let values: [f64; 11] = std::array::from_fn(|i| f64::from(RD_YL_BU[i][c]));
        basis_spline(&values, t)
    };
    Color::from_rgb8_f64(channel(0), channel(1), channel(2))
}

fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let i = if t >= 1.0 {
        n - 1
    } else {
        ((t * n as f64).floor() as usize).min(n - 1)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 {
        values[i + 2]
    } else {
        2.0 * v2 - v1
    };

    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Sequential mapping from absolute temperature onto the diverging palette.
///
/// The domain is stored as `(start, end)` where `start` samples the palette at
/// `0` (red) and `end` at `1` (blue). Heat maps build it as
/// `(max_temp, min_temp)` so that hotter cells land on the red end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingColorScale {
    domain_start: f64,
    domain_end: f64,
}

impl DivergingColorScale {
    pub fn new(domain_start: f64, domain_end: f64) -> HeatmapResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(HeatmapError::InvalidData(
                "color scale domain must be finite".to_owned(),
            ));
        }
        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Builds the reversed temperature mapping: `max_temp` red, `min_temp` blue.
    pub fn reversed(min_temp: f64, max_temp: f64) -> HeatmapResult<Self> {
        Self::new(max_temp, min_temp)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Palette parameter for `value`, clamped to `[0, 1]`.
    ///
    /// A zero-width domain yields the palette midpoint for every value.
    #[must_use]
    pub fn parameter(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 || !value.is_finite() {
            return 0.5;
        }
        ((value - self.domain_start) / span).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn color(self, value: f64) -> Color {
        interpolate_rd_yl_bu(self.parameter(value))
    }
}
