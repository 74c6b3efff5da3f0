use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{MONTHS_PER_YEAR, ScaleSet};
use crate::error::{HeatmapError, HeatmapResult};

use super::axis_label_format::{format_one_decimal, format_year, month_name};

/// Year labels closer than this are thinned out on narrow plots.
pub(super) const AXIS_YEAR_MIN_SPACING_PX: f64 = 32.0;

/// Identifier of the three axes, matching the element ids in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisId {
    Year,
    Month,
    Legend,
}

impl AxisId {
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Year => "x-axis",
            Self::Month => "y-axis",
            Self::Legend => "legend-axis",
        }
    }
}

/// One labeled reference point, positioned along its axis in axis space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTickSet {
    pub axis: AxisId,
    /// `(start, end)` of the axis domain line in axis space.
    pub extent: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

/// Ticks for all three axes of one heat map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapAxes {
    pub year: AxisTickSet,
    pub month: AxisTickSet,
    pub legend: AxisTickSet,
}

impl HeatmapAxes {
    pub fn generate(scales: &ScaleSet, year_tick_count: usize) -> HeatmapResult<Self> {
        Ok(Self {
            year: AxisTickSet {
                axis: AxisId::Year,
                extent: scales.year_scale().range(),
                ticks: select_ticks_with_min_spacing(
                    year_axis_ticks(scales, year_tick_count)?,
                    AXIS_YEAR_MIN_SPACING_PX,
                ),
            },
            month: AxisTickSet {
                axis: AxisId::Month,
                extent: scales.month_band().range(),
                ticks: month_axis_ticks(scales).into_vec(),
            },
            legend: AxisTickSet {
                axis: AxisId::Legend,
                extent: scales.legend_band().range(),
                ticks: legend_axis_ticks(scales),
            },
        })
    }
}

/// "Nice" step (1, 2 or 5 times a power of ten) giving roughly `count` ticks.
#[must_use]
pub fn nice_tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }

    let raw = (stop - start).abs() / count as f64;
    let power = raw.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Year ticks at multiples of a nice whole-year step inside the domain.
pub fn year_axis_ticks(scales: &ScaleSet, count: usize) -> HeatmapResult<Vec<AxisTick>> {
    let year_scale = scales.year_scale();
    let (min_year, max_year) = year_scale.domain();
    let step = nice_tick_step(f64::from(min_year), f64::from(max_year), count)
        .round()
        .max(1.0) as i32;

    let first = if min_year.rem_euclid(step) == 0 {
        min_year
    } else {
        min_year - min_year.rem_euclid(step) + step
    };

    let mut ticks = Vec::new();
    let mut year = first;
    while year <= max_year {
        ticks.push(AxisTick {
            value: f64::from(year),
            position: year_scale.year_to_pixel(year)?,
            label: format_year(year),
        });
        year += step;
    }

    if ticks.is_empty() {
        // Spans shorter than one step still get their first year labeled.
        ticks.push(AxisTick {
            value: f64::from(min_year),
            position: year_scale.year_to_pixel(min_year)?,
            label: format_year(min_year),
        });
    }
    Ok(ticks)
}

/// One tick per month band, at the band center.
#[must_use]
pub fn month_axis_ticks(scales: &ScaleSet) -> SmallVec<[AxisTick; MONTHS_PER_YEAR]> {
    let bands = scales.month_band();
    (0..MONTHS_PER_YEAR)
        .filter_map(|index| {
            let position = bands.center(index)?;
            let label = month_name(index)?;
            Some(AxisTick {
                value: index as f64,
                position,
                label: label.to_owned(),
            })
        })
        .collect()
}

/// One tick per legend temperature, centered on its swatch.
#[must_use]
pub fn legend_axis_ticks(scales: &ScaleSet) -> Vec<AxisTick> {
    let bands = scales.legend_band();
    scales
        .legend_ticks()
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            Some(AxisTick {
                value: *value,
                position: bands.center(index)?,
                label: format_one_decimal(*value),
            })
        })
        .collect()
}

/// Drops ticks closer than `min_spacing_px` to the previously kept one.
///
/// The last tick replaces the previous kept tick when that keeps spacing.
pub(super) fn select_ticks_with_min_spacing(
    mut ticks: Vec<AxisTick>,
    min_spacing_px: f64,
) -> Vec<AxisTick> {
    ticks.sort_by(|left, right| left.position.total_cmp(&right.position));
    if ticks.len() <= 1 || !min_spacing_px.is_finite() || min_spacing_px <= 0.0 {
        return ticks;
    }

    let mut selected: Vec<AxisTick> = Vec::with_capacity(ticks.len());
    for tick in &ticks {
        match selected.last() {
            Some(last) if tick.position - last.position < min_spacing_px => {}
            _ => selected.push(tick.clone()),
        }
    }

    if let (Some(last_tick), Some(selected_last)) = (ticks.last(), selected.last()) {
        if selected_last.position != last_tick.position && selected.len() >= 2 {
            let penultimate = &selected[selected.len() - 2];
            if last_tick.position - penultimate.position >= min_spacing_px {
                let last_index = selected.len() - 1;
                selected[last_index] = last_tick.clone();
            }
        }
    }

    selected
}

pub(super) fn ensure_tick_positions_finite(set: &AxisTickSet) -> HeatmapResult<()> {
    if let Some(tick) = set.ticks.iter().find(|tick| !tick.position.is_finite()) {
        return Err(HeatmapError::InvalidData(format!(
            "{} tick `{}` has a non-finite position",
            set.axis.element_id(),
            tick.label
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AxisTick, nice_tick_step, select_ticks_with_min_spacing};

    fn tick(position: f64) -> AxisTick {
        AxisTick {
            value: position,
            position,
            label: format!("{position}"),
        }
    }

    #[test]
    fn nice_step_follows_one_two_five_progression() {
        assert_eq!(nice_tick_step(1753.0, 2015.0, 21), 10.0);
        assert_eq!(nice_tick_step(1900.0, 2013.0, 21), 5.0);
        assert_eq!(nice_tick_step(0.0, 100.0, 10), 10.0);
        assert_eq!(nice_tick_step(2000.0, 2000.0, 21), 0.0);
    }

    #[test]
    fn spacing_filter_keeps_tail_when_it_fits() {
        let selected = select_ticks_with_min_spacing(
            vec![tick(0.0), tick(10.0), tick(40.0), tick(75.0), tick(80.0)],
            32.0,
        );
        let positions: Vec<f64> = selected.iter().map(|tick| tick.position).collect();
        assert_eq!(positions, vec![0.0, 40.0, 80.0]);
    }
}
