use super::*;

/// Smallest axis range, used when every span has zero duration.
const MIN_AXIS_MAX: TimeMs = 1;

fn decimal_digit_count(value: TimeMs) -> u32 {
    value.max(0).checked_ilog10().map_or(1, |d| d + 1)
}

/// Rounds the trace extent up to a two-significant-digit bound and maps
/// `[0, axis_max]` onto `[0, width]`.
///
/// `8734` becomes `8800`, `400` stays `400`. Extents under 100 round with a
/// unit base, and an all-zero trace gets the minimal axis of one millisecond.
pub fn compute_axis(nodes: &[Node], width: f32) -> AxisConfig {
    let max_extent = nodes
        .iter()
        .map(|n| n.start_offset.saturating_add(n.duration))
        .max()
        .unwrap_or(0)
        .max(0);
    let digits = decimal_digit_count(max_extent);
    let base = if digits > 2 {
        10_i64.pow(digits - 2)
    } else {
        1
    };
    let mut rounded_scale = max_extent / base + TimeMs::from(max_extent % base != 0);
    // Near the top of the i64 range the rounded bound no longer fits.
    let mut axis_max = rounded_scale.checked_mul(base).unwrap_or(max_extent);
    if axis_max < MIN_AXIS_MAX {
        rounded_scale = MIN_AXIS_MAX;
        axis_max = MIN_AXIS_MAX;
    }
    AxisConfig {
        max_extent,
        digits,
        rounded_scale,
        axis_max,
        width: width.max(0.0),
    }
}

impl AxisConfig {
    pub fn to_pixel(&self, time: TimeMs) -> f32 {
        (time as f64 * self.width as f64 / self.axis_max as f64) as f32
    }

    /// Evenly spaced round tick values covering `[0, axis_max]`, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<AxisTick> {
        let step = tick_step(self.axis_max as f64, count.max(1));
        let decimals = if step >= 1.0 {
            0
        } else {
            (-step.log10().floor()) as usize
        };
        let mut ticks = Vec::new();
        let mut i = 0u32;
        loop {
            let value = step * i as f64;
            if value > self.axis_max as f64 + step * 1e-9 {
                break;
            }
            ticks.push(AxisTick {
                value,
                x: (value * self.width as f64 / self.axis_max as f64) as f32,
                label: format!("{value:.decimals$}"),
            });
            i += 1;
        }
        ticks
    }
}

fn tick_step(span: f64, count: usize) -> f64 {
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
