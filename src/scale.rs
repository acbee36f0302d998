use clap::ValueEnum;

// ---------------------------------------------------------------------------
// Axis scaling
// ---------------------------------------------------------------------------

/// Axis scaling applied to every subplot.
///
/// Both renderers draw on linear coordinates; a log axis is realised by
/// mapping data into log10 space with [`Scale::forward`] and formatting the
/// tick labels back with [`Scale::format_tick`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// Map a data value into plot space.  `None` for values the scale cannot
    /// show (non-finite values, or non-positive values on a log axis).
    pub fn forward(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Scale::Linear => Some(value),
            Scale::Log if value > 0.0 => Some(value.log10()),
            Scale::Log => None,
        }
    }

    /// Map a plot-space coordinate back into data units.
    pub fn inverse(self, coord: f64) -> f64 {
        match self {
            Scale::Linear => coord,
            Scale::Log => 10f64.powf(coord),
        }
    }

    /// Tick label for a plot-space coordinate.
    pub fn format_tick(self, coord: f64) -> String {
        match self {
            Scale::Linear => format_linear(coord),
            Scale::Log => {
                let rounded = coord.round();
                if (coord - rounded).abs() < 1e-9 {
                    format!("1e{}", rounded as i64)
                } else {
                    format!("{:.2e}", self.inverse(coord))
                }
            }
        }
    }
}

fn format_linear(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        format!("{value:.1e}")
    } else {
        // Trim float noise such as 0.30000000000000004.
        let text = format!("{value:.4}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        if text == "-0" {
            "0".to_string()
        } else {
            text.to_string()
        }
    }
}
