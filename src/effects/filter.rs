//! Declarative color filters with CSS `filter` function semantics.
//!
//! Each [`ColorOp`] works on straight-alpha channels in `[0, 1]` and clamps its output before
//! the next op runs, the same order-dependent behavior a browser gives a filter chain.

use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::decode::PreparedImage,
    foundation::error::{PhotostripError, PhotostripResult},
};

/// One color-adjustment step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "amount", rename_all = "snake_case")]
pub enum ColorOp {
    /// Blend toward luminance; `1.0` = fully gray.
    Grayscale(f32),
    /// Blend toward sepia tones; `1.0` = full sepia.
    Sepia(f32),
    /// Saturation multiplier; `1.0` = unchanged.
    Saturate(f32),
    /// Contrast multiplier around mid-gray; `1.0` = unchanged.
    Contrast(f32),
    /// Linear brightness multiplier; `1.0` = unchanged.
    Brightness(f32),
    /// Hue rotation in degrees.
    HueRotate(f32),
}

impl ColorOp {
    fn apply(self, c: [f32; 3]) -> [f32; 3] {
        let out = match self {
            Self::Grayscale(amount) => grayscale(c, amount),
            Self::Sepia(amount) => sepia(c, amount),
            Self::Saturate(factor) => saturate(c, factor),
            Self::Contrast(factor) => [
                (c[0] - 0.5) * factor + 0.5,
                (c[1] - 0.5) * factor + 0.5,
                (c[2] - 0.5) * factor + 0.5,
            ],
            Self::Brightness(factor) => [c[0] * factor, c[1] * factor, c[2] * factor],
            Self::HueRotate(degrees) => hue_rotate(c, degrees),
        };
        [
            out[0].clamp(0.0, 1.0),
            out[1].clamp(0.0, 1.0),
            out[2].clamp(0.0, 1.0),
        ]
    }

    fn is_noop(self) -> bool {
        match self {
            Self::Grayscale(a) | Self::Sepia(a) => a == 0.0,
            Self::Saturate(f) | Self::Contrast(f) | Self::Brightness(f) => f == 1.0,
            Self::HueRotate(d) => d.rem_euclid(360.0) == 0.0,
        }
    }

    fn css(self) -> String {
        let pct = |v: f32| format!("{}%", (v * 100.0).round());
        match self {
            Self::Grayscale(a) => format!("grayscale({})", pct(a)),
            Self::Sepia(a) => format!("sepia({})", pct(a)),
            Self::Saturate(f) => format!("saturate({})", pct(f)),
            Self::Contrast(f) => format!("contrast({})", pct(f)),
            Self::Brightness(f) => format!("brightness({})", pct(f)),
            Self::HueRotate(d) => format!("hue-rotate({d}deg)"),
        }
    }
}

/// A named, ordered chain of [`ColorOp`]s applied uniformly to every photo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSpec {
    /// Filter id.
    pub id: String,
    /// Ops, applied first to last.
    pub ops: Vec<ColorOp>,
}

/// Id of the identity filter.
pub const IDENTITY_FILTER_ID: &str = "none";

/// Catalogue entry for the filter picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterInfo {
    /// Filter id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Ops in order.
    pub ops: &'static [ColorOp],
}

/// Built-in filters.
pub const FILTERS: &[FilterInfo] = &[
    FilterInfo {
        id: IDENTITY_FILTER_ID,
        name: "Original",
        description: "No filter applied",
        ops: &[],
    },
    FilterInfo {
        id: "bw",
        name: "Black & White",
        description: "Classic monochrome",
        ops: &[ColorOp::Grayscale(1.0)],
    },
    FilterInfo {
        id: "vintage",
        name: "Vintage",
        description: "Warm retro feel",
        ops: &[
            ColorOp::Sepia(0.5),
            ColorOp::Contrast(1.1),
            ColorOp::Brightness(1.05),
        ],
    },
    FilterInfo {
        id: "vivid",
        name: "Vivid",
        description: "Bold and vibrant",
        ops: &[ColorOp::Saturate(1.5), ColorOp::Contrast(1.1)],
    },
    FilterInfo {
        id: "cool",
        name: "Cool Tone",
        description: "Blue-tinted cool",
        ops: &[
            ColorOp::HueRotate(180.0),
            ColorOp::Saturate(1.2),
            ColorOp::Brightness(0.95),
        ],
    },
    FilterInfo {
        id: "warm",
        name: "Warm Tone",
        description: "Golden warm glow",
        ops: &[
            ColorOp::Sepia(0.3),
            ColorOp::Saturate(1.2),
            ColorOp::Brightness(1.05),
        ],
    },
    FilterInfo {
        id: "fade",
        name: "Faded",
        description: "Soft and dreamy",
        ops: &[
            ColorOp::Brightness(1.1),
            ColorOp::Contrast(0.85),
            ColorOp::Saturate(0.8),
        ],
    },
    FilterInfo {
        id: "dramatic",
        name: "Dramatic",
        description: "High contrast punch",
        ops: &[
            ColorOp::Contrast(1.3),
            ColorOp::Brightness(0.95),
            ColorOp::Saturate(1.1),
        ],
    },
];

/// Resolve a filter id. Unknown ids fall back to the identity filter.
pub fn filter_by_id(id: &str) -> FilterSpec {
    match FILTERS.iter().find(|f| f.id == id) {
        Some(info) => FilterSpec::from(info),
        None => {
            tracing::debug!(filter_id = id, "unknown filter id; using identity");
            FilterSpec::identity()
        }
    }
}

impl From<&FilterInfo> for FilterSpec {
    fn from(info: &FilterInfo) -> Self {
        Self {
            id: info.id.to_string(),
            ops: info.ops.to_vec(),
        }
    }
}

const PARALLEL_CHUNK_PX: usize = 4096;

impl FilterSpec {
    /// The `none` filter.
    pub fn identity() -> Self {
        Self {
            id: IDENTITY_FILTER_ID.to_string(),
            ops: Vec::new(),
        }
    }

    /// Whether applying this filter leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.is_noop())
    }

    /// Parse a CSS `filter` value such as `"sepia(50%) contrast(110%)"`.
    pub fn parse_css(id: impl Into<String>, css: &str) -> PhotostripResult<Self> {
        let id = id.into();
        let css = css.trim();
        if css.is_empty() || css.eq_ignore_ascii_case("none") {
            return Ok(Self {
                id,
                ops: Vec::new(),
            });
        }

        let mut ops = Vec::new();
        let mut rest = css;
        while !rest.trim_start().is_empty() {
            let trimmed = rest.trim_start();
            let open = trimmed.find('(').ok_or_else(|| {
                PhotostripError::validation(format!("filter '{id}': expected '(' in '{trimmed}'"))
            })?;
            let close = trimmed.find(')').ok_or_else(|| {
                PhotostripError::validation(format!("filter '{id}': missing ')' in '{trimmed}'"))
            })?;
            if close < open {
                return Err(PhotostripError::validation(format!(
                    "filter '{id}': unbalanced parentheses in '{trimmed}'"
                )));
            }
            let name = trimmed[..open].trim().to_ascii_lowercase();
            let arg = trimmed[open + 1..close].trim();
            ops.push(parse_function(&id, &name, arg)?);
            rest = &trimmed[close + 1..];
        }
        Ok(Self { id, ops })
    }

    /// CSS `filter` string equivalent of this spec.
    pub fn to_css(&self) -> String {
        if self.ops.is_empty() {
            return "none".to_string();
        }
        self.ops
            .iter()
            .map(|op| op.css())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Apply the chain to one straight-alpha color in `[0, 1]`.
    pub fn apply_rgb(&self, color: [f32; 3]) -> [f32; 3] {
        self.ops.iter().fold(color, |c, op| op.apply(c))
    }

    /// Filtered copy of `img`. Returns a cheap clone when the filter is the identity.
    pub fn apply_to_image(&self, img: &PreparedImage) -> PreparedImage {
        if self.is_identity() {
            return img.clone();
        }
        let mut data = img.rgba8_premul.as_ref().clone();
        data.par_chunks_mut(PARALLEL_CHUNK_PX * 4).for_each(|chunk| {
            for px in chunk.chunks_exact_mut(4) {
                self.apply_to_premul_pixel(px);
            }
        });
        PreparedImage {
            width: img.width,
            height: img.height,
            rgba8_premul: Arc::new(data),
        }
    }

    fn apply_to_premul_pixel(&self, px: &mut [u8]) {
        let a = px[3];
        if a == 0 {
            return;
        }
        let af = f32::from(a) / 255.0;
        let straight = [
            (f32::from(px[0]) / 255.0 / af).min(1.0),
            (f32::from(px[1]) / 255.0 / af).min(1.0),
            (f32::from(px[2]) / 255.0 / af).min(1.0),
        ];
        let out = self.apply_rgb(straight);
        for i in 0..3 {
            px[i] = (out[i] * af * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}

fn parse_function(id: &str, name: &str, arg: &str) -> PhotostripResult<ColorOp> {
    let bad = |what: &str| {
        PhotostripError::validation(format!("filter '{id}': invalid {what} argument '{arg}'"))
    };

    if name == "hue-rotate" {
        let deg = if let Some(v) = arg.strip_suffix("deg") {
            v.trim().parse::<f32>().map_err(|_| bad(name))?
        } else if let Some(v) = arg.strip_suffix("turn") {
            v.trim().parse::<f32>().map_err(|_| bad(name))? * 360.0
        } else if let Some(v) = arg.strip_suffix("rad") {
            v.trim().parse::<f32>().map_err(|_| bad(name))?.to_degrees()
        } else if arg == "0" || arg.is_empty() {
            0.0
        } else {
            return Err(bad(name));
        };
        if !deg.is_finite() {
            return Err(bad(name));
        }
        return Ok(ColorOp::HueRotate(deg));
    }

    // Omitted arguments default to the function's "full effect" value, as in CSS.
    let amount = if arg.is_empty() {
        1.0
    } else if let Some(p) = arg.strip_suffix('%') {
        p.trim().parse::<f32>().map_err(|_| bad(name))? / 100.0
    } else {
        arg.parse::<f32>().map_err(|_| bad(name))?
    };
    if !amount.is_finite() || amount < 0.0 {
        return Err(bad(name));
    }

    match name {
        "grayscale" => Ok(ColorOp::Grayscale(amount.min(1.0))),
        "sepia" => Ok(ColorOp::Sepia(amount.min(1.0))),
        "saturate" => Ok(ColorOp::Saturate(amount)),
        "contrast" => Ok(ColorOp::Contrast(amount)),
        "brightness" => Ok(ColorOp::Brightness(amount)),
        other => Err(PhotostripError::validation(format!(
            "filter '{id}': unsupported function '{other}'"
        ))),
    }
}

fn grayscale(c: [f32; 3], amount: f32) -> [f32; 3] {
    let gray = c[0] * 0.2126 + c[1] * 0.7152 + c[2] * 0.0722;
    [
        c[0] + (gray - c[0]) * amount,
        c[1] + (gray - c[1]) * amount,
        c[2] + (gray - c[2]) * amount,
    ]
}

fn sepia(c: [f32; 3], amount: f32) -> [f32; 3] {
    let r = c[0] * 0.393 + c[1] * 0.769 + c[2] * 0.189;
    let g = c[0] * 0.349 + c[1] * 0.686 + c[2] * 0.168;
    let b = c[0] * 0.272 + c[1] * 0.534 + c[2] * 0.131;
    [
        c[0] + (r - c[0]) * amount,
        c[1] + (g - c[1]) * amount,
        c[2] + (b - c[2]) * amount,
    ]
}

fn saturate(c: [f32; 3], s: f32) -> [f32; 3] {
    let (rw, gw, bw) = (0.213, 0.715, 0.072);
    [
        (rw + (1.0 - rw) * s) * c[0] + (gw - gw * s) * c[1] + (bw - bw * s) * c[2],
        (rw - rw * s) * c[0] + (gw + (1.0 - gw) * s) * c[1] + (bw - bw * s) * c[2],
        (rw - rw * s) * c[0] + (gw - gw * s) * c[1] + (bw + (1.0 - bw) * s) * c[2],
    ]
}

fn hue_rotate(c: [f32; 3], degrees: f32) -> [f32; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let [r, g, b] = c;
    [
        r * (0.213 + cos * 0.787 - sin * 0.213)
            + g * (0.715 - 0.715 * cos - 0.715 * sin)
            + b * (0.072 - 0.072 * cos + 0.928 * sin),
        r * (0.213 - 0.213 * cos + 0.143 * sin)
            + g * (0.715 + 0.285 * cos + 0.140 * sin)
            + b * (0.072 - 0.072 * cos - 0.283 * sin),
        r * (0.213 - 0.213 * cos - 0.787 * sin)
            + g * (0.715 - 0.715 * cos + 0.715 * sin)
            + b * (0.072 + 0.928 * cos + 0.072 * sin),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
