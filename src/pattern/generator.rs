use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{FxError, FxResult};

/// Default grid cell side.
pub const DEFAULT_GRID_CELL: u32 = 4;
/// Default stripe cell height.
pub const DEFAULT_STRIPE_CELL_HEIGHT: u32 = 20;
/// Default stripe cell width.
pub const DEFAULT_STRIPE_CELL_WIDTH: u32 = 2;
/// Default number of lit rows at the top of a stripe cell.
pub const DEFAULT_STRIPE_ROWS: u32 = 4;

/// Alpha lost per band of a gradient stripe.
const GRADIENT_ALPHA_STEP: f32 = 0.25;

/// Procedural overlay shapes. All of them paint white; only alpha varies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternKind {
    /// Square cells with only the four corner pixels lit.
    Grid {
        /// Cell side in pixels.
        #[serde(default = "default_grid_cell")]
        cell_size: u32,
    },
    /// The first `rows` rows of each cell fully lit.
    Stripe {
        /// Cell height in pixels.
        #[serde(default = "default_stripe_cell_height")]
        cell_height: u32,
        /// Cell width in pixels.
        #[serde(default = "default_stripe_cell_width")]
        cell_width: u32,
        /// Lit rows at the top of each cell.
        #[serde(default = "default_stripe_rows")]
        rows: u32,
    },
    /// Like [`PatternKind::Stripe`], but lit in fading bands of `rows, rows - 1, ...` rows at
    /// alpha `1.0, 0.75, 0.5, 0.25`.
    GradientStripe {
        /// Cell height in pixels.
        #[serde(default = "default_stripe_cell_height")]
        cell_height: u32,
        /// Cell width in pixels.
        #[serde(default = "default_stripe_cell_width")]
        cell_width: u32,
        /// Size of the first (opaque) band.
        #[serde(default = "default_stripe_rows")]
        rows: u32,
    },
}

impl PatternKind {
    /// 4×4 corner grid.
    pub fn grid() -> Self {
        Self::Grid {
            cell_size: DEFAULT_GRID_CELL,
        }
    }

    /// 20×2 hard stripe with 4 lit rows.
    pub fn stripe() -> Self {
        Self::Stripe {
            cell_height: DEFAULT_STRIPE_CELL_HEIGHT,
            cell_width: DEFAULT_STRIPE_CELL_WIDTH,
            rows: DEFAULT_STRIPE_ROWS,
        }
    }

    /// 20×2 soft stripe with a 4-row leading band.
    pub fn gradient_stripe() -> Self {
        Self::GradientStripe {
            cell_height: DEFAULT_STRIPE_CELL_HEIGHT,
            cell_width: DEFAULT_STRIPE_CELL_WIDTH,
            rows: DEFAULT_STRIPE_ROWS,
        }
    }

    /// Default stripe, soft or hard.
    pub fn stripes(gradient: bool) -> Self {
        if gradient {
            Self::gradient_stripe()
        } else {
            Self::stripe()
        }
    }

    /// `(width, height)` of the unit cell.
    pub fn cell_dimensions(self) -> (u32, u32) {
        match self {
            Self::Grid { cell_size } => (cell_size, cell_size),
            Self::Stripe {
                cell_height,
                cell_width,
                ..
            }
            | Self::GradientStripe {
                cell_height,
                cell_width,
                ..
            } => (cell_width, cell_height),
        }
    }
}

impl Default for PatternKind {
    fn default() -> Self {
        Self::gradient_stripe()
    }
}

fn default_grid_cell() -> u32 {
    DEFAULT_GRID_CELL
}

fn default_stripe_cell_height() -> u32 {
    DEFAULT_STRIPE_CELL_HEIGHT
}

fn default_stripe_cell_width() -> u32 {
    DEFAULT_STRIPE_CELL_WIDTH
}

fn default_stripe_rows() -> u32 {
    DEFAULT_STRIPE_ROWS
}

/// A pattern shape plus the vertical scroll it is rendered at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternDescriptor {
    /// Shape of the unit cell.
    pub kind: PatternKind,
    /// Vertical scroll in pixels.
    pub offset: u32,
}

impl PatternDescriptor {
    /// Render at `width × height`.
    pub fn generate(self, width: u32, height: u32) -> FxResult<PixelBuffer> {
        generate_pattern(self.kind, width, height, self.offset)
    }
}

/// Geometry of one tileable cell. Alpha is evaluated per sample, so a cell larger than the
/// target never costs more than the target itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitCell {
    kind: PatternKind,
    width: u32,
    height: u32,
}

impl UnitCell {
    /// Build the cell for `kind`. Returns `None` when a cell dimension is zero.
    pub fn build(kind: PatternKind) -> Option<Self> {
        let (width, height) = kind.cell_dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            kind,
            width,
            height,
        })
    }

    /// Cell width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cell height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at `(x, y)` inside the cell; 0 outside it.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        match self.kind {
            PatternKind::Grid { .. } => {
                let edge_x = x == 0 || x == self.width - 1;
                let edge_y = y == 0 || y == self.height - 1;
                if edge_x && edge_y { 255 } else { 0 }
            }
            PatternKind::Stripe { rows, .. } => {
                if y < rows { 255 } else { 0 }
            }
            PatternKind::GradientStripe { rows, .. } => gradient_alpha(rows, y),
        }
    }
}

// Bands of `rows, rows - 1, ...` rows at alpha 1.0, 0.75, ... until either runs out.
fn gradient_alpha(rows: u32, y: u32) -> u8 {
    let mut band = rows;
    let mut level = 1.0f32;
    let mut start = 0u32;
    while band > 0 && level > 0.0 {
        let end = start.saturating_add(band);
        if y < end {
            return (255.0 * level).round() as u8;
        }
        start = end;
        band -= 1;
        level -= GRADIENT_ALPHA_STEP;
    }
    0
}

/// Tile `cell` over a `width × height` buffer, with the tiling origin moved up by `offset`
/// pixels.
///
/// Cells start at rows `k * cell_height - offset % cell_height`. A cell cut by the top edge is
/// skipped, so those rows stay transparent; cells cut by the right or bottom edge are clipped,
/// never resampled.
pub fn tile(cell: &UnitCell, width: u32, height: u32, offset: u32) -> FxResult<PixelBuffer> {
    let mut out = PixelBuffer::transparent(width, height)?;
    if out.is_empty() {
        return Ok(out);
    }

    let cell_h = u64::from(cell.height);
    let shift = u64::from(offset) % cell_h;
    let first_origin = (cell_h - shift) % cell_h;
    let row_bytes = (width as usize) * 4;

    out.raw_mut()
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u64;
            if y < first_origin {
                return;
            }
            let cy = ((y - first_origin) % cell_h) as u32;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let cx = (x as u32) % cell.width;
                px.copy_from_slice(&[255, 255, 255, cell.alpha_at(cx, cy)]);
            }
        });
    Ok(out)
}

/// Render `kind` at `width × height`, with the tiling origin moved up by `offset` pixels.
///
/// Degenerate cells (a zero dimension) give a fully transparent overlay.
pub fn generate_pattern(
    kind: PatternKind,
    width: u32,
    height: u32,
    offset: u32,
) -> FxResult<PixelBuffer> {
    match UnitCell::build(kind) {
        Some(cell) => tile(&cell, width, height, offset),
        None => {
            tracing::warn!(?kind, "pattern cell has a zero dimension; overlay is empty");
            PixelBuffer::transparent(width, height)
        }
    }
}

/// Parse a pattern from a loosely keyed description, e.g. `("gradient_stripe", {"rows": 6})`.
///
/// Missing params take the defaults; `null` params mean "all defaults".
pub fn parse_pattern_kind(kind: &str, params: &serde_json::Value) -> FxResult<PatternKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(FxError::validation("pattern kind must be non-empty"));
    }

    let params = if params.is_null() {
        None
    } else {
        Some(
            params
                .as_object()
                .ok_or_else(|| FxError::validation("pattern params must be an object"))?,
        )
    };
    let get = |key: &str, default: u32| -> FxResult<u32> {
        match params.and_then(|p| p.get(key)) {
            None => Ok(default),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    FxError::validation(format!("pattern param '{key}' must be a u32"))
                }),
        }
    };

    match kind.as_str() {
        "grid" | "pixel_grid" => Ok(PatternKind::Grid {
            cell_size: get("cell_size", DEFAULT_GRID_CELL)?,
        }),
        "stripe" | "stripes" | "strip" => Ok(PatternKind::Stripe {
            cell_height: get("cell_height", DEFAULT_STRIPE_CELL_HEIGHT)?,
            cell_width: get("cell_width", DEFAULT_STRIPE_CELL_WIDTH)?,
            rows: get("rows", DEFAULT_STRIPE_ROWS)?,
        }),
        "gradient_stripe" | "gradient-stripe" | "gradientstripe" | "soft_stripe" => {
            Ok(PatternKind::GradientStripe {
                cell_height: get("cell_height", DEFAULT_STRIPE_CELL_HEIGHT)?,
                cell_width: get("cell_width", DEFAULT_STRIPE_CELL_WIDTH)?,
                rows: get("rows", DEFAULT_STRIPE_ROWS)?,
            })
        }
        _ => Err(FxError::validation(format!(
            "unknown pattern kind '{kind}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/generator.rs"]
mod tests;
