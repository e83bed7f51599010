//! Grid layout for trophy cards.
//!
//! Pure geometry: the result depends only on the card count, the requested
//! column count and the static card dimensions.

use serde::{Deserialize, Serialize};

/// Static grid constants for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridParams {
    pub card_width: u32,
    pub card_height: u32,
    pub gap: u32,
    /// Vertical offset of the first card row
    pub header_height: u32,
    /// Space below the last card row
    pub trailing_margin: u32,
    pub default_columns: u32,
    pub max_columns: u32,
}

/// Computed grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub columns: u32,
    pub rows: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub gap: u32,
    pub header_height: u32,
    pub trailing_margin: u32,
    pub total_width: u32,
    pub total_height: u32,
}

/// Where one card lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPosition {
    pub col: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
}

/// Lay out `count` cards.
///
/// Columns are `requested` (or the default) clamped to `[1, max_columns]`.
/// A count of 0 yields zero rows; callers are expected to handle empty input
/// before getting here.
pub fn layout(count: usize, requested: Option<u32>, params: &GridParams) -> LayoutSpec {
    let max = params.max_columns.max(1);
    let columns = requested
        .unwrap_or(params.default_columns)
        .max(1)
        .min(max);
    let rows = u32::try_from(count.div_ceil(columns as usize)).unwrap_or(u32::MAX);

    let cell_w = params.card_width + params.gap;
    let cell_h = params.card_height + params.gap;
    LayoutSpec {
        columns,
        rows,
        card_width: params.card_width,
        card_height: params.card_height,
        gap: params.gap,
        header_height: params.header_height,
        trailing_margin: params.trailing_margin,
        total_width: columns * cell_w + params.gap,
        total_height: params
            .header_height
            .saturating_add(rows.saturating_mul(cell_h))
            .saturating_add(params.trailing_margin),
    }
}

impl LayoutSpec {
    /// Position of the card at zero-based `index`.
    pub fn position(&self, index: usize) -> CardPosition {
        let columns = self.columns.max(1) as usize;
        let col = (index % columns) as u32;
        let row = u32::try_from(index / columns).unwrap_or(u32::MAX);
        CardPosition {
            col,
            row,
            x: self.gap + col * (self.card_width + self.gap),
            y: self
                .header_height
                .saturating_add(row.saturating_mul(self.card_height + self.gap)),
        }
    }
}
