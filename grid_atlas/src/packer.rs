// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid atlas solver.
//!
//! Packing runs a fixed sequence of stages over the grid quantities, each of
//! which only fills in what is still unknown:
//!
//! 1. columns and rows from each other, or from atlas width and cell width,
//! 2. atlas size from cells and grid, raised to the atlas constraint,
//! 3. cell size from atlas size and grid, lowered to the cell constraint,
//! 4. the glyph scale, fitting glyphs to known cells, choosing columns for a
//!    known atlas, or sizing cells for the minimum scale,
//! 5. any remaining cell size from the glyph bounds at that scale,
//! 6. grid and atlas size for the final cells,
//!
//! after which every glyph is framed and placed.

use log::{debug, warn};

use crate::bounds::{BoundsOptions, MaxBounds};
use crate::columns::{ColumnSearch, ceil_div};
use crate::kurbo::Point;
use crate::placement::{CellGrid, place_glyphs};
use crate::scale::ScaleFitter;
use crate::util::{ceil_px, dimension, unsigned};
use crate::{CellFrame, DimensionsConstraint, GridGlyph, PackError};

/// Default convergence tolerance of the scale search, as a fraction of the scale.
const DEFAULT_SCALE_TOLERANCE: f64 = 0.001;

/// Default preference for column counts that divide the atlas width exactly.
const DEFAULT_ALIGNED_COLUMNS_BIAS: f64 = 0.125;

/// The resolved layout of a packed grid atlas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
    /// Cell width in pixels, including padding.
    pub cell_width: u32,
    /// Cell height in pixels, including padding.
    pub cell_height: u32,
    /// Pixels per font unit.
    pub scale: f64,
}

/// Grid quantities, each either pinned by the caller or derived by a solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct GridDimensions {
    columns: Option<i32>,
    rows: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
    cell_width: Option<i32>,
    cell_height: Option<i32>,
}

impl GridDimensions {
    fn cells(&self) -> Option<(i32, i32)> {
        Some((self.cell_width?, self.cell_height?))
    }

    fn resolve(&self) -> Option<CellGrid> {
        let grid = CellGrid {
            columns: self.columns?,
            rows: self.rows?,
            cell_width: self.cell_width?,
            cell_height: self.cell_height?,
            height: self.height?,
        };
        (grid.columns > 0 && grid.rows > 0 && grid.cell_width > 0 && grid.cell_height > 0)
            .then_some(grid)
    }
}

/// Everything a successful solve determines.
#[derive(Clone, Copy, Debug)]
struct Solution {
    grid: GridDimensions,
    scale: f64,
    /// Shared glyph origin in font units, before the half-pixel adjustment.
    fixed_origin: Point,
}

/// Lays out glyphs in a uniform grid of equally sized cells.
///
/// Any of the grid quantities (columns, rows, atlas size, cell size, scale) can
/// be pinned before calling [`pack`](Self::pack); the rest are derived so that
/// every glyph, grown by the distance range, fits its cell at one common scale.
///
/// ```
/// use grid_atlas::{GridAtlasPacker, ShapeGlyph, kurbo::Rect};
///
/// let mut glyphs = [
///     ShapeGlyph::new(Rect::new(0.0, 0.0, 10.0, 10.0)),
///     ShapeGlyph::new(Rect::new(0.0, -2.0, 8.0, 12.0)),
/// ];
/// let mut packer = GridAtlasPacker::new();
/// packer.set_cell_dimensions(32, 32);
/// packer.set_pixel_range(2.0);
/// assert_eq!(packer.pack(&mut glyphs), Ok(0));
/// let layout = packer.layout().unwrap();
/// assert_eq!((layout.cell_width, layout.cell_height), (32, 32));
/// ```
#[derive(Clone, Debug)]
pub struct GridAtlasPacker {
    grid: GridDimensions,
    padding: i32,
    dimensions_constraint: DimensionsConstraint,
    cell_dimensions_constraint: DimensionsConstraint,
    fixed_x: bool,
    fixed_y: bool,
    scale: Option<f64>,
    min_scale: f64,
    fixed_origin: Point,
    unit_range: f64,
    px_range: f64,
    miter_limit: f64,
    scale_tolerance: f64,
    aligned_columns_bias: f64,
}

impl Default for GridAtlasPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl GridAtlasPacker {
    /// Creates a packer with nothing pinned, no padding and a minimum scale of 1.
    pub fn new() -> Self {
        Self {
            grid: GridDimensions::default(),
            padding: 0,
            dimensions_constraint: DimensionsConstraint::None,
            cell_dimensions_constraint: DimensionsConstraint::None,
            fixed_x: false,
            fixed_y: false,
            scale: None,
            min_scale: 1.0,
            fixed_origin: Point::ZERO,
            unit_range: 0.0,
            px_range: 0.0,
            miter_limit: 0.0,
            scale_tolerance: DEFAULT_SCALE_TOLERANCE,
            aligned_columns_bias: DEFAULT_ALIGNED_COLUMNS_BIAS,
        }
    }

    /// Computes the layout and places `glyphs` in it.
    ///
    /// Returns the number of glyphs that did not fit the grid, which is zero on
    /// full success. Glyphs that did fit keep their placement. Whitespace glyphs
    /// are skipped and never counted.
    ///
    /// On success every grid quantity and the scale stay resolved, so a later
    /// call reuses them unless they are unset first. On error the packer is left
    /// unchanged.
    pub fn pack<G: GridGlyph>(&mut self, glyphs: &mut [G]) -> Result<usize, PackError> {
        let glyph_count = glyphs.iter().filter(|glyph| !glyph.is_whitespace()).count();
        if glyph_count == 0 {
            return Ok(0);
        }
        let glyph_count = i32::try_from(glyph_count).unwrap_or(i32::MAX);
        let solution = self
            .solve(glyphs, glyph_count)
            .inspect_err(|error| warn!("grid atlas packing failed: {error}"))?;
        let grid = solution
            .grid
            .resolve()
            .ok_or_else(|| PackError::no_feasible_layout(None, None))?;

        self.grid = solution.grid;
        self.scale = Some(solution.scale);
        self.fixed_origin = solution.fixed_origin;

        let frame = CellFrame {
            scale: solution.scale,
            range: self.unit_range + self.px_range / solution.scale,
            miter_limit: self.miter_limit,
            width: grid.cell_width - self.padding,
            height: grid.cell_height - self.padding,
            fixed_x: self.fixed_x.then_some(solution.fixed_origin.x),
            fixed_y: self.fixed_y.then_some(solution.fixed_origin.y),
        };
        let unplaced = place_glyphs(glyphs, &grid, &frame);
        if unplaced > 0 {
            warn!(
                "{unplaced} of {glyph_count} glyphs did not fit a {}x{} grid",
                grid.columns, grid.rows
            );
        }
        Ok(unplaced)
    }

    fn solve<G: GridGlyph>(&self, glyphs: &[G], glyph_count: i32) -> Result<Solution, PackError> {
        let pinned = self.grid;
        let mut grid = self.grid;
        resolve_columns_and_rows(&mut grid, glyph_count, self.padding)?;
        derive_dimensions(&mut grid, self.padding, self.dimensions_constraint);
        derive_cell_dimensions(&mut grid, self.padding, self.cell_dimensions_constraint);
        check_cell_room(&grid, self.padding, self.px_range)?;

        let fitter = ScaleFitter::new(
            glyphs,
            BoundsOptions {
                miter_limit: self.miter_limit,
                fixed_x: self.fixed_x,
                fixed_y: self.fixed_y,
            },
            self.padding,
            self.unit_range,
            self.px_range,
            self.scale_tolerance,
        );
        let scale = match self.scale {
            Some(scale) => scale,
            None => self.resolve_scale(&mut grid, &fitter, glyph_count)?,
        };
        let bounds = fitter.bounds_at(scale);
        self.fit_cells(&mut grid, &pinned, &bounds);
        let (cell_width, cell_height) = grid
            .cells()
            .ok_or_else(|| PackError::no_feasible_layout(grid.cell_width, grid.cell_height))?;
        let fixed_origin = Point::new(
            (-bounds.union.x0 + 0.5 * (f64::from(cell_width - self.padding) - bounds.width))
                / scale,
            (-bounds.union.y0 + 0.5 * (f64::from(cell_height - self.padding) - bounds.height))
                / scale,
        );

        self.derive_atlas(&mut grid, &pinned, glyph_count, cell_width, cell_height)?;
        debug!(
            "grid {:?}x{:?} of {cell_width}x{cell_height} cells in a {:?}x{:?} atlas at scale {scale}",
            grid.columns, grid.rows, grid.width, grid.height
        );
        Ok(Solution {
            grid,
            scale,
            fixed_origin,
        })
    }

    /// Finds the largest scale the known cells or atlas allow.
    ///
    /// With neither known, cells are sized for the minimum scale and the scale is
    /// then grown to whatever the rounded cells still fit.
    fn resolve_scale<G: GridGlyph>(
        &self,
        grid: &mut GridDimensions,
        fitter: &ScaleFitter<'_, G>,
        glyph_count: i32,
    ) -> Result<f64, PackError> {
        if grid.cell_width.is_some() || grid.cell_height.is_some() {
            let scale = fitter.fit(grid.cell_width, grid.cell_height);
            return self.check_minimum(scale, grid);
        }
        if let (Some(width), Some(height)) = (grid.width, grid.height) {
            let search = ColumnSearch {
                cell_count: glyph_count,
                padding: self.padding,
                aligned_bias: self.aligned_columns_bias,
            };
            let choice = search
                .best_for_scale(
                    fitter,
                    width,
                    height,
                    self.cell_dimensions_constraint,
                    self.min_scale,
                )
                .ok_or_else(|| PackError::no_feasible_layout(None, None))?;
            debug!(
                "{} columns of {}x{} cells fit a {width}x{height} atlas at scale {}",
                choice.columns, choice.cell_width, choice.cell_height, choice.scale
            );
            grid.columns = Some(choice.columns);
            grid.rows = Some(choice.rows);
            grid.cell_width = Some(choice.cell_width);
            grid.cell_height = Some(choice.cell_height);
            return self.check_minimum(choice.scale, grid);
        }
        let bounds = fitter.bounds_at(self.min_scale);
        let (cell_width, cell_height) = self.cell_dimensions_constraint.raise(
            ceil_px(bounds.width).saturating_add(self.padding),
            ceil_px(bounds.height).saturating_add(self.padding),
        );
        grid.cell_width = Some(cell_width);
        grid.cell_height = Some(cell_height);
        Ok(fitter
            .fit(Some(cell_width), Some(cell_height))
            .max(self.min_scale))
    }

    fn check_minimum(&self, scale: f64, grid: &GridDimensions) -> Result<f64, PackError> {
        if scale < self.min_scale || scale <= 0.0 {
            return Err(PackError::scale_below_minimum(
                scale,
                self.min_scale,
                grid.cell_width,
                grid.cell_height,
            ));
        }
        Ok(scale)
    }

    /// Sizes any still unknown cell side to the glyph bounds, and shrinks the
    /// cell height to the glyphs when nothing pinned it.
    fn fit_cells(&self, grid: &mut GridDimensions, pinned: &GridDimensions, bounds: &MaxBounds) {
        let needed_width = ceil_px(bounds.width).saturating_add(self.padding);
        let needed_height = ceil_px(bounds.height).saturating_add(self.padding);
        let constraint = self.cell_dimensions_constraint;
        if grid.cells().is_none() {
            let (width, height) = constraint.raise(needed_width, needed_height);
            grid.cell_width.get_or_insert(width);
            grid.cell_height.get_or_insert(height);
        }
        if self.scale.is_none()
            && pinned.rows.is_none()
            && pinned.cell_height.is_none()
            && !constraint.is_square()
        {
            grid.cell_height = Some(constraint.raise_axis(needed_height));
        }
    }

    /// Settles the grid shape and the atlas size once cells are known.
    ///
    /// A pinned atlas side caps the grid along that axis. Derived columns or rows
    /// beyond the cap are cut back and the glyphs past them overflow, while
    /// pinned ones that do not fit are an error.
    fn derive_atlas(
        &self,
        grid: &mut GridDimensions,
        pinned: &GridDimensions,
        glyph_count: i32,
        cell_width: i32,
        cell_height: i32,
    ) -> Result<(), PackError> {
        let no_layout = || PackError::no_feasible_layout(Some(cell_width), Some(cell_height));
        if cell_width <= 0 || cell_height <= 0 {
            return Err(no_layout());
        }
        if grid.columns.is_none() {
            let columns = match (grid.width, grid.height) {
                (Some(width), _) => width.saturating_add(self.padding) / cell_width,
                (None, Some(height)) => {
                    let rows = height.saturating_add(self.padding) / cell_height;
                    if rows <= 0 {
                        return Err(no_layout());
                    }
                    ceil_div(glyph_count, rows)
                }
                (None, None) => ColumnSearch {
                    cell_count: glyph_count,
                    padding: self.padding,
                    aligned_bias: self.aligned_columns_bias,
                }
                .best_for_area(cell_width, cell_height, self.dimensions_constraint),
            };
            if columns <= 0 {
                return Err(no_layout());
            }
            grid.columns = Some(columns);
            grid.rows = Some(ceil_div(glyph_count, columns));
        }
        let (Some(columns), Some(rows)) = (grid.columns, grid.rows) else {
            return Err(no_layout());
        };
        if grid.width.is_none() || grid.height.is_none() {
            let (width, height) = self.dimensions_constraint.raise(
                grid.width
                    .unwrap_or_else(|| columns.saturating_mul(cell_width)),
                grid.height
                    .unwrap_or_else(|| rows.saturating_mul(cell_height)),
            );
            let width = *grid.width.get_or_insert(width);
            let height = *grid.height.get_or_insert(height);
            if (width, height) != self.dimensions_constraint.raise(width, height) {
                warn!(
                    "pinned atlas side leaves a {width}x{height} atlas outside the {} constraint",
                    self.dimensions_constraint
                );
            }
        }
        let (Some(width), Some(height)) = (grid.width, grid.height) else {
            return Err(no_layout());
        };
        let padding = self.padding;
        let capped_columns =
            cap_to_atlas(columns, pinned.columns, width, cell_width, padding).ok_or_else(no_layout)?;
        let capped_rows =
            cap_to_atlas(rows, pinned.rows, height, cell_height, padding).ok_or_else(no_layout)?;
        if (capped_columns, capped_rows) != (columns, rows) {
            debug!("grid cut to {capped_columns}x{capped_rows} to fit a {width}x{height} atlas");
        }
        grid.columns = Some(capped_columns);
        grid.rows = Some(capped_rows);
        Ok(())
    }

    /// Sets whether every glyph shares one origin, separately per axis.
    ///
    /// A shared origin keeps baselines and advances aligned across cells, at
    /// the cost of sizing cells for the union of all glyph boxes.
    pub fn set_fixed_origin(&mut self, horizontal: bool, vertical: bool) {
        self.fixed_x = horizontal;
        self.fixed_y = vertical;
    }

    /// Pins the cell size in pixels, including padding. Zero leaves a side unset.
    pub fn set_cell_dimensions(&mut self, width: u32, height: u32) {
        self.grid.cell_width = dimension(width);
        self.grid.cell_height = dimension(height);
    }

    /// Lets [`pack`](Self::pack) determine the cell size.
    pub fn unset_cell_dimensions(&mut self) {
        self.grid.cell_width = None;
        self.grid.cell_height = None;
    }

    /// Sets the constraint applied to derived cell sizes.
    pub fn set_cell_dimensions_constraint(&mut self, constraint: DimensionsConstraint) {
        self.cell_dimensions_constraint = constraint;
    }

    /// Pins the number of columns. Zero unsets it.
    pub fn set_columns(&mut self, columns: u32) {
        self.grid.columns = dimension(columns);
    }

    /// Pins the number of rows. Zero unsets it.
    pub fn set_rows(&mut self, rows: u32) {
        self.grid.rows = dimension(rows);
    }

    /// Lets [`pack`](Self::pack) determine the number of columns.
    pub fn unset_columns(&mut self) {
        self.grid.columns = None;
    }

    /// Lets [`pack`](Self::pack) determine the number of rows.
    pub fn unset_rows(&mut self) {
        self.grid.rows = None;
    }

    /// Pins the atlas size in pixels. Zero leaves a side unset.
    ///
    /// A pinned side caps the grid. Derived columns or rows that would not fit
    /// it are cut back, and the glyphs past them are reported as unplaced.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.grid.width = dimension(width);
        self.grid.height = dimension(height);
    }

    /// Lets [`pack`](Self::pack) determine the atlas size.
    pub fn unset_dimensions(&mut self) {
        self.grid.width = None;
        self.grid.height = None;
    }

    /// Sets the constraint applied to derived atlas sizes.
    ///
    /// A pinned side is never changed, so pinning only one side of a square
    /// constraint can leave a non-square atlas. A warning is logged when that
    /// happens.
    pub fn set_dimensions_constraint(&mut self, constraint: DimensionsConstraint) {
        self.dimensions_constraint = constraint;
    }

    /// Sets the gap between neighboring cells in pixels.
    pub fn set_padding(&mut self, padding: u32) {
        self.padding = i32::try_from(padding).unwrap_or(i32::MAX);
    }

    /// Pins the glyph scale in pixels per font unit. Non-positive values unset it.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = (scale > 0.0).then_some(scale);
    }

    /// Lets [`pack`](Self::pack) determine the glyph scale.
    pub fn unset_scale(&mut self) {
        self.scale = None;
    }

    /// Sets the smallest acceptable glyph scale.
    pub fn set_minimum_scale(&mut self, min_scale: f64) {
        self.min_scale = min_scale;
    }

    /// Sets the part of the distance range measured in font units.
    pub fn set_unit_range(&mut self, unit_range: f64) {
        self.unit_range = unit_range;
    }

    /// Sets the part of the distance range measured in pixels.
    pub fn set_pixel_range(&mut self, px_range: f64) {
        self.px_range = px_range;
    }

    /// Sets the miter limit for glyph bounds. Zero ignores miters.
    pub fn set_miter_limit(&mut self, miter_limit: f64) {
        self.miter_limit = miter_limit;
    }

    /// Sets the relative precision of the scale search.
    pub fn set_scale_tolerance(&mut self, tolerance: f64) {
        self.scale_tolerance = tolerance;
    }

    /// Sets how much scale may be given up for columns that divide the atlas width.
    pub fn set_aligned_columns_bias(&mut self, bias: f64) {
        self.aligned_columns_bias = bias;
    }

    /// The atlas size, once both sides are known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((unsigned(self.grid.width)?, unsigned(self.grid.height)?))
    }

    /// The cell size including padding, once both sides are known.
    pub fn cell_dimensions(&self) -> Option<(u32, u32)> {
        Some((
            unsigned(self.grid.cell_width)?,
            unsigned(self.grid.cell_height)?,
        ))
    }

    /// The number of columns, if pinned or resolved.
    pub fn columns(&self) -> Option<u32> {
        unsigned(self.grid.columns)
    }

    /// The number of rows, if pinned or resolved.
    pub fn rows(&self) -> Option<u32> {
        unsigned(self.grid.rows)
    }

    /// The glyph scale, if pinned or resolved.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// The total distance range in pixels at the current scale.
    pub fn pixel_range(&self) -> f64 {
        self.scale
            .map_or(self.px_range, |scale| self.unit_range * scale + self.px_range)
    }

    /// The shared glyph origin in font units, as used with pixel-center sampling.
    pub fn fixed_origin(&self) -> Point {
        let offset = self.scale.map_or(0.0, |scale| 0.5 / scale);
        Point::new(self.fixed_origin.x - offset, self.fixed_origin.y - offset)
    }

    /// The complete layout, once every quantity is resolved.
    pub fn layout(&self) -> Option<GridLayout> {
        let (width, height) = self.dimensions()?;
        let (cell_width, cell_height) = self.cell_dimensions()?;
        Some(GridLayout {
            columns: self.columns()?,
            rows: self.rows()?,
            width,
            height,
            cell_width,
            cell_height,
            scale: self.scale?,
        })
    }
}

/// Derives columns from rows, rows from columns, or both from the atlas and
/// cell widths.
fn resolve_columns_and_rows(
    grid: &mut GridDimensions,
    glyph_count: i32,
    padding: i32,
) -> Result<(), PackError> {
    match (grid.columns, grid.rows) {
        (Some(_), Some(_)) => {}
        (Some(columns), None) => grid.rows = Some(ceil_div(glyph_count, columns)),
        (None, Some(rows)) => grid.columns = Some(ceil_div(glyph_count, rows)),
        (None, None) => {
            if let (Some(width), Some(cell_width)) = (grid.width, grid.cell_width) {
                let columns = width.saturating_add(padding) / cell_width;
                if columns <= 0 {
                    return Err(PackError::no_feasible_layout(
                        grid.cell_width,
                        grid.cell_height,
                    ));
                }
                grid.columns = Some(columns);
                grid.rows = Some(ceil_div(glyph_count, columns));
            }
        }
    }
    Ok(())
}

/// Derives unknown atlas sides from cells and grid, raising only the derived sides.
fn derive_dimensions(grid: &mut GridDimensions, padding: i32, constraint: DimensionsConstraint) {
    let width = match (grid.width, grid.columns, grid.cell_width) {
        (None, Some(columns), Some(cell_width)) => {
            Some(columns.saturating_mul(cell_width) - padding)
        }
        _ => None,
    };
    let height = match (grid.height, grid.rows, grid.cell_height) {
        (None, Some(rows), Some(cell_height)) => Some(rows.saturating_mul(cell_height) - padding),
        _ => None,
    };
    if width.is_none() && height.is_none() {
        return;
    }
    let (raised_width, raised_height) =
        constraint.raise_partial(grid.width.or(width), grid.height.or(height));
    if width.is_some() {
        grid.width = raised_width;
    }
    if height.is_some() {
        grid.height = raised_height;
    }
}

/// Derives unknown cell sides from atlas and grid, lowering only the derived sides.
fn derive_cell_dimensions(
    grid: &mut GridDimensions,
    padding: i32,
    constraint: DimensionsConstraint,
) {
    let cell_width = match (grid.cell_width, grid.width, grid.columns) {
        (None, Some(width), Some(columns)) => Some(width.saturating_add(padding) / columns),
        _ => None,
    };
    let cell_height = match (grid.cell_height, grid.height, grid.rows) {
        (None, Some(height), Some(rows)) => Some(height.saturating_add(padding) / rows),
        _ => None,
    };
    if cell_width.is_none() && cell_height.is_none() {
        return;
    }
    let (lowered_width, lowered_height) = constraint.lower_partial(
        grid.cell_width.or(cell_width),
        grid.cell_height.or(cell_height),
    );
    if cell_width.is_some() {
        grid.cell_width = lowered_width;
    }
    if cell_height.is_some() {
        grid.cell_height = lowered_height;
    }
}

/// Limits a column or row count to what an atlas side holds.
///
/// Returns `None` when nothing fits, or when a pinned count does not.
fn cap_to_atlas(
    count: i32,
    pinned: Option<i32>,
    side: i32,
    cell: i32,
    padding: i32,
) -> Option<i32> {
    let fitting = side.saturating_add(padding) / cell;
    if count <= fitting {
        return Some(count);
    }
    if pinned.is_some() || fitting <= 0 {
        return None;
    }
    Some(fitting)
}

/// Rejects cells whose usable part cannot even hold the pixel distance range.
fn check_cell_room(grid: &GridDimensions, padding: i32, px_range: f64) -> Result<(), PackError> {
    let too_small =
        |cell: Option<i32>| cell.is_some_and(|cell| f64::from(cell - padding) <= px_range);
    if too_small(grid.cell_width) || too_small(grid.cell_height) {
        return Err(PackError::cells_too_small(grid.cell_width, grid.cell_height));
    }
    Ok(())
}
