//! Grid of focusable cells.
//!
//! A [`GridView`] manages a rows × cols grid of logical cells, each backed
//! by a component obtained on demand from a [`CellProvider`]. Cells are
//! laid out row-major and registered with the underlying
//! [`FocusView`](super::FocusView) in scan order, so the flat index of
//! cell `(row, col)` is `row * cols + col` everywhere: layout, focus, and
//! bring-into-view all agree.

use trellis_core::{Object, ObjectId};
use trellis_draw::{Rect, Size};

use super::base::ComponentBase;
use super::focus_view::FocusView;
use super::store::{ComponentAccess, ComponentStore};
use super::traits::{Component, DrawContext};

/// Supplies (and refreshes) the component backing each grid cell.
pub trait CellProvider {
    /// Create or update the component for cell `(row, col)`.
    ///
    /// `existing` is the id handed out for this cell on the previous
    /// refresh, if any; return it back to reuse the component, or a new id
    /// to replace it. `has_focus` reports whether this is the focused cell.
    fn cell_component(
        &mut self,
        store: &mut ComponentStore,
        row: usize,
        col: usize,
        has_focus: bool,
        existing: Option<ObjectId>,
    ) -> ObjectId;
}

/// A scrollable grid of focusable cells.
pub struct GridView {
    view: FocusView,
    rows: usize,
    cols: usize,
    /// Fixed cell width in pixels; `0.0` means each cell's natural width.
    cell_width: f32,
    /// Fixed cell height in pixels; `0.0` means each row's natural height.
    cell_height: f32,
    /// Cell component ids, row-major. `None` until the first refresh.
    cells: Vec<Option<ObjectId>>,
}

impl GridView {
    /// Create a grid view.
    ///
    /// `cell_width`/`cell_height` of `0.0` mean "use the cell component's
    /// own size at refresh time" for that axis.
    pub fn new(
        store: &mut ComponentStore,
        rows: usize,
        cols: usize,
        cell_width: f32,
        cell_height: f32,
    ) -> Self {
        Self {
            view: FocusView::new(store),
            rows,
            cols,
            cell_width,
            cell_height,
            cells: vec![None; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The underlying focus view.
    pub fn focus_view(&self) -> &FocusView {
        &self.view
    }

    /// The underlying focus view, mutably.
    pub fn focus_view_mut(&mut self) -> &mut FocusView {
        &mut self.view
    }

    /// Flat index of cell `(row, col)`, or `None` when out of range.
    ///
    /// Row-major: `row * cols + col`.
    pub fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// The component backing cell `(row, col)`, if refreshed.
    pub fn cell(&self, row: usize, col: usize) -> Option<ObjectId> {
        self.cells.get(self.cell_index(row, col)?).copied().flatten()
    }

    /// The focused cell as `(row, col)`, if any.
    pub fn focused_cell(&self) -> Option<(usize, usize)> {
        if self.cols == 0 {
            return None;
        }
        self.view
            .focused_index()
            .map(|index| (index / self.cols, index % self.cols))
    }

    /// Rebuild every cell from the provider and lay the grid out.
    ///
    /// Each cell is fetched (or reused) via
    /// [`CellProvider::cell_component`], positioned row-major, and the
    /// whole set is registered with the focus container in scan order.
    /// With auto sizing (`0.0`), a cell's size at refresh time is taken as
    /// its natural size.
    pub fn refresh_content(&mut self, store: &mut ComponentStore, provider: &mut dyn CellProvider) {
        let focused = self.focused_cell();

        let mut ids = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let index = row * self.cols + col;
                let existing = self.cells.get(index).copied().flatten();
                let has_focus = focused == Some((row, col));
                let id = provider.cell_component(store, row, col, has_focus, existing);
                ids.push(id);
            }
        }

        let mut y = 0.0_f32;
        for row in 0..self.rows {
            let row_ids = &ids[row * self.cols..(row + 1) * self.cols];
            let row_height = if self.cell_height == 0.0 {
                row_ids
                    .iter()
                    .filter_map(|&id| store.get(id))
                    .map(|c| c.bounds().height())
                    .fold(0.0_f32, f32::max)
            } else {
                self.cell_height
            };

            let mut x = 0.0_f32;
            for &id in row_ids {
                let natural: Size = store.get(id).map(|c| c.bounds().size).unwrap_or(Size::ZERO);
                let width = if self.cell_width == 0.0 {
                    natural.width
                } else {
                    self.cell_width
                };
                if let Some(cell) = store.get_mut(id) {
                    cell.set_bounds(Rect::new(x, y, width, row_height));
                }
                x += width;
            }
            y += row_height;
        }

        self.cells = ids.iter().copied().map(Some).collect();
        self.view.sync_children(store, ids);
        tracing::debug!(target: "trellis::component", rows = self.rows, cols = self.cols, "grid content refreshed");
    }

    /// Focus cell `(row, col)`, panning it into view.
    ///
    /// Out-of-range coordinates leave the focus state unchanged and return
    /// `false`. `transition_frames == 0` jumps immediately.
    pub fn set_cell_focus(
        &mut self,
        store: &dyn ComponentAccess,
        row: usize,
        col: usize,
        transition_frames: u32,
    ) -> bool {
        let Some(index) = self.cell_index(row, col) else {
            tracing::trace!(target: "trellis::component", row, col, "cell focus out of range, ignored");
            return false;
        };
        self.view.set_component_focus(store, index, transition_frames)
    }

    /// Advance an armed bring-into-view transition by one frame.
    pub fn update_transition(&mut self, store: &dyn ComponentAccess) {
        self.view.update_transition(store);
    }
}

impl Object for GridView {
    fn object_id(&self) -> ObjectId {
        self.view.object_id()
    }
}

impl Component for GridView {
    fn component_base(&self) -> &ComponentBase {
        self.view.component_base()
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        self.view.component_base_mut()
    }

    fn resized(&mut self, new_bounds: Rect) {
        self.view.resized(new_bounds);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        self.view.draw(ctx);
    }
}
