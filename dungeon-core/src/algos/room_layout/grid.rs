use crate::types::Cell;

use tracing::event;

/// A dense, fixed size 2D arena. Every cell may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;

        Grid {
            width: width.max(0),
            height: height.max(0),
            cells: (0..size).map(|_| None).collect(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn is_boundary(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == 0 || cell.y == 0 || cell.x == self.width - 1 || cell.y == self.height - 1)
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index_of(cell)
            .and_then(|index| self.cells[index].as_ref())
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.index_of(cell)
            .and_then(|index| self.cells[index].as_mut())
    }

    pub fn set(&mut self, cell: Cell, value: T) {
        match self.index_of(cell) {
            Some(index) => self.cells[index] = Some(value),
            None => event!(
                tracing::Level::ERROR,
                "Ignored write outside of a {}x{} grid at {}",
                self.width,
                self.height,
                cell
            ),
        }
    }

    pub fn take(&mut self, cell: Cell) -> Option<T> {
        self.index_of(cell)
            .and_then(|index| self.cells[index].take())
    }

    // Every coordinate of the grid, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = Cell> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut().flatten()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
