use crate::geometry::Cell;

/// Ordered snake body, head first.
///
/// A snake always has at least one cell. Each tick builds a new `Snake`
/// instead of shifting this one in place.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Self { body: vec![head] }
    }

    /// Builds a snake from its cells, head first. Returns `None` for an empty body.
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let body: Vec<Cell> = cells.into_iter().map(Into::into).collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// The cell directly behind the head, if the snake has one.
    pub fn second(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Every cell but the head.
    pub fn rest(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// New snake with `head` prepended and the tail dropped unless `keep_tail`.
    pub(crate) fn advanced(&self, head: Cell, keep_tail: bool) -> Self {
        let kept = if keep_tail { self.body.len() } else { self.body.len() - 1 };
        let mut body = Vec::with_capacity(kept + 1);
        body.push(head);
        body.extend_from_slice(&self.body[..kept]);
        Self { body }
    }
}
