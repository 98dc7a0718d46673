use std::{array, fmt, ops};


pub const NUM_CELLS: usize = 9;

pub const EMPTY_CELL_IMAGE_PATH: &str = "images/empty-cell.jpg";

// Zero-based cell index, row-major, `0..=8`. The wire protocol addresses
// cells by the decimal string form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellId(u8);

impl CellId {
    pub fn from_index(idx: usize) -> Option<Self> {
        (idx < NUM_CELLS).then_some(CellId(idx as u8))
    }

    // Parses the `text` payload of a SHOW message.
    pub fn from_wire(s: &str) -> Option<Self> {
        s.parse::<usize>().ok().and_then(Self::from_index)
    }

    pub fn to_index(self) -> usize { self.0.into() }

    pub fn all() -> impl Iterator<Item = CellId> {
        (0..NUM_CELLS).map(|idx| CellId(idx as u8))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}


// What a cell currently displays. `path` is the asset address the cell
// image is loaded from; whether the figure resolves to an existing asset
// is not checked anywhere.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CellImage {
    Empty,
    Figure(String),
}

impl CellImage {
    pub fn figure(&self) -> Option<&str> {
        match self {
            CellImage::Empty => None,
            CellImage::Figure(name) => Some(name),
        }
    }

    pub fn path(&self) -> String {
        match self {
            CellImage::Empty => EMPTY_CELL_IMAGE_PATH.to_owned(),
            CellImage::Figure(name) => format!("images/{name}.jpg"),
        }
    }
}


// The nine display cells. Built once per client, on the first game start;
// a replay resets the images but keeps the cells.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CellGrid {
    cells: [CellImage; NUM_CELLS],
}

impl CellGrid {
    pub fn new() -> Self {
        CellGrid { cells: array::from_fn(|_| CellImage::Empty) }
    }

    pub fn reset(&mut self) { self.cells.fill(CellImage::Empty); }

    pub fn set_image(&mut self, cell: CellId, image: CellImage) {
        self.cells[cell.to_index()] = image;
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &CellImage)> {
        CellId::all().zip(self.cells.iter())
    }
}

impl ops::Index<CellId> for CellGrid {
    type Output = CellImage;
    fn index(&self, cell: CellId) -> &Self::Output { &self.cells[cell.to_index()] }
}
