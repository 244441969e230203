pub mod a1_notation;
pub mod cell_position;
pub mod cell_range;
pub mod column;
pub mod grid_size;
pub mod row;

pub mod prelude {
    pub use super::a1_notation::{A1Notation, FromA1Notation, ToA1Notation};
    pub use super::cell_position::CellPosition;
    pub use super::cell_range::CellRange;
    pub use super::column::Column;
    pub use super::grid_size::GridSize;
    pub use super::row::Row;
}
