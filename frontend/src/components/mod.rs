pub mod roster_table;
pub mod slot_board;
pub mod slot_row;
