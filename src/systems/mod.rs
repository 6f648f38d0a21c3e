pub mod export;
pub mod grid;
pub mod interaction;
pub mod tree;
pub mod ui;
