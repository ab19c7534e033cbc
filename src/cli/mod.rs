pub mod output;
pub mod ui;
