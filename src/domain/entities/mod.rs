pub mod table;
pub mod unit;
