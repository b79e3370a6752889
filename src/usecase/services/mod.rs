pub mod pagination;
pub mod table_engine;
pub mod unit_commands;
pub mod unit_store;
