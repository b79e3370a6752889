pub mod unit_source;
