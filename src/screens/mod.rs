pub mod element_index;
pub mod menu;
pub mod scan;
