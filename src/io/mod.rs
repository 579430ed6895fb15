//! Reading and writing trial tables as delimited text.

pub mod reader;
pub mod writer;

pub use reader::{
    read_speed_coordinates, read_speed_coordinates_from, read_trial_coordinates,
    read_trial_coordinates_from,
};
pub use writer::{write_table, write_table_to};
