mod cell_codec;
mod map_io;
mod save_error;

pub use cell_codec::{decode_cell, encode_cell, CELL_RECORD_LEN};
pub use map_io::{decode_map, encode_map, load_from_path, save_to_path, MAP_HEADER_LEN};
pub use save_error::SaveError;
