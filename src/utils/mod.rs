pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::get_data_dir;
pub use paths::{format_path_with_tilde, history_file_path, validate_file_size};
pub use terminal::{strip_ansi_codes, strip_control_chars};
