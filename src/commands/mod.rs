pub mod misc;
pub mod trending;

pub use misc::{generate_completions, open_in_browser};
pub use trending::{render_json, render_text, save_output};
