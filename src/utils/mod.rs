pub mod collections;
pub mod text;

pub use collections::{has_duplicates, same_elements, toggle_value};
pub use text::humanize_snake_case;
