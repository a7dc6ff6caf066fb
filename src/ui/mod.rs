pub mod theme;

pub use theme::{apply_progress_bar_color, apply_scrollbar_color, menu_item_style};
