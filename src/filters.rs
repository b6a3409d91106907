mod text_link;

pub use text_link::{text_contains_link, text_is_not_command};
