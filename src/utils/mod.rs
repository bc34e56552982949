pub mod data_uri;
pub mod sanitize;

pub use sanitize::strip_markup;
