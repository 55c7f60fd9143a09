mod spinner;
mod style;

pub use spinner::{Spinner, suspend};
pub use style::Style;
