pub mod derive;
pub mod model;

pub use derive::{freshness_percent, temperature_color, ColorToken, TemperatureClass};
pub use model::{ShelfViewModel, ShelfViewState, ViewEvent};
