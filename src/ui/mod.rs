/// UI module exports

mod components;
pub mod popup;
mod settings;
mod stats;
