//! tracefont
pub mod core;
pub mod data;
pub mod export;
pub mod font_source;
pub mod logging;
pub mod outline;
pub mod pipeline;
pub mod raster;
pub mod trace;
