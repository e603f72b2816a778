//! Platform setup errors
//!
//! The simulation never fails; only wiring the game into the page can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing page element #{0}")]
    MissingElement(&'static str),
    #[error("element #{0} has the wrong type")]
    WrongElementType(&'static str),
    #[error("failed to create render surface: {0}")]
    Surface(String),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),
    #[error("failed to create GPU device: {0}")]
    Device(String),
    #[error("javascript call failed: {0}")]
    Js(String),
}
