/// ASCII conversion engine for lumascii.
///
/// Plans the sampling step, averages each cell and maps the mean
/// luminosity to a character.
pub mod mapper;
pub mod pipeline;
pub mod region;
pub mod step;

pub use pipeline::render;
pub use step::{BindingAxis, StepSize, compute_step};
