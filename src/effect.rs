pub(crate) mod lut;
pub(crate) mod renderer;
pub(crate) mod texture;
