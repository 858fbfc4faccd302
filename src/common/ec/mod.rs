mod block;
mod encoder;
mod galois;

pub use block::implement_error_correction;
