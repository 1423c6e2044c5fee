pub mod wav;

pub use wav::{encode, AudioFormat, WavError, HEADER_LEN};
