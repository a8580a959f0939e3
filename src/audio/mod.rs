pub mod channels;
pub mod decode;
