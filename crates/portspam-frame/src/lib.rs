//! Wire framing for the covert channel: the error-correcting/detecting
//! codes and the two frame shapes built on top of them (spec.md §4.8).

pub mod berger;
mod data_frame;
mod error;
pub mod hamming;
mod request_frame;

pub use data_frame::{
    DATA_FRAME_SIZE, DecodedDataFrame, decode as decode_data_frame, encode as encode_data_frame,
};
pub use error::FrameError;
pub use request_frame::{
    REQUEST_FRAME_SIZE, RequestFrame, decode as decode_request_frame,
    encode as encode_request_frame,
};
