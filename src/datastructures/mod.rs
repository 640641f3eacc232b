pub mod ring_buffer;

pub use ring_buffer::{History, HISTORY_LENGTH};
