//! Method parameterization: the compile-time "codec descriptor" for each supported
//! LHA/LZH compression method identifier.
//!
//! `-lh4-` and `-lh6-` don't get their own physical ring buffers. The reference LHA
//! implementation decodes them with the `-lh5-` and `-lh7-` decoders respectively (a larger
//! ring than strictly necessary never changes the decoded output, since a smaller-window
//! encoder can never emit an offset that wouldn't fit in the larger one too); they differ
//! from their host method only in [`LhaDecoderConfig::WINDOW_HINT`], the suggested read-ahead
//! buffer size advertised to callers.
use crate::ringbuf::RingArrayBuf;

/// Associated constants describing one LZSS/Huffman method variant.
///
/// This plays the role the original C reference gives to its per-method function-pointer
/// vtable (`init`, `read`, state size, output buffer size, window hint): the same information,
/// resolved at compile time through the type system instead of at runtime through indirection.
pub trait LhaDecoderConfig {
    /// The physical ring buffer backing this method's history window.
    type RingBuffer: crate::ringbuf::RingBuffer;
    /// `log2` of the ring buffer size.
    const HISTORY_BITS: u32;
    /// Bit width used to encode the number of offset-table codes.
    const OFFSET_BITS: u32;
    /// Suggested read-ahead buffer size for callers; not used by the decoder itself.
    const WINDOW_HINT: usize;
}

/// The physical decoder shared by `-lh4-` and `-lh5-`: an 8 KiB ring, 4-bit offset codes.
#[derive(Debug)]
pub struct Lh5DecoderCfg;

impl LhaDecoderConfig for Lh5DecoderCfg {
    type RingBuffer = RingArrayBuf<[u8; 1 << 13]>;
    const HISTORY_BITS: u32 = 13;
    const OFFSET_BITS: u32 = 4;
    const WINDOW_HINT: usize = (1 << 13) / 2;
}

/// The physical decoder shared by `-lh6-` and `-lh7-`: a 64 KiB ring, 5-bit offset codes.
#[derive(Debug)]
pub struct Lh7DecoderCfg;

impl LhaDecoderConfig for Lh7DecoderCfg {
    type RingBuffer = RingArrayBuf<[u8; 1 << 16]>;
    const HISTORY_BITS: u32 = 16;
    const OFFSET_BITS: u32 = 5;
    const WINDOW_HINT: usize = (1 << 16) / 2;
}

/// Marker used only to give `-lh4-` its own (smaller) [`LhaDecoderConfig::WINDOW_HINT`]
/// while sharing every other constant and the physical ring buffer with `-lh5-`.
#[derive(Debug)]
pub struct Lh4DecoderCfg;

impl LhaDecoderConfig for Lh4DecoderCfg {
    type RingBuffer = <Lh5DecoderCfg as LhaDecoderConfig>::RingBuffer;
    const HISTORY_BITS: u32 = Lh5DecoderCfg::HISTORY_BITS;
    const OFFSET_BITS: u32 = Lh5DecoderCfg::OFFSET_BITS;
    const WINDOW_HINT: usize = (1 << 13) / 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lh4_shares_lh5_physical_window_but_not_hint() {
        assert_eq!(Lh4DecoderCfg::HISTORY_BITS, Lh5DecoderCfg::HISTORY_BITS);
        assert_eq!(Lh4DecoderCfg::OFFSET_BITS, Lh5DecoderCfg::OFFSET_BITS);
        assert_ne!(Lh4DecoderCfg::WINDOW_HINT, Lh5DecoderCfg::WINDOW_HINT);
        assert_eq!(Lh4DecoderCfg::WINDOW_HINT, 2048);
        assert_eq!(Lh5DecoderCfg::WINDOW_HINT, 4096);
    }

    #[test]
    fn lh7_window_hint() {
        assert_eq!(Lh7DecoderCfg::WINDOW_HINT, 32768);
    }
}
