//! # Decoding algorithms.
//!
//! The core Huffman + LZSS state machine for the `-lh4-`/`-lh5-`/`-lh6-`/`-lh7-` methods,
//! generalized over [`LhaDecoderConfig`](crate::method::LhaDecoderConfig) so the same code
//! drives both physical ring sizes.
use core::fmt;
use core::num::NonZeroU32;
use std::io::Read;

use crate::bitstream::*;
use crate::error::{DecodeError, DecodeResult};
use crate::method::{Lh4DecoderCfg, Lh5DecoderCfg, Lh7DecoderCfg, LhaDecoderConfig};
use crate::ringbuf::RingBuffer;
use crate::statictree::*;

const NUM_COMMANDS: usize = 510;
const NUM_TEMP_CODELEN: usize = 20;

/// The trait implemented by decoders that turn a compressed byte stream into decompressed
/// output on demand.
pub trait Decoder<R> {
    /// Unwraps and returns the inner reader.
    fn into_inner(self) -> R;
    /// Fills the whole `buf` with decoded data.
    ///
    /// Either the whole buffer is filled, or an error is returned before any of the failing
    /// command's bytes are written.
    fn fill_buffer(&mut self, buf: &mut [u8]) -> DecodeResult<()>;
}

/// A generic decoder for the LHA "new-style" (v2) compression methods.
pub struct LhaV2Decoder<C: LhaDecoderConfig, R> {
    bit_reader: BitStream<R>,
    command_tree: HuffTree,
    offset_tree: HuffTree,
    remaining_commands: u16,
    copy_progress: Option<(u32, NonZeroU32)>,
    ringbuf: Box<C::RingBuffer>,
}

/// A decoder for the `-lh4-` compression method (shares its physical decoder with `-lh5-`).
pub type Lh4Decoder<R> = LhaV2Decoder<Lh4DecoderCfg, R>;
/// A decoder for the `-lh5-` compression method.
pub type Lh5Decoder<R> = LhaV2Decoder<Lh5DecoderCfg, R>;
/// A decoder for the `-lh6-` compression method (shares its physical decoder with `-lh7-`).
pub type Lh6Decoder<R> = LhaV2Decoder<Lh7DecoderCfg, R>;
/// A decoder for the `-lh7-` compression method.
pub type Lh7Decoder<R> = LhaV2Decoder<Lh7DecoderCfg, R>;

impl<C: LhaDecoderConfig, R: Read> LhaV2Decoder<C, R> {
    /// Creates a new decoder reading compressed bytes from `rd`.
    pub fn new(rd: R) -> LhaV2Decoder<C, R> {
        let bit_reader = BitStream::new(rd);
        let ringbuf = Default::default();
        let command_tree = HuffTree::with_capacity(NUM_COMMANDS * 2);
        let offset_tree = HuffTree::with_capacity(NUM_TEMP_CODELEN * 2);
        LhaV2Decoder {
            bit_reader,
            ringbuf,
            command_tree,
            offset_tree,
            remaining_commands: 0,
            copy_progress: None,
        }
    }

    // reads a code length value, usually 0..=7 but might be higher (unary-extended)
    fn read_code_length(&mut self) -> DecodeResult<u8> {
        let mut len: u8 = self.bit_reader.read_bits(3)?;
        if len == 7 {
            while self.bit_reader.read_bit()? {
                len = len.checked_add(1).ok_or(DecodeError::Malformed("code length overflow"))?;
            }
        }
        Ok(len)
    }

    // skip_range: 0, 1 or 2 -- the "skip N entries" escape codes in the temp table
    fn read_code_skip(&mut self, skip_range: u16) -> DecodeResult<usize> {
        let (bits, increment) = match skip_range {
            0 => return Ok(1),
            1 => (4, 3),  // 3..=18
            _ => (9, 20), // 20..=531
        };
        let skip: usize = self.bit_reader.read_bits(bits)?;
        Ok(skip + increment)
    }

    fn read_temp_tree(&mut self) -> DecodeResult<()> {
        let mut code_lengths = [0u8; NUM_TEMP_CODELEN];

        let num_codes: usize = self.bit_reader.read_bits(5)?;

        if num_codes == 0 {
            let code = self.bit_reader.read_bits(5)?;
            self.offset_tree.set_single(code);
            return Ok(());
        }

        let num_codes = num_codes.min(NUM_TEMP_CODELEN);

        for p in code_lengths[0..num_codes.min(3)].iter_mut() {
            *p = self.read_code_length()?;
        }
        // the preserved "skip 2 bits" quirk between the 3rd temp-table length and the rest:
        // only present once the 3rd length (index 2) has actually been read.
        let start = if num_codes > 2 {
            let skip: usize = self.bit_reader.read_bits(2)?;
            (3 + skip).min(num_codes)
        } else {
            num_codes
        };

        for p in code_lengths[start..num_codes].iter_mut() {
            *p = self.read_code_length()?;
        }

        self.offset_tree.build_tree(&code_lengths[0..num_codes])
            .map_err(DecodeError::Malformed)?;
        Ok(())
    }

    fn read_command_tree(&mut self) -> DecodeResult<()> {
        let mut code_lengths = [0u8; NUM_COMMANDS];

        let num_codes: usize = self.bit_reader.read_bits(9)?;

        if num_codes == 0 {
            let code = self.bit_reader.read_bits(9)?;
            self.command_tree.set_single(code);
            return Ok(());
        }

        let num_codes = num_codes.min(NUM_COMMANDS);

        let mut index = 0;
        'outer: while index < num_codes {
            for (n, p) in code_lengths[index..num_codes].iter_mut().enumerate() {
                match self.offset_tree.read_entry(&mut self.bit_reader)? {
                    skip_range @ 0..=2 => {
                        let skip_count = self.read_code_skip(skip_range)?;
                        index += n + skip_count;
                        continue 'outer;
                    }
                    code => {
                        *p = (code - 2) as u8;
                    }
                }
            }
            break;
        }

        self.command_tree.build_tree(&code_lengths[0..num_codes])
            .map_err(DecodeError::Malformed)?;
        Ok(())
    }

    fn read_offset_tree(&mut self) -> DecodeResult<()> {
        debug_assert!(NUM_TEMP_CODELEN >= C::HISTORY_BITS as usize);
        let mut code_lengths = [0u8; NUM_TEMP_CODELEN];

        let num_codes: usize = self.bit_reader.read_bits(C::OFFSET_BITS)?;

        if num_codes == 0 {
            let code = self.bit_reader.read_bits(C::OFFSET_BITS)?;
            self.offset_tree.set_single(code);
            return Ok(());
        }

        let num_codes = num_codes.min(C::HISTORY_BITS as usize);

        for p in code_lengths[0..num_codes].iter_mut() {
            *p = self.read_code_length()?;
        }

        self.offset_tree.build_tree(&code_lengths[0..num_codes])
            .map_err(DecodeError::Malformed)?;
        Ok(())
    }

    fn begin_new_block(&mut self) -> DecodeResult<()> {
        self.remaining_commands = self.bit_reader.read_bits(16)?;
        self.read_temp_tree()?;
        self.read_command_tree()?;
        self.read_offset_tree()
    }

    #[inline]
    fn read_command(&mut self) -> DecodeResult<u16> {
        Ok(self.command_tree.read_entry(&mut self.bit_reader)?)
    }

    #[inline]
    fn read_offset(&mut self) -> DecodeResult<u32> {
        match self.offset_tree.read_entry(&mut self.bit_reader)?.into() {
            //   bits => 0 ->    0
            //   bits => 1 ->    1
            res @ 0..=1 => Ok(res),
            //   bits => 2 ->   1x
            //   bits => 3 ->  1xx
            //   bits => 4 -> 1xxx
            bits => {
                let res: u32 = self.bit_reader.read_bits(bits - 1)?;
                Ok(res | (1 << (bits - 1)))
            }
        }
    }

    // copies `count` bytes of history starting at `-offset-1` from the ring cursor into as
    // much of `target` as fits, carrying the remainder forward in `self.copy_progress`.
    fn copy_from_history<'a, I>(&mut self, target: I, offset: usize, count: usize) -> DecodeResult<()>
        where I: Iterator<Item = &'a mut u8> + ExactSizeIterator
    {
        let history_iter = self.ringbuf.iter_from_offset(offset);
        let count_after = count - target.len().min(count);
        for (t, s) in target.zip(history_iter).take(count) {
            *t = s;
        }
        self.copy_progress = NonZeroU32::new(count_after as u32).map(|count| (offset as u32, count));
        Ok(())
    }
}

impl<C: LhaDecoderConfig, R: Read> Decoder<R> for LhaV2Decoder<C, R> {
    fn into_inner(self) -> R {
        self.bit_reader.into_inner()
    }

    fn fill_buffer(&mut self, buf: &mut [u8]) -> DecodeResult<()> {
        let buflen = buf.len();
        let mut target = buf.iter_mut();
        if let Some((offset, count)) = self.copy_progress {
            self.copy_from_history(&mut target, offset as usize, count.get() as usize)?;
        }

        while let Some(dst) = target.next() {
            while self.remaining_commands == 0 {
                self.begin_new_block()?;
            }

            self.remaining_commands -= 1;

            match self.read_command()? {
                code @ 0..=0xff => {
                    let value = code as u8;
                    *dst = value;
                    self.ringbuf.push(value);
                }
                count => {
                    let offset = self.read_offset()?;
                    let index = buflen - target.len() - 1;
                    target = buf[index..].iter_mut();
                    self.copy_from_history(&mut target, offset as usize, (count - 0x100 + 3).into())?;
                }
            }
        }
        Ok(())
    }
}

impl<C: LhaDecoderConfig, R> fmt::Debug for LhaV2Decoder<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LhaV2Decoder")
            .field("command_tree", &self.command_tree)
            .field("offset_tree", &self.offset_tree)
            .field("remaining_commands", &self.remaining_commands)
            .field("copy_progress", &self.copy_progress)
            .finish_non_exhaustive()
    }
}
