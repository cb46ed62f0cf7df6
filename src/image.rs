//! Simple containers to hold images and compose them into atlas pages.

use std::io::{Read, Write};

use thiserror::Error;

const RGBA8_STRIDE: u32 = 4;

/// An 8-bit RGBA image.
#[derive(Debug, Clone)]
pub(crate) struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();

        assert!(Some(data.len()) == buffer_len(size));

        Self { size, data }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Result<Self, ImageError> {
        let len = buffer_len(size).ok_or(ImageError::TooLarge { size })?;

        Ok(Self::new_rgba8(size, vec![0; len]))
    }

    pub fn decode_png<R: Read>(input: R) -> Result<Self, ImageError> {
        let decoder = png::Decoder::new(input);
        let (info, mut reader) = decoder.read_info()?;

        if info.color_type != png::ColorType::RGBA || info.bit_depth != png::BitDepth::Eight {
            return Err(ImageError::Unsupported {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            });
        }

        let mut data = vec![0; info.buffer_size()];
        reader.next_frame(&mut data)?;

        Ok(Self::new_rgba8((info.width, info.height), data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);
        encoder.set_color(png::ColorType::RGBA);
        encoder.set_depth(png::BitDepth::Eight);

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Copies all of `other` into this image with its top-left corner at
    /// `pos`. `other` must fit entirely inside this image.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(u64::from(pos.0) + u64::from(other.size.0) <= u64::from(self.size.0));
        assert!(u64::from(pos.1) + u64::from(other.size.1) <= u64::from(self.size.1));

        if other.size.0 == 0 {
            return;
        }

        let stride = RGBA8_STRIDE as usize;
        let other_width_bytes = other.size.0 as usize * stride;
        let other_rows = other.data.chunks_exact(other_width_bytes);

        for (other_y, other_row) in other_rows.enumerate() {
            let self_y = pos.1 as usize + other_y;

            // Both images fit in memory, so these offsets can't overflow.
            let start_px = pos.0 as usize + self.size.0 as usize * self_y;

            let start_in_bytes = stride * start_px;
            let end_in_bytes = start_in_bytes + other_row.len();

            let self_row = &mut self.data[start_in_bytes..end_in_bytes];
            self_row.copy_from_slice(other_row);
        }
    }
}

/// Number of bytes in an RGBA8 buffer of the given size, if it is addressable.
fn buffer_len(size: (u32, u32)) -> Option<usize> {
    (size.0 as usize)
        .checked_mul(size.1 as usize)?
        .checked_mul(RGBA8_STRIDE as usize)
}

#[derive(Debug, Error)]
pub(crate) enum ImageError {
    #[error("a {}x{} image is too large to hold in memory", size.0, size.1)]
    TooLarge { size: (u32, u32) },

    #[error("only 8-bit RGBA images are supported, found {color_type:?} at {bit_depth:?}")]
    Unsupported {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error(transparent)]
    Decode {
        #[from]
        source: png::DecodingError,
    },
}
