//! Drives the address sequencer and the LSB transform over a whole image.
//!
//! Embedding never touches the caller's image: a copy is mutated and returned
//! together with the number of payload bits that did not fit. Extraction
//! reads every visited sample (or stops once enough characters have been
//! collected) and turns the bits back into text.

use crate::{
    binary_stream::BitStream,
    error::Error,
    image::{
        sequencer::{ChannelSelection, PixelAddressSequencer},
        Image,
    },
    logger,
    lsb::{self, LsbCount},
    message::{self, RecoveryPolicy},
    Result,
};

#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingOptions {
    pub lsb_count: u8,
    pub include_red: bool,
    pub include_green: bool,
    pub include_blue: bool,
    pub grayscale: bool,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        Self {
            lsb_count: LsbCount::MIN,
            include_red: true,
            include_green: true,
            include_blue: true,
            grayscale: false,
        }
    }
}

impl EmbeddingOptions {
    pub fn channel_selection(&self) -> ChannelSelection {
        if self.grayscale {
            ChannelSelection::Grayscale
        } else {
            ChannelSelection::rgb(self.include_red, self.include_green, self.include_blue)
        }
    }

    /// Included channels as letters, e.g. "RB". Empty for grayscale.
    pub fn channel_names(&self) -> String {
        match self.channel_selection() {
            ChannelSelection::Grayscale => String::new(),
            ChannelSelection::Rgb(channels) => {
                channels.iter().map(|channel| channel.to_string()).collect()
            }
        }
    }

    fn validate(&self, image: &Image) -> Result<(LsbCount, ChannelSelection)> {
        let lsb_count = LsbCount::try_from(self.lsb_count)?;
        if self.grayscale != image.is_grayscale() {
            return Err(Error::ImageShapeMismatch {
                grayscale_requested: self.grayscale,
                image_is_grayscale: image.is_grayscale(),
            });
        }
        Ok((lsb_count, self.channel_selection()))
    }
}

/// pixels * bits per sample * visited samples per pixel
pub fn capacity_bits(width: u32, height: u32, options: &EmbeddingOptions) -> usize {
    width as usize
        * height as usize
        * options.lsb_count as usize
        * options.channel_selection().samples_per_pixel()
}

pub fn capacity_characters(width: u32, height: u32, options: &EmbeddingOptions) -> usize {
    message::character_count(capacity_bits(width, height, options))
}

/// The message did not fit completely into the image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsufficientCapacity {
    pub unwritten_bits: usize,
    /// characters that were not, or only partially, written
    pub missing_characters: usize,
}

#[derive(Clone, Debug)]
pub struct Embedding {
    image: Image,
    unwritten_bits: usize,
}

impl Embedding {
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn into_image(self) -> Image {
        self.image
    }

    pub fn unwritten_bits(&self) -> usize {
        self.unwritten_bits
    }

    pub fn insufficient_capacity(&self) -> Option<InsufficientCapacity> {
        (self.unwritten_bits > 0).then(|| InsufficientCapacity {
            unwritten_bits: self.unwritten_bits,
            missing_characters: message::character_count(self.unwritten_bits),
        })
    }
}

pub struct Embedder<'a> {
    options: &'a EmbeddingOptions,
}

impl<'a> Embedder<'a> {
    pub fn new(options: &'a EmbeddingOptions) -> Self {
        Embedder { options }
    }

    pub fn embed(&self, image: &Image, text: &str) -> Result<Embedding> {
        let (lsb_count, selection) = self.options.validate(image)?;
        let bits = message::to_bits(text)?;
        logger::log_payload(&bits);

        let sequencer = PixelAddressSequencer::new(image.width(), image.height(), selection);
        log::info!(
            "Embedding {} bits using {} least significant bit(s), capacity is {} bits",
            bits.len(),
            lsb_count,
            sequencer.len() * lsb_count.get() as usize
        );

        let mut output = image.clone();
        let mut groups = bits.groups(lsb_count.get());
        for address in sequencer {
            let Some(group) = groups.next() else {
                break;
            };
            if let Some(sample) = output.sample(&address) {
                output.set_sample(&address, lsb::write_low(sample, group as u16, lsb_count)?);
            }
        }

        let unwritten_bits = groups.remaining_bits();
        if unwritten_bits > 0 {
            log::warn!(
                "The message does not fit into the image, {} bits were not written",
                unwritten_bits
            );
        }
        Ok(Embedding {
            image: output,
            unwritten_bits,
        })
    }
}

pub struct Extractor<'a> {
    options: &'a EmbeddingOptions,
    max_characters: Option<usize>,
    policy: RecoveryPolicy,
}

impl<'a> Extractor<'a> {
    pub fn new(options: &'a EmbeddingOptions) -> Self {
        Extractor {
            options,
            max_characters: None,
            policy: RecoveryPolicy::default(),
        }
    }

    /// stop after this many characters instead of reading the whole image
    pub fn with_max_characters(mut self, max_characters: Option<usize>) -> Self {
        self.max_characters = max_characters;
        self
    }

    pub fn with_recovery_policy(mut self, policy: RecoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn extract(&self, image: &Image) -> Result<String> {
        let stream = self.extract_bits(image)?;
        Ok(message::from_bits(&stream, self.policy))
    }

    fn extract_bits(&self, image: &Image) -> Result<BitStream> {
        let (lsb_count, selection) = self.options.validate(image)?;
        let sequencer = PixelAddressSequencer::new(image.width(), image.height(), selection);
        let bit_limit = self.max_characters.map(message::bit_count);
        let capacity = sequencer.len() * lsb_count.get() as usize;
        let mut stream = BitStream::with_capacity(bit_limit.unwrap_or(capacity).min(capacity));

        for address in sequencer {
            if bit_limit.is_some_and(|limit| stream.len() >= limit) {
                log::debug!("Stopped reading after {} bits", stream.len());
                break;
            }
            if let Some(sample) = image.sample(&address) {
                stream.push_bits(lsb::read_low(sample, lsb_count), lsb_count.get());
            }
        }

        if let Some(limit) = bit_limit {
            stream.truncate(limit);
        }
        Ok(stream)
    }
}

/// Hide `text` in a copy of `image`.
pub fn encode(image: &Image, text: &str, options: &EmbeddingOptions) -> Result<Embedding> {
    Embedder::new(options).embed(image, text)
}

/// Read text back from `image`, replacing non-ASCII bytes with spaces.
pub fn decode(
    image: &Image,
    options: &EmbeddingOptions,
    max_characters: Option<usize>,
) -> Result<String> {
    Extractor::new(options)
        .with_max_characters(max_characters)
        .extract(image)
}
