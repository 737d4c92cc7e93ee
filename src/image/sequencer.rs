use super::{Channel, PixelAddress};

/// Which samples of a pixel are visited
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelSelection {
    Grayscale,
    /// included color channels, kept in R, G, B order without duplicates
    Rgb(Vec<Channel>),
}

impl ChannelSelection {
    pub fn rgb(include_red: bool, include_green: bool, include_blue: bool) -> Self {
        let flags = [include_red, include_green, include_blue];
        let channels = Channel::ALL
            .iter()
            .zip(flags)
            .filter_map(|(&channel, included)| included.then_some(channel))
            .collect();
        Self::Rgb(channels)
    }

    pub fn samples_per_pixel(&self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb(channels) => channels.len(),
        }
    }
}

/// Lazily walks sample addresses in raster order.
///
/// Rows are visited top to bottom, columns left to right, and for color images
/// the selected channels in R, G, B order. Excluded channels are never yielded.
#[derive(Clone, Debug)]
pub struct PixelAddressSequencer {
    width: u32,
    height: u32,
    selection: ChannelSelection,
    row: u32,
    column: u32,
    channel_index: usize,
}

impl PixelAddressSequencer {
    pub fn new(width: u32, height: u32, selection: ChannelSelection) -> Self {
        PixelAddressSequencer {
            width,
            height,
            selection,
            row: 0,
            column: 0,
            channel_index: 0,
        }
    }

    /// rewind to the first address
    pub fn restart(&mut self) {
        self.row = 0;
        self.column = 0;
        self.channel_index = 0;
    }

    fn total(&self) -> usize {
        self.width as usize * self.height as usize * self.selection.samples_per_pixel()
    }

    fn consumed(&self) -> usize {
        let pixel_index = self.row as usize * self.width as usize + self.column as usize;
        pixel_index * self.selection.samples_per_pixel() + self.channel_index
    }

    fn advance_pixel(&mut self) {
        self.channel_index = 0;
        self.column += 1;
        if self.column >= self.width {
            self.column = 0;
            self.row += 1;
        }
    }
}

impl Iterator for PixelAddressSequencer {
    type Item = PixelAddress;

    fn next(&mut self) -> Option<PixelAddress> {
        if self.row >= self.height || self.width == 0 {
            return None;
        }
        let (row, column) = (self.row, self.column);
        let channel = match &self.selection {
            ChannelSelection::Grayscale => None,
            ChannelSelection::Rgb(channels) if channels.is_empty() => return None,
            ChannelSelection::Rgb(channels) => Some(channels[self.channel_index]),
        };
        self.channel_index += 1;
        if self.channel_index >= self.selection.samples_per_pixel() {
            self.advance_pixel();
        }
        Some(PixelAddress {
            row,
            column,
            channel,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.consumed());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PixelAddressSequencer {}
