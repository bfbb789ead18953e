use std::fmt;

/// Memory order of the channel axis in an image tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `[batch, channels, height, width]`, one contiguous plane per channel.
    Planar,
    /// `[batch, height, width, channels]`, channels interleaved per pixel.
    Interleaved,
}

/// Typed descriptor of a 4D image tensor.
///
/// The fields are named independently of the layout; `dims()` yields them in
/// the order the layout stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub batch: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    pub layout: Layout,
}

impl Shape {
    pub fn planar(batch: usize, channels: usize, height: usize, width: usize) -> Self {
        Self {
            batch,
            channels,
            height,
            width,
            layout: Layout::Planar,
        }
    }

    pub fn interleaved(batch: usize, height: usize, width: usize, channels: usize) -> Self {
        Self {
            batch,
            channels,
            height,
            width,
            layout: Layout::Interleaved,
        }
    }

    /// Pixels per channel plane.
    pub fn spatial(&self) -> usize {
        self.height * self.width
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.batch * self.channels * self.spatial()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dims(&self) -> [usize; 4] {
        match self.layout {
            Layout::Planar => [self.batch, self.channels, self.height, self.width],
            Layout::Interleaved => [self.batch, self.height, self.width, self.channels],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.dims();
        let tag = match self.layout {
            Layout::Planar => "NCHW",
            Layout::Interleaved => "NHWC",
        };
        write!(f, "[{a}, {b}, {c}, {d}] ({tag})")
    }
}
