use crate::PipelineError;
use pawcam_base::{Layout, Shape, Tensor, TensorError};
use pawcam_image::{RGBA_CHANNELS, RawFrame};

/// A normalized image tensor together with the shape it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    pub shape: Shape,
    pub data: Vec<f32>,
}

impl InputTensor {
    /// Dense tensor with dims in layout order.
    pub fn to_tensor(&self) -> Result<Tensor<f32>, TensorError> {
        Tensor::new(self.shape.dims().to_vec(), self.data.clone())
    }
}

/// Turns RGBA frames into `[0, 1]` float tensors of a fixed `Shape`.
///
/// Alpha is dropped. Planar output stores all red values, then all green,
/// then all blue; interleaved output stores `r, g, b` per pixel.
#[derive(Debug, Clone, Copy)]
pub struct TensorEncoder {
    shape: Shape,
}

impl TensorEncoder {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn encode(&self, frame: &RawFrame) -> Result<InputTensor, PipelineError> {
        let shape = self.shape;
        if shape.batch != 1 || shape.channels != 3 {
            return Err(PipelineError::ShapeMismatch(format!(
                "encoder needs a single RGB image shape, got {shape}"
            )));
        }
        if frame.width() != shape.width || frame.height() != shape.height {
            return Err(PipelineError::ShapeMismatch(format!(
                "frame is {}x{}, model expects {}x{}",
                frame.width(),
                frame.height(),
                shape.width,
                shape.height
            )));
        }

        let plane = shape.spatial();
        let mut data = vec![0.0f32; shape.len()];
        for (i, px) in frame.data().chunks_exact(RGBA_CHANNELS).enumerate() {
            let [r, g, b] = [px[0], px[1], px[2]].map(|v| v as f32 / 255.0);
            match shape.layout {
                Layout::Planar => {
                    data[i] = r;
                    data[i + plane] = g;
                    data[i + 2 * plane] = b;
                }
                Layout::Interleaved => {
                    data[3 * i] = r;
                    data[3 * i + 1] = g;
                    data[3 * i + 2] = b;
                }
            }
        }

        Ok(InputTensor { shape, data })
    }
}
