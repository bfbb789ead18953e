use crate::InferError;
use pawcam_base::{Layout, Shape};
use std::fmt;

/// Name and declared dimensions of a model input or output.
///
/// Symbolic dimensions are reported as `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorInfo {
    pub name: String,
    pub shape: Vec<i64>,
}

impl TensorInfo {
    pub fn new(name: impl Into<String>, shape: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

impl fmt::Display for TensorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.name, self.shape)
    }
}

/// Spatial size to use when the model leaves height or width symbolic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSize {
    pub width: usize,
    pub height: usize,
}

/// The single-input, single-output contract of an image classifier, resolved
/// from a session's declared metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub input_name: String,
    pub input_shape: Shape,
    pub output_name: String,
    pub output_shape: Vec<i64>,
}

const RGB_CHANNELS: i64 = 3;
const CLASS_COUNT: usize = 2;

/// A fully static output must hold exactly `CLASS_COUNT` scores. With symbolic
/// axes, the static axes must still leave room for them.
fn check_output(output: &TensorInfo) -> Result<(), InferError> {
    let symbolic = output.shape.iter().any(|&dim| dim <= 0);
    let fixed: usize = output
        .shape
        .iter()
        .filter_map(|&dim| static_dim(dim))
        .try_fold(1usize, |product, dim| product.checked_mul(dim))
        .unwrap_or(usize::MAX);

    let fits = if symbolic {
        CLASS_COUNT % fixed == 0
    } else {
        fixed == CLASS_COUNT
    };
    if !fits {
        return Err(InferError::ModelLoad(format!(
            "output {output} does not hold {CLASS_COUNT} class scores"
        )));
    }
    Ok(())
}

fn static_dim(dim: i64) -> Option<usize> {
    (dim > 0).then_some(dim as usize)
}

fn spatial_dim(axis: &str, declared: i64, requested: Option<usize>) -> Result<usize, InferError> {
    match (static_dim(declared), requested) {
        (Some(declared), _) => Ok(declared),
        (None, Some(requested)) if requested > 0 => Ok(requested),
        (None, Some(_)) => Err(InferError::ModelLoad(format!("input {axis} must be positive"))),
        (None, None) => Err(InferError::ModelLoad(format!(
            "model input {axis} is symbolic; configure input_width and input_height"
        ))),
    }
}

impl ModelInfo {
    /// Resolve the input `Shape` and layout from declared metadata.
    ///
    /// The channel axis decides the layout: `[N,3,H,W]` is planar and
    /// `[N,H,W,3]` is interleaved. A symbolic batch resolves to 1; symbolic
    /// height or width must come from `size`. A `size` that disagrees with a
    /// static declared dimension is a `ShapeMismatch`. The output must hold
    /// two class scores.
    pub fn resolve(
        inputs: &[TensorInfo],
        outputs: &[TensorInfo],
        size: Option<InputSize>,
    ) -> Result<Self, InferError> {
        let [input] = inputs else {
            return Err(InferError::ModelLoad(format!(
                "expected exactly one model input, found {}",
                inputs.len()
            )));
        };
        let [output] = outputs else {
            return Err(InferError::ModelLoad(format!(
                "expected exactly one model output, found {}",
                outputs.len()
            )));
        };
        check_output(output)?;

        let &[batch, d1, d2, d3] = input.shape.as_slice() else {
            return Err(InferError::ModelLoad(format!(
                "input {input} is not a 4D image tensor"
            )));
        };

        match static_dim(batch) {
            None | Some(1) => {}
            Some(n) => {
                return Err(InferError::ModelLoad(format!(
                    "input {input} has fixed batch size {n}, only 1 is supported"
                )));
            }
        }

        let (layout, height, width) = if d1 == RGB_CHANNELS {
            (Layout::Planar, d2, d3)
        } else if d3 == RGB_CHANNELS {
            (Layout::Interleaved, d1, d2)
        } else {
            return Err(InferError::ModelLoad(format!(
                "input {input} has no 3-channel axis"
            )));
        };

        let shape_of = |height, width| match layout {
            Layout::Planar => Shape::planar(1, 3, height, width),
            Layout::Interleaved => Shape::interleaved(1, height, width, 3),
        };

        let height = spatial_dim("height", height, size.map(|s| s.height))?;
        let width = spatial_dim("width", width, size.map(|s| s.width))?;
        let input_shape = shape_of(height, width);

        if let Some(size) = size {
            let requested = shape_of(size.height, size.width);
            if requested != input_shape {
                return Err(InferError::ShapeMismatch {
                    expected: input_shape.dims().to_vec(),
                    got: requested.dims().to_vec(),
                });
            }
        }

        Ok(ModelInfo {
            input_name: input.name.clone(),
            input_shape,
            output_name: output.name.clone(),
            output_shape: output.shape.clone(),
        })
    }

    pub fn input_width(&self) -> usize {
        self.input_shape.width
    }

    pub fn input_height(&self) -> usize {
        self.input_shape.height
    }
}
