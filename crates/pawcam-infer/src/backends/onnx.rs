use crate::{Backend, Device, InferError, ModelSource, Session, TensorInfo};
use ndarray::ArrayD;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use pawcam_base::Tensor;
use std::collections::HashMap;

/// ONNX Runtime through `ort`.
#[derive(Debug, Clone, Default)]
pub struct OnnxBackend {
    device: Device,
    intra_threads: Option<usize>,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self {
            device,
            intra_threads: None,
        }
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let device = &self.device;
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::ModelLoad(format!("failed to create session builder: {e}"))
        })?;

        builder = match device {
            Device::Cpu => {
                log::debug!("Using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                log::info!("CUDA execution provider requested (device_id={device_id}), available: {available}");
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        if let Some(threads) = self.intra_threads {
            builder = builder.with_intra_threads(threads).map_err(|e| {
                InferError::ModelLoad(format!("failed to set intra-op threads: {e}"))
            })?;
        }

        let session = match &model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let inputs: Vec<TensorInfo> = session
            .inputs
            .iter()
            .map(|input| {
                TensorInfo::new(
                    input.name.clone(),
                    input
                        .input_type
                        .tensor_shape()
                        .map(|shape| shape.to_vec())
                        .unwrap_or_default(),
                )
            })
            .collect();
        let outputs: Vec<TensorInfo> = session
            .outputs
            .iter()
            .map(|output| {
                TensorInfo::new(
                    output.name.clone(),
                    output
                        .output_type
                        .tensor_shape()
                        .map(|shape| shape.to_vec())
                        .unwrap_or_default(),
                )
            })
            .collect();

        log::info!(
            "Loaded {model} on {device}: inputs [{}], outputs [{}]",
            join(&inputs),
            join(&outputs)
        );

        Ok(Box::new(OnnxSession {
            session,
            inputs,
            outputs,
        }))
    }
}

fn join(infos: &[TensorInfo]) -> String {
    infos
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct OnnxSession {
    session: OrtSession,
    inputs: Vec<TensorInfo>,
    outputs: Vec<TensorInfo>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let expected_names = || -> Vec<String> { self.inputs.iter().map(|i| i.name.clone()).collect() };

        // classifier models take exactly one image tensor
        let [(name, tensor)] = inputs else {
            return Err(InferError::InvalidInput {
                name: format!("{} inputs", inputs.len()),
                expected_names: expected_names(),
            });
        };
        if !self.inputs.iter().any(|i| i.name == *name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: expected_names(),
            });
        }

        let array = tensor_to_ndarray(tensor.clone())?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {e}")))?;
        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Backend(format!("inference failed: {e}")))?;

        let mut result = HashMap::new();
        for output in &self.outputs {
            let array = outputs[output.name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::UnsupportedDtype(format!("output '{}' is not f32: {e}", output.name))
                })?;
            result.insert(output.name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn inputs(&self) -> &[TensorInfo] {
        &self.inputs
    }

    fn outputs(&self) -> &[TensorInfo] {
        &self.outputs
    }
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data)
        .map_err(|e| InferError::Backend(format!("failed to create ndarray from tensor: {e}")))
}

pub fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
