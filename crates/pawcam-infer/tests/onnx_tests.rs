use pawcam_infer::backends::OnnxBackend;
use pawcam_infer::{Backend, Device, InferError, ModelSource};

#[test]
fn test_onnx_backend_name() {
    let backend = OnnxBackend::default();
    assert_eq!(backend.name(), "onnx");
    assert_eq!(backend.device(), &Device::Cpu);
}

#[test]
fn test_tensor_to_ndarray_conversion() {
    use pawcam_base::Tensor;
    use pawcam_infer::backends::onnx::tensor_to_ndarray;

    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let array = tensor_to_ndarray(tensor).unwrap();

    assert_eq!(array.shape(), &[2, 3]);
    assert_eq!(array.len(), 6);
    assert_eq!(array[[0, 0]], 1.0);
    assert_eq!(array[[1, 2]], 6.0);
}

#[test]
fn test_ndarray_to_tensor_conversion() {
    use ndarray::ArrayD;
    use pawcam_infer::backends::onnx::ndarray_to_tensor;

    let array =
        ArrayD::<f32>::from_shape_vec(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let tensor = ndarray_to_tensor(array.view()).unwrap();

    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_load_missing_file() {
    let backend = OnnxBackend::new(Device::Cpu);
    let result = backend.load_model(ModelSource::from("/nonexistent/catvsdog.onnx"));
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[test]
fn test_load_garbage_bytes() {
    let backend = OnnxBackend::new(Device::Cpu).with_intra_threads(1);
    let result = backend.load_model(ModelSource::Memory(b"not an onnx model".to_vec()));
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[cfg(not(feature = "cuda"))]
#[test]
fn test_cuda_without_feature_is_unsupported() {
    let backend = OnnxBackend::new(Device::Cuda { device_id: 0 });
    let result = backend.load_model(ModelSource::Memory(Vec::new()));
    assert!(matches!(
        result,
        Err(InferError::UnsupportedDevice(Device::Cuda { device_id: 0 }))
    ));
}
