#![allow(dead_code)]

use pawcam::{Backend, ModelSource, Session, TensorInfo};
use pawcam_base::Tensor;
use pawcam_infer::InferError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared knobs and counters of a `MockBackend` and the sessions it loads.
#[derive(Default)]
pub struct MockState {
    pub scores: Mutex<Vec<f32>>,
    pub fail_load: AtomicBool,
    pub failures_left: AtomicUsize,
    pub delay: Mutex<Duration>,
    pub loads: AtomicUsize,
    pub runs: AtomicUsize,
    pub last_input: Mutex<Option<Tensor<f32>>>,
}

impl MockState {
    pub fn set_scores(&self, scores: &[f32]) {
        *self.scores.lock().unwrap() = scores.to_vec();
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<Tensor<f32>> {
        self.last_input.lock().unwrap().clone()
    }
}

/// A backend whose sessions return fixed scores.
pub struct MockBackend {
    pub state: Arc<MockState>,
    inputs: Vec<TensorInfo>,
    outputs: Vec<TensorInfo>,
}

impl MockBackend {
    pub fn new(input_shape: Vec<i64>, scores: &[f32]) -> Self {
        let state = MockState::default();
        state.set_scores(scores);
        Self {
            state: Arc::new(state),
            inputs: vec![TensorInfo::new("input", input_shape)],
            outputs: vec![TensorInfo::new("output", vec![1, 2])],
        }
    }

    /// `[1, 3, 32, 32]` in, two scores out.
    pub fn planar(scores: &[f32]) -> Self {
        Self::new(vec![1, 3, 32, 32], scores)
    }

    pub fn into_parts(self) -> (Arc<dyn Backend>, Arc<MockState>) {
        let state = Arc::clone(&self.state);
        (Arc::new(self), state)
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        self.state.loads.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_load.load(Ordering::SeqCst) {
            return Err(InferError::ModelLoad(format!("cannot parse {model}")));
        }
        Ok(Box::new(MockSession {
            state: Arc::clone(&self.state),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        }))
    }
}

pub struct MockSession {
    state: Arc<MockState>,
    inputs: Vec<TensorInfo>,
    outputs: Vec<TensorInfo>,
}

impl Session for MockSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        self.state.runs.fetch_add(1, Ordering::SeqCst);

        let delay = *self.state.delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let failures = &self.state.failures_left;
        if failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(InferError::Backend("transient engine fault".to_string()));
        }

        let [(name, tensor)] = inputs else {
            panic!("mock session expects one input, got {}", inputs.len());
        };
        assert_eq!(*name, self.inputs[0].name);
        *self.state.last_input.lock().unwrap() = Some(tensor.clone());

        let scores = self.state.scores.lock().unwrap().clone();
        let output = Tensor::new(vec![1, scores.len()], scores).unwrap();
        Ok(HashMap::from([(self.outputs[0].name.clone(), output)]))
    }

    fn inputs(&self) -> &[TensorInfo] {
        &self.inputs
    }

    fn outputs(&self) -> &[TensorInfo] {
        &self.outputs
    }
}
