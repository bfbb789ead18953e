use crate::{CameraError, CameraProvider, Constraints, FrameSource};

/// Holds at most one open source from a provider.
///
/// Selecting a new source always releases the current one first, so two
/// device streams are never open at the same time. The held source is
/// released on drop.
pub struct ActiveSource<P: CameraProvider> {
    provider: P,
    source: Option<P::Source>,
    constraints: Constraints,
}

impl<P: CameraProvider> ActiveSource<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            source: None,
            constraints: Constraints::default(),
        }
    }

    /// Release the current source, then acquire one matching `constraints`.
    ///
    /// The requested constraints are remembered even if acquisition fails,
    /// in which case no source is held.
    pub async fn select(&mut self, constraints: Constraints) -> Result<&mut P::Source, CameraError> {
        self.release();
        self.constraints = constraints;

        log::info!("Acquiring {} camera", constraints.facing);
        let source = self.provider.acquire(&constraints).await.inspect_err(|e| {
            log::error!("Failed to acquire {} camera: {e}", constraints.facing);
        })?;
        Ok(self.source.insert(source))
    }

    /// Re-select with the opposite facing mode.
    pub async fn toggle_facing(&mut self) -> Result<&mut P::Source, CameraError> {
        let next = Constraints {
            facing: self.constraints.facing.toggled(),
        };
        self.select(next).await
    }

    pub fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
            log::info!("Released {} camera", self.constraints.facing);
        }
    }

    pub fn source_mut(&mut self) -> Option<&mut P::Source> {
        self.source.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: CameraProvider> Drop for ActiveSource<P> {
    fn drop(&mut self) {
        self.release();
    }
}
