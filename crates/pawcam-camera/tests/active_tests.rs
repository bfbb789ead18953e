use pawcam_camera::{
    ActiveSource, CameraError, CameraProvider, Constraints, FacingMode, FrameSource,
};
use pawcam_image::RawFrame;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl Counters {
    fn open_streams(&self) -> usize {
        self.opened.load(Ordering::SeqCst) - self.closed.load(Ordering::SeqCst)
    }
}

struct MockCamera {
    facing: FacingMode,
    counters: Arc<Counters>,
    released: bool,
}

impl FrameSource for MockCamera {
    async fn snapshot(&mut self) -> Result<RawFrame, CameraError> {
        if self.released {
            return Err(CameraError::Released);
        }
        let shade = match self.facing {
            FacingMode::User => 10,
            FacingMode::Environment => 200,
        };
        Ok(RawFrame::filled(4, 3, [shade, shade, shade, 255]))
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

struct MockProvider {
    counters: Arc<Counters>,
    has_back_camera: bool,
}

impl MockProvider {
    fn new(counters: &Arc<Counters>) -> Self {
        Self {
            counters: Arc::clone(counters),
            has_back_camera: true,
        }
    }
}

impl CameraProvider for MockProvider {
    type Source = MockCamera;

    async fn acquire(&mut self, constraints: &Constraints) -> Result<MockCamera, CameraError> {
        if constraints.facing == FacingMode::Environment && !self.has_back_camera {
            return Err(CameraError::DeviceUnavailable("no back camera".to_string()));
        }
        // opening while another stream is live would leak a handle
        assert_eq!(self.counters.open_streams(), 0, "previous stream still open");
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MockCamera {
            facing: constraints.facing,
            counters: Arc::clone(&self.counters),
            released: false,
        })
    }
}

#[tokio::test]
async fn test_select_opens_one_stream() {
    let counters = Arc::new(Counters::default());
    let mut active = ActiveSource::new(MockProvider::new(&counters));

    active.select(Constraints::default()).await.unwrap();
    assert!(active.is_active());
    assert_eq!(counters.open_streams(), 1);
}

#[tokio::test]
async fn test_switching_twice_leaves_one_stream() {
    let counters = Arc::new(Counters::default());
    let mut active = ActiveSource::new(MockProvider::new(&counters));

    active.select(Constraints::facing(FacingMode::User)).await.unwrap();
    active.toggle_facing().await.unwrap();
    active.toggle_facing().await.unwrap();

    assert_eq!(counters.opened.load(Ordering::SeqCst), 3);
    assert_eq!(counters.closed.load(Ordering::SeqCst), 2);
    assert_eq!(counters.open_streams(), 1);
    assert_eq!(active.constraints().facing, FacingMode::User);
}

#[tokio::test]
async fn test_toggle_changes_source_content() {
    let counters = Arc::new(Counters::default());
    let mut active = ActiveSource::new(MockProvider::new(&counters));

    let front = active.select(Constraints::default()).await.unwrap();
    assert_eq!(front.snapshot().await.unwrap().pixel(0, 0), Some([10, 10, 10, 255]));

    let back = active.toggle_facing().await.unwrap();
    assert_eq!(back.snapshot().await.unwrap().pixel(0, 0), Some([200, 200, 200, 255]));
}

#[tokio::test]
async fn test_failed_acquire_leaves_nothing_open() {
    let counters = Arc::new(Counters::default());
    let mut provider = MockProvider::new(&counters);
    provider.has_back_camera = false;
    let mut active = ActiveSource::new(provider);

    active.select(Constraints::default()).await.unwrap();
    let result = active.toggle_facing().await;

    assert!(matches!(result, Err(CameraError::DeviceUnavailable(_))));
    assert!(!active.is_active());
    assert_eq!(counters.open_streams(), 0);
    assert_eq!(active.constraints().facing, FacingMode::Environment);

    // flipping back recovers the front camera
    active.toggle_facing().await.unwrap();
    assert_eq!(counters.open_streams(), 1);
}

#[tokio::test]
async fn test_release_and_drop_close_the_stream() {
    let counters = Arc::new(Counters::default());
    let mut active = ActiveSource::new(MockProvider::new(&counters));

    active.select(Constraints::default()).await.unwrap();
    active.release();
    assert_eq!(counters.open_streams(), 0);
    assert!(active.source_mut().is_none());

    // a second release is a no-op
    active.release();
    assert_eq!(counters.closed.load(Ordering::SeqCst), 1);

    active.select(Constraints::default()).await.unwrap();
    drop(active);
    assert_eq!(counters.open_streams(), 0);
}
