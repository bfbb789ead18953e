use pawcam_camera::{CameraConfig, CameraError, Constraints, FacingMode};

#[test]
fn test_config_defaults() {
    let config = CameraConfig::default();

    assert_eq!(config.device_for(FacingMode::User), "/dev/video0");
    assert_eq!(config.device_for(FacingMode::Environment), "/dev/video1");
    assert_eq!(config.width(), 640);
    assert_eq!(config.height(), 480);
    assert_eq!(config.fps(), 30);
    assert_eq!(config.buffer_count(), 4);
}

#[test]
fn test_config_builder() {
    let config = CameraConfig::default()
        .with_user_device("/dev/video2")
        .with_environment_device("/dev/video3")
        .with_width(1280)
        .with_height(720)
        .with_fps(15)
        .with_buffer_count(2);

    assert_eq!(config.device_for(FacingMode::User), "/dev/video2");
    assert_eq!(config.device_for(FacingMode::Environment), "/dev/video3");
    assert_eq!((config.width(), config.height()), (1280, 720));
    assert_eq!(config.fps(), 15);
    assert_eq!(config.buffer_count(), 2);
}

#[test]
fn test_facing_mode_toggle_and_names() {
    assert_eq!(FacingMode::User.toggled(), FacingMode::Environment);
    assert_eq!(FacingMode::Environment.toggled(), FacingMode::User);
    assert_eq!(FacingMode::User.to_string(), "user");
    assert_eq!("environment".parse::<FacingMode>().unwrap(), FacingMode::Environment);
}

#[test]
fn test_facing_mode_parse_error() {
    match "side".parse::<FacingMode>() {
        Err(CameraError::UnknownFacing(name)) => assert_eq!(name, "side"),
        other => panic!("Expected CameraError::UnknownFacing, got {other:?}"),
    }
    let err = "side".parse::<FacingMode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown facing mode: side");
}

#[test]
fn test_default_constraints_face_the_user() {
    assert_eq!(Constraints::default().facing, FacingMode::User);
}
