use std::path::PathBuf;

use lit_ngin::{
    Error,
    config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DemoConfig},
};

#[test]
fn no_arguments_give_the_defaults() {
    let config = DemoConfig::from_args(["lit-ngin"]).unwrap();
    assert_eq!(config, DemoConfig::default());
    assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    assert!(config.texture_paths().is_empty());
}

#[test]
fn flags_and_texture_paths_are_parsed() {
    let config = DemoConfig::from_args([
        "lit-ngin",
        "--width",
        "640",
        "--height",
        "480",
        "--assets",
        "res",
        "--max-frames",
        "3",
        "brick.png",
        "/abs/wood.jpg",
    ])
    .unwrap();

    assert_eq!(config.width, 640);
    assert_eq!(config.height, 480);
    assert_eq!(config.max_frames, Some(3));
    assert_eq!(
        config.texture_paths(),
        vec![PathBuf::from("res/brick.png"), PathBuf::from("/abs/wood.jpg")]
    );
}

#[test]
fn zero_sized_window_is_rejected() {
    let err = DemoConfig::from_args(["lit-ngin", "--width", "0"]).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn unknown_flags_are_config_errors() {
    let err = DemoConfig::from_args(["lit-ngin", "--fullscreen"]).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
