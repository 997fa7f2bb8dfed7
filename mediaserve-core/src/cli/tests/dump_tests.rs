use crate::cli::conf::render;
use crate::conf::types::MediaserveConfig;

#[test]
fn render_defaults_to_json() {
    // Arrange
    let config = MediaserveConfig::default();

    // Act
    let out = render(&config, false, false).unwrap();

    // Assert
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["bind"]["port"], 8443);
    assert_eq!(value["tls"]["min_version"], "1.2");
    assert!(value["server"].get("origin").is_none());
}

#[test]
fn render_yaml_when_requested() {
    // Arrange
    let config = MediaserveConfig::default();

    // Act
    let out = render(&config, false, true).unwrap();

    // Assert
    assert!(out.contains("port: 8443"));
    assert!(out.contains("mode: wildcard"));
}
