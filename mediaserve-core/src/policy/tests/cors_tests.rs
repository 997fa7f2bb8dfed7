use crate::conf::types::{CorsMode, CorsSpec};
use crate::policy::{CorsPolicy, PolicyError};

#[test]
fn wildcard_allows_everyone() {
    // Arrange
    let policy = CorsPolicy::from_spec(&CorsSpec::default()).unwrap();

    // Act
    let value = policy.allow_origin("https://a.example");

    // Assert
    assert_eq!(value.unwrap(), "*");
    assert!(!policy.varies_by_origin());
}

#[test]
fn fixed_ignores_request_origin() {
    // Arrange
    let spec = CorsSpec {
        mode: CorsMode::Fixed,
        origin: Some("https://media.example".to_string()),
        ..Default::default()
    };
    let policy = CorsPolicy::from_spec(&spec).unwrap();

    // Act
    let value = policy.allow_origin("https://other.example");

    // Assert
    assert_eq!(value.unwrap(), "https://media.example");
}

#[test]
fn fixed_without_origin_is_an_error() {
    // Arrange
    let spec = CorsSpec {
        mode: CorsMode::Fixed,
        ..Default::default()
    };

    // Act
    let err = CorsPolicy::from_spec(&spec).unwrap_err();

    // Assert
    assert!(matches!(err, PolicyError::MissingFixedOrigin));
}

#[test]
fn reflect_echoes_any_origin_when_unrestricted() {
    // Arrange
    let policy = CorsPolicy::Reflect { allowed: vec![] };

    // Act
    let value = policy.allow_origin("https://a.example");

    // Assert
    assert_eq!(value.unwrap(), "https://a.example");
    assert!(policy.varies_by_origin());
}

#[test]
fn reflect_respects_allow_list() {
    // Arrange
    let policy = CorsPolicy::Reflect {
        allowed: vec!["https://a.example".to_string()],
    };

    // Act
    let allowed = policy.allow_origin("https://A.example");
    let denied = policy.allow_origin("https://b.example");

    // Assert
    assert_eq!(allowed.unwrap(), "https://A.example");
    assert!(denied.is_none());
}
