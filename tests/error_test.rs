use std::io;

use cyclegen::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::MissingRegistrationMarker { path: "include/LinkDef.h".to_string() };
    assert_eq!(
        err.to_string(),
        "Registration file 'include/LinkDef.h' is not in the right format: no '#endif' line found."
    );

    let err = Error::InvalidCycleName { name: "A::B::C".to_string(), reason: "nested".to_string() };
    assert_eq!(err.to_string(), "Invalid cycle name 'A::B::C': nested.");

    let err = Error::AmbiguousRegistrationMarker { path: "LinkDef.h".to_string(), count: 2 };
    assert_eq!(
        err.to_string(),
        "Registration file 'LinkDef.h' is not in the right format: 2 '#endif' lines found, expected exactly one."
    );

    let err = Error::MissingExample { name: "JobConfig.dtd".to_string(), location: "'config'".to_string() };
    assert_eq!(err.to_string(), "Expected to find example file 'JobConfig.dtd' in 'config'.");
}
