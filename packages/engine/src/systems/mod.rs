//! Systems: the stateless pieces of the needle protocol plus the built-in
//! rigid-body backend.

pub mod batch;
pub mod camera;
pub mod crossing;
pub mod estimator;
pub mod line_field;
pub mod needle_factory;
pub mod physics_backend;
pub mod rest_detector;
pub mod rigid_body;
pub mod rigid_body_system;
