pub use camera::Camera;
pub use fly_camera::{CameraMovement, FlyCamera};

mod camera;
pub mod fly_camera;
