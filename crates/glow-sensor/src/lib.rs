pub mod sensor;
pub mod mpu6050;
pub mod synthetic;
pub mod clock;
pub mod source;
pub mod producer;

pub use sensor::{NoSensor, TiltSensor};
pub use mpu6050::{Mpu6050, SensorError};
pub use synthetic::SyntheticWave;
pub use clock::{Clock, ManualClock, StdDelay, SystemClock};
pub use source::{DetectionState, TiltSource};
pub use producer::TiltProducer;
