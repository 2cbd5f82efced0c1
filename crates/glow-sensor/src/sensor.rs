/// A source of raw tilt readings.
///
/// `try_init` is called once; its answer decides for the whole process
/// whether `try_read` is ever used. A `None` from `try_read` is a transient
/// miss and must not change any published state.
pub trait TiltSensor {
    /// Attempt the one-time handshake. Returns whether the sensor answered.
    fn try_init(&mut self) -> bool;

    /// Attempt one reading, in G.
    fn try_read(&mut self) -> Option<f32>;
}

/// Stand-in for hosts with no accelerometer attached. Never answers the
/// handshake, so the tilt source falls back to the synthetic wave.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl TiltSensor for NoSensor {
    fn try_init(&mut self) -> bool {
        false
    }

    fn try_read(&mut self) -> Option<f32> {
        None
    }
}

impl<T: TiltSensor + ?Sized> TiltSensor for Box<T> {
    fn try_init(&mut self) -> bool {
        (**self).try_init()
    }

    fn try_read(&mut self) -> Option<f32> {
        (**self).try_read()
    }
}
