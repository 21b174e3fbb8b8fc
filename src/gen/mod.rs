pub mod ramped_pulse;
pub mod shape;
pub mod sine;
pub mod waveform;

pub use self::ramped_pulse::*;
pub use self::shape::*;
pub use self::sine::*;
pub use self::waveform::*;
