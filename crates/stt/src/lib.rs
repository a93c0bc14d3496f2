pub mod capture;
pub mod listener;
pub mod providers;
#[cfg(feature = "microphone")]
pub mod recorder;
pub mod traits;
pub mod wav;

pub use capture::capture_wav;
pub use listener::Listener;
#[cfg(feature = "microphone")]
pub use recorder::AudioRecorder;
pub use traits::{TranscriptionProvider, TranscriptionResult};

pub use providers::groq::GroqProvider;
