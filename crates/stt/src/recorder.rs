use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, warn};

use crate::wav::{create_wav_from_samples, TARGET_SAMPLE_RATE};

const FALLBACK_SAMPLE_RATE: u32 = 44100;

/// Microphone capture into an in-memory f32 buffer.
///
/// `cpal::Stream` is not `Send` on every host, so a recorder must be started
/// and stopped on the same thread.
pub struct AudioRecorder {
    samples: Arc<Mutex<Vec<f32>>>,
    stream: Option<cpal::Stream>,
    sample_rate: Option<u32>,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self {
            samples: Arc::new(Mutex::new(Vec::new())),
            stream: None,
            sample_rate: None,
        }
    }

    pub fn start_recording(&mut self) -> Result<()> {
        let device = default_input_device()?;

        // Prefer 16kHz so no resampling is needed
        let config = match device.supported_input_configs() {
            Ok(supported) => {
                let found = supported
                    .filter(|c| {
                        c.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                            && c.max_sample_rate().0 >= TARGET_SAMPLE_RATE
                    })
                    .map(|c| c.with_sample_rate(cpal::SampleRate(TARGET_SAMPLE_RATE)))
                    .next();
                match found {
                    Some(config) => config,
                    None => device.default_input_config()?,
                }
            }
            Err(_) => device.default_input_config()?,
        };

        self.sample_rate = Some(config.sample_rate().0);
        debug!("recording at {}Hz", config.sample_rate().0);

        self.clear_samples();
        let stream = create_input_stream(&device, &config, Arc::clone(&self.samples))?;
        stream.play()?;
        self.stream = Some(stream);

        Ok(())
    }

    pub fn stop_recording(&mut self) -> Vec<f32> {
        if let Some(stream) = self.stream.take() {
            drop(stream);
        }
        self.take_samples()
    }

    pub fn samples_to_wav(&self, samples: &[f32]) -> Result<Vec<u8>> {
        create_wav_from_samples(samples, self.sample_rate())
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.unwrap_or(FALLBACK_SAMPLE_RATE)
    }

    fn clear_samples(&self) {
        if let Ok(mut samples) = self.samples.lock() {
            samples.clear();
        }
    }

    fn take_samples(&self) -> Vec<f32> {
        self.samples
            .lock()
            .map(|mut samples| std::mem::take(&mut *samples))
            .unwrap_or_default()
    }
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_input_device() -> Result<cpal::Device> {
    cpal::default_host()
        .default_input_device()
        .ok_or_else(|| anyhow!("No input device available"))
}

fn create_input_stream(
    device: &cpal::Device,
    config: &cpal::SupportedStreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream> {
    let stream_config = config.config();
    match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(device, &stream_config, samples),
        cpal::SampleFormat::I16 => build_stream::<i16>(device, &stream_config, samples),
        cpal::SampleFormat::U16 => build_stream::<u16>(device, &stream_config, samples),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream>
where
    T: cpal::Sample,
{
    let channels = config.channels as usize;
    let err_fn = |err| warn!("audio stream error: {}", err);

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            push_mono(data, channels, &samples);
        },
        err_fn,
    )?;

    Ok(stream)
}

/// Keeps the first channel of each interleaved frame.
fn push_mono<T>(data: &[T], channels: usize, samples: &Arc<Mutex<Vec<f32>>>)
where
    T: cpal::Sample,
{
    if let Ok(mut samples) = samples.lock() {
        samples.extend(data.iter().step_by(channels.max(1)).map(|s| s.to_f32()));
    }
}
