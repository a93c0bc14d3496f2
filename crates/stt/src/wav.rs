//! 16kHz mono WAV encoding for captured samples.

use anyhow::Result;

pub const TARGET_SAMPLE_RATE: u32 = 16000;

pub fn create_wav_from_samples(samples: &[f32], input_rate: u32) -> Result<Vec<u8>> {
    let spec = wav_spec_16khz_mono();

    // 16-bit samples + WAV header
    let mut buffer = Vec::with_capacity(samples.len() * 2 + 44);

    {
        let mut writer = hound::WavWriter::new(std::io::Cursor::new(&mut buffer), spec)?;

        if input_rate == spec.sample_rate {
            for &sample in samples {
                writer.write_sample(convert_to_i16(sample))?;
            }
        } else {
            for sample in resample(samples, input_rate, spec.sample_rate) {
                writer.write_sample(convert_to_i16(sample))?;
            }
        }

        writer.finalize()?;
    }

    Ok(buffer)
}

fn wav_spec_16khz_mono() -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Nearest-sample resampling; good enough for speech recognition.
fn resample(samples: &[f32], input_rate: u32, output_rate: u32) -> impl Iterator<Item = f32> + '_ {
    let step = input_rate as f64 / output_rate as f64;
    let count = (samples.len() as f64 / step).floor() as usize;
    (0..count).filter_map(move |i| samples.get((i as f64 * step) as usize).copied())
}

fn convert_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
