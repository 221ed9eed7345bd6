//! Whole-signal FFT resampling.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

/// Resample mono audio to a new rate in the frequency domain.
///
/// Transforms the full signal, truncates or zero-pads the spectrum to the
/// new length, and transforms back. Output length is exactly
/// `round(samples.len() * to_rate / from_rate)`, so durations are
/// preserved to within one sample. Treats the input as one period of a
/// periodic signal, which is the usual trade-off for offline conversion
/// of whole files.
///
/// # Arguments
///
/// * `samples` - mono samples in [-1.0, 1.0]
/// * `from_rate` - source sample rate in Hz
/// * `to_rate` - target sample rate in Hz
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == to_rate {
        return samples.to_vec();
    }

    let n_in = samples.len();
    let n_out = (n_in as f64 * to_rate as f64 / from_rate as f64).round() as usize;
    if n_out == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_in);
    let ifft = planner.plan_fft_inverse(n_out);

    let mut spectrum: Vec<Complex<f32>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut spectrum);

    // Rebuild the spectrum at the new length: keep the low half of the
    // positive and negative frequencies, drop or zero the rest.
    let mut stretched = vec![Complex::new(0.0f32, 0.0); n_out];
    let n_min = n_in.min(n_out);
    let positive = n_min / 2 + 1;

    stretched[..positive].copy_from_slice(&spectrum[..positive]);

    if n_min > 2 {
        let negative = n_min - positive;
        for i in 0..negative {
            stretched[n_out - negative + i] = spectrum[n_in - negative + i];
        }
    }

    // The shared Nyquist bin needs special treatment to keep the output
    // real-valued: fold its mirror in when shrinking, split it when
    // growing.
    if n_min % 2 == 0 {
        let half = n_min / 2;
        if n_out < n_in {
            stretched[half] += spectrum[n_in - half];
        } else if n_out > n_in {
            stretched[half] *= 0.5;
            stretched[n_out - half] = stretched[half];
        }
    }

    ifft.process(&mut stretched);

    // rustfft leaves both transforms unnormalized; a single 1/n_in factor
    // reproduces ifft(spectrum) * (n_out / n_in).
    let scale = 1.0 / n_in as f32;
    stretched.iter().map(|c| c.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(rate: u32, frames: usize, freq: f32, amplitude: f32) -> Vec<f32> {
        (0..frames)
            .map(|i| amplitude * (2.0 * PI * freq * i as f32 / rate as f32).sin())
            .collect()
    }

    #[test]
    fn equal_rates_pass_through() {
        let input = vec![0.1, -0.2, 0.3, -0.4];
        assert_eq!(resample(&input, 16000, 16000), input);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(resample(&[], 44100, 16000).is_empty());
    }

    #[test]
    fn output_length_follows_rate_ratio() {
        let cases = [
            (132_300, 44_100, 16_000, 48_000),
            (801, 8_000, 16_000, 1_602),
            (12_345, 22_050, 16_000, 8_958),
            (100, 48_000, 16_000, 33),
        ];
        for (n_in, from, to, expected) in cases {
            let out = resample(&vec![0.0; n_in], from, to);
            assert_eq!(out.len(), expected, "{n_in} samples {from}Hz -> {to}Hz");
        }
    }

    #[test]
    fn downsampled_sine_keeps_shape() {
        // 440Hz over exactly one second is periodic in the window, so the
        // spectral method reproduces it without edge error.
        let input = sine(44_100, 44_100, 440.0, 0.5);

        let output = resample(&input, 44_100, 16_000);

        assert_eq!(output.len(), 16_000);
        let expected = sine(16_000, 16_000, 440.0, 0.5);
        for (i, (got, want)) in output.iter().zip(expected.iter()).enumerate() {
            assert!((got - want).abs() < 0.02, "sample {i}: {got} vs {want}");
        }
    }

    #[test]
    fn upsampled_sine_keeps_shape() {
        let input = sine(8_000, 8_000, 250.0, 0.4);

        let output = resample(&input, 8_000, 16_000);

        assert_eq!(output.len(), 16_000);
        let expected = sine(16_000, 16_000, 250.0, 0.4);
        for (got, want) in output.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 0.02);
        }
    }

    #[test]
    fn dc_level_is_preserved() {
        let input = vec![0.25; 1000];

        let output = resample(&input, 44_100, 16_000);

        assert_eq!(output.len(), 363);
        for &sample in &output {
            assert!((sample - 0.25).abs() < 1e-3);
        }
    }
}
