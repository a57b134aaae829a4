use anyhow::{ensure, Result};
use std::collections::VecDeque;

/// Byte value of a perfectly silent sample
pub const SILENCE_MIDPOINT: u8 = 128;

const MIN_FFT_SIZE: usize = 32;
const MAX_FFT_SIZE: usize = 32_768;

/// Rolling time-domain view of a live audio signal
///
/// Keeps the most recent `fft_size` samples converted to unsigned bytes with
/// 128 as the silence midpoint. Snapshots expose the latest
/// `fft_size / 2` bytes (the frequency bin count).
#[derive(Debug)]
pub struct Analyser {
    fft_size: usize,
    ring: VecDeque<u8>,
}

impl Analyser {
    /// Create an analyser with the given window size
    ///
    /// The size must be a power of two in `32..=32768`.
    pub fn new(fft_size: usize) -> Result<Self> {
        ensure!(
            fft_size.is_power_of_two() && (MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&fft_size),
            "fft size must be a power of two in {}..={}, got {}",
            MIN_FFT_SIZE,
            MAX_FFT_SIZE,
            fft_size
        );
        Ok(Self {
            fft_size,
            ring: VecDeque::with_capacity(fft_size),
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of samples a time-domain snapshot holds
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Append samples, keeping only the latest `fft_size` of them
    pub fn push_samples(&mut self, samples: &[i16]) {
        let len = samples.len();

        // If the incoming batch alone exceeds the window, keep its tail
        if len >= self.fft_size {
            self.ring.clear();
            self.ring
                .extend(samples[len - self.fft_size..].iter().map(|&s| sample_to_byte(s)));
            return;
        }

        let to_remove = (self.ring.len() + len).saturating_sub(self.fft_size);
        if to_remove > 0 {
            self.ring.drain(0..to_remove);
        }
        self.ring.extend(samples.iter().map(|&s| sample_to_byte(s)));
    }

    /// Fill `out` with the most recent bytes, newest last
    ///
    /// Pads the front with the silence midpoint while the ring is still
    /// filling. `out` is expected to be `frequency_bin_count` long.
    pub fn byte_time_domain(&self, out: &mut [u8]) {
        let need = out.len();
        let have = self.ring.len().min(need);
        let pad = need - have;

        for slot in out[..pad].iter_mut() {
            *slot = SILENCE_MIDPOINT;
        }

        let start = self.ring.len() - have;
        for (slot, byte) in out[pad..].iter_mut().zip(self.ring.iter().skip(start)) {
            *slot = *byte;
        }
    }
}

/// Map an i16 PCM sample onto the unsigned byte domain (0 → 128)
fn sample_to_byte(sample: i16) -> u8 {
    ((sample as i32 + 32_768) / 256) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_to_byte_midpoint() {
        assert_eq!(sample_to_byte(0), SILENCE_MIDPOINT);
        assert_eq!(sample_to_byte(i16::MIN), 0);
        assert_eq!(sample_to_byte(i16::MAX), 255);
    }

    #[test]
    fn test_rejects_invalid_fft_size() {
        assert!(Analyser::new(0).is_err());
        assert!(Analyser::new(1000).is_err(), "1000 is not a power of two");
        assert!(Analyser::new(65_536).is_err(), "above the allowed range");
        assert!(Analyser::new(2048).is_ok());
    }

    #[test]
    fn test_snapshot_pads_with_midpoint() {
        let mut analyser = Analyser::new(64).expect("valid fft size");
        analyser.push_samples(&[i16::MAX; 8]);

        let mut out = vec![0u8; analyser.frequency_bin_count()];
        analyser.byte_time_domain(&mut out);

        assert!(
            out[..24].iter().all(|&b| b == SILENCE_MIDPOINT),
            "underfilled ring should pad with the midpoint"
        );
        assert!(out[24..].iter().all(|&b| b == 255));
    }

    #[test]
    fn test_ring_keeps_latest_window() {
        let mut analyser = Analyser::new(32).expect("valid fft size");
        analyser.push_samples(&vec![0i16; 32]);
        analyser.push_samples(&[i16::MAX; 16]);

        let mut out = vec![0u8; 16];
        analyser.byte_time_domain(&mut out);

        assert!(
            out.iter().all(|&b| b == 255),
            "snapshot should expose the newest samples"
        );
    }
}
