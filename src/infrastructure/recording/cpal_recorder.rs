//! Cross-platform microphone recorder using cpal
//!
//! Captures speech-optimized audio for recognition:
//! - 16kHz sample rate (or resampling from device rate)
//! - Mono channel
//! - 16-bit PCM in a WAV container
//!
//! A voice-activity monitor runs alongside the capture and ends the
//! session on sustained silence or the hard duration cap.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::sync::Notify;
use tokio::time::{interval, Duration as TokioDuration};

use crate::application::ports::{CaptureError, VoiceRecorder};
use crate::domain::audio::wav::SAMPLE_RATE as TARGET_SAMPLE_RATE;
use crate::domain::audio::{pcm, wav, AudioData, AudioMimeType};
use crate::domain::capture::{
    RecordingSession, StopReason, VadConfig, Verdict, VoiceActivityMonitor,
};

/// How often the voice-activity monitor samples the signal level
const MONITOR_TICK_MS: u64 = 50;

/// Shared state between the capture thread, the monitor task, and the
/// recorder handle
struct RecorderShared {
    /// Frames captured so far (mono, i16, at device sample rate)
    session: StdMutex<RecordingSession>,
    /// Level of the most recent capture window, dBFS bits
    window_db_bits: AtomicU32,
    /// Recording state; flipping to false releases the device
    is_recording: AtomicBool,
    /// Elapsed time in milliseconds
    elapsed_ms: AtomicU64,
    /// Why the monitor ended the session, if it has
    stop_reason: StdMutex<Option<StopReason>>,
    /// Wakes auto_stopped waiters
    stop_notify: Notify,
}

impl RecorderShared {
    fn new() -> Self {
        Self {
            session: StdMutex::new(RecordingSession::new()),
            window_db_bits: AtomicU32::new(pcm::SILENCE_FLOOR_DB.to_bits()),
            is_recording: AtomicBool::new(false),
            elapsed_ms: AtomicU64::new(0),
            stop_reason: StdMutex::new(None),
            stop_notify: Notify::new(),
        }
    }

    fn set_window_db(&self, db: f32) {
        self.window_db_bits.store(db.to_bits(), Ordering::SeqCst);
    }

    fn window_db(&self) -> f32 {
        f32::from_bits(self.window_db_bits.load(Ordering::SeqCst))
    }
}

/// Microphone recorder with voice-activity auto-stop.
///
/// The cpal stream is owned by a dedicated capture thread (cpal::Stream
/// is not Send); dropping the stream when the recording flag clears is
/// the single release point for the device, so a second `stop` has
/// nothing left to release.
pub struct CpalVoiceRecorder {
    vad_config: VadConfig,
    device_sample_rate: Arc<AtomicU32>,
    shared: Arc<RecorderShared>,
}

impl CpalVoiceRecorder {
    /// Create a recorder with the given voice-activity tuning
    pub fn new(vad_config: VadConfig) -> Self {
        Self {
            vad_config,
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            shared: Arc::new(RecorderShared::new()),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or_else(|| CaptureError::DeviceUnavailable("no default input device".into()))
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to get configs: {}", e)))?;

        // Try to find a config that supports our target sample rate
        // Prefer mono, but accept stereo (we'll mix down)
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            // Only consider i16 or f32 formats
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config
            .ok_or_else(|| CaptureError::StartFailed("No suitable config found".into()))?;

        let sample_rate = if config_range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix stereo to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Resample audio from device rate to 16kHz if needed
    fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, CaptureError> {
        if source_rate == TARGET_SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            TARGET_SAMPLE_RATE as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| CaptureError::CaptureFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let chunk: Vec<Vec<f32>> = vec![samples_f32[input_pos..end_pos].to_vec()];

            // Pad if we don't have enough samples
            let chunk = if chunk[0].len() < frames_needed {
                let mut padded = chunk[0].clone();
                padded.resize(frames_needed, 0.0);
                vec![padded]
            } else {
                chunk
            };

            let resampled = resampler
                .process(&chunk, None)
                .map_err(|e| CaptureError::CaptureFailed(format!("Resampling failed: {}", e)))?;

            output.extend(pcm::f32_to_i16(&resampled[0]));
            input_pos = end_pos;
        }

        output.truncate(output_len);

        Ok(output)
    }

    /// Finalize the captured samples into a WAV payload
    fn encode_audio(samples: &[i16], sample_rate: u32) -> Result<AudioData, CaptureError> {
        let resampled = Self::resample_to_16k(samples, sample_rate)?;
        let bytes = wav::encode_wav(&resampled, TARGET_SAMPLE_RATE);
        Ok(AudioData::new(bytes, AudioMimeType::Wav))
    }

    /// Append one mono frame and publish its level for the monitor
    fn ingest_frame(shared: &RecorderShared, frame: Vec<i16>) {
        shared.set_window_db(pcm::energy_db_i16(&frame));
        if let Ok(mut session) = shared.session.lock() {
            session.push_frame(frame);
        }
    }
}

impl Default for CpalVoiceRecorder {
    fn default() -> Self {
        Self::new(VadConfig::default())
    }
}

#[async_trait]
impl VoiceRecorder for CpalVoiceRecorder {
    async fn start(&self) -> Result<(), CaptureError> {
        if self
            .shared
            .is_recording
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CaptureError::AlreadyRecording);
        }

        // Reset session state
        {
            let mut session = self.shared.session.lock().unwrap();
            session.clear();
        }
        {
            let mut reason = self.shared.stop_reason.lock().unwrap();
            *reason = None;
        }
        self.shared.elapsed_ms.store(0, Ordering::SeqCst);
        self.shared.set_window_db(pcm::SILENCE_FLOOR_DB);

        let shared = Arc::clone(&self.shared);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let (ready_tx, ready_rx) = tokio::sync::oneshot::channel::<Result<(), CaptureError>>();

        // The capture thread owns the cpal stream for the whole session
        std::thread::spawn(move || {
            let setup = (|| {
                let device = CpalVoiceRecorder::get_input_device()?;
                let (config, sample_format) = CpalVoiceRecorder::get_input_config(&device)?;
                Ok::<_, CaptureError>((device, config, sample_format))
            })();

            let (device, config, sample_format) = match setup {
                Ok(parts) => parts,
                Err(e) => {
                    shared.is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            let stream_shared = Arc::clone(&shared);
            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if stream_shared.is_recording.load(Ordering::SeqCst) {
                            let mono = CpalVoiceRecorder::stereo_to_mono(data, channels);
                            CpalVoiceRecorder::ingest_frame(&stream_shared, mono);
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => {
                    let stream_shared = Arc::clone(&shared);
                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if stream_shared.is_recording.load(Ordering::SeqCst) {
                                let converted = pcm::f32_to_i16(data);
                                let mono =
                                    CpalVoiceRecorder::stereo_to_mono(&converted, channels);
                                CpalVoiceRecorder::ingest_frame(&stream_shared, mono);
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                _ => {
                    shared.is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::StartFailed(
                        "Unsupported sample format".into(),
                    )));
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    shared.is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(CaptureError::StartFailed(e.to_string())));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                shared.is_recording.store(false, Ordering::SeqCst);
                let _ = ready_tx.send(Err(CaptureError::StartFailed(e.to_string())));
                return;
            }

            let _ = ready_tx.send(Ok(()));

            let started = Instant::now();
            while shared.is_recording.load(Ordering::SeqCst) {
                shared
                    .elapsed_ms
                    .store(started.elapsed().as_millis() as u64, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(MONITOR_TICK_MS));
            }

            // Dropping the stream releases the input device
            drop(stream);
        });

        // Device acquisition happens on the capture thread; surface its
        // outcome before reporting the session as started
        match ready_rx.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                self.shared.is_recording.store(false, Ordering::SeqCst);
                return Err(CaptureError::StartFailed(
                    "capture thread exited before starting".into(),
                ));
            }
        }

        // Voice-activity monitoring runs on the async runtime
        let shared = Arc::clone(&self.shared);
        let vad_config = self.vad_config;
        tokio::spawn(async move {
            let mut monitor = VoiceActivityMonitor::new(vad_config, 0);
            let mut ticker = interval(TokioDuration::from_millis(MONITOR_TICK_MS));
            let started = Instant::now();
            loop {
                ticker.tick().await;
                if !shared.is_recording.load(Ordering::SeqCst) {
                    break;
                }
                let now_ms = started.elapsed().as_millis() as u64;
                match monitor.observe(now_ms, shared.window_db()) {
                    Verdict::Continue => {}
                    Verdict::Stop(reason) => {
                        {
                            let mut slot = shared.stop_reason.lock().unwrap();
                            *slot = Some(reason);
                        }
                        // notify_one stores a permit, so a waiter that
                        // arrives after this still wakes
                        shared.stop_notify.notify_one();
                        break;
                    }
                }
            }
        });

        Ok(())
    }

    async fn auto_stopped(&self) -> StopReason {
        loop {
            let notified = self.shared.stop_notify.notified();
            if let Some(reason) = *self.shared.stop_reason.lock().unwrap() {
                return reason;
            }
            notified.await;
        }
    }

    async fn stop(&self) -> Result<Option<AudioData>, CaptureError> {
        // Not recording means nothing to stop; also makes a second stop
        // a no-op instead of a double release
        if !self.shared.is_recording.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }

        // Give the capture thread a moment to drop the stream
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::CaptureFailed("Sample rate not set".into()));
        }

        // Whatever frames were appended are encoded, even if the capture
        // ended early
        let samples = {
            let mut session = self.shared.session.lock().unwrap();
            std::mem::take(&mut *session).into_samples()
        };

        let encoded =
            tokio::task::spawn_blocking(move || Self::encode_audio(&samples, sample_rate))
                .await
                .map_err(|e| CaptureError::CaptureFailed(format!("Encode task error: {}", e)))??;

        Ok(Some(encoded))
    }

    fn is_recording(&self) -> bool {
        self.shared.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.shared.elapsed_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalVoiceRecorder::stereo_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn stereo_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalVoiceRecorder::stereo_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // Average of each pair
    }

    #[test]
    fn recorder_default_state() {
        let recorder = CpalVoiceRecorder::default();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.elapsed_ms(), 0);
    }

    #[test]
    fn encode_at_target_rate_is_plain_wav() {
        let samples = vec![0i16; 160];
        let audio = CpalVoiceRecorder::encode_audio(&samples, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(audio.mime_type(), AudioMimeType::Wav);
        assert_eq!(audio.size_bytes(), wav::HEADER_LEN + 160 * 2);
    }

    #[test]
    fn encode_empty_capture_still_produces_container() {
        let audio = CpalVoiceRecorder::encode_audio(&[], TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(audio.size_bytes(), wav::HEADER_LEN);
    }

    #[test]
    fn resample_halves_sample_count_from_32k() {
        let samples = vec![0i16; 3200];
        let resampled = CpalVoiceRecorder::resample_to_16k(&samples, 32_000).unwrap();
        assert_eq!(resampled.len(), 1600);
    }

    #[tokio::test]
    async fn stop_without_session_is_a_no_op() {
        let recorder = CpalVoiceRecorder::default();
        let result = recorder.stop().await.unwrap();
        assert!(result.is_none());
        // A second stop is equally harmless
        assert!(recorder.stop().await.unwrap().is_none());
    }

    #[test]
    fn ingest_publishes_window_level() {
        let shared = RecorderShared::new();
        CpalVoiceRecorder::ingest_frame(&shared, vec![0i16; 512]);
        assert_eq!(shared.window_db(), pcm::SILENCE_FLOOR_DB);

        CpalVoiceRecorder::ingest_frame(&shared, vec![16384i16; 512]);
        assert!(shared.window_db() > -10.0);

        let session = shared.session.lock().unwrap();
        assert_eq!(session.frame_count(), 2);
        assert_eq!(session.sample_count(), 1024);
    }
}
