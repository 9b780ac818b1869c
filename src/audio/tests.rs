use super::decode::decode_file;
use super::events::EndedHub;
use super::mix::{append_downmixed_samples, f32_to_i16, f32_to_u16, mix_track, write_interleaved};
use super::player::TrackTable;
use super::resample::{
    basic_resample, design_low_pass, downsampling_tap_count, resample, resample_linear,
    MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
};
use super::{open_audio, AudioService, Cue, DeviceAudio, SilentAudio};
use crate::config::AppConfig;
use clap::Parser;
use std::f32::consts::PI;
use std::path::PathBuf;

#[cfg(feature = "high-quality-audio")]
use super::resample::resample_with_rubato;

#[test]
fn downmixes_multi_channel_audio() {
    let mut buf = Vec::new();
    let samples = [1.0f32, -1.0, 0.5, 0.5];
    append_downmixed_samples(&mut buf, &samples, 2, |sample| sample);
    assert_eq!(buf, vec![0.0, 0.5]);
}

#[test]
fn preserves_single_channel_audio() {
    let mut buf = Vec::new();
    let samples = [0.1f32, 0.2, 0.3];
    append_downmixed_samples(&mut buf, &samples, 1, |sample| sample);
    assert_eq!(buf, samples);
}

#[test]
fn mix_track_adds_onto_existing_mix_and_reports_consumed() {
    let mut mix = vec![0.25f32; 4];
    let consumed = mix_track(&mut mix, &[0.5, 0.5, 0.5], 1);
    assert_eq!(consumed, 2);
    assert_eq!(mix, vec![0.75, 0.75, 0.25, 0.25]);
}

#[test]
fn mix_track_past_end_consumes_nothing() {
    let mut mix = vec![0.0f32; 3];
    assert_eq!(mix_track(&mut mix, &[1.0], 5), 0);
    assert_eq!(mix, vec![0.0; 3]);
}

#[test]
fn write_interleaved_copies_mono_to_every_channel() {
    let mut out = [0.0f32; 6];
    write_interleaved(&mut out, 2, &[0.1, 0.2, 2.0], |sample| sample);
    assert_eq!(out, [0.1, 0.1, 0.2, 0.2, 1.0, 1.0]);
}

#[test]
fn write_interleaved_pads_short_mix_with_silence() {
    let mut out = [7i16; 4];
    write_interleaved(&mut out, 1, &[1.0], f32_to_i16);
    assert_eq!(out, [i16::MAX, 0, 0, 0]);
}

#[test]
fn integer_conversions_cover_full_range() {
    assert_eq!(f32_to_i16(1.0), i16::MAX);
    assert_eq!(f32_to_i16(-4.0), -i16::MAX);
    assert_eq!(f32_to_u16(-1.0), 0);
    assert_eq!(f32_to_u16(1.0), u16::MAX);
    let mid = f32_to_u16(0.0);
    assert!((32_766..=32_768).contains(&mid), "mid={mid}");
}

#[test]
fn resample_linear_scales_length() {
    let input = vec![0.0f32, 1.0, 2.0, 3.0];
    let result = resample_linear(&input, 0.5);
    assert!(result.len() < input.len());
    assert!((result.first().copied().unwrap_or_default() - 0.0).abs() < 1e-6);
}

#[test]
fn resample_returns_input_when_rates_match() {
    let input = vec![0.1f32, 0.2, 0.3];
    assert_eq!(resample(&input, 44_100, 44_100), input);
}

#[test]
fn resample_returns_empty_for_empty_input() {
    assert!(resample(&[], 44_100, 48_000).is_empty());
}

#[test]
fn resample_leaves_unsupported_rates_alone() {
    let input = vec![0.1f32; 32];
    assert_eq!(resample(&input, MIN_SAMPLE_RATE - 1, 48_000), input);
    assert_eq!(resample(&input, 48_000, MAX_SAMPLE_RATE + 1), input);
}

#[test]
fn resample_converts_common_mp3_rate_to_device_rate() {
    let input: Vec<f32> = (0..4_410).map(|i| (i as f32 * 0.01).sin()).collect();
    let output = resample(&input, 44_100, 48_000);
    let expected = 4_800isize;
    let diff = (output.len() as isize - expected).abs();
    assert!(diff <= 2, "expected ~{expected} samples, got {}", output.len());
}

#[cfg(feature = "high-quality-audio")]
#[test]
fn rubato_output_is_trimmed_to_exact_length() {
    let input: Vec<f32> = (0..960).map(|i| (i as f32 * 0.01).sin()).collect();
    let output = resample_with_rubato(&input, 48_000, 44_100).expect("rubato resample");
    assert_eq!(output.len(), 882);
}

#[cfg(feature = "high-quality-audio")]
#[test]
fn rubato_rejects_out_of_bounds_rates() {
    let input = vec![0.1f32; 64];
    let err = resample_with_rubato(&input, MIN_SAMPLE_RATE - 1, 48_000)
        .expect_err("low rate should fail");
    assert!(err.to_string().contains("unsupported sample rates"));
}

#[test]
fn tap_count_is_odd_and_capped() {
    let taps = downsampling_tap_count(48_000, 16_000);
    assert_eq!(taps % 2, 1);
    assert!(taps >= 11);
    assert_eq!(downsampling_tap_count(768_000, 2_000), 129);
}

#[test]
fn low_pass_matches_reference_design() {
    let ours = design_low_pass(0.2, 31);
    let reference = reference_low_pass(0.2, 31);
    for (a, b) in ours.iter().zip(reference.iter()) {
        assert!((a - b).abs() < 1e-4, "coefficient drift: {a} vs {b}");
    }
    let gain: f32 = ours.iter().sum();
    assert!((gain - 1.0).abs() < 1e-4);
}

#[test]
fn fir_resampler_reduces_alias_vs_naive() {
    let signal = multi_tone_signal(&[(6_000.0, 1.0), (12_000.0, 1.0)], 48_000, 0.1);
    let filtered = basic_resample(&signal, 48_000, 16_000);
    let naive = resample_linear(&signal, 16_000f32 / 48_000f32);
    let alias_filtered = goertzel_power(&filtered, 16_000, 4_000.0);
    let alias_naive = goertzel_power(&naive, 16_000, 4_000.0);
    assert!(
        alias_filtered < alias_naive * 0.6,
        "FIR path failed to reduce aliasing (filtered={alias_filtered}, naive={alias_naive})"
    );
}

#[test]
fn ended_hub_only_notifies_matching_cue() {
    let hub = EndedHub::new();
    let connect = hub.subscribe(Cue::Connect);
    let home = hub.subscribe(Cue::Home);

    hub.notify(Cue::Connect);

    assert!(connect.take_ended());
    assert!(!connect.take_ended(), "notifications are drained");
    assert!(!home.take_ended());
}

#[test]
fn dropping_subscription_unsubscribes() {
    let hub = EndedHub::new();
    let first = hub.subscribe(Cue::Connect);
    let second = hub.subscribe(Cue::Connect);
    assert_eq!(hub.subscriber_count(), 2);

    drop(first);
    assert_eq!(hub.subscriber_count(), 1);
    hub.notify(Cue::Connect);
    assert!(second.take_ended());

    drop(second);
    assert_eq!(hub.subscriber_count(), 0);
    hub.notify(Cue::Connect);
}

#[test]
fn track_table_reports_natural_end_once() {
    let hub = EndedHub::new();
    let ended = hub.subscribe(Cue::Connect);
    let table = TrackTable::new(vec![(Cue::Connect, vec![0.5; 5])]);
    let mut mix = vec![0.0; 4];

    assert!(table.play(Cue::Connect));
    table.render(&mut mix, &hub);
    assert_eq!(mix, vec![0.5; 4]);
    assert!(!ended.take_ended());

    table.render(&mut mix, &hub);
    assert_eq!(mix, vec![0.5, 0.0, 0.0, 0.0]);
    assert!(ended.take_ended());
    assert!(!table.is_playing(Cue::Connect));

    table.render(&mut mix, &hub);
    assert!(!ended.take_ended());
}

#[test]
fn track_table_pause_is_not_an_end() {
    let hub = EndedHub::new();
    let ended = hub.subscribe(Cue::Home);
    let table = TrackTable::new(vec![(Cue::Home, vec![0.1; 8])]);
    let mut mix = vec![0.0; 3];

    table.play(Cue::Home);
    table.render(&mut mix, &hub);
    table.pause(Cue::Home);
    table.render(&mut mix, &hub);

    assert_eq!(mix, vec![0.0; 3]);
    assert_eq!(table.position(Cue::Home), 3);
    assert!(!ended.take_ended());
}

#[test]
fn track_table_seek_and_replay_after_end() {
    let hub = EndedHub::new();
    let table = TrackTable::new(vec![(Cue::Home, vec![0.1; 2])]);
    let mut mix = vec![0.0; 4];

    table.play(Cue::Home);
    table.render(&mut mix, &hub);
    assert_eq!(table.position(Cue::Home), 2);

    table.play(Cue::Home);
    assert_eq!(table.position(Cue::Home), 0, "finished track starts over");

    table.render(&mut mix, &hub);
    table.seek_start(Cue::Home);
    assert_eq!(table.position(Cue::Home), 0);
}

#[test]
fn track_table_mixes_both_cues() {
    let hub = EndedHub::new();
    let table = TrackTable::new(vec![
        (Cue::Connect, vec![0.25; 4]),
        (Cue::Home, vec![0.5; 4]),
    ]);
    let mut mix = vec![0.0; 2];
    table.play(Cue::Connect);
    table.play(Cue::Home);
    table.render(&mut mix, &hub);
    assert_eq!(mix, vec![0.75, 0.75]);
}

#[test]
fn track_table_ignores_missing_cue() {
    let table = TrackTable::new(Vec::new());
    assert!(!table.is_loaded(Cue::Connect));
    assert!(!table.play(Cue::Connect));
    table.pause(Cue::Connect);
    table.seek_start(Cue::Connect);
    assert!(!table.is_playing(Cue::Connect));
}

#[test]
fn silent_audio_never_reports_an_end() {
    let mut audio = SilentAudio::new();
    let ended = audio.on_ended(Cue::Connect);
    audio.play(Cue::Connect);
    audio.pause(Cue::Connect);
    audio.seek_start(Cue::Connect);
    assert!(!ended.take_ended());
}

#[test]
fn device_audio_without_cue_files_stays_silent() {
    let config = AppConfig::parse_from([
        "slidephone",
        "--call-audio",
        "/definitely/not/call.mp3",
        "--home-audio",
        "/definitely/not/home.mp3",
    ]);
    let mut audio = DeviceAudio::open(&config);
    let ended = audio.on_ended(Cue::Connect);
    for cue in Cue::ALL {
        audio.seek_start(cue);
        audio.play(cue);
        audio.pause(cue);
    }
    assert!(!ended.take_ended());
}

#[test]
fn no_audio_flag_selects_the_silent_backend() {
    let config = AppConfig::parse_from(["slidephone", "--no-audio"]);
    let mut audio = open_audio(&config);
    let ended = audio.on_ended(Cue::Home);
    audio.play(Cue::Home);
    assert!(!ended.take_ended());
}

#[test]
fn decode_missing_file_is_an_error() {
    let err = decode_file(&PathBuf::from("/definitely/not/here.mp3")).expect_err("missing");
    assert!(err.to_string().contains("cannot open"));
}

#[test]
fn decode_wav_downmixes_to_mono() {
    let path = std::env::temp_dir().join(format!("slidephone_decode_{}.wav", std::process::id()));
    let frames: Vec<(i16, i16)> = vec![(16_384, 0); 800];
    std::fs::write(&path, stereo_wav(8_000, &frames)).expect("write wav");

    let clip = decode_file(&path).expect("decode wav");
    let _ = std::fs::remove_file(&path);

    assert_eq!(clip.sample_rate, 8_000);
    assert_eq!(clip.samples.len(), 800);
    assert!((clip.samples[0] - 0.25).abs() < 1e-3, "got {}", clip.samples[0]);
    assert!((clip.duration_secs() - 0.1).abs() < 1e-6);
}

fn stereo_wav(rate: u32, frames: &[(i16, i16)]) -> Vec<u8> {
    let data_len = (frames.len() * 4) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&rate.to_le_bytes());
    out.extend_from_slice(&(rate * 4).to_le_bytes());
    out.extend_from_slice(&4u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for (left, right) in frames {
        out.extend_from_slice(&left.to_le_bytes());
        out.extend_from_slice(&right.to_le_bytes());
    }
    out
}

fn multi_tone_signal(tones: &[(f32, f32)], sample_rate: u32, seconds: f32) -> Vec<f32> {
    let total_samples = (sample_rate as f32 * seconds) as usize;
    (0..total_samples)
        .map(|n| {
            tones.iter().fold(0.0, |acc, (freq, amp)| {
                acc + amp * (2.0 * PI * freq * n as f32 / sample_rate as f32).sin()
            })
        })
        .collect()
}

fn goertzel_power(samples: &[f32], sample_rate: u32, target_hz: f32) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let len = samples.len() as f32;
    let omega = 2.0 * PI * target_hz / sample_rate as f32;
    let coeff = 2.0 * omega.cos();
    let mut q1 = 0.0;
    let mut q2 = 0.0;
    for &sample in samples {
        let q0 = coeff * q1 - q2 + sample;
        q2 = q1;
        q1 = q0;
    }
    let power = q1 * q1 + q2 * q2 - coeff * q1 * q2;
    (power / len).max(0.0)
}

fn reference_low_pass(normalized_cutoff: f32, taps: usize) -> Vec<f32> {
    let m = (taps - 1) as f64;
    let cutoff = normalized_cutoff as f64;
    let mut coeffs: Vec<f64> = (0..taps)
        .map(|n| {
            let centered = n as f64 - m / 2.0;
            let x = 2.0 * std::f64::consts::PI * cutoff * centered;
            let sinc = if centered == 0.0 {
                2.0 * cutoff
            } else {
                (2.0 * cutoff * x.sin()) / x
            };
            sinc * (0.54 - 0.46 * ((2.0 * std::f64::consts::PI * n as f64) / m).cos())
        })
        .collect();
    let sum: f64 = coeffs.iter().sum();
    for coeff in coeffs.iter_mut() {
        *coeff /= sum;
    }
    coeffs.into_iter().map(|c| c as f32).collect()
}
