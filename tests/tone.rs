//! Generated tone bursts fed to the Goertzel detector.

use splitfft::goertzel::goertzel_fixed;
use splitfft::tone::{pcm_to_f64, ToneGenerator};

const SAMPLE_RATE: f64 = 8000.0;
const BLOCK: usize = 205;

fn to_f64(pcm: &[i16]) -> Vec<f64> {
    let mut out = vec![0.0; pcm.len()];
    pcm_to_f64(pcm, &mut out).unwrap();
    out
}

#[test]
fn generated_tone_is_detected() {
    let mut gen = ToneGenerator::new(SAMPLE_RATE).unwrap();
    let mut pcm = Vec::new();
    // 25.625 ms is exactly one 205-sample block
    assert_eq!(gen.tone(770.0, 25.625, &mut pcm).unwrap(), BLOCK);
    let signal = to_f64(&pcm);

    let on = goertzel_fixed(&signal, 770.0, SAMPLE_RATE, BLOCK).unwrap();
    let off = goertzel_fixed(&signal, 1336.0, SAMPLE_RATE, BLOCK).unwrap();
    assert!(on > 10 * off.max(1), "on {} off {}", on, off);
}

// Header-like sequence: each segment is dominated by its own frequency.
#[test]
fn tone_sequence_segments() {
    let plan = [(1900.0, 30.0), (1100.0, 30.0), (1300.0, 30.0), (1200.0, 30.0)];
    let mut gen = ToneGenerator::new(SAMPLE_RATE).unwrap();
    let mut pcm = Vec::new();
    let mut starts = Vec::new();
    for &(hz, ms) in &plan {
        starts.push(pcm.len());
        assert_eq!(gen.tone(hz, ms, &mut pcm).unwrap(), 240);
    }
    let signal = to_f64(&pcm);

    for (&(hz, _), &start) in plan.iter().zip(&starts) {
        let block = &signal[start..start + BLOCK];
        let own = goertzel_fixed(block, hz, SAMPLE_RATE, BLOCK).unwrap();
        for &(other, _) in plan.iter().filter(|&&(f, _)| f != hz) {
            let rival = goertzel_fixed(block, other, SAMPLE_RATE, BLOCK).unwrap();
            assert!(own > 3 * rival, "{} Hz: {} vs {} Hz: {}", hz, own, other, rival);
        }
    }
}

// A WAV written from generator output keeps the tone detectable.
#[test]
fn generated_tone_through_wav() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut gen = ToneGenerator::new(SAMPLE_RATE).unwrap();
    let mut pcm = Vec::new();
    gen.tone(941.0, 25.625, &mut pcm).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("burst.wav");
    {
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in &pcm {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }
    let read: Vec<i16> = hound::WavReader::open(&path)
        .unwrap()
        .samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(read, pcm);

    let signal = to_f64(&read);
    let on = goertzel_fixed(&signal, 941.0, SAMPLE_RATE, BLOCK).unwrap();
    let off = goertzel_fixed(&signal, 1477.0, SAMPLE_RATE, BLOCK).unwrap();
    assert!(on > 10 * off.max(1), "on {} off {}", on, off);
}
