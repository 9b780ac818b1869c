//! Channel layout and sample-format conversion between decoded cue audio
//! (mono f32) and whatever the output device asks for.

/// Downmix interleaved multi-channel input to mono while applying the
/// provided converter, so stereo files and mono files store the same way.
pub(super) fn append_downmixed_samples<T, F>(
    buf: &mut Vec<f32>,
    data: &[T],
    channels: usize,
    mut convert: F,
) where
    T: Copy,
    F: FnMut(T) -> f32,
{
    if channels <= 1 {
        buf.extend(data.iter().copied().map(&mut convert));
        return;
    }

    let mut acc = 0.0f32;
    let mut count = 0usize;
    for sample in data.iter().copied() {
        acc += convert(sample);
        count += 1;
        if count == channels {
            buf.push(acc / channels as f32);
            acc = 0.0;
            count = 0;
        }
    }
    if count > 0 {
        buf.push(acc / count as f32);
    }
}

/// Add mono `source` (starting at frame `cursor`) onto `scratch`. Returns the
/// number of source frames consumed; fewer than `scratch.len()` means the
/// source ran out.
pub(super) fn mix_track(scratch: &mut [f32], source: &[f32], cursor: usize) -> usize {
    let remaining = source.get(cursor..).unwrap_or(&[]);
    let consumed = remaining.len().min(scratch.len());
    for (slot, sample) in scratch.iter_mut().zip(&remaining[..consumed]) {
        *slot += *sample;
    }
    consumed
}

/// Spread a mono mix across every channel of an interleaved output buffer.
pub(super) fn write_interleaved<T, F>(out: &mut [T], channels: usize, mono: &[f32], mut convert: F)
where
    T: Copy,
    F: FnMut(f32) -> T,
{
    let channels = channels.max(1);
    for (index, frame) in out.chunks_mut(channels).enumerate() {
        let value = convert(mono.get(index).copied().unwrap_or(0.0).clamp(-1.0, 1.0));
        for slot in frame.iter_mut() {
            *slot = value;
        }
    }
}

pub(super) fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

pub(super) fn f32_to_u16(sample: f32) -> u16 {
    ((sample.clamp(-1.0, 1.0) + 1.0) * 0.5 * u16::MAX as f32) as u16
}
