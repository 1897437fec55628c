//! Keyframe interval search with a per-track cursor.
//!
//! Playback is almost always monotonic with small steps, so the interval found
//! on the previous frame is the best starting point for the next one. The
//! cursor is only a hint: it is checked against the requested time first and
//! the walk heads toward the time from there, one interval per step.

use crate::clip::Keyframe;
use crate::pose::LocalPose;
use crate::values::Interpolatable;

/// Cached start index of the last interval a track was sampled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

impl KeyframeCursor {
    #[must_use]
    pub fn at(last_index: usize) -> Self {
        Self { last_index }
    }

    /// Start of the last interval of a track with `key_count` keys.
    #[must_use]
    pub fn at_end(key_count: usize) -> Self {
        Self::at(key_count.saturating_sub(2))
    }
}

/// Finds `i` with `keys[i].time <= time <= keys[i + 1].time`, starting at the
/// cursor and walking toward `time`.
///
/// Requires at least two keys. Returns `None` when no interval contains `time`
/// (before the first key, after the last, or a non-finite time); the cursor is
/// left untouched in that case.
pub fn seek_interval(keys: &[Keyframe], time: f64, cursor: &mut KeyframeCursor) -> Option<usize> {
    debug_assert!(keys.len() >= 2);
    let last = keys.len() - 2;
    let contains = |i: usize| keys[i].time <= time && time <= keys[i + 1].time;

    let mut i = cursor.last_index.min(last);
    if !contains(i) {
        let forward = time > keys[i + 1].time;
        loop {
            if forward {
                if i == last {
                    return None;
                }
                i += 1;
            } else {
                if i == 0 {
                    return None;
                }
                i -= 1;
            }
            if contains(i) {
                break;
            }
        }
    }

    cursor.last_index = i;
    Some(i)
}

/// Samples a track at `time`.
///
/// - Empty track: `None`, the node has no pose.
/// - Single key: that key, whatever the time.
/// - Otherwise: the interpolated pose of the containing interval, or the
///   first key verbatim when no interval contains `time`.
pub fn sample_keys(keys: &[Keyframe], time: f64, cursor: &mut KeyframeCursor) -> Option<LocalPose> {
    let first = match keys {
        [] => return None,
        [only] => return Some(only.pose()),
        [first, ..] => first,
    };

    let Some(i) = seek_interval(keys, time, cursor) else {
        return Some(first.pose());
    };

    let k0 = &keys[i];
    let k1 = &keys[i + 1];
    let dt = k1.time - k0.time;
    // Zero-length interval snaps to its start
    let alpha = if dt > 0.0 {
        ((time - k0.time) / dt).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(LocalPose::interpolate_linear(k0.pose(), k1.pose(), alpha as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn keys(times: &[f64]) -> Vec<Keyframe> {
        times
            .iter()
            .map(|&t| Keyframe::from_position(t, Vec3::new(t as f32 * 10.0, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn forward_walk_updates_cursor() {
        let keys = keys(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let mut cursor = KeyframeCursor::default();

        assert_eq!(seek_interval(&keys, 0.5, &mut cursor), Some(0));
        assert_eq!(seek_interval(&keys, 2.5, &mut cursor), Some(2));
        assert_eq!(cursor.last_index, 2);
        assert_eq!(seek_interval(&keys, 3.9, &mut cursor), Some(3));
    }

    #[test]
    fn stale_cursor_walks_backward() {
        let keys = keys(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let mut cursor = KeyframeCursor::at_end(keys.len());
        assert_eq!(cursor.last_index, 3);

        assert_eq!(seek_interval(&keys, 0.25, &mut cursor), Some(0));
    }

    #[test]
    fn out_of_range_cursor_is_clamped() {
        let keys = keys(&[0.0, 1.0, 2.0]);
        let mut cursor = KeyframeCursor::at(42);
        assert_eq!(seek_interval(&keys, 1.5, &mut cursor), Some(1));
    }

    #[test]
    fn miss_keeps_cursor() {
        let keys = keys(&[1.0, 2.0]);
        let mut cursor = KeyframeCursor::default();
        assert_eq!(seek_interval(&keys, 0.5, &mut cursor), None);
        assert_eq!(seek_interval(&keys, f64::NAN, &mut cursor), None);
        assert_eq!(cursor.last_index, 0);
    }

    #[test]
    fn zero_length_interval_snaps_to_start() {
        let mut keys = keys(&[0.0, 1.0, 1.0, 2.0]);
        keys[2].position = Vec3::new(99.0, 0.0, 0.0);

        // Time 1.0 is found in [0, 1] first, which ends on key 1
        let mut cursor = KeyframeCursor::default();
        let pose = sample_keys(&keys, 1.0, &mut cursor).unwrap();
        assert_eq!(pose.position.x, 10.0);

        // Starting inside the degenerate interval does not divide by zero
        let mut cursor = KeyframeCursor::at(1);
        let pose = sample_keys(&keys, 1.0, &mut cursor).unwrap();
        assert_eq!(pose.position.x, 10.0);
    }

    #[test]
    fn miss_falls_back_to_first_key() {
        let keys = keys(&[1.0, 2.0]);
        let mut cursor = KeyframeCursor::default();
        assert_eq!(sample_keys(&keys, 0.5, &mut cursor).unwrap().position.x, 10.0);
        assert_eq!(sample_keys(&keys, 5.0, &mut cursor).unwrap().position.x, 10.0);
    }

    #[test]
    fn empty_track_has_no_pose() {
        let mut cursor = KeyframeCursor::default();
        assert!(sample_keys(&[], 0.0, &mut cursor).is_none());
    }
}
