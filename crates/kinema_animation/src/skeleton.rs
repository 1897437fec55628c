use std::sync::Arc;

use kinema_core::{KinemaError, Result, SkeletonSettings};
use kinema_scene::{NodeHandle, Scene};
use rustc_hash::FxHashMap;

use crate::clip::Animation;
use crate::pose::PoseSlot;
use crate::seek::{KeyframeCursor, sample_keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrap {
    ToStart,
    ToEnd,
}

/// Samples an [`Animation`] into a fixed set of per-node pose slots.
///
/// The slot set is captured once at construction and never changes. Per-slot
/// state (pose, seek cursor) lives in dense arrays indexed by slot, and the
/// mapping from animation tracks to slots is resolved when the animation is
/// assigned, so a frame of playback does no name lookups.
///
/// # Frame flow
///
/// ```rust,ignore
/// skeleton.advance_time(dt);   // sample every track at the new time
/// skeleton.push_pose(&mut scene); // write into the bound nodes
/// scene.update_matrix_world();
/// ```
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub(crate) slots: Vec<PoseSlot>,
    slot_by_name: FxHashMap<String, usize>,

    animation: Option<Arc<Animation>>,
    /// Slot index for each track of `animation`, `None` for untracked nodes
    track_slots: Vec<Option<usize>>,
    /// Seek hint per slot
    cursors: Vec<KeyframeCursor>,

    current_time: f64,
    looping: bool,
    warn_unknown_nodes: bool,

    bound_root: Option<NodeHandle>,
}

impl Skeleton {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a skeleton tracking the given node names, in order.
    /// Repeated names collapse into the first slot.
    #[must_use]
    pub fn from_node_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let settings = SkeletonSettings::default();
        let mut slots = Vec::new();
        let mut slot_by_name = FxHashMap::default();

        for name in names {
            let name = name.into();
            if slot_by_name.contains_key(&name) {
                log::debug!("Duplicate skeleton node name '{name}' ignored");
                continue;
            }
            slot_by_name.insert(name.clone(), slots.len());
            slots.push(PoseSlot::new(name));
        }

        let slot_count = slots.len();
        Self {
            slots,
            slot_by_name,
            animation: None,
            track_slots: Vec::new(),
            cursors: vec![KeyframeCursor::default(); slot_count],
            current_time: 0.0,
            looping: settings.looping,
            warn_unknown_nodes: settings.warn_unknown_nodes,
            bound_root: None,
        }
    }

    /// Creates a skeleton from the named nodes of a template hierarchy,
    /// walked depth-first from `root`. Unnamed nodes are not tracked.
    pub fn from_hierarchy(scene: &Scene, root: NodeHandle) -> Result<Self> {
        if !scene.contains(root) {
            return Err(KinemaError::InvalidHierarchy);
        }

        let names = scene
            .collect_subtree(root)
            .into_iter()
            .filter_map(|handle| scene.get_name(handle));

        Ok(Self::from_node_names(names))
    }

    /// Creates an unbound, animation-less skeleton with the same slot set as
    /// `other`. Typically used as a blend destination.
    #[must_use]
    pub fn with_layout_of(other: &Skeleton) -> Self {
        let mut skeleton = Self::from_node_names(other.slots.iter().map(PoseSlot::node_name));
        skeleton.looping = other.looping;
        skeleton.warn_unknown_nodes = other.warn_unknown_nodes;
        skeleton
    }

    #[must_use]
    pub fn with_settings(mut self, settings: &SkeletonSettings) -> Self {
        self.looping = settings.looping;
        self.warn_unknown_nodes = settings.warn_unknown_nodes;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[PoseSlot] {
        &self.slots
    }

    #[must_use]
    pub fn slot_index(&self, node_name: &str) -> Option<usize> {
        self.slot_by_name.get(node_name).copied()
    }

    #[must_use]
    pub fn slot(&self, node_name: &str) -> Option<&PoseSlot> {
        self.slot_index(node_name).map(|i| &self.slots[i])
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[inline]
    #[must_use]
    pub fn looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    #[inline]
    #[must_use]
    pub fn animation(&self) -> Option<&Arc<Animation>> {
        self.animation.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.duration)
    }

    /// Whether a non-looping animation has reached its end and holds.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.looping && self.duration() == Some(self.current_time)
    }

    #[inline]
    #[must_use]
    pub fn bound_root(&self) -> Option<NodeHandle> {
        self.bound_root
    }

    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound_root.is_some()
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Plays `animation` from time zero. The pose for time zero is sampled
    /// immediately, so pushing without a prior step shows frame 0.
    pub fn assign_animation(&mut self, animation: Arc<Animation>) {
        let mut claimed = vec![false; self.slots.len()];
        self.track_slots = animation
            .tracks
            .iter()
            .map(|track| {
                let Some(slot) = self.slot_by_name.get(&track.node_name).copied() else {
                    if self.warn_unknown_nodes {
                        log::warn!(
                            "Animation '{}' targets unknown node '{}', track skipped",
                            animation.name,
                            track.node_name
                        );
                    } else {
                        log::debug!(
                            "Animation '{}' targets unknown node '{}', track skipped",
                            animation.name,
                            track.node_name
                        );
                    }
                    return None;
                };
                if claimed[slot] {
                    log::warn!(
                        "Animation '{}' has more than one track for node '{}', extra track skipped",
                        animation.name,
                        track.node_name
                    );
                    return None;
                }
                claimed[slot] = true;
                Some(slot)
            })
            .collect();

        log::debug!(
            "Assigned animation '{}' ({} tracks, {:.3}s)",
            animation.name,
            animation.tracks.len(),
            animation.duration
        );

        self.animation = Some(animation);
        self.current_time = 0.0;
        self.cursors.fill(KeyframeCursor::default());
        self.sample();
    }

    /// Detaches the current animation. Slot poses keep their last values.
    pub fn clear_animation(&mut self) {
        self.animation = None;
        self.track_slots.clear();
        self.current_time = 0.0;
        self.cursors.fill(KeyframeCursor::default());
    }

    /// Moves the time cursor by `delta` seconds (negative plays backward) and
    /// re-samples every tracked node.
    ///
    /// Leaving `[0, duration]` wraps to the opposite end when looping, with
    /// the overshoot discarded, and clamps otherwise. A non-looping animation
    /// parked at its end ignores non-negative deltas.
    pub fn advance_time(&mut self, delta: f64) {
        let Some(duration) = self.duration() else {
            return;
        };
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite time delta {delta}");
            return;
        }
        if !self.looping && delta >= 0.0 && self.current_time == duration {
            return;
        }

        match self.place_time(self.current_time + delta, duration) {
            Some(Wrap::ToStart) => self.cursors.fill(KeyframeCursor::default()),
            Some(Wrap::ToEnd) => self.rewind_cursors_to_end(),
            None => {}
        }

        self.sample();
    }

    /// Seeks to `time`, landing where `advance_time(time - current_time)`
    /// would: out-of-range times wrap to the opposite end when looping and
    /// clamp otherwise.
    ///
    /// Seek hints are discarded since a direct seek may jump anywhere.
    pub fn set_time(&mut self, time: f64) -> Result<()> {
        let duration = self.duration().ok_or(KinemaError::NoAnimation)?;
        if !time.is_finite() {
            return Err(KinemaError::InvalidTime(time));
        }

        self.place_time(time, duration);
        self.cursors.fill(KeyframeCursor::default());
        self.sample();
        Ok(())
    }

    /// Moves the time cursor to `time`, resolving `[0, duration]` overflow.
    fn place_time(&mut self, time: f64, duration: f64) -> Option<Wrap> {
        if time > duration {
            if self.looping {
                log::trace!("Animation wrapped to start");
                self.current_time = 0.0;
                return Some(Wrap::ToStart);
            }
            self.current_time = duration;
        } else if time < 0.0 {
            if self.looping {
                log::trace!("Animation wrapped to end");
                self.current_time = duration;
                return Some(Wrap::ToEnd);
            }
            self.current_time = 0.0;
        } else {
            self.current_time = time;
        }
        None
    }

    fn rewind_cursors_to_end(&mut self) {
        let Some(animation) = &self.animation else {
            return;
        };
        for (track, slot) in animation.tracks.iter().zip(&self.track_slots) {
            if let Some(slot) = *slot {
                self.cursors[slot] = KeyframeCursor::at_end(track.keys.len());
            }
        }
    }

    fn sample(&mut self) {
        let Some(animation) = &self.animation else {
            return;
        };
        let time = self.current_time;

        for (track, slot) in animation.tracks.iter().zip(&self.track_slots) {
            let Some(slot) = *slot else {
                continue;
            };
            if let Some(pose) = sample_keys(&track.keys, time, &mut self.cursors[slot]) {
                self.slots[slot].write_pose(pose);
            }
        }
    }

    // ========================================================================
    // Hierarchy Binding
    // ========================================================================

    /// Points every slot at the same-named node under `root`.
    ///
    /// Slots without a matching node stay unbound and never push.
    pub fn bind(&mut self, scene: &Scene, root: NodeHandle) -> Result<()> {
        if !scene.contains(root) {
            return Err(KinemaError::InvalidHierarchy);
        }

        let index = scene.build_name_index(root);
        let mut matched = 0usize;

        for slot in &mut self.slots {
            let target = index.get(slot.node_name()).copied();
            match target {
                Some(_) => matched += 1,
                None => log::debug!("No node named '{}' in bound hierarchy", slot.node_name()),
            }
            slot.set_target(target);
        }

        log::debug!("Bound skeleton: {matched}/{} slots matched", self.slots.len());
        self.bound_root = Some(root);
        Ok(())
    }

    pub fn unbind(&mut self) {
        for slot in &mut self.slots {
            slot.set_target(None);
        }
        self.bound_root = None;
    }

    /// Writes every freshly sampled pose into its bound node.
    pub fn push_pose(&mut self, scene: &mut Scene) {
        for slot in &mut self.slots {
            slot.push_to_target(scene);
        }
    }

    /// Advances time and pushes the result in one call.
    pub fn update(&mut self, delta: f64, scene: &mut Scene) {
        self.advance_time(delta);
        self.push_pose(scene);
    }
}
