use crate::pose::LocalPose;
use crate::skeleton::Skeleton;
use crate::values::Interpolatable;

impl Skeleton {
    /// Writes the blend of `a` and `b` into this skeleton.
    ///
    /// All three skeletons must share the same slot layout (see
    /// [`Skeleton::with_layout_of`]). Per slot:
    /// - written in both: position/scale lerp, rotation slerp by `alpha`
    /// - written in one: a copy of that pose
    /// - written in neither: left untouched
    ///
    /// `alpha` is `f32`, the parameter type of glam's `lerp` and `slerp`;
    /// weights derived from `f64` playback time are narrowed with `as f32`.
    /// `alpha <= 0` reproduces `a` and `alpha >= 1` reproduces `b` exactly.
    pub fn blend(&mut self, a: &Skeleton, b: &Skeleton, alpha: f32) {
        debug_assert_eq!(self.slots.len(), a.slots.len());
        debug_assert_eq!(self.slots.len(), b.slots.len());

        for ((dst, sa), sb) in self.slots.iter_mut().zip(&a.slots).zip(&b.slots) {
            match (sa.is_written(), sb.is_written()) {
                (true, true) => {
                    dst.write_pose(LocalPose::interpolate_linear(*sa.pose(), *sb.pose(), alpha));
                }
                (true, false) => dst.write_pose(*sa.pose()),
                (false, true) => dst.write_pose(*sb.pose()),
                (false, false) => {}
            }
        }
    }
}
