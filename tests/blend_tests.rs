//! Blend Tests
//!
//! Tests for:
//! - Exact reproduction of either source at alpha 0 / 1
//! - Interpolated midpoints when both sources are written
//! - Partial-write propagation and untouched slots

use std::sync::Arc;

use glam::{Quat, Vec3};

use kinema::{Animation, Keyframe, NodeTrack, Scene, Skeleton};

const RIG: [&str; 4] = ["hips", "spine", "arm", "tail"];

fn pose_track(name: &str, position: Vec3, rotation: Quat, scale: Vec3) -> NodeTrack {
    NodeTrack::new(
        name,
        vec![
            Keyframe::new(0.0, position, rotation, scale),
            Keyframe::new(1.0, position * 2.0, rotation * Quat::from_rotation_x(0.5), scale),
        ],
    )
}

fn walk() -> Arc<Animation> {
    Arc::new(Animation::new(
        "walk",
        vec![
            pose_track("hips", Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(0.1), Vec3::ONE),
            pose_track("spine", Vec3::new(0.0, 0.3, 0.1), Quat::from_rotation_z(0.2), Vec3::ONE),
            pose_track("arm", Vec3::new(0.4, 0.0, 0.0), Quat::from_rotation_x(-0.3), Vec3::splat(0.9)),
        ],
    ))
}

fn run() -> Arc<Animation> {
    Arc::new(Animation::new(
        "run",
        vec![
            pose_track("hips", Vec3::new(0.0, 0.8, 0.3), Quat::from_rotation_y(0.6), Vec3::ONE),
            pose_track("spine", Vec3::new(0.0, 0.25, 0.3), Quat::from_rotation_z(-0.4), Vec3::splat(1.1)),
        ],
    ))
}

fn playing(animation: Arc<Animation>, time: f64) -> Skeleton {
    let mut skeleton = Skeleton::from_node_names(RIG);
    skeleton.assign_animation(animation);
    skeleton.set_time(time).unwrap();
    skeleton
}

#[test]
fn alpha_zero_reproduces_first_source() {
    let a = playing(walk(), 0.37);
    let b = playing(run(), 0.81);
    let mut out = Skeleton::with_layout_of(&a);

    out.blend(&a, &b, 0.0);

    for (dst, src) in out.slots().iter().zip(a.slots()) {
        if src.is_written() {
            assert!(dst.is_written());
            assert_eq!(dst.pose(), src.pose(), "slot {}", src.node_name());
        }
    }
}

#[test]
fn alpha_one_reproduces_second_source() {
    let a = playing(walk(), 0.37);
    let b = playing(run(), 0.81);
    let mut out = Skeleton::with_layout_of(&a);

    out.blend(&a, &b, 1.0);

    for name in ["hips", "spine"] {
        assert_eq!(out.slot(name).unwrap().pose(), b.slot(name).unwrap().pose());
    }
}

#[test]
fn midpoint_interpolates_every_channel() {
    let a = playing(walk(), 0.0);
    let b = playing(run(), 0.0);
    let mut out = Skeleton::with_layout_of(&a);

    out.blend(&a, &b, 0.5);

    let hips = out.slot("hips").unwrap();
    assert!((hips.position() - Vec3::new(0.0, 0.9, 0.15)).abs().max_element() < 1e-5);
    let expected = Quat::from_rotation_y(0.35);
    assert!(hips.rotation().abs_diff_eq(expected, 1e-4), "got {:?}", hips.rotation());

    let spine = out.slot("spine").unwrap();
    assert!((spine.scale() - Vec3::splat(1.05)).abs().max_element() < 1e-5);
}

#[test]
fn one_sided_slot_copies_the_written_source() {
    let a = playing(walk(), 0.6);
    let b = playing(run(), 0.2);
    let mut out = Skeleton::with_layout_of(&a);

    // "arm" only exists in walk
    for alpha in [0.0, 0.25, 0.5, 1.0] {
        out.blend(&a, &b, alpha);
        assert_eq!(out.slot("arm").unwrap().pose(), a.slot("arm").unwrap().pose());
    }

    // Swapping sources copies from the other side
    out.blend(&b, &a, 0.3);
    assert_eq!(out.slot("arm").unwrap().pose(), a.slot("arm").unwrap().pose());
    assert!(out.slot("arm").unwrap().is_written());
}

#[test]
fn slot_written_by_neither_stays_untouched() {
    let a = playing(walk(), 0.6);
    let b = playing(run(), 0.2);
    let mut out = Skeleton::with_layout_of(&a);

    out.blend(&a, &b, 0.5);

    let tail = out.slot("tail").unwrap();
    assert!(!tail.is_written());
    assert_eq!(tail.position(), Vec3::ZERO);
    assert_eq!(tail.rotation(), Quat::IDENTITY);
    assert_eq!(tail.scale(), Vec3::ONE);
}

#[test]
fn blended_pose_pushes_into_scene() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("hips");
    let spine = scene.create_node_with_name("spine");
    scene.attach(spine, root);

    let a = playing(walk(), 0.5);
    let b = playing(run(), 0.5);
    let mut out = Skeleton::with_layout_of(&a);
    out.bind(&scene, root).unwrap();

    out.blend(&a, &b, 0.25);
    let expected = *out.slot("spine").unwrap().pose();
    out.push_pose(&mut scene);

    let transform = &scene.get_node(spine).unwrap().transform;
    assert_eq!(transform.position, expected.position);
    assert_eq!(transform.rotation, expected.rotation);
    assert!(!out.slot("spine").unwrap().is_written());
}
