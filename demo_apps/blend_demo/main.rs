//! Plays a walk and a run cycle on the same rig, cross-fades between them
//! over two seconds and prints the hips' world position every few frames.
//!
//! Run with `RUST_LOG=debug` to see assignment and binding diagnostics.

use std::f32::consts::TAU;
use std::sync::Arc;

use kinema::glam::{Quat, Vec3};
use kinema::prelude::*;

const FRAME: f64 = 1.0 / 30.0;

fn build_rig(scene: &mut Scene) -> NodeHandle {
    let root = scene.create_node_with_name("root");
    let hips = scene.create_node_with_name("hips");
    let spine = scene.create_node_with_name("spine");
    let head = scene.create_node_with_name("head");

    scene.attach(hips, root);
    scene.attach(spine, hips);
    scene.attach(head, spine);

    for (handle, height) in [(hips, 1.0), (spine, 0.4), (head, 0.3)] {
        if let Some(node) = scene.get_node_mut(handle) {
            node.transform.position = Vec3::new(0.0, height, 0.0);
        }
    }

    root
}

/// A looping gait: hips bob and sway, spine twists.
fn gait(name: &str, period: f64, bob: f32, twist: f32) -> Animation {
    const SAMPLES: usize = 9;

    let mut hips = Vec::with_capacity(SAMPLES);
    let mut spine = Vec::with_capacity(SAMPLES);
    for i in 0..SAMPLES {
        let phase = i as f32 / (SAMPLES - 1) as f32;
        let time = period * f64::from(phase);
        let angle = phase * TAU;

        hips.push(Keyframe::from_position(
            time,
            Vec3::new(angle.sin() * 0.05, 1.0 + (angle * 2.0).sin().abs() * bob, 0.0),
        ));
        spine.push(Keyframe::new(
            time,
            Vec3::new(0.0, 0.4, 0.0),
            Quat::from_rotation_y(angle.sin() * twist),
            Vec3::ONE,
        ));
    }

    Animation::new(name, vec![NodeTrack::new("hips", hips), NodeTrack::new("spine", spine)])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut scene = Scene::new();
    let root = build_rig(&mut scene);

    let walk = Arc::new(gait("walk", 1.2, 0.04, 0.15));
    let run = Arc::new(gait("run", 0.7, 0.12, 0.35));
    walk.validate()?;
    run.validate()?;

    let mut walker = Skeleton::from_hierarchy(&scene, root)?;
    let mut runner = Skeleton::with_layout_of(&walker);
    let mut output = Skeleton::with_layout_of(&walker);

    walker.assign_animation(walk);
    runner.assign_animation(run);
    output.bind(&scene, root)?;

    let head = scene
        .find_node_by_name(root, "head")
        .ok_or_else(|| anyhow::anyhow!("rig has no head"))?;

    let frames = (3.0 / FRAME).round() as usize;
    for frame in 0..frames {
        let elapsed = frame as f64 * FRAME;
        let alpha = ((elapsed - 0.5) / 2.0).clamp(0.0, 1.0) as f32;

        walker.advance_time(FRAME);
        runner.advance_time(FRAME);
        output.blend(&walker, &runner, alpha);
        output.push_pose(&mut scene);
        scene.update_matrix_world();

        if frame % 10 == 0 {
            let world = scene
                .get_node(head)
                .map(|node| Vec3::from(node.world_matrix().translation))
                .unwrap_or_default();
            log::info!(
                "t={elapsed:5.2}s blend={alpha:4.2} walk@{:4.2} run@{:4.2} head=({:+.3}, {:.3}, {:+.3})",
                walker.current_time(),
                runner.current_time(),
                world.x,
                world.y,
                world.z
            );
        }
    }

    Ok(())
}
