use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::systems::tree::{
    builder, grove, ArchetypeError, BranchProfile, Interval, TreeArchetype, TreeRng,
    index_count, vertex_count,
};

// sampler that always takes the low end of every interval and never turns,
// makes geometry exactly predictable
struct MinDraws;

impl TreeRng for MinDraws {
    fn draw(&mut self, interval: Interval) -> f32 {
        interval.min
    }

    fn draw_turn(&mut self) -> f32 {
        0.0
    }
}

// sampler that counts every draw, to pin down the recursion shape
struct CountingDraws {
    draws: usize,
    turns: usize,
}

impl TreeRng for CountingDraws {
    fn draw(&mut self, interval: Interval) -> f32 {
        self.draws += 1;
        interval.min
    }

    fn draw_turn(&mut self) -> f32 {
        self.turns += 1;
        0.0
    }
}

fn fixed_profile() -> BranchProfile {
    BranchProfile {
        height_scale: Interval::new(1.0, 1.0),
        width_scale: Interval::new(1.0, 1.0),
        rotation: Interval::new(0.0, 0.0),
        bending: Interval::new(0.0, 0.0),
    }
}

// straight tree: all scales 1, all angles 0
fn straight_archetype(loop_count: i32, sides: i32) -> TreeArchetype {
    TreeArchetype {
        loop_count,
        sides,
        trunk_height: 2.0,
        trunk_width: 1.0,
        main: fixed_profile(),
        secondary: fixed_profile(),
    }
}

fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        actual.distance(expected) < 1e-4,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn buffer_sizes_match_closed_form() {
    // the formula pair and the recursion must not drift apart; generate()
    // also debug-asserts the final cursors, so any mismatch panics here
    for loops in 0..=6 {
        for sides in [3, 4, 5, 8, 12] {
            let mut archetype = TreeArchetype::default();
            archetype.loop_count = loops;
            archetype.sides = sides;

            let mut rng = StdRng::seed_from_u64(17 * loops as u64 + sides as u64);
            let mesh =
                builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng).unwrap();

            assert_eq!(mesh.vertices.len(), vertex_count(loops, sides));
            assert_eq!(mesh.triangles.len(), index_count(loops, sides));
            assert_eq!(mesh.normals.len(), mesh.vertices.len());
        }
    }
}

#[test]
fn zero_loops_yield_empty_mesh() {
    let mut archetype = TreeArchetype::default();
    archetype.loop_count = 0;

    let mut rng = StdRng::seed_from_u64(1);
    let mesh = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng).unwrap();

    assert!(mesh.is_empty());
    assert!(mesh.triangles.is_empty());
    assert!(mesh.normals.is_empty());
}

#[test]
fn triangle_indices_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let archetype = TreeArchetype::default();
    let mesh = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng).unwrap();

    assert!(!mesh.triangles.is_empty());
    for &index in &mesh.triangles {
        assert!((index as usize) < mesh.vertices.len());
    }
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let archetype = TreeArchetype::default();

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let a = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng_a).unwrap();
    let b = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng_b).unwrap();

    assert_eq!(a, b);
}

#[test]
fn single_loop_quad_band() {
    // S=4, L=1, height 2, width 1: two square rings joined by 8 triangles
    let archetype = straight_archetype(1, 4);
    let mesh = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut MinDraws).unwrap();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.triangles.len(), 24); // 8 triangles

    // ring 0 at y=0, radius 1 around the y axis, starting along +Z
    assert_vec3_near(mesh.vertices[0], Vec3::new(0.0, 0.0, 1.0));
    assert_vec3_near(mesh.vertices[1], Vec3::new(1.0, 0.0, 0.0));
    assert_vec3_near(mesh.vertices[2], Vec3::new(0.0, 0.0, -1.0));
    assert_vec3_near(mesh.vertices[3], Vec3::new(-1.0, 0.0, 0.0));

    // ring 1 lifted by the segment height, same radius
    for j in 0..4 {
        assert_vec3_near(mesh.vertices[4 + j], mesh.vertices[j] + Vec3::new(0.0, 2.0, 0.0));
    }

    // each side quad is the expected two triangles over four indices
    for j in 0..4u32 {
        let next = (j + 1) % 4;
        let t = (6 * j) as usize;
        assert_eq!(&mesh.triangles[t..t + 6], &[j, next, 4 + j, 4 + j, next, 4 + next][..]);
    }
}

#[test]
fn ring_quads_share_expected_edges() {
    // every consecutive index pair of triangles forms one side quad:
    // A = (lower, lower_next, upper), B = (upper, lower_next, upper_next)
    let mut rng = StdRng::seed_from_u64(23);
    let archetype = TreeArchetype::default();
    let mesh = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng).unwrap();

    for quad in mesh.triangles.chunks_exact(6) {
        assert_eq!(quad[2], quad[3]); // shared upper corner
        assert_eq!(quad[1], quad[4]); // shared lower-next corner
        let corners = [quad[0], quad[1], quad[2], quad[5]];
        for i in 0..4 {
            for k in (i + 1)..4 {
                assert_ne!(corners[i], corners[k]);
            }
        }
    }
}

#[test]
fn draw_count_pins_recursion_shape() {
    // 8 interval draws per ring segment, 2^L - 1 segments across the whole
    // tree (one branch per ring with depth loops - i - 1), one azimuth turn
    for loops in 1..=6 {
        let archetype = straight_archetype(loops, 4);
        let mut counter = CountingDraws { draws: 0, turns: 0 };
        builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut counter).unwrap();

        let segments = (1usize << loops) - 1;
        assert_eq!(counter.draws, 8 * segments);
        assert_eq!(counter.turns, 1);
    }
}

#[test]
fn normals_are_unit_length() {
    let mut rng = StdRng::seed_from_u64(42);
    let archetype = TreeArchetype::default();
    let mesh = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng).unwrap();

    for normal in &mesh.normals {
        assert!((normal.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn normals_face_outward_on_straight_trunk() {
    let archetype = straight_archetype(1, 4);
    let mesh = builder::generate(&archetype, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut MinDraws).unwrap();

    // vertex 0 sits at +Z on the trunk axis, its normal must point away
    assert!(mesh.normals[0].dot(Vec3::Z) > 0.5);
    // vertex 1 sits at +X
    assert!(mesh.normals[1].dot(Vec3::X) > 0.5);
}

#[test]
fn invalid_archetypes_are_rejected() {
    let mut rng = StdRng::seed_from_u64(1);

    let mut too_few_sides = TreeArchetype::default();
    too_few_sides.sides = 2;
    assert_eq!(
        builder::generate(&too_few_sides, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng),
        Err(ArchetypeError::TooFewSides(2))
    );

    let mut negative_loops = TreeArchetype::default();
    negative_loops.loop_count = -1;
    assert_eq!(
        builder::generate(&negative_loops, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng),
        Err(ArchetypeError::NegativeLoopCount(-1))
    );

    let mut inverted = TreeArchetype::default();
    inverted.secondary.bending = Interval::new(10.0, -10.0);
    assert!(matches!(
        inverted.validate(),
        Err(ArchetypeError::InvertedInterval { class: "secondary", label: "bending", .. })
    ));

    let mut flat_trunk = TreeArchetype::default();
    flat_trunk.trunk_width = 0.0;
    assert!(matches!(
        flat_trunk.validate(),
        Err(ArchetypeError::NonPositiveTrunk { .. })
    ));
}

#[test]
fn default_archetype_is_valid() {
    assert!(TreeArchetype::default().validate().is_ok());
}

#[test]
fn degenerate_intervals_draw_their_bound() {
    // empty ranges must not panic in rand, the sampler short-circuits them
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(rng.draw(Interval::new(5.0, 5.0)), 5.0);

    let value = rng.draw(Interval::new(1.0, 2.0));
    assert!((1.0..2.0).contains(&value));
}

#[test]
fn grove_scatter_is_seeded() {
    let a = grove::grove_positions(5, 14.0, 3.0, 77);
    let b = grove::grove_positions(5, 14.0, 3.0, 77);
    let c = grove::grove_positions(5, 14.0, 3.0, 78);

    assert_eq!(a.len(), 5);
    assert_eq!(a, b);
    assert_ne!(a, c);
    for position in &a {
        assert_eq!(position.y, 0.0);
    }
}
