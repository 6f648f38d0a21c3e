// recursive tree mesh construction
//
// The whole tree is one indexed triangle list. Buffer sizes are computed in
// closed form before any write, then a recursive fill walks the trunk
// ring-by-ring and spawns one branch subtree per ring with strictly smaller
// depth. Every slot is written exactly once; nothing is ever resized.
//
// The closed forms and the recursion shape are a proven pair: a call with
// `loops` remaining writes sides*(loops+1) vertices and 6*sides*loops indices
// itself, and its children chain cursors starting right past that block.
// Changing how branches spawn means rederiving both formulas (the test suite
// sweeps (L, S) to catch drift).

use bevy::prelude::*;

use super::archetype::{ArchetypeError, BranchProfile, TreeArchetype};
use super::sampler::TreeRng;

/// Raw geometry produced by [`generate`]. Indices are positional and
/// permanent; every triangle index is in `[0, vertices.len())`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<u32>,
}

impl TreeMesh {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Exact vertex count for `loops` ring-to-ring segments of `sides`-gon rings:
/// one trunk chain of `loops` rings plus a branch subtree at every ring,
/// which doubles the segment count per level. Closed form: `3*S*2^(L-1) - S`.
pub fn vertex_count(loops: i32, sides: i32) -> usize {
    if loops <= 0 {
        return 0;
    }
    let s = sides as usize;
    3 * s * (1usize << (loops as usize - 1)) - s
}

/// Exact triangle-index count: `2^L - 1` total segments across the whole
/// tree, each contributing 2 triangles per side. Closed form: `6*S*(2^L - 1)`.
pub fn index_count(loops: i32, sides: i32) -> usize {
    if loops <= 0 {
        return 0;
    }
    6 * sides as usize * ((1usize << loops as usize) - 1)
}

/// Builds a complete tree mesh from a validated archetype.
///
/// `origin`, `up` and `forward` define the initial frame (placement logic
/// supplies the origin, the core treats it as opaque). The initial forward is
/// turned by a uniform azimuth first, so repeated calls with the same
/// parameters only coincide when `rng` is seeded identically.
///
/// # Returns
/// The finished mesh, or an [`ArchetypeError`] before any allocation when the
/// archetype is invalid. `loop_count == 0` yields an empty mesh, not an error.
pub fn generate(
    archetype: &TreeArchetype,
    origin: Vec3,
    up: Vec3,
    forward: Vec3,
    rng: &mut dyn TreeRng,
) -> Result<TreeMesh, ArchetypeError> {
    archetype.validate()?;

    if archetype.loop_count == 0 {
        return Ok(TreeMesh::default());
    }

    // randomize the starting azimuth so identical archetypes differ visually
    let forward = Quat::from_axis_angle(up, rng.draw_turn().to_radians()) * forward;

    let mut vertices = vec![Vec3::ZERO; vertex_count(archetype.loop_count, archetype.sides)];
    let mut triangles = vec![0u32; index_count(archetype.loop_count, archetype.sides)];

    let mut fill = Fill {
        sides: archetype.sides as usize,
        main: archetype.main,
        secondary: archetype.secondary,
        rng,
        vertices: &mut vertices,
        triangles: &mut triangles,
    };
    let (final_vc, final_tc) = fill.run(
        archetype.loop_count,
        origin,
        up,
        forward,
        archetype.trunk_height,
        archetype.trunk_width,
        0,
        0,
    );

    // cursor overrun or shortfall is a defect in the size/recursion pair
    debug_assert_eq!(final_vc, vertices.len());
    debug_assert_eq!(final_tc, triangles.len());

    let normals = recompute_normals(&vertices, &triangles);

    Ok(TreeMesh { vertices, normals, triangles })
}

// shared fill state; both buffers are exclusively borrowed for the whole
// recursion, children receive disjoint regions through returned cursors
struct Fill<'a> {
    sides: usize,
    main: BranchProfile,
    secondary: BranchProfile,
    rng: &'a mut dyn TreeRng,
    vertices: &'a mut [Vec3],
    triangles: &'a mut [u32],
}

impl Fill<'_> {
    // returns the cursors past everything this subtree wrote
    #[allow(clippy::too_many_arguments)]
    fn run(
        &mut self,
        loops: i32,
        mut origin: Vec3,
        mut up: Vec3,
        mut forward: Vec3,
        mut height: f32,
        mut width: f32,
        vc: usize,
        tc: usize,
    ) -> (usize, usize) {
        if loops <= 0 {
            return (vc, tc);
        }
        let loops_here = loops as usize;
        let sides = self.sides;

        // children write past this call's own block
        let mut next_vc = vc + sides * (loops_here + 1);
        let mut next_tc = tc + 6 * sides * loops_here;

        self.write_ring(vc, origin, up, forward, width);

        for i in 0..loops_here {
            origin += height * up;
            width *= self.rng.draw(self.main.width_scale);

            // branch frame, drawn independently of the trunk's own turn:
            // swing around up, then bend the up axis around forward
            let branch_swing =
                Quat::from_axis_angle(up, self.rng.draw(self.secondary.rotation).to_radians());
            let branch_up = branch_swing
                * Quat::from_axis_angle(forward, self.rng.draw(self.secondary.bending).to_radians())
                * up;
            let branch_forward = branch_swing * forward;

            let prev_up = up;
            let prev_forward = forward;

            // the trunk's own turn for the rings above this one
            let swing = Quat::from_axis_angle(up, self.rng.draw(self.main.rotation).to_radians());
            up = swing
                * Quat::from_axis_angle(forward, self.rng.draw(self.main.bending).to_radians())
                * up;
            forward = swing * forward;

            // halfway frame for the next ring, smooths the crease at the turn
            let mid_up = (prev_up + up).normalize();
            let mid_forward = (prev_forward + forward).normalize();

            self.write_ring(vc + (i + 1) * sides, origin, mid_up, mid_forward, width);

            // two triangles per side quad between ring i and ring i+1,
            // wound so face normals point away from the trunk axis
            for j in 0..sides {
                let lower = (vc + i * sides + j) as u32;
                let lower_next = (vc + i * sides + (j + 1) % sides) as u32;
                let upper = (vc + (i + 1) * sides + j) as u32;
                let upper_next = (vc + (i + 1) * sides + (j + 1) % sides) as u32;

                let t = tc + 6 * (i * sides + j);
                self.triangles[t..t + 6]
                    .copy_from_slice(&[lower, lower_next, upper, upper, lower_next, upper_next]);
            }

            // one branch subtree per ring, with strictly less depth than the
            // trunk has remaining, so nesting terminates with the trunk
            let branch_height = height * self.rng.draw(self.secondary.height_scale);
            let branch_width = width * self.rng.draw(self.secondary.width_scale);
            (next_vc, next_tc) = self.run(
                loops - i as i32 - 1,
                origin,
                branch_up,
                branch_forward,
                branch_height,
                branch_width,
                next_vc,
                next_tc,
            );

            height *= self.rng.draw(self.main.height_scale);
        }

        (next_vc, next_tc)
    }

    // one ring of `sides` vertices around `up`, starting along `forward`
    fn write_ring(&mut self, at: usize, origin: Vec3, up: Vec3, forward: Vec3, width: f32) {
        let step = 360.0 / self.sides as f32;
        for j in 0..self.sides {
            let spoke = Quat::from_axis_angle(up, (j as f32 * step).to_radians()) * forward;
            self.vertices[at + j] = origin + spoke * width;
        }
    }
}

// per-vertex normal as the normalized sum of adjacent face normals;
// the cross product is area-weighted, which is what we want for smoothing
fn recompute_normals(vertices: &[Vec3], triangles: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for normal in normals.iter_mut() {
        // degenerate fans (e.g. zero-area quads) fall back to straight up
        *normal = normal.try_normalize().unwrap_or(Vec3::Y);
    }

    normals
}
