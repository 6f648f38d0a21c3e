use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

// ground reference grid
// so the user can judge tree scale and pick placement spots
pub struct GridPlugin;

// resource so the UI can toggle it at runtime
#[derive(Resource)]
pub struct GridConfig {
    pub cell_size: f32,
    pub cell_count: u32,
    pub color: Color,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            cell_count: 200,
            color: Color::srgba(0.5, 0.5, 0.5, 0.12),
            enabled: true,
        }
    }
}

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GridConfig::default())
            .add_systems(Update, draw_grid);
    }
}

fn draw_grid(mut gizmos: Gizmos, config: Res<GridConfig>) {
    if !config.enabled {
        return;
    }

    // gizmo grids lie in the XY plane, tilt onto XZ
    gizmos
        .grid(
            Isometry3d::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            UVec2::splat(config.cell_count),
            Vec2::splat(config.cell_size),
            config.color,
        )
        .outer_edges();
}
