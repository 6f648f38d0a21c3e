// saves the scene as an obj file
// by iterating through all tree meshes

use bevy::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};

// export event
#[derive(Event)]
pub struct ExportEvent {
    pub filename: String,
}

// export all tree meshes in the scene
pub fn export_obj(
    meshes: &Assets<Mesh>,
    trees: &Query<(&Mesh3d, &Transform), With<crate::systems::tree::grove::Tree>>,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Exported from arbor_gen")?;

    // OBJ indices start at 1
    let mut vertex_offset = 1u32;
    let mut tree_count = 0;

    for (mesh3d, transform) in trees.iter() {
        let Some(mesh) = meshes.get(&mesh3d.0) else { continue };
        let Some(positions) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) else { continue };
        let bevy::render::mesh::VertexAttributeValues::Float32x3(vertices) = positions else {
            continue;
        };

        writeln!(writer, "o Tree_{}", tree_count)?;

        // bake the entity transform so trees land where they stand in the scene
        for vertex in vertices {
            let world = transform.transform_point(Vec3::from_array(*vertex));
            writeln!(writer, "v {} {} {}", world.x, world.y, world.z)?;
        }

        if let Some(normals) = mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            if let bevy::render::mesh::VertexAttributeValues::Float32x3(normals) = normals {
                for normal in normals {
                    let world = transform.rotation * Vec3::from_array(*normal);
                    writeln!(writer, "vn {} {} {}", world.x, world.y, world.z)?;
                }
            }
        }

        if let Some(bevy::render::mesh::Indices::U32(indices)) = mesh.indices() {
            for chunk in indices.chunks(3) {
                if chunk.len() == 3 {
                    let (a, b, c) = (
                        vertex_offset + chunk[0],
                        vertex_offset + chunk[1],
                        vertex_offset + chunk[2],
                    );
                    writeln!(writer, "f {}//{} {}//{} {}//{}", a, a, b, b, c, c)?;
                }
            }
        }

        vertex_offset += vertices.len() as u32;
        writeln!(writer)?;
        tree_count += 1;
    }

    writer.flush()?;
    println!("Exported {} trees to {}", tree_count, filename);

    Ok(())
}

// handle export events
pub fn handle_export(
    mut events: EventReader<ExportEvent>,
    meshes: Res<Assets<Mesh>>,
    trees: Query<(&Mesh3d, &Transform), With<crate::systems::tree::grove::Tree>>,
) {
    for event in events.read() {
        match export_obj(&meshes, &trees, &event.filename) {
            Ok(()) => {
                println!("Export successful: {}", event.filename);
            }
            Err(e) => {
                eprintln!("Export failed: {}", e);
            }
        }
    }
}
