use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use noise::{NoiseFn, Perlin};

use crate::camera::ground::{GroundSurfaces, HeightfieldGround};

// === TERRAIN DEFAULTS ===
const TERRAIN_SIZE: f32 = 8000.0;
const TERRAIN_RESOLUTION: u32 = 128;
const NOISE_HEIGHT: f32 = 300.0;
const NOISE_SCALE: f32 = 1500.0;
const NOISE_SEED: u32 = 42;
const DETAIL_OCTAVE_SCALE: f64 = 3.0;
const DETAIL_OCTAVE_WEIGHT: f32 = 0.3;

#[derive(Resource, Debug, Clone)]
pub struct TerrainSettings {
    /// Edge length of the square terrain, centered on the origin.
    pub size: f32,
    /// Quads per edge.
    pub resolution: u32,
    pub noise_height: f32,
    pub noise_scale: f32,
    pub seed: u32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: TERRAIN_SIZE,
            resolution: TERRAIN_RESOLUTION,
            noise_height: NOISE_HEIGHT,
            noise_scale: NOISE_SCALE,
            seed: NOISE_SEED,
        }
    }
}

/// Height lookup for the generated terrain, shared by the mesh builder, the
/// camera's ground surface and anything walking on the ground.
#[derive(Resource, Clone)]
pub struct Heightmap {
    noise: Perlin,
    settings: TerrainSettings,
}

impl Heightmap {
    pub fn new(settings: TerrainSettings) -> Self {
        Self {
            noise: Perlin::new(settings.seed),
            settings,
        }
    }

    /// Base octave plus one detail octave, scaled to `noise_height`.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let scale = 1.0 / self.settings.noise_scale.max(f32::EPSILON) as f64;
        let point = [x as f64 * scale, z as f64 * scale];
        let base = self.noise.get(point) as f32;
        let detail = self
            .noise
            .get([point[0] * DETAIL_OCTAVE_SCALE, point[1] * DETAIL_OCTAVE_SCALE]) as f32;
        (base + detail * DETAIL_OCTAVE_WEIGHT) * self.settings.noise_height
    }

    /// Planar `(x, z)` corners covered by the terrain.
    pub fn extent(&self) -> (Vec2, Vec2) {
        let half = self.settings.size * 0.5;
        (Vec2::splat(-half), Vec2::splat(half))
    }

    pub fn build_mesh(&self) -> Mesh {
        let resolution = self.settings.resolution.max(1);
        let step = self.settings.size / resolution as f32;
        let (min, _) = self.extent();
        let row = resolution + 1;

        let mut heights = Vec::with_capacity((row * row) as usize);
        let mut positions = Vec::with_capacity((row * row) as usize);
        let mut uvs = Vec::with_capacity((row * row) as usize);
        for z in 0..row {
            for x in 0..row {
                let world_x = min.x + x as f32 * step;
                let world_z = min.y + z as f32 * step;
                let height = self.height_at(world_x, world_z);
                heights.push(height);
                positions.push([world_x, height, world_z]);
                uvs.push([x as f32 / resolution as f32, z as f32 / resolution as f32]);
            }
        }

        let height = |x: i64, z: i64| {
            let x = x.clamp(0, resolution as i64) as u32;
            let z = z.clamp(0, resolution as i64) as u32;
            heights[(z * row + x) as usize]
        };
        let mut normals = Vec::with_capacity(positions.len());
        for z in 0..row as i64 {
            for x in 0..row as i64 {
                let dx = height(x + 1, z) - height(x - 1, z);
                let dz = height(x, z + 1) - height(x, z - 1);
                let normal = Vec3::new(-dx, 2.0 * step, -dz).normalize_or(Vec3::Y);
                normals.push(normal.to_array());
            }
        }

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for z in 0..resolution {
            for x in 0..resolution {
                let i = z * row + x;
                let below = i + row;
                indices.extend_from_slice(&[i, below, i + 1, i + 1, below, below + 1]);
            }
        }

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        mesh.insert_indices(Indices::U32(indices));
        mesh
    }

    /// The terrain as a surface the camera's ground probe can hit.
    pub fn ground_surface(&self) -> HeightfieldGround {
        let (min, max) = self.extent();
        let heightmap = self.clone();
        HeightfieldGround::new(min, max, move |x, z| heightmap.height_at(x, z))
    }
}

/// Builds the terrain mesh and registers it as camera ground.
pub fn spawn_terrain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ground: ResMut<GroundSurfaces>,
    settings: Res<TerrainSettings>,
) {
    let heightmap = Heightmap::new(settings.clone());
    let mesh = heightmap.build_mesh();

    commands.spawn((
        Name::new("Terrain"),
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.6, 0.7, 0.4),
            perceptual_roughness: 0.8,
            metallic: 0.0,
            reflectance: 0.2,
            ..default()
        })),
        Transform::default(),
    ));

    ground.add(heightmap.ground_surface());
    commands.insert_resource(heightmap);

    info!(
        "Terrain generated: {}x{} units, {} quads per edge",
        settings.size, settings.size, settings.resolution
    );
}
