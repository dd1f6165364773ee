//! Demonstration of mesh building, texture synthesis and regeneration

use rust_cubesphere_planet::*;

fn main() -> Result<()> {
    println!("Building surface...");

    let config = SurfaceConfigBuilder::new()
        .seed(42)
        .resolution(16)?
        .texture_resolution(64)?
        .restart_duration(0.5)?
        .build()?;

    let mut surface = SurfaceController::new(config)?;
    let mesh = surface.mesh();

    println!("\nMesh statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    for face in CubeFace::ALL {
        println!("  {:?}: {} indices", face, mesh.face_indices(face).len());
    }

    // Share of blue-dominant texels
    let ocean_share = |textures: &FaceTextureSet| {
        let total: usize = textures.iter().map(|t| t.pixels().len()).sum();
        let ocean: usize = textures
            .iter()
            .flat_map(|t| t.pixels())
            .filter(|c| c[2] > c[0] && c[2] > c[1])
            .count();
        ocean as f32 / total as f32 * 100.0
    };
    println!("\nSeed 42: {:.1}% ocean", ocean_share(surface.textures()));

    // Simulate a 60 fps host loop through one regeneration
    surface.regenerate(7)?;
    let mut frames = 0;
    while !surface.advance(1.0 / 60.0)? {
        frames += 1;
    }
    println!(
        "Seed 7 after {} frames: {:.1}% ocean (texture generation {})",
        frames,
        ocean_share(surface.textures()),
        surface.texture_generation()
    );

    // Perlin family for comparison
    let perlin = SurfaceConfigBuilder::new()
        .seed(42)
        .resolution(16)?
        .texture_resolution(64)?
        .noise_type(NoiseType::Perlin)
        .build()?;
    let perlin_surface = SurfaceController::new(perlin)?;
    println!("Perlin seed 42: {:.1}% ocean", ocean_share(perlin_surface.textures()));

    Ok(())
}
