//! Coverage and occlusion probe over a small built-in scene.
//!
//! Fires stratified primary rays through a pinhole with a thin-lens jitter,
//! then estimates ambient occlusion at every primary hit with hemisphere rays.

use crate::{
    error::Result,
    hittable::{Hit, World},
    interval::Interval,
    intersection::MaterialId,
    planar::{Disk, Quad, Triangle},
    ray::Ray,
    sampling::StratifiedGrid,
    sphere::Sphere,
    vec3::{Float, Point3, Vec3, Vec3Ext},
};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use std::{fmt, ops::Add};

pub const WHITE: MaterialId = MaterialId(0);
pub const RED: MaterialId = MaterialId(1);
pub const GREEN: MaterialId = MaterialId(2);
pub const LIGHT: MaterialId = MaterialId(3);
pub const GLASS: MaterialId = MaterialId(4);
pub const METAL: MaterialId = MaterialId(5);
pub const MATERIAL_COUNT: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct ProbeConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub occlusion_samples: u32,
    /// Occluders further than this don't count
    pub occlusion_distance: Float,
    /// Lens radius, 0 for a pinhole
    pub aperture: Float,
    pub focus_distance: Float,
    pub vertical_fov: Float,
    pub lookfrom: Point3,
    pub lookat: Point3,
    /// Lower bound of every ray span, keeps secondary rays off their own surface
    pub t_min: Float,
    pub seed: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            image_width: 160,
            image_height: 160,
            samples_per_pixel: 16,
            occlusion_samples: 8,
            occlusion_distance: 100.0,
            aperture: 2.0,
            focus_distance: 800.0,
            vertical_fov: 40.0,
            lookfrom: Vec3::new(278.0, 278.0, -800.0),
            lookat: Vec3::new(278.0, 278.0, 0.0),
            t_min: 0.001,
            seed: 0x5eed,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbeReport {
    pub primary_rays: u64,
    pub hits: u64,
    pub front_face_hits: u64,
    pub material_hits: [u64; MATERIAL_COUNT],
    pub occlusion_rays: u64,
    pub occluded: u64,
}

impl ProbeReport {
    pub fn coverage(&self) -> Float {
        if self.primary_rays == 0 {
            return 0.0;
        }
        self.hits as Float / self.primary_rays as Float
    }

    pub fn mean_occlusion(&self) -> Float {
        if self.occlusion_rays == 0 {
            return 0.0;
        }
        self.occluded as Float / self.occlusion_rays as Float
    }
}

impl Add for ProbeReport {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut material_hits = self.material_hits;
        for (total, count) in material_hits.iter_mut().zip(rhs.material_hits) {
            *total += count;
        }
        ProbeReport {
            primary_rays: self.primary_rays + rhs.primary_rays,
            hits: self.hits + rhs.hits,
            front_face_hits: self.front_face_hits + rhs.front_face_hits,
            material_hits,
            occlusion_rays: self.occlusion_rays + rhs.occlusion_rays,
            occluded: self.occluded + rhs.occluded,
        }
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "coverage: {:.3} ({} / {} primary rays)",
            self.coverage(),
            self.hits,
            self.primary_rays
        )?;
        writeln!(f, "front faces: {}", self.front_face_hits)?;
        writeln!(f, "hits per material: {:?}", self.material_hits)?;
        write!(
            f,
            "mean occlusion: {:.3} over {} rays",
            self.mean_occlusion(),
            self.occlusion_rays
        )
    }
}

/// Five-walled box with a ceiling light, two spheres, a triangle and a disk.
pub fn cornell_box() -> World {
    let mut world = World::default();

    let white_walls = [
        // floor, ceiling, back
        (Vec3::zeros(), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0)),
        (
            Vec3::new(555.0, 555.0, 555.0),
            Vec3::new(-555.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -555.0),
        ),
        (
            Vec3::new(0.0, 0.0, 555.0),
            Vec3::new(555.0, 0.0, 0.0),
            Vec3::new(0.0, 555.0, 0.0),
        ),
    ];
    for (corner, u, v) in white_walls {
        world.push(Quad::new(corner, u, v, WHITE, false));
    }
    world.push(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        GREEN,
        false,
    ));
    world.push(Quad::new(
        Vec3::zeros(),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        RED,
        false,
    ));
    // cross(u, v) points down into the box
    world.push(Quad::new(
        Vec3::new(213.0, 554.0, 227.0),
        Vec3::new(130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 105.0),
        LIGHT,
        true,
    ));

    world.push(Sphere::new(Vec3::new(190.0, 90.0, 190.0), 90.0, GLASS));
    world.push(Sphere::new(Vec3::new(370.0, 120.0, 370.0), 120.0, METAL));
    world.push(Triangle::new(
        Vec3::new(400.0, 1.0, 60.0),
        Vec3::new(120.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 120.0),
        RED,
        false,
    ));
    world.push(Disk::centered(
        Vec3::new(120.0, 1.0, 420.0),
        Vec3::new(0.0, 0.0, 80.0),
        Vec3::new(80.0, 0.0, 0.0),
        GREEN,
        false,
    ));

    world
}

/// Pinhole with an optional thin-lens jitter
struct Lens {
    center: Point3,
    pixel00_loc: Point3,
    pixel_du: Vec3,
    pixel_dv: Vec3,
    disk_u: Vec3,
    disk_v: Vec3,
}

impl Lens {
    fn new(config: &ProbeConfig) -> Self {
        let w = (config.lookfrom - config.lookat).normalize();
        let u = Vec3::y().cross(&w).normalize();
        let v = w.cross(&u);

        let h = (config.vertical_fov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_distance;
        let viewport_width =
            viewport_height * config.image_width as Float / config.image_height as Float;

        let viewport_u = u * viewport_width;
        let viewport_v = -v * viewport_height;
        let pixel_du = viewport_u / config.image_width as Float;
        let pixel_dv = viewport_v / config.image_height as Float;

        let upper_left =
            config.lookfrom - w * config.focus_distance - viewport_u / 2.0 - viewport_v / 2.0;

        Lens {
            center: config.lookfrom,
            pixel00_loc: upper_left + (pixel_du + pixel_dv) / 2.0,
            pixel_du,
            pixel_dv,
            disk_u: u * config.aperture,
            disk_v: v * config.aperture,
        }
    }

    fn ray(&self, x: u32, y: u32, offset_x: Float, offset_y: Float, rng: &mut StdRng) -> Ray {
        let pixel_sample = self.pixel00_loc
            + self.pixel_du * (x as Float + offset_x)
            + self.pixel_dv * (y as Float + offset_y);
        let p = Vec3::random_in_unit_disk(rng);
        let origin = self.center + self.disk_u * p.x + self.disk_v * p.y;
        Ray::new(origin, pixel_sample - origin)
    }
}

pub fn run(world: &World, config: &ProbeConfig, progress_bar: ProgressBar) -> Result<ProbeReport> {
    let grid = StratifiedGrid::new(config.samples_per_pixel)?;
    let lens = Lens::new(config);
    log::info!(
        "probing {} shapes at {}x{}, {} samples per pixel ({}x{} strata)",
        world.len(),
        config.image_width,
        config.image_height,
        grid.len(),
        grid.dim(),
        grid.dim()
    );

    let report = (0..config.image_height)
        .into_par_iter()
        .progress_with(progress_bar)
        .map(|y| {
            // Each row owns its generator, seeded so runs are reproducible
            let mut rng = StdRng::seed_from_u64(config.seed ^ (y as u64).wrapping_mul(0x9e37_79b9));
            let row = probe_row(world, config, &lens, &grid, y, &mut rng);
            log::trace!("row {y}: {} hits", row.hits);
            row
        })
        .reduce(ProbeReport::default, |a, b| a + b);

    Ok(report)
}

fn probe_row(
    world: &World,
    config: &ProbeConfig,
    lens: &Lens,
    grid: &StratifiedGrid,
    y: u32,
    rng: &mut StdRng,
) -> ProbeReport {
    let mut report = ProbeReport::default();
    let primary_span = Interval::new(config.t_min, Float::INFINITY);
    let occlusion_span = Interval::new(config.t_min, config.occlusion_distance);

    for x in 0..config.image_width {
        for (i, j) in grid.cells() {
            let offset = grid.sample(rng, i, j);
            let ray = lens.ray(x, y, offset.x, offset.y, rng);
            report.primary_rays += 1;

            let Some(hit) = world.hit(&ray, primary_span) else {
                continue;
            };
            report.hits += 1;
            if hit.is_front_face {
                report.front_face_hits += 1;
            }
            if let Some(count) = report.material_hits.get_mut(hit.material.0) {
                *count += 1;
            }

            for _ in 0..config.occlusion_samples {
                let direction = Vec3::random_on_hemisphere(rng, &hit.normal);
                let occlusion_ray = Ray::new(hit.point, direction);
                report.occlusion_rays += 1;
                if world.hit(&occlusion_ray, occlusion_span).is_some() {
                    report.occluded += 1;
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;

    fn small_config() -> ProbeConfig {
        ProbeConfig {
            image_width: 12,
            image_height: 12,
            samples_per_pixel: 4,
            occlusion_samples: 2,
            ..ProbeConfig::default()
        }
    }

    #[test]
    fn test_camera_inside_box_sees_walls() {
        // Looking from inside the box every primary ray lands on something
        let config = ProbeConfig {
            lookfrom: Vec3::new(278.0, 278.0, 100.0),
            lookat: Vec3::new(278.0, 278.0, 555.0),
            focus_distance: 455.0,
            aperture: 0.0,
            ..small_config()
        };
        let report = run(&cornell_box(), &config, ProgressBar::hidden()).unwrap();
        assert_eq!(report.primary_rays, 12 * 12 * 4);
        assert_eq!(report.hits, report.primary_rays);
        assert_abs_diff_eq!(report.coverage(), 1.0);
        assert_eq!(report.occlusion_rays, report.hits * 2);
        assert!(report.material_hits[WHITE.0] > 0);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let world = cornell_box();
        let config = small_config();
        let a = run(&world, &config, ProgressBar::hidden()).unwrap();
        let b = run(&world, &config, ProgressBar::hidden()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.material_hits.iter().sum::<u64>(), a.hits);
    }

    #[test]
    fn test_empty_world() {
        let report = run(&World::default(), &small_config(), ProgressBar::hidden()).unwrap();
        assert_eq!(report.hits, 0);
        assert_eq!(report.occlusion_rays, 0);
        assert_abs_diff_eq!(report.coverage(), 0.0);
        assert_abs_diff_eq!(report.mean_occlusion(), 0.0);
    }

    #[test]
    fn test_zero_samples_is_an_error() {
        let config = ProbeConfig {
            samples_per_pixel: 0,
            ..small_config()
        };
        let result = run(&cornell_box(), &config, ProgressBar::hidden());
        assert_eq!(result, Err(Error::NoSamples));
    }
}
