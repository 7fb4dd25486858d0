//! Beam decomposition into planar primitives
//!
//! The arm is idealized as a flat beam of variable width. It is split along
//! its length into six primitives: two triangular tapers, two long
//! rectangular cores and two short rectangles around the pivot. The tapers
//! sit on both edges of the beam, so each contributes twice.
//!
//! Offsets are signed distances from the pivot, positive toward the
//! counterweight (long arm) side.

use crate::error::ConfigurationError;

/// Physical description of the throwing arm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamGeometry {
    /// Pivot to counterweight distance
    pub long_arm: f64,
    /// Pivot to projectile distance
    pub short_arm: f64,
    pub width: f64,
    pub thickness: f64,
    pub density: f64,
}

/// Mass properties of the beam alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamMassProperties {
    pub mass: f64,
    /// Signed centroid offset from the pivot
    pub centroid_offset: f64,
    /// Moment of inertia about the beam's own centroid
    pub inertia_about_centroid: f64,
}

impl BeamMassProperties {
    /// Moment of inertia about the pivot (parallel-axis theorem)
    pub fn inertia_about_pivot(&self) -> f64 {
        self.inertia_about_centroid + self.mass * self.centroid_offset * self.centroid_offset
    }
}

/// One planar piece of the beam
#[derive(Debug, Clone, Copy)]
struct Primitive {
    mass: f64,
    offset: f64,
    pivot_inertia: f64,
    /// How many copies of the piece the beam contains
    count: f64,
}

impl BeamGeometry {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fields = [
            ("long arm", self.long_arm),
            ("short arm", self.short_arm),
            ("width", self.width),
            ("thickness", self.thickness),
            ("density", self.density),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::InvalidGeometry { field, value });
            }
        }
        Ok(())
    }

    fn primitives(&self) -> [Primitive; 6] {
        let w = self.width;
        let rho_t = self.density * self.thickness;

        // Breakpoints along the arm
        let b1 = 0.8 * self.long_arm;
        let b2 = 0.2 * self.long_arm;
        let b3 = 0.1 * self.short_arm;
        let b4 = 0.9 * self.short_arm;

        // Half-widths
        let h1 = 0.3 * w;
        let h2 = 0.4 * w;
        let h3 = 0.4 * w;
        let h4 = 0.2 * w;

        let long_taper = rho_t * h1 * b1 / 2.0;
        let short_taper = rho_t * h3 * b4 / 2.0;
        let long_core = rho_t * h2 * b1;
        let short_core = rho_t * h4 * b4;
        let long_hub = rho_t * w * b2;
        let short_hub = rho_t * w * b3;

        [
            Primitive {
                mass: long_taper,
                offset: b2 + b1 / 3.0,
                pivot_inertia: (long_taper / 6.0)
                    * (h1 * h1
                        + b1 * b1
                        + 4.0 * b1 * b2
                        + 6.0 * b2 * b2
                        + 2.0 * h1 * h2
                        + 1.5 * h2 * h2),
                count: 2.0,
            },
            Primitive {
                mass: short_taper,
                offset: -b3 - b4 / 3.0,
                pivot_inertia: (short_taper / 6.0)
                    * (h3 * h3
                        + b4 * b4
                        + 4.0 * b3 * b4
                        + 6.0 * b3 * b3
                        + 2.0 * h3 * h4
                        + 1.5 * h4 * h4),
                count: 2.0,
            },
            Primitive {
                mass: long_core,
                offset: b2 + b1 / 2.0,
                pivot_inertia: (long_core / 12.0)
                    * (h2 * h2 + 4.0 * b1 * b1 + 12.0 * b2 * b2 + 12.0 * b1 * b2),
                count: 1.0,
            },
            Primitive {
                mass: short_core,
                offset: -b3 - b4 / 2.0,
                pivot_inertia: (short_core / 12.0)
                    * (h4 * h4 + 4.0 * b4 * b4 + 12.0 * b3 * b3 + 12.0 * b3 * b4),
                count: 1.0,
            },
            Primitive {
                mass: long_hub,
                offset: b2 / 2.0,
                pivot_inertia: (long_hub / 12.0) * (4.0 * b2 * b2 + w * w),
                count: 1.0,
            },
            Primitive {
                mass: short_hub,
                offset: -b3 / 2.0,
                pivot_inertia: (short_hub / 12.0) * (4.0 * b3 * b3 + w * w),
                count: 1.0,
            },
        ]
    }

    /// Moment of inertia of the whole beam about the pivot, summed directly
    /// from the primitives
    pub fn pivot_inertia(&self) -> f64 {
        self.primitives()
            .iter()
            .map(|p| p.count * p.pivot_inertia)
            .sum()
    }
}

/// Compute mass, centroid and centroidal inertia of the beam.
///
/// Fails on invalid dimensions, or when the composed inertia comes out
/// negative (a geometry the primitive formulas cannot represent).
pub fn beam_mass_properties(
    geometry: &BeamGeometry,
) -> Result<BeamMassProperties, ConfigurationError> {
    geometry.validate()?;

    let primitives = geometry.primitives();
    let mass: f64 = primitives.iter().map(|p| p.count * p.mass).sum();
    let first_moment: f64 = primitives.iter().map(|p| p.count * p.mass * p.offset).sum();
    let centroid_offset = first_moment / mass;

    let inertia_about_centroid =
        geometry.pivot_inertia() - mass * centroid_offset * centroid_offset;
    if !inertia_about_centroid.is_finite() || inertia_about_centroid < 0.0 {
        return Err(ConfigurationError::DegenerateGeometry {
            inertia: inertia_about_centroid,
        });
    }

    Ok(BeamMassProperties {
        mass,
        centroid_offset,
        inertia_about_centroid,
    })
}
