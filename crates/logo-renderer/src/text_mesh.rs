//! Extruded 3D text from TrueType outlines.
//!
//! Glyph outlines are read with `ttf-parser`, flattened into polygons
//! (each curve split into a fixed number of segments), and turned into
//! a closed solid: front and back caps tessellated with `lyon`, joined by
//! side walls. A bevel widens the solid by `bevel_size` on both faces and
//! rounds the shading of the edges over `bevel_segments` rows.

use std::borrow::Cow;
use std::f32::consts::FRAC_PI_4;

use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, TessellationError,
    VertexBuffers,
};
use thiserror::Error;
use ttf_parser::{Face, OutlineBuilder};

use crate::constants::text as constants;
use crate::vertex::MeshVertex;

#[derive(Debug, Error)]
pub enum TextMeshError {
    #[error("failed to parse font: {0}")]
    Font(#[from] ttf_parser::FaceParsingError),

    #[error("failed to tessellate glyph outlines: {0:?}")]
    Tessellation(TessellationError),
}

impl From<TessellationError> for TextMeshError {
    fn from(err: TessellationError) -> Self {
        TextMeshError::Tessellation(err)
    }
}

/// Parameters of the extruded text
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometryParams {
    pub text: String,
    /// Height of one em in world units
    pub size: f32,
    /// Line segments per outline curve
    pub curve_segments: u32,
    /// Extrusion depth, excluding the bevel
    pub depth: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl Default for TextGeometryParams {
    fn default() -> Self {
        Self {
            text: logo_core::PLACEHOLDER_BRAND.to_string(),
            size: constants::SIZE,
            curve_segments: constants::CURVE_SEGMENTS,
            depth: 0.5,
            bevel_size: 0.02,
            bevel_segments: 5,
        }
    }
}

/// Indexed triangle mesh centered on the origin
#[derive(Debug, Clone, Default)]
pub struct TextMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub min: Vec3,
    pub max: Vec3,
}

impl TextMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        });
        index
    }
}

/// Builds text meshes from one font
pub struct TextMesher {
    font: Cow<'static, [u8]>,
}

impl Default for TextMesher {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMesher {
    /// Mesher using the bundled Ubuntu Light font
    pub fn new() -> Self {
        Self {
            font: Cow::Borrowed(epaint_default_fonts::UBUNTU_LIGHT),
        }
    }

    /// Mesher using a TrueType/OpenType font file
    pub fn with_font(bytes: Vec<u8>) -> Result<Self, TextMeshError> {
        Face::parse(&bytes, 0)?;
        Ok(Self {
            font: Cow::Owned(bytes),
        })
    }

    pub fn build(&self, params: &TextGeometryParams) -> Result<TextMesh, TextMeshError> {
        let face = Face::parse(&self.font, 0)?;
        let mut contours = layout_contours(&face, params);
        if contours.is_empty() {
            return Ok(TextMesh::default());
        }

        // Center on the origin
        let (min, max) = bounds_2d(&contours);
        let center = (min + max) * 0.5;
        for contour in &mut contours {
            for p in contour.iter_mut() {
                *p -= center;
            }
        }
        let extent = (max - min).max(Vec2::splat(f32::EPSILON));
        let min = min - center;

        let half_depth = params.depth * 0.5 + params.bevel_size;
        let uv = |p: Vec2| (p - min) / extent;

        let mut mesh = TextMesh {
            min: min.extend(-half_depth),
            max: (min + extent).extend(half_depth),
            ..Default::default()
        };

        build_caps(&mut mesh, &contours, half_depth, &uv)?;
        build_walls(&mut mesh, &contours, half_depth, params, &uv);

        tracing::debug!(
            "Built text mesh for {:?}: {} vertices, {} triangles",
            params.text,
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }
}

/// Flattened glyph outlines of the whole string, laid out on one line
fn layout_contours(face: &Face<'_>, params: &TextGeometryParams) -> Vec<Vec<Vec2>> {
    let scale = params.size / face.units_per_em() as f32;
    let fallback = face.glyph_index('?');
    let mut contours = Vec::new();
    let mut pen_x = 0.0;

    for c in params.text.chars() {
        let Some(glyph) = face.glyph_index(c).or(fallback) else {
            continue;
        };

        let mut builder = ContourBuilder::new(scale, Vec2::new(pen_x, 0.0), params.curve_segments);
        face.outline_glyph(glyph, &mut builder);
        builder.finish_contour();
        contours.append(&mut builder.contours);

        pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
    }

    contours
}

fn bounds_2d(contours: &[Vec<Vec2>]) -> (Vec2, Vec2) {
    contours.iter().flatten().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    )
}

/// Shoelace area, positive for counter-clockwise contours
fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    (0..n)
        .map(|i| contour[i].perp_dot(contour[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

fn build_caps(
    mesh: &mut TextMesh,
    contours: &[Vec<Vec2>],
    half_depth: f32,
    uv: &impl Fn(Vec2) -> Vec2,
) -> Result<(), TextMeshError> {
    let mut builder = Path::builder();
    for contour in contours {
        builder.begin(point(contour[0].x, contour[0].y));
        for p in &contour[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut geometry: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::default().with_fill_rule(FillRule::NonZero),
        &mut BuffersBuilder::new(&mut geometry, |v: FillVertex| {
            Vec2::new(v.position().x, v.position().y)
        }),
    )?;

    for (z, normal) in [(half_depth, Vec3::Z), (-half_depth, Vec3::NEG_Z)] {
        let base = mesh.vertices.len() as u32;
        for p in &geometry.vertices {
            mesh.push(p.extend(z), normal, uv(*p));
        }
        for tri in geometry.indices.chunks_exact(3) {
            if normal.z > 0.0 {
                mesh.indices.extend([base + tri[0], base + tri[1], base + tri[2]]);
            } else {
                mesh.indices.extend([base + tri[0], base + tri[2], base + tri[1]]);
            }
        }
    }

    Ok(())
}

/// Depth profile of the side walls as `(z, tilt)`; tilt 1 bends the
/// normal 45° toward the nearest cap.
fn wall_profile(half_depth: f32, bevel: f32, segments: u32) -> Vec<(f32, f32)> {
    if bevel <= 0.0 || segments == 0 {
        return vec![(-half_depth, 0.0), (half_depth, 0.0)];
    }

    let s = segments as f32;
    let back = (0..=segments).map(|k| {
        let t = k as f32 / s;
        (-half_depth + bevel * t, -(1.0 - t))
    });
    let front = (0..=segments).map(|k| {
        let t = k as f32 / s;
        (half_depth - bevel + bevel * t, t)
    });
    back.chain(front).collect()
}

fn build_walls(
    mesh: &mut TextMesh,
    contours: &[Vec<Vec2>],
    half_depth: f32,
    params: &TextGeometryParams,
    uv: &impl Fn(Vec2) -> Vec2,
) {
    // TrueType fills to the right of the outline direction, CFF to the left
    let total_area: f32 = contours.iter().map(|c| signed_area(c)).sum();
    let outward = if total_area < 0.0 { 1.0 } else { -1.0 };

    let profile = wall_profile(half_depth, params.bevel_size, params.bevel_segments);
    let v_of = |z: f32| (z + half_depth) / (2.0 * half_depth);

    for contour in contours {
        let n = contour.len();
        for i in 0..n {
            let a = contour[i];
            let b = contour[(i + 1) % n];
            let side = (b - a).perp().normalize_or_zero() * outward;
            if side == Vec2::ZERO {
                continue;
            }

            for rows in profile.windows(2) {
                let (z0, tilt0) = rows[0];
                let (z1, tilt1) = rows[1];
                if (z1 - z0).abs() < f32::EPSILON {
                    continue;
                }

                let n0 = tilted_normal(side, tilt0);
                let n1 = tilted_normal(side, tilt1);
                let ua = uv(a).x;
                let ub = uv(b).x;

                let a0 = mesh.push(a.extend(z0), n0, Vec2::new(ua, v_of(z0)));
                let b0 = mesh.push(b.extend(z0), n0, Vec2::new(ub, v_of(z0)));
                let b1 = mesh.push(b.extend(z1), n1, Vec2::new(ub, v_of(z1)));
                let a1 = mesh.push(a.extend(z1), n1, Vec2::new(ua, v_of(z1)));
                mesh.indices.extend([a0, b0, b1, a0, b1, a1]);
            }
        }
    }
}

/// Side normal bent toward +Z (positive tilt) or -Z (negative tilt)
fn tilted_normal(side: Vec2, tilt: f32) -> Vec3 {
    let (sin, cos) = (tilt.abs() * FRAC_PI_4).sin_cos();
    let cap = if tilt < 0.0 { -sin } else { sin };
    Vec3::new(side.x * cos, side.y * cos, cap)
}

/// Collects glyph outlines as closed polygons
struct ContourBuilder {
    scale: f32,
    offset: Vec2,
    segments: u32,
    current: Vec<Vec2>,
    contours: Vec<Vec<Vec2>>,
}

impl ContourBuilder {
    fn new(scale: f32, offset: Vec2, segments: u32) -> Self {
        Self {
            scale,
            offset,
            segments: segments.max(1),
            current: Vec::new(),
            contours: Vec::new(),
        }
    }

    fn map(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) * self.scale + self.offset
    }

    fn last(&self) -> Vec2 {
        self.current.last().copied().unwrap_or(self.offset)
    }

    fn push_point(&mut self, p: Vec2) {
        if self
            .current
            .last()
            .is_none_or(|last| last.distance_squared(p) > 1e-12)
        {
            self.current.push(p);
        }
    }

    fn finish_contour(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        let n = contour.len();
        if n > 1 && contour[0].distance_squared(contour[n - 1]) <= 1e-12 {
            contour.pop();
        }
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }
}

impl OutlineBuilder for ContourBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish_contour();
        let p = self.map(x, y);
        self.push_point(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.push_point(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.last();
        let c = self.map(x1, y1);
        let p1 = self.map(x, y);
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            let mt = 1.0 - t;
            self.push_point(p0 * (mt * mt) + c * (2.0 * mt * t) + p1 * (t * t));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.last();
        let c1 = self.map(x1, y1);
        let c2 = self.map(x2, y2);
        let p1 = self.map(x, y);
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            let mt = 1.0 - t;
            self.push_point(
                p0 * (mt * mt * mt)
                    + c1 * (3.0 * mt * mt * t)
                    + c2 * (3.0 * mt * t * t)
                    + p1 * (t * t * t),
            );
        }
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(text: &str) -> TextGeometryParams {
        TextGeometryParams {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_builds_centered_solid() {
        let mesh = TextMesher::new().build(&params("BRAND")).unwrap();
        assert!(!mesh.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

        assert_relative_eq!(mesh.min.x, -mesh.max.x, epsilon = 1e-4);
        assert_relative_eq!(mesh.min.y, -mesh.max.y, epsilon = 1e-4);
        assert!(mesh.size().x > mesh.size().y);
    }

    #[test]
    fn test_depth_includes_bevel() {
        let mut p = params("A");
        p.depth = 1.0;
        p.bevel_size = 0.05;
        let mesh = TextMesher::new().build(&p).unwrap();
        assert_relative_eq!(mesh.size().z, 1.1, epsilon = 1e-5);

        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position[2])
            .fold(f32::NEG_INFINITY, f32::max);
        assert_relative_eq!(max_z, 0.55, epsilon = 1e-5);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = TextMesher::new().build(&params("Og")).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(Vec3::from(v.normal).length(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_bevel_segments_add_rows() {
        let mesher = TextMesher::new();
        let mut p = params("I");
        p.bevel_segments = 1;
        let coarse = mesher.build(&p).unwrap();
        p.bevel_segments = 8;
        let fine = mesher.build(&p).unwrap();
        assert!(fine.vertices.len() > coarse.vertices.len());

        p.bevel_size = 0.0;
        let flat = mesher.build(&p).unwrap();
        assert!(flat.vertices.len() < coarse.vertices.len());
    }

    #[test]
    fn test_whitespace_is_empty() {
        let mesh = TextMesher::new().build(&params("   ")).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_rejects_invalid_font() {
        let result = TextMesher::with_font(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(TextMeshError::Font(_))));
    }

    #[test]
    fn test_curves_are_split_into_segments() {
        let mut builder = ContourBuilder::new(1.0, Vec2::ZERO, 12);
        builder.move_to(0.0, 0.0);
        builder.quad_to(1.0, 2.0, 2.0, 0.0);
        builder.close();

        assert_eq!(builder.contours.len(), 1);
        // Start point plus twelve segment ends
        assert_eq!(builder.contours[0].len(), 13);
    }

    #[test]
    fn test_bevel_profile() {
        let profile = wall_profile(0.3, 0.05, 2);
        assert_eq!(profile.len(), 6);
        assert_relative_eq!(profile[0].0, -0.3);
        assert_relative_eq!(profile[0].1, -1.0);
        assert_relative_eq!(profile[5].0, 0.3);
        assert_relative_eq!(profile[5].1, 1.0);
        assert_eq!(wall_profile(0.3, 0.0, 5).len(), 2);
    }
}
