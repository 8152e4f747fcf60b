use glam::Vec3;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 6 floats per vertex: position(3) + normal(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Floats per interleaved vertex
pub const VERTEX_STRIDE: usize = 6;

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, i: usize) -> Vec3 {
        let b = i * VERTEX_STRIDE;
        Vec3::new(self.vertices[b], self.vertices[b + 1], self.vertices[b + 2])
    }

    /// Build from separate position/normal streams. Missing normals are
    /// computed by averaging adjacent face normals.
    pub fn from_parts(
        positions: &[[f32; 3]],
        normals: Option<&[[f32; 3]]>,
        indices: Vec<u32>,
    ) -> Self {
        let computed;
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => {
                computed = smooth_normals(positions, &indices);
                &computed[..]
            }
        };

        let mut vertices = Vec::with_capacity(positions.len() * VERTEX_STRIDE);
        for (p, n) in positions.iter().zip(normals) {
            vertices.extend_from_slice(&[p[0], p[1], p[2], n[0], n[1], n[2]]);
        }
        Self { vertices, indices }
    }

    /// Axis-aligned bounds of all vertices
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertex_count() == 0 {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..self.vertex_count() {
            let p = self.position(i);
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let pb = Vec3::from(positions[b]);
        let pc = Vec3::from(positions[c]);
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                [0.0, 1.0, 0.0]
            } else {
                n.to_array()
            }
        })
        .collect()
}

/// Box centered at the origin (loading placeholder)
pub fn cube(w: f32, h: f32, d: f32) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * VERTEX_STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / VERTEX_STRIDE) as u32;
        for v in quad {
            vertices.extend_from_slice(&[v.x, v.y, v.z, normal.x, normal.y, normal.z]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let m = cube(1.0, 1.0, 1.0);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
        let (min, max) = m.bounds().unwrap();
        assert_eq!(min, Vec3::splat(-0.5));
        assert_eq!(max, Vec3::splat(0.5));
    }

    #[test]
    fn test_from_parts_computes_missing_normals() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let m = MeshData::from_parts(&positions, None, vec![0, 1, 2]);
        assert_eq!(m.vertex_count(), 3);
        // Counter-clockwise triangle in XY faces +Z
        assert_eq!(&m.vertices[3..6], &[0.0f32, 0.0, 1.0]);
    }

    #[test]
    fn test_from_parts_keeps_given_normals() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = [[0.0, 1.0, 0.0]; 3];
        let m = MeshData::from_parts(&positions, Some(&normals[..]), vec![0, 1, 2]);
        assert_eq!(&m.vertices[9..12], &[0.0f32, 1.0, 0.0]);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(MeshData::default().bounds().is_none());
    }
}
