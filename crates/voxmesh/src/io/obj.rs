//! Wavefront OBJ export
//!
//! Faces are written as quads: four `v` lines, four `vt` lines, then one
//! `f` line referencing the four most recent vertices and texcoords with
//! negative (relative) indices plus a 1-based index into the shared normal
//! list. Faces on the positive normal set are wound in reverse of the
//! negative set so all normals point outward.

use crate::direction::SweepDir;
use crate::error::ExportError;
use crate::face::Face;
use crate::optimize::ModelSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write one sub-model's faces as OBJ text
pub fn write_obj<W: Write>(out: &mut W, faces: &[Face]) -> io::Result<()> {
    writeln!(out, "# Exported with voxmesh")?;
    writeln!(out)?;

    writeln!(out, "# Vertex Normals")?;
    for normal in SweepDir::NORMALS {
        writeln!(out, "vn {} {} {}", normal.x, normal.y, normal.z)?;
    }
    writeln!(out)?;

    writeln!(out, "# Faces")?;
    for (i, face) in faces.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "# Face [{i}]")?;
        for v in face.vertices() {
            let p = v.position;
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for v in face.vertices() {
            writeln!(out, "vt {} {}", v.uv.x, v.uv.y)?;
        }

        let normal = face.direction.index() + 1;
        if face.direction.is_positive() {
            writeln!(
                out,
                "f -1/-1/{normal} -2/-2/{normal} -3/-3/{normal} -4/-4/{normal}"
            )?;
        } else {
            writeln!(
                out,
                "f -4/-4/{normal} -3/-3/{normal} -2/-2/{normal} -1/-1/{normal}"
            )?;
        }
    }

    Ok(())
}

/// Path of the OBJ file for sub-model `index` under a common stem
pub fn obj_path(stem: &Path, index: usize) -> PathBuf {
    let name = match stem.file_name().and_then(|n| n.to_str()) {
        Some(name) => format!("{name}_{index:03}.obj"),
        None => format!("{index:03}.obj"),
    };
    stem.with_file_name(name)
}

/// Write one OBJ file per sub-model
pub fn save_obj(stem: &Path, set: &ModelSet) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::with_capacity(set.models.len());
    for (i, faces) in set.models.iter().enumerate() {
        let path = obj_path(stem, i);
        let mut out = BufWriter::new(File::create(&path)?);
        write_obj(&mut out, faces)?;
        out.flush()?;
        info!(path = %path.display(), faces = faces.len(), "wrote obj");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VoxelGrid;
    use crate::sweep::sweep_direction;

    fn obj_text(faces: &[Face]) -> String {
        let mut out = Vec::new();
        write_obj(&mut out, faces).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_normal_list() {
        let text = obj_text(&[]);
        assert!(text.contains("vn 1 0 0"));
        assert!(text.contains("vn -1 0 0"));
        assert!(text.contains("vn 0 1 0"));
        assert!(text.contains("vn 0 -1 0"));
        assert!(text.contains("vn 0 0 1"));
        assert!(text.contains("vn 0 0 -1"));
        assert_eq!(text.matches("\nvn ").count(), 6);
    }

    #[test]
    fn test_quad_emission_counts() {
        let grid = VoxelGrid::new(1, 1, 1, vec![1]).unwrap();
        let faces = sweep_direction(&grid, SweepDir::XPos, false);
        let text = obj_text(&faces);

        assert_eq!(text.matches("\nv ").count(), 4);
        assert_eq!(text.matches("\nvt ").count(), 4);
        assert_eq!(text.matches("\nf ").count(), 1);
    }

    #[test]
    fn test_winding_reversed_between_normal_sets() {
        let grid = VoxelGrid::new(1, 1, 1, vec![1]).unwrap();

        let pos = sweep_direction(&grid, SweepDir::XPos, false);
        let text = obj_text(&pos);
        assert!(text.contains("f -1/-1/1 -2/-2/1 -3/-3/1 -4/-4/1"));

        let neg = sweep_direction(&grid, SweepDir::XNeg, false);
        let text = obj_text(&neg);
        assert!(text.contains("f -4/-4/2 -3/-3/2 -2/-2/2 -1/-1/2"));
    }

    #[test]
    fn test_obj_path_numbering() {
        let stem = Path::new("/tmp/out/model");
        assert_eq!(obj_path(stem, 0), PathBuf::from("/tmp/out/model_000.obj"));
        assert_eq!(obj_path(stem, 12), PathBuf::from("/tmp/out/model_012.obj"));
    }

    #[test]
    fn test_save_obj_writes_one_file_per_model() {
        use crate::optimize::{optimize, VoxelSet};
        use crate::palette::{MaterialMap, Palette};

        let set = VoxelSet {
            models: vec![
                VoxelGrid::new(1, 1, 1, vec![1]).unwrap(),
                VoxelGrid::new(1, 1, 1, vec![2]).unwrap(),
            ],
            palette: Palette::greyscale_ramp(),
            materials: MaterialMap::default(),
        };
        let result = optimize(&set, &crate::ExportConfig::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("model");
        let written = save_obj(&stem, &result).unwrap();

        assert_eq!(written.len(), 2);
        for path in &written {
            assert!(path.exists());
            let text = std::fs::read_to_string(path).unwrap();
            assert!(text.contains("# Faces"));
        }
    }
}
