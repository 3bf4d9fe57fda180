//! # Snapshot Wire Format
//!
//! The locked JSON form of a mesh, used by the interpreter's undo stack and
//! by anything that persists a model:
//!
//! ```text
//! {"points":[{"xf","yf","x","y","z","xCanvas","yCanvas"}...],
//!  "segments":[{"p1":i,"p2":j}...],
//!  "faces":[[i,j,k,...]...]}
//! ```
//!
//! Segments and faces store point *indices*, never nested point objects, so
//! the cyclic sharing of the live mesh never reaches the serializer - and a
//! decode rebuilds exactly that sharing, because indices into the rebuilt
//! arena are the identity being shared. `hover`/`select` are transient UI
//! state and are not part of the format; a restore resets them.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Face, Model, Point, Segment};

// =============================================================================
// WIRE RECORDS
// =============================================================================

/// One point of the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    pub xf: f64,
    pub yf: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(rename = "xCanvas")]
    pub x_canvas: f64,
    #[serde(rename = "yCanvas")]
    pub y_canvas: f64,
}

/// One segment of the wire format, as a pair of point indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub p1: usize,
    pub p2: usize,
}

/// The full wire form of a mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelState {
    pub points: Vec<PointRecord>,
    pub segments: Vec<SegmentRecord>,
    pub faces: Vec<Vec<usize>>,
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

impl Model {
    /// Encodes the mesh into the locked JSON snapshot form.
    pub fn serialize(&self) -> Result<String, ModelError> {
        let state = ModelState {
            points: self
                .points
                .iter()
                .map(|p| PointRecord {
                    xf: p.xf,
                    yf: p.yf,
                    x: p.x,
                    y: p.y,
                    z: p.z,
                    x_canvas: p.x_canvas,
                    y_canvas: p.y_canvas,
                })
                .collect(),
            segments: self
                .segments
                .iter()
                .map(|s| SegmentRecord { p1: s.p1, p2: s.p2 })
                .collect(),
            faces: self.faces.iter().map(|f| f.points.clone()).collect(),
        };
        Ok(serde_json::to_string(&state)?)
    }

    /// Decodes a snapshot into a fresh model.
    ///
    /// Every segment and face ends up referencing the rebuilt point arena by
    /// index, so point identity sharing survives the round trip. Handles
    /// out of range of the decoded arena are a [`ModelError::InvalidHandle`].
    pub fn deserialize(snapshot: &str) -> Result<Model, ModelError> {
        let state: ModelState = serde_json::from_str(snapshot)?;
        let point_count = state.points.len();

        for record in &state.segments {
            for index in [record.p1, record.p2] {
                if index >= point_count {
                    return Err(ModelError::invalid_handle("segment", index, point_count));
                }
            }
        }
        for face in &state.faces {
            for &index in face {
                if index >= point_count {
                    return Err(ModelError::invalid_handle("face", index, point_count));
                }
            }
        }

        Ok(Model {
            points: state
                .points
                .into_iter()
                .map(|r| {
                    let mut p = Point::new(r.xf, r.yf, r.x, r.y, r.z);
                    p.x_canvas = r.x_canvas;
                    p.y_canvas = r.y_canvas;
                    p
                })
                .collect(),
            segments: state
                .segments
                .into_iter()
                .map(|r| Segment::new(r.p1, r.p2))
                .collect(),
            faces: state.faces.into_iter().map(Face::new).collect(),
            scale: 1.0,
        })
    }

    /// Replaces this model's mesh with a decoded snapshot, keeping the
    /// given scale factor (the snapshot format does not carry it).
    pub fn restore(&mut self, snapshot: &str, scale: f64) -> Result<(), ModelError> {
        let mut decoded = Model::deserialize(snapshot)?;
        decoded.scale = scale;
        *self = decoded;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_counts_and_coordinates() {
        let mut model = Model::default_sheet();
        model.split_cross_3d(0, 1);
        model.rotate(6, 45.0, &[1, 2]);

        let snapshot = model.serialize().unwrap();
        let decoded = Model::deserialize(&snapshot).unwrap();

        assert_eq!(decoded.points.len(), model.points.len());
        assert_eq!(decoded.segments.len(), model.segments.len());
        assert_eq!(decoded.faces.len(), model.faces.len());
        for (a, b) in decoded.points.iter().zip(&model.points) {
            assert_eq!(a.pos_2d(), b.pos_2d());
            assert_eq!(a.pos_3d(), b.pos_3d());
        }
    }

    #[test]
    fn test_round_trip_shares_point_identity() {
        let mut model = Model::default_sheet();
        model.split_cross_3d(0, 1);
        let snapshot = model.serialize().unwrap();
        let decoded = Model::deserialize(&snapshot).unwrap();

        // Moving a shared arena point moves it for every segment and face
        // holding its handle
        let handle = decoded.segments[0].p1;
        for face in &decoded.faces {
            for &p in &face.points {
                assert!(p < decoded.points.len());
            }
        }
        assert!(decoded.segments.iter().any(|s| s.touches(handle)));
    }

    #[test]
    fn test_wire_field_names_are_locked() {
        let model = Model::default_sheet();
        let snapshot = model.serialize().unwrap();
        assert!(snapshot.contains("\"xf\""));
        assert!(snapshot.contains("\"xCanvas\""));
        assert!(snapshot.contains("\"yCanvas\""));
        assert!(snapshot.contains("\"p1\""));
        assert!(!snapshot.contains("hover"));
        assert!(!snapshot.contains("select"));
    }

    #[test]
    fn test_decode_rejects_out_of_range_segment() {
        let broken = r#"{"points":[{"xf":0,"yf":0,"x":0,"y":0,"z":0,"xCanvas":0,"yCanvas":0}],
                         "segments":[{"p1":0,"p2":7}],"faces":[]}"#;
        let err = Model::deserialize(broken).unwrap_err();
        assert!(matches!(err, ModelError::InvalidHandle { .. }));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = Model::deserialize("{\"points\":").unwrap_err();
        assert!(matches!(err, ModelError::Snapshot(_)));
    }

    #[test]
    fn test_restore_keeps_caller_scale() {
        let mut model = Model::default_sheet();
        let snapshot = model.serialize().unwrap();
        model.scale_model(2.0);
        model.restore(&snapshot, 2.0).unwrap();
        assert_eq!(model.scale, 2.0);
    }
}
