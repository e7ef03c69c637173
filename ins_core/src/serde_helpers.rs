// ins_core/src/serde_helpers.rs

// Adapters for `#[serde(with = "...")]` so that nalgebra types read and write as
// plain arrays in TOML: vectors as `[x, y, z]`, matrices as row-major
// `[[r0], [r1], [r2]]`.

pub mod vec3_from_array {
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(vec: &Vector3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq([vec.x, vec.y, vec.z].iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f64; 3] = Deserialize::deserialize(deserializer)?;
        Ok(Vector3::from(arr))
    }
}

pub mod mat3_from_rows {
    use nalgebra::{Matrix3, RowVector3};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(mat: &Matrix3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // nalgebra stores column-major; write rows so the file reads like the math.
        let rows: Vec<[f64; 3]> = mat
            .row_iter()
            .map(|r| [r[0], r[1], r[2]])
            .collect();
        serializer.collect_seq(rows.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Matrix3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: [[f64; 3]; 3] = Deserialize::deserialize(deserializer)?;
        let row = |r: [f64; 3]| RowVector3::new(r[0], r[1], r[2]);
        Ok(Matrix3::from_rows(&[row(rows[0]), row(rows[1]), row(rows[2])]))
    }
}
