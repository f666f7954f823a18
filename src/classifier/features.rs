//! Flower measurements and the order they are packed into a model row.

/// Number of measurements fed to the model for one flower.
pub const FEATURE_COUNT: usize = 4;

/// The four measurements of a single flower, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowerFeatures {
    pub sepal_length: f32,
    pub sepal_width: f32,
    pub petal_length: f32,
    pub petal_width: f32,
}

impl FlowerFeatures {
    /// Build from the petal-first argument order used by `FlowerClassifier::predict`.
    pub fn from_petal_first(
        petal_width: f32,
        petal_length: f32,
        sepal_width: f32,
        sepal_length: f32,
    ) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        }
    }

    /// Row layout the model was trained on: sepal length, sepal width,
    /// petal length, petal width.
    pub fn to_batch_row(&self) -> [f32; FEATURE_COUNT] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn petal_first_arguments_pack_sepal_first() {
        let features = FlowerFeatures::from_petal_first(2.0, 4.3, 0.1, 1.0);
        assert_eq!(features.to_batch_row(), [1.0, 0.1, 4.3, 2.0]);
    }

    #[test]
    fn values_pass_through_unvalidated() {
        let features = FlowerFeatures::from_petal_first(-1.0, f32::INFINITY, 0.0, f32::MAX);
        let row = features.to_batch_row();
        assert_eq!(row[0], f32::MAX);
        assert_eq!(row[2], f32::INFINITY);
        assert_eq!(row[3], -1.0);
    }
}
