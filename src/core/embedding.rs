//! Normalized embedding vectors for semantic similarity

#[derive(Debug, Clone)]
pub struct Embedding(Vec<f32>);

impl Embedding {
	/// Create normalized embedding from raw data
	pub fn new(data: Vec<f32>) -> Self {
		Self(normalize(&data))
	}

	/// Create from pre-normalized data (deserialization)
	pub fn raw(data: Vec<f32>) -> Self {
		Self(data)
	}

	/// Get raw vector
	pub fn as_slice(&self) -> &[f32] {
		&self.0
	}

	/// Cosine similarity via dot product; both sides must be normalized
	pub fn similarity(&self, other: &Self) -> f32 {
		self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
	}
}

fn normalize(v: &[f32]) -> Vec<f32> {
	let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
	if norm > 0.0 {
		v.iter().map(|x| x / norm).collect()
	} else {
		v.to_vec()
	}
}

/// Maps cosine similarity from [-1, 1] into a [0, 1] score.
pub fn similarity_score(cosine: f32) -> f32 {
	((cosine + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_normalizes_to_unit_length() {
		let e = Embedding::new(vec![3.0, 4.0]);
		let norm: f32 = e.as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
		assert!((norm - 1.0).abs() < 1e-6);
	}

	#[test]
	fn zero_vector_stays_zero() {
		let e = Embedding::new(vec![0.0, 0.0, 0.0]);
		assert_eq!(e.as_slice(), &[0.0, 0.0, 0.0]);
	}

	#[test]
	fn identical_vectors_have_unit_similarity() {
		let a = Embedding::new(vec![1.0, 2.0, 3.0]);
		let b = Embedding::new(vec![1.0, 2.0, 3.0]);
		assert!((a.similarity(&b) - 1.0).abs() < 1e-6);
	}
}
