use crate::V2;

// right hand side: a vector, or a scalar broadcast to both components
pub trait Operand {
	fn broadcast(self) -> V2;
}

impl Operand for V2 {
	fn broadcast(self) -> V2 {
		self
	}
}

impl Operand for &V2 {
	fn broadcast(self) -> V2 {
		*self
	}
}

impl Operand for f32 {
	fn broadcast(self) -> V2 {
		V2::new(self, self)
	}
}

pub trait VectorExt {
	fn add_in_place(&mut self, rhs: impl Operand) -> &mut Self;
	fn sub_in_place(&mut self, rhs: impl Operand) -> &mut Self;
	fn mul_in_place(&mut self, rhs: impl Operand) -> &mut Self;
	fn scale_in_place(&mut self, s: f32) -> &mut Self;
	fn length(&self) -> f32;
	/// Divides by the length; the zero vector is left as is.
	fn normalize_in_place(&mut self) -> &mut Self;
	fn distance(&self, other: &V2) -> f32;
	fn rotated(&self, angle: f32) -> V2;
	fn orthogonal(&self) -> V2;
	fn perp_dot(&self, other: &V2) -> f32;
}

impl VectorExt for V2 {
	fn add_in_place(&mut self, rhs: impl Operand) -> &mut Self {
		*self += rhs.broadcast();
		self
	}

	fn sub_in_place(&mut self, rhs: impl Operand) -> &mut Self {
		*self -= rhs.broadcast();
		self
	}

	fn mul_in_place(&mut self, rhs: impl Operand) -> &mut Self {
		self.component_mul_assign(&rhs.broadcast());
		self
	}

	fn scale_in_place(&mut self, s: f32) -> &mut Self {
		*self *= s;
		self
	}

	fn length(&self) -> f32 {
		(self[0] * self[0] + self[1] * self[1]).sqrt()
	}

	fn normalize_in_place(&mut self) -> &mut Self {
		let len = self.length();
		if len > 0.0 {
			*self /= len;
		}
		self
	}

	fn distance(&self, other: &V2) -> f32 {
		(self - other).length()
	}

	fn rotated(&self, angle: f32) -> V2 {
		let (s, c) = angle.sin_cos();
		V2::new(self[0] * c - self[1] * s, self[0] * s + self[1] * c)
	}

	fn orthogonal(&self) -> V2 {
		V2::new(-self[1], self[0])
	}

	fn perp_dot(&self, other: &V2) -> f32 {
		self[0] * other[1] - self[1] * other[0]
	}
}

pub fn add(a: V2, b: impl Operand) -> V2 {
	a + b.broadcast()
}

pub fn sub(a: V2, b: impl Operand) -> V2 {
	a - b.broadcast()
}

pub fn mul(a: V2, b: impl Operand) -> V2 {
	a.component_mul(&b.broadcast())
}

pub fn dot(a: V2, b: V2) -> f32 {
	a[0] * b[0] + a[1] * b[1]
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_scalar_and_vector_operands() {
		let mut v = V2::new(1.0, 2.0);
		v.add_in_place(1.0).mul_in_place(V2::new(2.0, 3.0)).sub_in_place(0.5);
		assert_eq!(v, V2::new(3.5, 8.5));
		v.scale_in_place(2.0);
		assert_eq!(v, V2::new(7.0, 17.0));
	}

	#[test]
	fn test_free_functions_are_pure() {
		let a = V2::new(3.0, 4.0);
		let b = V2::new(1.0, -1.0);
		assert_eq!(add(a, b), V2::new(4.0, 3.0));
		assert_eq!(sub(a, 1.0), V2::new(2.0, 3.0));
		assert_eq!(mul(a, -1.0), V2::new(-3.0, -4.0));
		assert_eq!(dot(a, b), -1.0);
		assert_eq!(a, V2::new(3.0, 4.0));
	}

	#[test]
	fn test_normalize() {
		let mut v = V2::new(3.0, 4.0);
		v.normalize_in_place();
		assert_relative_eq!(v.length(), 1.0, epsilon = 1e-6);
		assert_relative_eq!(v[0], 0.6, epsilon = 1e-6);

		let mut zero = V2::zeros();
		zero.normalize_in_place();
		assert_eq!(zero, V2::zeros());
	}

	#[test]
	fn test_distance_and_rotation() {
		let a = V2::new(0.0, 0.0);
		let b = V2::new(3.0, 4.0);
		assert_relative_eq!(a.distance(&b), 5.0);
		let r = V2::new(1.0, 0.0).rotated(std::f32::consts::FRAC_PI_2);
		assert_relative_eq!(r[0], 0.0, epsilon = 1e-6);
		assert_relative_eq!(r[1], 1.0, epsilon = 1e-6);
		assert_eq!(V2::new(1.0, 2.0).orthogonal(), V2::new(-2.0, 1.0));
		assert_eq!(V2::new(1.0, 0.0).perp_dot(&V2::new(0.0, 1.0)), 1.0);
	}
}
